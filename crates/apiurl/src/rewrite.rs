//! Literal text rules turning hard-coded `localhost:4000` URLs into
//! `API_BASE_URL` references.
//!
//! Content is never parsed: every rule is a plain substring replacement, so
//! the output of a rule is exactly what the rule table says, even on inputs
//! that are not valid JavaScript.

/// Presence of this text means the import was already added.
pub const IMPORT_MARKER: &str = "import { API_BASE_URL }";

/// The new import goes on the line after the first occurrence of this text.
pub const IMPORT_ANCHOR: &str = "import axios from 'axios'";

pub const IMPORT_LINE: &str = "import { API_BASE_URL } from '../config/api'";

/// A single global replacement of `pattern` by `replacement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// Applied in this order.
///
/// The first rule only swaps the opening quote of a single-quoted literal for
/// a backtick. The closing `'` stays as it was in the source.
pub const SUBSTITUTIONS: [Substitution; 3] = [
    Substitution {
        pattern: "'http://localhost:4000/api/",
        replacement: "`${API_BASE_URL}/api/",
    },
    Substitution {
        pattern: "`http://localhost:4000/api/",
        replacement: "`${API_BASE_URL}/api/",
    },
    Substitution {
        pattern: "'http://localhost:4000'",
        replacement: "API_BASE_URL",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    /// The marker was already there, nothing inserted.
    Present,
    Inserted,
    /// Neither marker nor anchor found, nothing inserted.
    AnchorMissing,
}

/// Result of rewriting one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub import: ImportStatus,
    /// Occurrences replaced by each rule of [`SUBSTITUTIONS`], same order.
    pub replacements: [usize; SUBSTITUTIONS.len()],
}

impl Rewrite {
    pub fn total_replacements(&self) -> usize {
        self.replacements.iter().sum()
    }

    /// Whether the rewrite produced different content.
    pub fn changed(&self) -> bool {
        self.import == ImportStatus::Inserted || self.total_replacements() > 0
    }
}

/// Adds [`IMPORT_LINE`] after the first [`IMPORT_ANCHOR`], unless
/// [`IMPORT_MARKER`] is already present.
pub fn insert_import(content: &str) -> (String, ImportStatus) {
    if content.contains(IMPORT_MARKER) {
        return (content.to_owned(), ImportStatus::Present);
    }
    let Some(start) = content.find(IMPORT_ANCHOR) else {
        return (content.to_owned(), ImportStatus::AnchorMissing);
    };
    let end = start + IMPORT_ANCHOR.len();
    // The new line takes the anchor line's ending.
    let newline = if content[end..].starts_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    };
    let mut out = String::with_capacity(content.len() + newline.len() + IMPORT_LINE.len());
    out.push_str(&content[..end]);
    out.push_str(newline);
    out.push_str(IMPORT_LINE);
    out.push_str(&content[end..]);
    (out, ImportStatus::Inserted)
}

/// Applies every rule of [`SUBSTITUTIONS`] in order, each over the output of
/// the previous one.
pub fn substitute_urls(content: &str) -> (String, [usize; SUBSTITUTIONS.len()]) {
    let mut counts = [0; SUBSTITUTIONS.len()];
    let mut current = content.to_owned();
    for (count, rule) in counts.iter_mut().zip(SUBSTITUTIONS.iter()) {
        *count = current.matches(rule.pattern).count();
        if *count > 0 {
            current = current.replace(rule.pattern, rule.replacement);
        }
    }
    (current, counts)
}

/// Import insertion followed by the URL substitutions.
pub fn rewrite(content: &str) -> Rewrite {
    let (with_import, import) = insert_import(content);
    let (content, replacements) = substitute_urls(&with_import);
    Rewrite {
        content,
        import,
        replacements,
    }
}

use std::{
    io::{self, Write},
    path::Path,
};

use apiurl::Reporter;

pub const COMPLETE_LINE: &str = "✅ All files fixed!";

/// Writes one line per rewritten file, then a blank line and a closing line.
pub struct LineReporter<W> {
    out: W,
}

pub type StdoutReporter = LineReporter<io::Stdout>;

impl StdoutReporter {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!(%err, "failed to write report line");
        }
    }
}

pub fn fixed_line(path: &Path) -> String {
    format!("✓ Fixed {}", path.display())
}

impl<W: Write> Reporter for LineReporter<W> {
    fn file_fixed(&mut self, path: &Path) {
        self.line(&fixed_line(path));
    }

    fn run_complete(&mut self) {
        self.line(&format!("\n{COMPLETE_LINE}"));
    }
}

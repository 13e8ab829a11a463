use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Files rewritten when nothing else is configured, relative to the front-end
/// project root.
pub const DEFAULT_TARGET_FILES: [&str; 2] = ["src/views/Categories.vue", "src/views/AddProduct.vue"];

/// How rewritten content reaches the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitMode {
    /// Each file is written as soon as it is rewritten. A failure leaves the
    /// earlier files rewritten and the later ones untouched.
    #[default]
    Sequential,
    /// Every file is rewritten and staged next to its target first; targets are
    /// only replaced once all of them staged successfully.
    AllOrNothing,
}

/// Run configuration, as read from a TOML file such as:
///
/// ```toml
/// target_files = ["src/views/Categories.vue", "src/views/AddProduct.vue"]
/// all_or_nothing = true
/// root = "frontend"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Processed in this order.
    pub target_files: Vec<PathBuf>,
    pub all_or_nothing: bool,
    /// Relative target files are resolved against this directory instead of
    /// the working directory.
    pub root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_files: DEFAULT_TARGET_FILES.iter().map(PathBuf::from).collect(),
            all_or_nothing: false,
            root: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Config {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = toml::from_str(&data).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn commit_mode(&self) -> CommitMode {
        if self.all_or_nothing {
            CommitMode::AllOrNothing
        } else {
            CommitMode::Sequential
        }
    }

    /// Where `target` lives on disk.
    pub fn resolve(&self, target: &Path) -> PathBuf {
        match &self.root {
            Some(root) if target.is_relative() => root.join(target),
            _ => target.to_owned(),
        }
    }
}

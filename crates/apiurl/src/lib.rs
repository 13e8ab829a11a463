//! Replaces hard-coded `http://localhost:4000` API URLs in front-end sources
//! with references to an `API_BASE_URL` constant, importing it when needed.
//!
//! [`rewrite`](mod@rewrite) holds the text rules, [`run()`] applies them to
//! files on disk.

pub mod config;
pub mod error;
pub mod rewrite;
pub mod run;

pub use config::{CommitMode, Config};
pub use error::{Error, Result};
pub use run::{FileReport, Reporter, Summary, run};

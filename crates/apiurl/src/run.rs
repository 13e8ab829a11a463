use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use tempfile::NamedTempFile;
use tracing::instrument;

use crate::{
    config::{CommitMode, Config},
    error::{Error, Operation, Result},
    rewrite::{self, ImportStatus, Rewrite},
};

/// Receives progress of a run.
pub trait Reporter {
    /// `path` is the target as configured, not the resolved one.
    fn file_fixed(&mut self, path: &Path);
    fn run_complete(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub import: ImportStatus,
    pub replacements: [usize; rewrite::SUBSTITUTIONS.len()],
}

impl FileReport {
    fn new(path: &Path, rewrite: &Rewrite) -> Self {
        Self {
            path: path.to_owned(),
            import: rewrite.import,
            replacements: rewrite.replacements,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// In processing order.
    pub files: Vec<FileReport>,
}

impl Summary {
    pub fn imports_inserted(&self) -> usize {
        self.files
            .iter()
            .filter(|file| file.import == ImportStatus::Inserted)
            .count()
    }

    pub fn total_replacements(&self) -> usize {
        self.files
            .iter()
            .map(|file| file.replacements.iter().sum::<usize>())
            .sum()
    }
}

/// Rewrites every configured file and reports each one, then the end of the
/// run. The first error aborts the run; what is left on disk depends on the
/// [`CommitMode`].
#[instrument(
    skip_all,
    fields(
        files = %config.target_files.iter().map(|path| path.display()).join(", "),
        mode = ?config.commit_mode(),
    )
)]
pub fn run(config: &Config, reporter: &mut dyn Reporter) -> Result<Summary> {
    let files = match config.commit_mode() {
        CommitMode::Sequential => run_sequential(config, reporter)?,
        CommitMode::AllOrNothing => run_all_or_nothing(config, reporter)?,
    };
    reporter.run_complete();
    Ok(Summary { files })
}

fn run_sequential(config: &Config, reporter: &mut dyn Reporter) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(config.target_files.len());
    for target in &config.target_files {
        let path = config.resolve(target);
        let rewrite = rewrite_file(&path)?;
        fs::write(&path, &rewrite.content)
            .map_err(|source| Error::io(&path, Operation::Write, source))?;
        tracing::info!(path = %path.display(), "wrote rewritten file");
        reporter.file_fixed(target);
        reports.push(FileReport::new(target, &rewrite));
    }
    Ok(reports)
}

fn run_all_or_nothing(config: &Config, reporter: &mut dyn Reporter) -> Result<Vec<FileReport>> {
    let rewrites = config
        .target_files
        .iter()
        .map(|target| -> Result<_> {
            let path = config.resolve(target);
            let rewrite = rewrite_file(&path)?;
            Ok((target, path, rewrite))
        })
        .collect::<Result<Vec<_>>>()?;

    // Dropping a NamedTempFile removes it, so an early return cleans up.
    let staged = rewrites
        .iter()
        .map(|(_, path, rewrite)| stage(path, &rewrite.content))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = staged.len(), "staged every rewritten file");

    let mut reports = Vec::with_capacity(rewrites.len());
    for ((target, _, rewrite), (file, destination)) in rewrites.iter().zip(staged) {
        file.persist(&destination).map_err(|err| Error::Commit {
            path: destination.clone(),
            source: err.error,
        })?;
        tracing::info!(path = %destination.display(), "committed rewritten file");
        reporter.file_fixed(target);
        reports.push(FileReport::new(target, rewrite));
    }
    Ok(reports)
}

#[instrument(skip_all, fields(path = %path.display()))]
fn rewrite_file(path: &Path) -> Result<Rewrite> {
    let content =
        fs::read_to_string(path).map_err(|source| Error::io(path, Operation::Read, source))?;
    let rewrite = rewrite::rewrite(&content);
    match rewrite.import {
        ImportStatus::Inserted => tracing::debug!("inserted API_BASE_URL import"),
        ImportStatus::Present => tracing::debug!("API_BASE_URL import already present"),
        ImportStatus::AnchorMissing => {
            tracing::warn!("no axios import to anchor on, API_BASE_URL import not added")
        }
    }
    if rewrite.changed() {
        tracing::debug!(replacements = ?rewrite.replacements, "substituted URLs");
    } else {
        tracing::debug!("nothing to rewrite");
    }
    Ok(rewrite)
}

/// Writes `content` to a temporary file next to the file `path` points to,
/// with its permissions. Returns the staged file and the path it replaces.
///
/// Symlinks are followed, so committing replaces the linked file and keeps
/// the link, as a plain write would.
fn stage(path: &Path, content: &str) -> Result<(NamedTempFile, PathBuf)> {
    let stage_err = |source: io::Error| Error::Stage {
        path: path.to_owned(),
        source,
    };
    let destination = fs::canonicalize(path).map_err(stage_err)?;
    // Same check a direct write would hit; nothing is truncated.
    OpenOptions::new()
        .write(true)
        .open(&destination)
        .map_err(|source| Error::io(path, Operation::Write, source))?;
    let permissions = fs::metadata(&destination)
        .map_err(stage_err)?
        .permissions();
    let dir = destination.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::Builder::new()
        .prefix(".fix-api-urls")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(stage_err)?;
    file.write_all(content.as_bytes()).map_err(stage_err)?;
    file.as_file().sync_all().map_err(stage_err)?;
    fs::set_permissions(file.path(), permissions).map_err(stage_err)?;
    Ok((file, destination))
}

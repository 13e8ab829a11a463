use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Read => f.write_str("read"),
            Operation::Write => f.write_str("write"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}: no such file")]
    NotFound(PathBuf),
    #[error("{path}: permission denied ({operation})")]
    PermissionDenied {
        path: PathBuf,
        operation: Operation,
        #[source]
        source: io::Error,
    },
    #[error("{0}: content is not valid UTF-8")]
    Encoding(PathBuf),
    #[error("{path}: failed to read")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: failed to write")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: failed to stage the rewritten content")]
    Stage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: failed to move the staged content into place")]
    Commit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: failed to read the configuration")]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: invalid configuration")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Classifies an I/O failure on `path` into the matching variant.
    pub(crate) fn io(path: impl Into<PathBuf>, operation: Operation, source: io::Error) -> Self {
        let path = path.into();
        match (source.kind(), operation) {
            (io::ErrorKind::NotFound, Operation::Read) => Error::NotFound(path),
            (io::ErrorKind::PermissionDenied, _) => Error::PermissionDenied {
                path,
                operation,
                source,
            },
            (io::ErrorKind::InvalidData, Operation::Read) => Error::Encoding(path),
            (_, Operation::Read) => Error::Read { path, source },
            (_, Operation::Write) => Error::Write { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_on_read_is_not_found() {
        let err = Error::io(
            "src/views/Categories.vue",
            Operation::Read,
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "src/views/Categories.vue: no such file");
    }

    #[test]
    fn invalid_data_on_read_is_encoding() {
        let err = Error::io(
            "a.vue",
            Operation::Read,
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn permission_denied_keeps_operation() {
        let err = Error::io(
            "a.vue",
            Operation::Write,
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.to_string(), "a.vue: permission denied (write)");
    }

    #[test]
    fn other_write_failures_are_write() {
        let err = Error::io("a.vue", Operation::Write, io::Error::other("disk full"));
        assert!(matches!(err, Error::Write { .. }));
    }
}

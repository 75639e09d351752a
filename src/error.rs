use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias for workspace operations
pub type Result<T> = std::result::Result<T, WorkspaceError>;

/// Failures a workspace operation can report to its caller
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Commit attempted with nothing staged
    #[error("nothing to commit, stage changes first")]
    EmptyCommit,

    /// A persisted file exists but cannot be parsed
    #[error("corrupt workspace state in {path:?}: {source}")]
    CorruptState {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Disk read or write failed
    #[error("IO error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// A referenced path is absent where presence is required
    #[error("not found: {0}")]
    NotFound(String),

    /// Path is empty, absolute, or escapes the workspace root
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    #[error("invalid branch name: {0:?}")]
    InvalidBranch(String),

    #[error("invalid remote url: {0:?}")]
    InvalidRemote(String),

    #[error("invalid config key: {0:?}")]
    InvalidConfigKey(String),

    #[error("no stash entries found")]
    NoStash,

    #[error("unknown ignore template: {0}")]
    UnknownTemplate(String),

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        source: serde_json::Error,
    },
}

/// Attach the path being touched to a raw IO error
pub(crate) trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| WorkspaceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let err: io::Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        let err = err.at(Path::new("/tmp/state.json")).unwrap_err();

        match &err {
            WorkspaceError::Io { path, source } => {
                assert_eq!(path, Path::new("/tmp/state.json"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("state.json"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            WorkspaceError::EmptyCommit.to_string(),
            "nothing to commit, stage changes first"
        );
        assert_eq!(
            WorkspaceError::InvalidPath("../etc".to_string()).to_string(),
            "invalid path: \"../etc\""
        );
    }
}

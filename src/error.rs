// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types shared by the scene store, project state and document builder.

use std::path::PathBuf;

/// Result alias used across the library.
pub type Result<T, E = SnowflakeError> = std::result::Result<T, E>;

/// Everything that can go wrong while working on a snowflake project.
#[derive(Debug, thiserror::Error)]
pub enum SnowflakeError {
    /// A persisted file does not parse into the expected shape.
    #[error("corrupt state in {}: {reason}", .path.display())]
    CorruptState { path: PathBuf, reason: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The caller asked for a scene position outside the current list.
    #[error("scene index {index} out of range (list has {len} scenes)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The external converter exited unsuccessfully.
    #[error("converter failed on {} ({})", .path.display(), describe_status(.status))]
    Conversion { path: PathBuf, status: Option<i32> },

    /// A project info field needed for building has never been set.
    #[error("project {0} is not set, run `snowflake init` first")]
    MissingInfo(&'static str),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl SnowflakeError {
    /// Wrap an `std::io::Error` with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptState {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for this error.
    ///
    /// Conversion failures pass the converter's own status through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::IndexOutOfRange { .. } | Self::MissingInfo(_) => 2,
            Self::CorruptState { .. } => 3,
            Self::Io { .. } => 4,
            Self::Conversion { status, .. } => match status {
                Some(code) if *code != 0 => *code,
                _ => 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let corrupt = SnowflakeError::corrupt("a.yaml", "bad");
        let io = SnowflakeError::io("a.rst", std::io::Error::from(std::io::ErrorKind::NotFound));
        let range = SnowflakeError::IndexOutOfRange { index: 3, len: 1 };

        assert_eq!(corrupt.exit_code(), 3);
        assert_eq!(io.exit_code(), 4);
        assert_eq!(range.exit_code(), 2);
    }

    #[test]
    fn test_conversion_passes_status_through() {
        let err = SnowflakeError::Conversion {
            path: PathBuf::from("out/one-docs.rst"),
            status: Some(7),
        };
        assert_eq!(err.exit_code(), 7);
        assert!(err.to_string().contains("exit status 7"));

        let killed = SnowflakeError::Conversion {
            path: PathBuf::from("out/one-docs.rst"),
            status: None,
        };
        assert_eq!(killed.exit_code(), 1);
    }
}

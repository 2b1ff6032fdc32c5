// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module handles reading and writing the YAML state files and the
//! write-then-rename helper every other writer goes through.

use crate::error::{Result, SnowflakeError};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Export data to YAML format, replacing the file in one step.
pub fn export_yaml<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)
        .map_err(|e| SnowflakeError::corrupt(path, format!("cannot serialize: {}", e)))?;
    atomic_write(path, yaml.as_bytes())
}

/// Import data from YAML format.
///
/// Returns `Ok(None)` when the file does not exist or is blank.
pub fn import_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let yaml = match fs::read_to_string(path) {
        Ok(yaml) => yaml,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SnowflakeError::io(path, e)),
    };
    if yaml.trim().is_empty() {
        return Ok(None);
    }
    let data = serde_yaml::from_str(&yaml).map_err(|e| SnowflakeError::corrupt(path, e))?;
    Ok(Some(data))
}

/// Read a whole text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| SnowflakeError::io(path, e))
}

/// Whether a project-relative path from a state file points outside the
/// project: absolute, or walking up through `..`.
pub fn escapes_root(rel: &str) -> bool {
    Path::new(rel).is_absolute()
        || rel.starts_with(|c: char| c == '/' || c == '\\')
        || rel
            .split(|c: char| c == '/' || c == '\\')
            .any(|part| part == "..")
}

/// Sibling file `atomic_write` stages into before the rename.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// Write to a sibling temp file, then rename over the target.
///
/// A later read sees either the old contents or the new ones, never a mix.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path(path);

    let written = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp_path, path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(SnowflakeError::io(path, e));
    }
    Ok(())
}

/// Create a directory (and parents) if it is missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| SnowflakeError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scene::Scene;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_imports_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded: Option<Vec<Scene>> = import_yaml(&dir.path().join("nope.yaml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scenes.yaml");
        let scenes = vec![
            Scene::new("A".into(), "first".into(), "snowflake-scenes/a.rst".into()),
            Scene::new("B".into(), "second: with colon".into(), "snowflake-scenes/b.rst".into()),
        ];

        export_yaml(&scenes, &path).unwrap();
        let loaded: Vec<Scene> = import_yaml(&path).unwrap().unwrap();
        assert_eq!(loaded, scenes);
    }

    #[test]
    fn test_wrong_shape_is_corrupt_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scenes.yaml");
        std::fs::write(&path, "just: a mapping\n").unwrap();

        let err = import_yaml::<Vec<Scene>>(&path).unwrap_err();
        assert!(matches!(err, SnowflakeError::CorruptState { .. }));
    }

    #[test]
    fn test_atomic_write_overwrites_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.rst");

        atomic_write(&path, b"a much longer first version").unwrap();
        atomic_write(&path, b"short").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_escapes_root() {
        for rel in ["snowflake-scenes/a.rst", "snowflake-files/one-line.rst", "a..b.rst"] {
            assert!(!escapes_root(rel), "{}", rel);
        }
        for rel in ["../notes.txt", "snowflake-scenes/../../x", "/etc/passwd", "..\\x.rst", "\\x.rst"] {
            assert!(escapes_root(rel), "{}", rel);
        }
    }

    #[test]
    fn test_atomic_write_into_missing_dir_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("file.rst");

        let err = atomic_write(&path, b"x").unwrap_err();
        assert!(matches!(err, SnowflakeError::Io { .. }));
        assert!(!path.exists());
    }
}

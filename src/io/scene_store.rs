// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered scene list and its on-disk mirror.
//!
//! The list itself lives in `snowflake-scenes.yaml`; every scene also owns a
//! backing file whose first two lines mirror its title and description.
//! Mutations are applied to a copy of the list, persisted, and only then
//! committed, so a failed write leaves the in-memory list as it was.

use crate::error::{Result, SnowflakeError};
use crate::io::serialization::{
    atomic_write, ensure_dir, escapes_root, export_yaml, import_yaml, read_text,
};
use crate::models::scene::{single_line, Scene, SceneFile};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Scene list file, relative to the project root.
pub const SCENES_YAML: &str = "snowflake-scenes.yaml";

/// Directory holding the scene backing files.
pub const SCENES_DIR: &str = "snowflake-scenes";

/// What a refresh changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Indices whose title or description was re-read from disk.
    pub updated: Vec<usize>,
    /// Backing files rewritten into canonical form.
    pub repaired: Vec<PathBuf>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.updated.is_empty() && self.repaired.is_empty()
    }
}

/// The ordered scene list of one project.
#[derive(Debug)]
pub struct SceneStore {
    root: PathBuf,
    scenes: Vec<Scene>,
}

impl SceneStore {
    /// Load the persisted list under `root`, or start empty if there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let list_path = root.join(SCENES_YAML);
        let scenes: Vec<Scene> = import_yaml(&list_path)?.unwrap_or_default();

        let mut seen = HashSet::new();
        for scene in &scenes {
            if escapes_root(&scene.filename) {
                return Err(SnowflakeError::corrupt(
                    &list_path,
                    format!("scene file {} leaves the project", scene.filename),
                ));
            }
            if !seen.insert(scene.filename.as_str()) {
                return Err(SnowflakeError::corrupt(
                    &list_path,
                    format!("scene file {} is listed twice", scene.filename),
                ));
            }
        }

        log::debug!("Loaded {} scenes from {}", scenes.len(), list_path.display());
        Ok(Self {
            root: root.to_path_buf(),
            scenes,
        })
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Path of the persisted list.
    pub fn list_path(&self) -> PathBuf {
        self.root.join(SCENES_YAML)
    }

    /// Absolute path of a scene's backing file.
    pub fn backing_path(&self, scene: &Scene) -> PathBuf {
        self.root.join(&scene.filename)
    }

    /// Persist the current list, replacing the previous file.
    pub fn save(&self) -> Result<()> {
        export_yaml(&self.scenes, &self.list_path())
    }

    /// Re-read every title and description from the backing files.
    ///
    /// Files with a missing or partial header are rewritten in canonical
    /// form first. Stops at the first file that cannot be read or repaired,
    /// leaving the list untouched. The list file is only rewritten when a
    /// title or description changed.
    pub fn refresh_all(&mut self) -> Result<RefreshReport> {
        let mut staged = self.scenes.clone();
        let mut report = RefreshReport::default();

        for (index, scene) in staged.iter_mut().enumerate() {
            let path = self.root.join(&scene.filename);
            let contents = read_text(&path)?;
            let parsed = SceneFile::parse(&contents);

            let canonical = parsed.render();
            if canonical != contents {
                log::warn!("Repairing scene header in {}", path.display());
                atomic_write(&path, canonical.as_bytes())?;
                report.repaired.push(path);
            }

            if scene.title != parsed.title || scene.descr != parsed.descr {
                log::debug!("Scene {} is now {:?}", index, parsed.title);
                scene.title = parsed.title;
                scene.descr = parsed.descr;
                report.updated.push(index);
            }
        }

        if !report.updated.is_empty() {
            self.commit(staged)?;
        }
        Ok(report)
    }

    /// Create a scene at `index` with a fresh backing file.
    ///
    /// `index` must be 0 on an empty list, otherwise anywhere in `0..=len`.
    pub fn insert_at(&mut self, index: usize, title: &str, descr: &str) -> Result<Scene> {
        if index > self.scenes.len() {
            return Err(SnowflakeError::IndexOutOfRange {
                index,
                len: self.scenes.len(),
            });
        }

        let scene = Scene::new(single_line(title), single_line(descr), self.new_filename());
        let path = self.backing_path(&scene);

        ensure_dir(&self.root.join(SCENES_DIR))?;
        atomic_write(&path, scene.initial_contents().as_bytes())?;

        let mut staged = self.scenes.clone();
        staged.insert(index, scene.clone());
        if let Err(e) = self.commit(staged) {
            let _ = std::fs::remove_file(&path);
            return Err(e);
        }

        log::info!("Added scene {:?} at {}, total: {}", scene.title, index, self.scenes.len());
        Ok(scene)
    }

    /// Move the scene at `from` so it ends up at `to`.
    ///
    /// Pop-then-insert: `to` is an index into the list after removal.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.scenes.len();
        for index in [from, to] {
            if index >= len {
                return Err(SnowflakeError::IndexOutOfRange { index, len });
            }
        }

        let mut staged = self.scenes.clone();
        let scene = staged.remove(from);
        staged.insert(to, scene);
        self.commit(staged)?;

        log::info!("Moved scene {} to {}", from, to);
        Ok(())
    }

    /// Backing file of the scene at `index`, `None` for an empty list.
    pub fn file_at(&self, index: usize) -> Result<Option<PathBuf>> {
        if self.scenes.is_empty() {
            return Ok(None);
        }
        self.scenes
            .get(index)
            .map(|scene| Some(self.backing_path(scene)))
            .ok_or(SnowflakeError::IndexOutOfRange {
                index,
                len: self.scenes.len(),
            })
    }

    /// Persist `staged` and make it the current list.
    fn commit(&mut self, staged: Vec<Scene>) -> Result<()> {
        export_yaml(&staged, &self.list_path())?;
        self.scenes = staged;
        Ok(())
    }

    fn new_filename(&self) -> String {
        loop {
            let candidate = format!("{}/{}.rst", SCENES_DIR, uuid::Uuid::new_v4());
            let taken = self.scenes.iter().any(|s| s.filename == candidate)
                || self.root.join(&candidate).exists();
            if !taken {
                return candidate;
            }
        }
    }
}

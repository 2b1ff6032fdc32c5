// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! A snowflake project rooted in one working directory.
//!
//! Ties together the project info, the fixed summary documents and the scene
//! store, and persists them to `snowflake.yaml`.

use crate::error::{Result, SnowflakeError};
use crate::io::scene_store::{SceneStore, SCENES_DIR};
use crate::io::serialization::{atomic_write, ensure_dir, escapes_root, export_yaml, import_yaml};
use crate::models::project::{FileList, FixedDocuments, ProjectData, ProjectInfo, FILES_DIR};
use std::path::{Path, PathBuf};

/// Project state file, relative to the project root.
pub const PROJECT_YAML: &str = "snowflake.yaml";

/// Build output directory, relative to the project root.
pub const OUT_DIR: &str = "out";

/// One snowflake project. Owns its scene store.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    pub info: ProjectInfo,
    pub documents: FixedDocuments,
    pub scenes: SceneStore,
}

impl Project {
    /// Open the project under `root`, creating the directory layout and any
    /// missing fixed documents. Does not read `snowflake.yaml`.
    pub fn open(root: &Path) -> Result<Self> {
        ensure_dir(&root.join(FILES_DIR))?;
        ensure_dir(&root.join(SCENES_DIR))?;

        let project = Self {
            root: root.to_path_buf(),
            info: ProjectInfo::default(),
            documents: FixedDocuments::default(),
            scenes: SceneStore::load(root)?,
        };
        project.ensure_documents()?;
        Ok(project)
    }

    /// Write the placeholder text into every fixed document that is missing.
    fn ensure_documents(&self) -> Result<()> {
        for (doc, rel) in self.documents.iter() {
            let path = self.path(rel);
            if !path.exists() {
                log::info!("Creating {}", path.display());
                if let Some(parent) = path.parent() {
                    ensure_dir(parent)?;
                }
                atomic_write(&path, doc.placeholder().as_bytes())?;
            }
        }
        Ok(())
    }

    /// Open the project and merge in `snowflake.yaml` if it exists.
    pub fn load(root: &Path) -> Result<Self> {
        let mut project = Self::open(root)?;
        project.load_state()?;
        Ok(project)
    }

    /// Merge the persisted state into this project.
    ///
    /// Info is merged key by key: a value in the file wins, a null or absent
    /// key keeps what is already known. The scene list itself is owned by
    /// the scene store and is not replaced from here.
    pub fn load_state(&mut self) -> Result<bool> {
        let path = self.state_path();
        let Some(data) = import_yaml::<ProjectData>(&path)? else {
            return Ok(false);
        };

        for (_, rel) in data.file_list.snowflake.iter() {
            if escapes_root(rel) {
                return Err(SnowflakeError::corrupt(
                    &path,
                    format!("document path {} leaves the project", rel),
                ));
            }
        }

        self.info.merge(data.info);
        self.documents = data.file_list.snowflake;
        self.ensure_documents()?;

        log::debug!("Loaded project state from {}", path.display());
        Ok(true)
    }

    /// Persist info, document paths and the current scene list.
    pub fn save_state(&self) -> Result<()> {
        let data = ProjectData {
            info: self.info.clone(),
            file_list: FileList {
                snowflake: self.documents.clone(),
                scenes: self.scenes.scenes().to_vec(),
            },
        };
        export_yaml(&data, &self.state_path())?;
        log::info!("Saved project state to {}", self.state_path().display());
        Ok(())
    }

    /// Ask for every info field that is still unset.
    ///
    /// Returns whether anything was filled in.
    pub fn ensure_info_complete<F>(&mut self, mut prompt: F) -> bool
    where
        F: FnMut(&str) -> String,
    {
        let missing = self.info.missing();
        for field in &missing {
            let value = prompt(field.prompt());
            self.info.set(*field, value.trim().to_string());
        }
        !missing.is_empty()
    }

    /// Full setup of a working directory: layout, state merge, info, save.
    pub fn init<F>(root: &Path, prompt: F) -> Result<Self>
    where
        F: FnMut(&str) -> String,
    {
        let mut project = Self::load(root)?;
        project.ensure_info_complete(prompt);
        ensure_dir(&project.out_dir())?;
        project.save_state()?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(PROJECT_YAML)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join(OUT_DIR)
    }

    /// Resolve a project-relative path.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

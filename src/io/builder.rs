// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Document building and conversion.
//!
//! Merges the fixed summary documents and the ordered scene files into
//! output documents under `out/`, then hands each one to an external
//! converter.

use crate::config::ConverterConfig;
use crate::error::{Result, SnowflakeError};
use crate::io::serialization::{atomic_write, ensure_dir, read_text};
use crate::manager::MANAGERS;
use crate::models::project::{FixedDocument, InfoField};
use crate::project::Project;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Merged one-line/one-paragraph/one-page output.
pub const ONE_DOCS_FILE: &str = "one-docs.rst";

/// Copy of the synopsis.
pub const SYNOPSIS_FILE: &str = "synopsis.rst";

/// Turns a built text document into another format.
pub trait Converter {
    /// Convert `input`, returning the path of the converted file.
    fn convert(&self, input: &Path) -> Result<PathBuf>;
}

/// Runs `<command> <input> <output>` as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    config: ConverterConfig,
}

impl CommandConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// `input` with its extension replaced by the configured suffix.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        input.with_extension(self.config.suffix.trim_start_matches('.'))
    }
}

impl Converter for CommandConverter {
    fn convert(&self, input: &Path) -> Result<PathBuf> {
        let output = self.output_path(input);
        log::info!(
            "Converting {} -> {} with {}",
            input.display(),
            output.display(),
            self.config.command.display()
        );

        let status = Command::new(&self.config.command)
            .arg(input)
            .arg(&output)
            .status()
            .map_err(|e| SnowflakeError::io(&self.config.command, e))?;

        if !status.success() {
            return Err(SnowflakeError::Conversion {
                path: input.to_path_buf(),
                status: status.code(),
            });
        }
        Ok(output)
    }
}

/// Builds the output documents of one project.
pub struct DocumentBuilder<'a> {
    converter: &'a dyn Converter,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(converter: &'a dyn Converter) -> Self {
        Self { converter }
    }

    /// Write the merged one-docs file and the synopsis copy.
    ///
    /// Returns `[merged, synopsis]`.
    pub fn build_fixed_documents(&self, project: &Project) -> Result<Vec<PathBuf>> {
        let out_dir = project.out_dir();
        ensure_dir(&out_dir)?;

        let mut merged = String::new();
        for doc in [FixedDocument::OneLine, FixedDocument::OneParagraph, FixedDocument::OnePage] {
            let heading = doc.heading();
            let text = read_text(&project.path(project.documents.path(doc)))?;

            merged.push_str(&heading);
            merged.push('\n');
            merged.push_str(&"=".repeat(heading.chars().count()));
            merged.push_str("\n\n");
            merged.push_str(text.trim());
            merged.push_str("\n\n");
        }

        let ones_path = out_dir.join(ONE_DOCS_FILE);
        atomic_write(&ones_path, merged.as_bytes())?;

        let synopsis_src = project.path(project.documents.path(FixedDocument::Synopsis));
        let synopsis = fs::read(&synopsis_src).map_err(|e| SnowflakeError::io(&synopsis_src, e))?;
        let synopsis_path = out_dir.join(SYNOPSIS_FILE);
        atomic_write(&synopsis_path, &synopsis)?;

        log::info!("Built {} and {}", ones_path.display(), synopsis_path.display());
        Ok(vec![ones_path, synopsis_path])
    }

    /// Concatenate every scene file, in list order, into `out/<name>.rst`.
    pub fn build_scene_document(&self, project: &Project) -> Result<PathBuf> {
        let name = project
            .info
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(SnowflakeError::MissingInfo(InfoField::Name.key()))?;

        let out_dir = project.out_dir();
        ensure_dir(&out_dir)?;

        let mut merged = Vec::new();
        for scene in project.scenes.scenes() {
            let path = project.scenes.backing_path(scene);
            let contents = fs::read(&path).map_err(|e| SnowflakeError::io(&path, e))?;
            merged.extend_from_slice(&contents);
            merged.push(b'\n');
        }

        let out_path = out_dir.join(format!("{}.rst", output_stem(name)));
        atomic_write(&out_path, &merged)?;

        log::info!(
            "Built {} from {} scenes",
            out_path.display(),
            project.scenes.len()
        );
        Ok(out_path)
    }

    pub fn convert(&self, path: &Path) -> Result<PathBuf> {
        self.converter.convert(path)
    }

    /// Build and convert everything, stopping at the first failure.
    ///
    /// Returns every file written, built and converted, in order.
    pub fn build_all(&self, project: &Project) -> Result<Vec<PathBuf>> {
        let mut outputs = Vec::new();
        for manager in MANAGERS {
            outputs.extend(manager.build(project, self)?);
        }
        Ok(outputs)
    }
}

/// File stem for the scene document; path separators are not allowed in it.
fn output_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect()
}

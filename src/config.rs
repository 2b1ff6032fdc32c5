// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration.

use std::path::PathBuf;

/// Default external converter (reStructuredText to OpenDocument).
pub const DEFAULT_CONVERTER: &str = "/usr/bin/rst2odt";

/// Suffix given to converted outputs by default.
pub const DEFAULT_SUFFIX: &str = ".odt";

/// External converter command and the suffix of what it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub command: PathBuf,
    pub suffix: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from(DEFAULT_CONVERTER),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// Everything a run needs to know besides the project files themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project root directory.
    pub root: PathBuf,
    pub converter: ConverterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            converter: ConverterConfig::default(),
        }
    }
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pane layouts requested by each outline group.
//!
//! The editor owns the actual windows; this is only a description of which
//! files to open next to the outline and how wide each pane should be.

use serde::Serialize;
use std::path::PathBuf;

/// One editor pane beside the outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pane {
    /// File to open, `None` for an empty pane the editor fills later.
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_width: Option<u16>,
}

impl Pane {
    pub fn file(file: PathBuf) -> Self {
        Self {
            file: Some(file),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self.text_width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }
}

/// Panes to show, left to right and top to bottom, and which gets focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub panes: Vec<Pane>,
    pub focus: usize,
}

impl Layout {
    /// A single empty pane.
    pub fn single() -> Self {
        Self {
            panes: vec![Pane::default()],
            focus: 0,
        }
    }
}

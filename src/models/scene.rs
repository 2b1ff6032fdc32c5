// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene records and the comment header mirrored at the top of each scene file.
//!
//! A scene file starts with two reStructuredText comment lines holding the
//! scene title and description, followed by a blank separator line:
//!
//! ```text
//! .. The title
//! .. A short description
//!
//! Free-form prose...
//! ```

use serde::{Deserialize, Serialize};

/// Comment marker opening each header line.
pub const MARKER: &str = "..";

/// One narrative unit backed by a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub descr: String,
    pub filename: String,
}

impl Scene {
    /// Create a new scene record.
    pub fn new(title: String, descr: String, filename: String) -> Self {
        Self {
            title,
            descr,
            filename,
        }
    }

    /// Canonical contents of a fresh backing file for this scene.
    pub fn initial_contents(&self) -> String {
        SceneFile {
            title: self.title.clone(),
            descr: self.descr.clone(),
            body: String::new(),
        }
        .render()
    }
}

/// A scene file split into its header fields and the prose below them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneFile {
    pub title: String,
    pub descr: String,
    pub body: String,
}

impl SceneFile {
    /// Parse file contents, tolerating a missing or partial header.
    ///
    /// Missing comment lines parse as empty fields and a missing separator is
    /// simply not consumed, so `render` puts everything back in canonical form.
    pub fn parse(contents: &str) -> Self {
        let mut rest = contents;

        let title = take_comment(&mut rest);
        let descr = match title {
            Some(_) => take_comment(&mut rest),
            None => None,
        };

        if let Some((line, tail)) = next_line(rest) {
            if line.trim().is_empty() {
                rest = tail;
            }
        }

        Self {
            title: title.unwrap_or_default(),
            descr: descr.unwrap_or_default(),
            body: rest.to_string(),
        }
    }

    /// Render in canonical form: two comment lines, a blank line, then the body.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n\n{}",
            comment_line(&self.title),
            comment_line(&self.descr),
            self.body
        )
    }
}

/// Format one header line.
pub fn comment_line(text: &str) -> String {
    format!("{} {}", MARKER, text)
}

/// Collapse user input to a single header-safe line.
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split off the first line, without its terminator.
fn next_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    match text.find('\n') {
        Some(pos) => {
            let line = &text[..pos];
            Some((line.strip_suffix('\r').unwrap_or(line), &text[pos + 1..]))
        }
        None => Some((text, "")),
    }
}

/// Consume a leading comment line and return its text.
fn take_comment(rest: &mut &str) -> Option<String> {
    let (line, tail) = next_line(*rest)?;
    let text = if line == MARKER {
        ""
    } else {
        line.strip_prefix(MARKER)?.strip_prefix(' ')?
    };
    *rest = tail;
    Some(text.to_string())
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! This module defines the project info record, the four fixed summary
//! documents, and the shape of the persisted `snowflake.yaml` file.

use super::scene::Scene;
use serde::{Deserialize, Deserializer, Serialize};

/// Directory holding the fixed summary documents.
pub const FILES_DIR: &str = "snowflake-files";

/// Name, author and copyright year of the work.
///
/// Every field stays `None` until the user supplies it once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "year_or_string")]
    pub copyright_year: Option<String>,
}

/// Fields of [`ProjectInfo`] that are prompted for, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    Name,
    Author,
    CopyrightYear,
}

impl InfoField {
    pub const ALL: [InfoField; 3] = [InfoField::Name, InfoField::Author, InfoField::CopyrightYear];

    /// Prompt label shown to the user.
    pub fn prompt(self) -> &'static str {
        match self {
            InfoField::Name => "Snowflake name> ",
            InfoField::Author => "Author name> ",
            InfoField::CopyrightYear => "Copyright year> ",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            InfoField::Name => "name",
            InfoField::Author => "author",
            InfoField::CopyrightYear => "copyright-year",
        }
    }
}

impl ProjectInfo {
    pub fn get(&self, field: InfoField) -> Option<&str> {
        match field {
            InfoField::Name => self.name.as_deref(),
            InfoField::Author => self.author.as_deref(),
            InfoField::CopyrightYear => self.copyright_year.as_deref(),
        }
    }

    pub fn set(&mut self, field: InfoField, value: String) {
        let slot = match field {
            InfoField::Name => &mut self.name,
            InfoField::Author => &mut self.author,
            InfoField::CopyrightYear => &mut self.copyright_year,
        };
        *slot = Some(value);
    }

    /// Shallow per-key merge: values present in `loaded` win, absent ones
    /// leave what we already know untouched.
    pub fn merge(&mut self, loaded: ProjectInfo) {
        for field in InfoField::ALL {
            if let Some(value) = loaded.get(field) {
                self.set(field, value.to_string());
            }
        }
    }

    /// Fields that still need a value. Blank counts as unset.
    pub fn missing(&self) -> Vec<InfoField> {
        InfoField::ALL
            .into_iter()
            .filter(|f| self.get(*f).map_or(true, |v| v.trim().is_empty()))
            .collect()
    }
}

/// Accept `copyright-year: 2024` as well as `copyright-year: "2024"`.
fn year_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Year>::deserialize(deserializer)?.map(|year| match year {
        Year::Number(n) => n.to_string(),
        Year::Text(s) => s,
    }))
}

/// One of the four always-present summary levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedDocument {
    OneLine,
    OneParagraph,
    OnePage,
    Synopsis,
}

impl FixedDocument {
    pub const ALL: [FixedDocument; 4] = [
        FixedDocument::OneLine,
        FixedDocument::OneParagraph,
        FixedDocument::OnePage,
        FixedDocument::Synopsis,
    ];

    /// Logical name, also used as the file stem.
    pub fn name(self) -> &'static str {
        match self {
            FixedDocument::OneLine => "one-line",
            FixedDocument::OneParagraph => "one-paragraph",
            FixedDocument::OnePage => "one-page",
            FixedDocument::Synopsis => "synopsis",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.rst", self.name())
    }

    /// Placeholder written when the document does not exist yet.
    pub fn placeholder(self) -> &'static str {
        match self {
            FixedDocument::OneLine => ".. Replace this comment with your one-line summary.",
            FixedDocument::OneParagraph => {
                ".. Expand your one-line summary to a paragraph, replace this comment with that."
            }
            FixedDocument::OnePage => {
                ".. Expand every sentence from your paragraph to replace this comment with a one-page summary."
            }
            FixedDocument::Synopsis => {
                ".. You may also write a longer synopsis instead of this comment."
            }
        }
    }

    /// Heading used in the merged document, e.g. `One Paragraph`.
    pub fn heading(self) -> String {
        let last = self.name().rsplit('-').next().unwrap_or_default();
        let mut chars = last.chars();
        let word = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("One {}", word)
    }
}

/// Paths of the fixed documents, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FixedDocuments {
    pub one_line: String,
    pub one_paragraph: String,
    pub one_page: String,
    pub synopsis: String,
}

impl Default for FixedDocuments {
    fn default() -> Self {
        let path = |doc: FixedDocument| format!("{}/{}", FILES_DIR, doc.file_name());
        Self {
            one_line: path(FixedDocument::OneLine),
            one_paragraph: path(FixedDocument::OneParagraph),
            one_page: path(FixedDocument::OnePage),
            synopsis: path(FixedDocument::Synopsis),
        }
    }
}

impl FixedDocuments {
    pub fn path(&self, doc: FixedDocument) -> &str {
        match doc {
            FixedDocument::OneLine => &self.one_line,
            FixedDocument::OneParagraph => &self.one_paragraph,
            FixedDocument::OnePage => &self.one_page,
            FixedDocument::Synopsis => &self.synopsis,
        }
    }

    /// Documents with their paths, in the fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (FixedDocument, &str)> + '_ {
        FixedDocument::ALL.into_iter().map(move |doc| (doc, self.path(doc)))
    }
}

/// The `file-list` section of the project file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub snowflake: FixedDocuments,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

/// Complete project data for serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub info: ProjectInfo,
    #[serde(default, rename = "file-list")]
    pub file_list: FileList,
}

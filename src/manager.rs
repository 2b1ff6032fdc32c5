// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The two outline groups and what each contributes.
//!
//! Every group shows itself in the outline, asks for a pane layout when
//! selected, and builds its own output documents.

use crate::error::Result;
use crate::io::builder::DocumentBuilder;
use crate::project::Project;
use crate::ui::layout::{Layout, Pane};
use serde::Serialize;
use std::path::PathBuf;

/// Top-level outline groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Summary,
    Scenes,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Summary, Group::Scenes];

    pub fn manager(self) -> &'static dyn Manager {
        match self {
            Group::Summary => &SummaryDocumentManager,
            Group::Scenes => &SceneListManager,
        }
    }
}

/// Capabilities shared by every outline group.
pub trait Manager: Sync {
    fn group(&self) -> Group;

    /// Header text shown in the outline.
    fn title(&self) -> &'static str;

    /// Append this group's outline lines (header included) to `lines`.
    fn contribute_to_outline(&self, project: &Project, expanded: bool, lines: &mut Vec<String>);

    /// Panes to show when this group is selected.
    fn layout(&self, project: &Project) -> Layout;

    /// Build and convert this group's output documents.
    fn build(&self, project: &Project, builder: &DocumentBuilder<'_>) -> Result<Vec<PathBuf>>;
}

/// All managers in outline and build order.
pub static MANAGERS: &[&dyn Manager] = &[&SummaryDocumentManager, &SceneListManager];

fn header(title: &str, expanded: bool) -> String {
    format!("{}{}", if expanded { '-' } else { '+' }, title)
}

/// The one-line, one-paragraph, one-page and synopsis documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryDocumentManager;

impl Manager for SummaryDocumentManager {
    fn group(&self) -> Group {
        Group::Summary
    }

    fn title(&self) -> &'static str {
        "SNOWFLAKE"
    }

    fn contribute_to_outline(&self, project: &Project, expanded: bool, lines: &mut Vec<String>) {
        lines.push(header(self.title(), expanded));
        if expanded {
            for (_, rel) in project.documents.iter() {
                let file_name = rel.rsplit('/').next().unwrap_or(rel);
                lines.push(format!("  {}", file_name));
            }
            lines.push(String::new());
        }
    }

    fn layout(&self, project: &Project) -> Layout {
        use crate::models::project::FixedDocument::*;

        let pane = |doc| Pane::file(project.path(project.documents.path(doc)));
        Layout {
            panes: vec![
                pane(OneLine).with_height(3),
                pane(OneParagraph).with_width(60),
                pane(OnePage).with_width(80),
                pane(Synopsis).with_width(90),
            ],
            focus: 0,
        }
    }

    fn build(&self, project: &Project, builder: &DocumentBuilder<'_>) -> Result<Vec<PathBuf>> {
        let built = builder.build_fixed_documents(project)?;
        let mut outputs = built.clone();
        for path in &built {
            outputs.push(builder.convert(path)?);
        }
        Ok(outputs)
    }
}

/// The ordered scene list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneListManager;

impl Manager for SceneListManager {
    fn group(&self) -> Group {
        Group::Scenes
    }

    fn title(&self) -> &'static str {
        "SCENES"
    }

    fn contribute_to_outline(&self, project: &Project, expanded: bool, lines: &mut Vec<String>) {
        lines.push(header(self.title(), expanded));
        if expanded {
            for scene in project.scenes.scenes() {
                lines.push(format!("  {}", scene.title));
                lines.push(format!("   {}", scene.descr));
            }
        }
    }

    fn layout(&self, _project: &Project) -> Layout {
        Layout::single()
    }

    fn build(&self, project: &Project, builder: &DocumentBuilder<'_>) -> Result<Vec<PathBuf>> {
        let built = builder.build_scene_document(project)?;
        let converted = builder.convert(&built)?;
        Ok(vec![built, converted])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_managers_match_groups() {
        for (manager, group) in MANAGERS.iter().zip(Group::ALL) {
            assert_eq!(manager.group(), group);
            assert_eq!(group.manager().title(), manager.title());
        }
    }

    #[test]
    fn test_summary_outline() {
        let temp = TempDir::new().unwrap();
        let project = Project::open(temp.path()).unwrap();

        let mut collapsed = Vec::new();
        SummaryDocumentManager.contribute_to_outline(&project, false, &mut collapsed);
        assert_eq!(collapsed, vec!["+SNOWFLAKE"]);

        let mut expanded = Vec::new();
        SummaryDocumentManager.contribute_to_outline(&project, true, &mut expanded);
        assert_eq!(
            expanded,
            vec![
                "-SNOWFLAKE",
                "  one-line.rst",
                "  one-paragraph.rst",
                "  one-page.rst",
                "  synopsis.rst",
                "",
            ]
        );
    }

    #[test]
    fn test_scene_outline() {
        let temp = TempDir::new().unwrap();
        let mut project = Project::open(temp.path()).unwrap();
        project.scenes.insert_at(0, "Arrival", "Rain").unwrap();

        let mut lines = Vec::new();
        SceneListManager.contribute_to_outline(&project, true, &mut lines);
        assert_eq!(lines, vec!["-SCENES", "  Arrival", "   Rain"]);
    }

    #[test]
    fn test_summary_layout_widths() {
        let temp = TempDir::new().unwrap();
        let project = Project::open(temp.path()).unwrap();

        let layout = SummaryDocumentManager.layout(&project);
        let widths: Vec<_> = layout.panes.iter().map(|p| p.width).collect();
        assert_eq!(widths, vec![None, Some(60), Some(80), Some(90)]);
        assert_eq!(layout.panes[0].height, Some(3));
        assert_eq!(layout.focus, 0);
    }
}

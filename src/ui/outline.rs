// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Outline rendering and display-line resolution.
//!
//! The outline is a small text menu:
//!
//! ```text
//! MENU
//! ====
//!
//! +SNOWFLAKE
//! -SCENES
//!   First scene title
//!    First scene description
//! ```
//!
//! Each scene takes two lines, so a display line maps back to a scene index
//! by plain arithmetic from the group header.

use crate::manager::{Group, MANAGERS};
use crate::project::Project;
use serde::Serialize;
use std::collections::HashSet;

/// Lines every scene occupies in an expanded outline (title, description).
pub const LINES_PER_SCENE: usize = 2;

const PREAMBLE: [&str; 3] = ["MENU", "====", ""];

/// Which groups are expanded. Everything starts collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineState {
    expanded: HashSet<Group>,
}

impl OutlineState {
    pub fn is_expanded(&self, group: Group) -> bool {
        self.expanded.contains(&group)
    }

    pub fn set_expanded(&mut self, group: Group, expanded: bool) {
        if expanded {
            self.expanded.insert(group);
        } else {
            self.expanded.remove(&group);
        }
    }

    /// Flip a group and return its new state.
    pub fn toggle(&mut self, group: Group) -> bool {
        let expanded = !self.is_expanded(group);
        self.set_expanded(group, expanded);
        expanded
    }
}

/// Where a display line falls in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuPosition {
    /// Group whose header is at or above the line, if any.
    pub group: Option<Group>,
    /// 1-based line of that group's header, 0 when there is none.
    pub header_line: usize,
    /// Distance from the header line.
    pub offset: usize,
}

impl MenuPosition {
    /// Scene index under the cursor: `(line - header - 1) / 2`.
    ///
    /// `None` on the group header itself or outside the scene group.
    pub fn scene_index(&self) -> Option<usize> {
        match self.group {
            Some(Group::Scenes) if self.offset > 0 => Some((self.offset - 1) / LINES_PER_SCENE),
            _ => None,
        }
    }

    /// Display line of the title line of scene `index` in this group.
    pub fn scene_line(&self, index: usize) -> usize {
        self.header_line + 1 + LINES_PER_SCENE * index
    }
}

/// Render the full outline.
pub fn render(project: &Project, state: &OutlineState) -> Vec<String> {
    let mut lines: Vec<String> = PREAMBLE.iter().map(|l| l.to_string()).collect();
    for manager in MANAGERS {
        manager.contribute_to_outline(project, state.is_expanded(manager.group()), &mut lines);
    }
    lines
}

/// Map a 1-based display line of `lines` back to a group and offset.
///
/// The last group header at or above the line wins.
pub fn resolve(lines: &[String], line: usize) -> MenuPosition {
    let mut position = MenuPosition {
        group: None,
        header_line: 0,
        offset: 0,
    };

    for (i, text) in lines.iter().enumerate().take(line) {
        let Some(title) = text.strip_prefix(|c: char| c == '+' || c == '-') else {
            continue;
        };
        if let Some(manager) = MANAGERS.iter().find(|m| m.title() == title) {
            position.group = Some(manager.group());
            position.header_line = i + 1;
        }
    }

    if position.group.is_some() {
        position.offset = line - position.header_line;
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn project_with_scenes(titles: &[&str]) -> (Project, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut project = Project::open(temp.path()).unwrap();
        for (i, title) in titles.iter().enumerate() {
            project
                .scenes
                .insert_at(i, title, &format!("about {}", title))
                .unwrap();
        }
        (project, temp)
    }

    #[test]
    fn test_render_collapsed() {
        let (project, _temp) = project_with_scenes(&["A"]);
        let lines = render(&project, &OutlineState::default());
        assert_eq!(lines, vec!["MENU", "====", "", "+SNOWFLAKE", "+SCENES"]);
    }

    #[test]
    fn test_render_expanded_scenes() {
        let (project, _temp) = project_with_scenes(&["A", "B"]);
        let mut state = OutlineState::default();
        state.set_expanded(Group::Scenes, true);

        let lines = render(&project, &state);
        assert_eq!(
            lines,
            vec![
                "MENU", "====", "", "+SNOWFLAKE", "-SCENES", "  A", "   about A", "  B",
                "   about B",
            ]
        );
    }

    #[test]
    fn test_resolve_scene_lines() {
        let (project, _temp) = project_with_scenes(&["A", "B"]);
        let mut state = OutlineState::default();
        state.set_expanded(Group::Scenes, true);
        let lines = render(&project, &state);

        // header on line 5, A on 6-7, B on 8-9
        let header = resolve(&lines, 5);
        assert_eq!(header.group, Some(Group::Scenes));
        assert_eq!(header.header_line, 5);
        assert_eq!(header.scene_index(), None);

        let indices: Vec<_> = (6..=9).map(|l| resolve(&lines, l).scene_index()).collect();
        assert_eq!(indices, vec![Some(0), Some(0), Some(1), Some(1)]);
        assert_eq!(header.scene_line(1), 8);
    }

    #[test]
    fn test_resolve_with_expanded_summary_above() {
        let (project, _temp) = project_with_scenes(&["A"]);
        let mut state = OutlineState::default();
        state.set_expanded(Group::Summary, true);
        state.set_expanded(Group::Scenes, true);
        let lines = render(&project, &state);

        // MENU, ====, "", -SNOWFLAKE, 4 files, "", -SCENES on line 10
        let summary = resolve(&lines, 6);
        assert_eq!(summary.group, Some(Group::Summary));
        assert_eq!(summary.scene_index(), None);

        let scene = resolve(&lines, 11);
        assert_eq!(scene.header_line, 10);
        assert_eq!(scene.scene_index(), Some(0));
    }

    #[test]
    fn test_resolve_above_any_group() {
        let (project, _temp) = project_with_scenes(&[]);
        let lines = render(&project, &OutlineState::default());

        let position = resolve(&lines, 2);
        assert_eq!(position.group, None);
        assert_eq!(position.offset, 0);
    }

    #[test]
    fn test_toggle() {
        let mut state = OutlineState::default();
        assert!(state.toggle(Group::Summary));
        assert!(state.is_expanded(Group::Summary));
        assert!(!state.toggle(Group::Summary));
        assert!(!state.is_expanded(Group::Scenes));
    }
}

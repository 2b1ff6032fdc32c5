// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state.
//!
//! This module holds the open project together with the outline state and
//! turns outline actions (a display line plus a key press in the editor)
//! into scene store operations.

use crate::error::Result;
use crate::io::builder::{Converter, DocumentBuilder};
use crate::io::scene_store::RefreshReport;
use crate::manager::Group;
use crate::project::Project;
use crate::ui::layout::Layout;
use crate::ui::outline::{self, MenuPosition, OutlineState};
use std::path::PathBuf;

/// Direction to move a scene in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Main application state.
#[derive(Debug)]
pub struct SnowflakeApp {
    /// The open project
    pub project: Project,

    /// Expanded/collapsed groups of the outline
    pub outline: OutlineState,
}

impl SnowflakeApp {
    /// Create an application around an already loaded project.
    pub fn new(project: Project) -> Self {
        Self {
            project,
            outline: OutlineState::default(),
        }
    }

    /// Current outline lines.
    pub fn menu_lines(&self) -> Vec<String> {
        outline::render(&self.project, &self.outline)
    }

    /// Resolve a 1-based display line of the current outline.
    pub fn position(&self, line: usize) -> MenuPosition {
        outline::resolve(&self.menu_lines(), line)
    }

    /// Expand or collapse the group under `line`.
    pub fn toggle(&mut self, line: usize) -> Option<bool> {
        let group = self.position(line).group?;
        Some(self.outline.toggle(group))
    }

    /// Layout requested by the group under `line`.
    pub fn layout_at(&self, line: usize) -> Option<Layout> {
        let group = self.position(line).group?;
        Some(group.manager().layout(&self.project))
    }

    /// Add a scene above the one under the cursor.
    ///
    /// Refused on the group header, where there is nothing to be above.
    pub fn prepend_scene(&mut self, line: usize, title: &str, descr: &str) -> Result<Option<usize>> {
        let position = self.position(line);
        if position.group != Some(Group::Scenes) || position.offset == 0 {
            return Ok(None);
        }
        let index = ((position.offset - 1) / 2).min(self.project.scenes.len());
        self.add_scene(index, title, descr).map(Some)
    }

    /// Add a scene below the one under the cursor, or first when on the header.
    pub fn append_scene(&mut self, line: usize, title: &str, descr: &str) -> Result<Option<usize>> {
        let position = self.position(line);
        if position.group != Some(Group::Scenes) {
            return Ok(None);
        }
        let offset = if position.offset % 2 == 1 {
            position.offset + 1
        } else {
            position.offset
        };
        let index = (offset / 2).min(self.project.scenes.len());
        self.add_scene(index, title, descr).map(Some)
    }

    fn add_scene(&mut self, index: usize, title: &str, descr: &str) -> Result<usize> {
        self.project.scenes.insert_at(index, title, descr)?;
        self.outline.set_expanded(Group::Scenes, true);
        Ok(index)
    }

    /// Move the scene under the cursor one step and return the line it
    /// ends up on, so the cursor can follow it.
    ///
    /// Moving past either end of the list does nothing.
    pub fn move_scene(&mut self, line: usize, direction: Direction) -> Result<Option<usize>> {
        let position = self.position(line);
        let Some(index) = position.scene_index() else {
            return Ok(None);
        };
        let len = self.project.scenes.len();
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|t| *t < len),
        };
        let Some(target) = target.filter(|_| index < len) else {
            return Ok(None);
        };

        self.project.scenes.move_to(index, target)?;
        Ok(Some(position.scene_line(target)))
    }

    /// Backing file of the scene under the cursor.
    pub fn edit_scene(&self, line: usize) -> Result<Option<PathBuf>> {
        match self.position(line).scene_index() {
            Some(index) => self.project.scenes.file_at(index),
            None => Ok(None),
        }
    }

    /// Re-read scene headers after files were edited outside the store,
    /// and persist the project state if anything changed.
    pub fn refresh(&mut self) -> Result<RefreshReport> {
        let report = self.project.scenes.refresh_all()?;
        if !report.is_clean() {
            log::info!(
                "Refreshed {} scenes, repaired {} files",
                report.updated.len(),
                report.repaired.len()
            );
            self.project.save_state()?;
        }
        Ok(report)
    }

    /// Build and convert every output document.
    pub fn build(&mut self, converter: &dyn Converter) -> Result<Vec<PathBuf>> {
        self.refresh()?;
        DocumentBuilder::new(converter).build_all(&self.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_app(titles: &[&str]) -> (SnowflakeApp, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut project = Project::open(temp.path()).unwrap();
        project.info.name = Some("Novel".into());
        for (i, title) in titles.iter().enumerate() {
            project.scenes.insert_at(i, title, "").unwrap();
        }
        let mut app = SnowflakeApp::new(project);
        app.outline.set_expanded(Group::Scenes, true);
        (app, temp)
    }

    fn titles(app: &SnowflakeApp) -> Vec<String> {
        app.project
            .scenes
            .scenes()
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }

    // Collapsed summary: MENU, ====, "", +SNOWFLAKE, -SCENES on line 5.
    const HEADER: usize = 5;

    #[test]
    fn test_toggle_from_header_line() {
        let (mut app, _temp) = create_test_app(&["A"]);
        assert_eq!(app.toggle(4), Some(true));
        assert!(app.outline.is_expanded(Group::Summary));
        assert_eq!(app.toggle(1), None);
    }

    #[test]
    fn test_append_on_empty_list_header() {
        let (mut app, _temp) = create_test_app(&[]);
        app.outline.set_expanded(Group::Scenes, false);

        let index = app.append_scene(HEADER, "First", "d").unwrap();

        assert_eq!(index, Some(0));
        assert_eq!(titles(&app), vec!["First"]);
        assert!(app.outline.is_expanded(Group::Scenes));
    }

    #[test]
    fn test_append_below_cursor() {
        let (mut app, _temp) = create_test_app(&["A", "B"]);

        // title line of A
        app.append_scene(HEADER + 1, "X", "").unwrap();
        assert_eq!(titles(&app), vec!["A", "X", "B"]);

        // description line of B (now third scene)
        app.append_scene(HEADER + 6, "Y", "").unwrap();
        assert_eq!(titles(&app), vec!["A", "X", "B", "Y"]);
    }

    #[test]
    fn test_prepend_above_cursor() {
        let (mut app, _temp) = create_test_app(&["A", "B"]);

        assert_eq!(app.prepend_scene(HEADER, "no", "").unwrap(), None);

        app.prepend_scene(HEADER + 3, "X", "").unwrap();
        assert_eq!(titles(&app), vec!["A", "X", "B"]);
    }

    #[test]
    fn test_actions_outside_scene_group_do_nothing() {
        let (mut app, _temp) = create_test_app(&["A"]);
        assert_eq!(app.append_scene(4, "X", "").unwrap(), None);
        assert_eq!(app.prepend_scene(2, "X", "").unwrap(), None);
        assert_eq!(titles(&app), vec!["A"]);
    }

    #[test]
    fn test_move_tracks_cursor() {
        let (mut app, _temp) = create_test_app(&["A", "B", "C"]);

        let line = app.move_scene(HEADER + 1, Direction::Down).unwrap();
        assert_eq!(titles(&app), vec!["B", "A", "C"]);
        assert_eq!(line, Some(HEADER + 3));

        let line = app.move_scene(HEADER + 4, Direction::Up).unwrap();
        assert_eq!(titles(&app), vec!["A", "B", "C"]);
        assert_eq!(line, Some(HEADER + 1));
    }

    #[test]
    fn test_move_past_the_ends_is_a_no_op() {
        let (mut app, _temp) = create_test_app(&["A", "B"]);

        assert_eq!(app.move_scene(HEADER + 1, Direction::Up).unwrap(), None);
        assert_eq!(app.move_scene(HEADER + 3, Direction::Down).unwrap(), None);
        assert_eq!(app.move_scene(HEADER, Direction::Down).unwrap(), None);
        assert_eq!(titles(&app), vec!["A", "B"]);
    }

    #[test]
    fn test_edit_scene_resolves_file() {
        let (app, _temp) = create_test_app(&["A", "B"]);

        let path = app.edit_scene(HEADER + 4).unwrap().unwrap();
        assert_eq!(path, app.project.scenes.file_at(1).unwrap().unwrap());
        assert_eq!(app.edit_scene(HEADER).unwrap(), None);
    }

    #[test]
    fn test_clean_refresh_then_bad_move_writes_no_state() {
        let temp = TempDir::new().unwrap();
        let mut app = SnowflakeApp::new(Project::load(temp.path()).unwrap());

        assert!(app.refresh().unwrap().is_clean());
        assert!(app.project.scenes.move_to(9, 9).is_err());

        assert!(!app.project.state_path().exists());
        assert!(!app.project.scenes.list_path().exists());
    }

    #[test]
    fn test_dirty_refresh_saves_state() {
        let (mut app, _temp) = create_test_app(&["A"]);
        let path = app.project.scenes.file_at(0).unwrap().unwrap();
        std::fs::write(&path, ".. B\n.. \n\n").unwrap();

        let report = app.refresh().unwrap();

        assert_eq!(report.updated, vec![0]);
        assert!(app.project.state_path().exists());
    }

    #[test]
    fn test_layout_follows_group() {
        let (app, _temp) = create_test_app(&["A"]);
        assert_eq!(app.layout_at(4).unwrap().panes.len(), 4);
        assert_eq!(app.layout_at(HEADER + 1).unwrap(), Layout::single());
        assert!(app.layout_at(1).is_none());
    }
}

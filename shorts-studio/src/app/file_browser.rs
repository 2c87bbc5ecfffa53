//! File browser for picking upload images
//!
//! Opened with `/` while editing a path field. Typing filters the current
//! directory fuzzily; Enter descends into directories or picks a file.

use std::path::PathBuf;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::*;

impl App {
    pub fn open_file_browser(&mut self) {
        let Some(field) = self.current_field() else {
            return;
        };
        // Only path-typed fields get the browser
        if !matches!(field.kind, FieldKind::FilePath | FieldKind::FileList) {
            return;
        }
        self.show_file_browser = true;
        self.file_browser_search.clear();
        self.load_file_browser_items();
    }

    pub fn close_file_browser(&mut self) {
        self.show_file_browser = false;
        self.file_browser_items.clear();
        self.file_browser_selected = 0;
        self.file_browser_search.clear();
    }

    pub fn load_file_browser_items(&mut self) {
        let base_dir = self.current_dir.clone();
        let mut items = Vec::new();

        // Parent directory entry first
        if let Some(parent) = base_dir.parent() {
            items.push(parent.to_path_buf());
        }

        if let Ok(entries) = std::fs::read_dir(&base_dir) {
            for entry in entries.flatten() {
                items.push(entry.path());
            }
        }

        // Sort: directories first, then files
        items.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.file_name().cmp(&b.file_name()),
        });

        self.file_browser_items = items;
        self.file_browser_selected = 0;
    }

    /// Items matching the current fuzzy search, best matches first.
    pub fn visible_file_browser_items(&self) -> Vec<PathBuf> {
        if self.file_browser_search.is_empty() {
            return self.file_browser_items.clone();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, PathBuf)> = self
            .file_browser_items
            .iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                matcher
                    .fuzzy_match(&name, &self.file_browser_search)
                    .map(|score| (score, path.clone()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, path)| path).collect()
    }

    pub fn file_browser_next(&mut self) {
        let count = self.visible_file_browser_items().len();
        if self.file_browser_selected < count.saturating_sub(1) {
            self.file_browser_selected += 1;
        }
    }

    pub fn file_browser_previous(&mut self) {
        if self.file_browser_selected > 0 {
            self.file_browser_selected -= 1;
        }
    }

    pub fn file_browser_push_search(&mut self, c: char) {
        self.file_browser_search.push(c);
        self.file_browser_selected = 0;
    }

    pub fn file_browser_pop_search(&mut self) {
        self.file_browser_search.pop();
        self.file_browser_selected = 0;
    }

    /// Descend into a directory, or put the chosen file into the edited
    /// field. `FileList` fields accumulate with the list separator.
    pub fn file_browser_select(&mut self) {
        let items = self.visible_file_browser_items();
        let Some(path) = items.get(self.file_browser_selected).cloned() else {
            return;
        };

        if path.is_dir() {
            self.current_dir = path;
            self.file_browser_search.clear();
            self.load_file_browser_items();
            return;
        }

        let selected = path.to_string_lossy().into_owned();
        let append = self
            .current_field()
            .map(|f| f.kind == FieldKind::FileList)
            .unwrap_or(false);
        if append && !self.edit_buffer.trim().is_empty() {
            self.edit_buffer
                .push_str(&format!("{}{}", super::models::LIST_SEPARATOR, selected));
        } else {
            self.edit_buffer = selected;
        }
        self.close_file_browser();
    }
}

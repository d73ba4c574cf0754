//! Presenter state for one inspector window.
//!
//! An [`Inspector`] owns the tree, the editable path line and the preview
//! text, and routes every selection through a [`Dispatcher`]. It holds no
//! widgets; a front-end renders its accessors.

use std::path::{Path, PathBuf};

use crate::capacity::CapacityBudget;
use crate::dispatch::{Dispatcher, PreviewOutcome, PreviewSource};
use crate::nav::tree::DirTree;

/// Tree, path line and preview for a single window.
///
/// Immutable: every transition consumes `self` and returns the next state.
#[derive(Debug, Clone)]
pub struct Inspector<P> {
    dispatcher: Dispatcher<P>,
    tree: DirTree,
    path_line: String,
    preview: String,
}

impl<P: PreviewSource> Inspector<P> {
    /// Creates an inspector listing `root`. The preview starts blank.
    pub fn new(dispatcher: Dispatcher<P>, root: PathBuf, show_hidden: bool) -> Self {
        let path_line = root.display().to_string();
        Self {
            dispatcher,
            tree: DirTree::new(root, show_hidden),
            path_line,
            preview: String::new(),
        }
    }

    pub fn tree(&self) -> &DirTree {
        &self.tree
    }

    pub fn root(&self) -> &Path {
        self.tree.root()
    }

    pub fn path_line(&self) -> &str {
        &self.path_line
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn dispatcher(&self) -> &Dispatcher<P> {
        &self.dispatcher
    }

    /// Replaces the path line text without selecting anything.
    pub fn with_path_line(self, text: impl Into<String>) -> Self {
        Self {
            path_line: text.into(),
            ..self
        }
    }

    /// Whether the path line names a folder that can be listed.
    pub fn path_line_is_listable(&self) -> bool {
        !self.path_line.is_empty()
            && self
                .dispatcher
                .source()
                .classify(Path::new(&self.path_line))
                .is_directory()
    }

    /// Shows `path` in the path line and previews it within `budget`.
    /// An empty path is ignored.
    pub fn select(self, path: &Path, budget: &CapacityBudget) -> Self {
        if path.as_os_str().is_empty() {
            return self;
        }
        let outcome = self.dispatcher.dispatch(path, budget);
        let preview = match outcome {
            PreviewOutcome::Clear => String::new(),
            PreviewOutcome::Keep => self.preview,
            PreviewOutcome::Show(text) => text,
        };
        Self {
            path_line: path.display().to_string(),
            preview,
            ..self
        }
    }

    /// Makes `path` the tree root and selects it. Ignored unless `path` is
    /// a folder. Relative paths are resolved against the working directory.
    pub fn list(self, path: &Path, budget: &CapacityBudget) -> Self {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        if !self.dispatcher.source().classify(&path).is_directory() {
            tracing::debug!(path = %path.display(), "not listable");
            return self;
        }
        tracing::info!(path = %path.display(), "listing");
        let tree = self.tree.with_root(path.clone());
        Self { tree, ..self }.select(&path, budget)
    }

    /// Lists whatever the path line names, if it is listable.
    pub fn list_path_line(self, budget: &CapacityBudget) -> Self {
        let target = PathBuf::from(&self.path_line);
        self.list(&target, budget)
    }

    /// Lists the parent of the current root. No-op at the file system root.
    pub fn navigate_up(self, budget: &CapacityBudget) -> Self {
        match self.root().parent().map(Path::to_path_buf) {
            Some(parent) => self.list(&parent, budget),
            None => self,
        }
    }

    /// Lists the user's home folder.
    pub fn navigate_home(self, budget: &CapacityBudget) -> Self {
        self.list(&home_dir(), budget)
    }

    /// Moves the tree cursor up and selects the new row.
    pub fn cursor_up(self, budget: &CapacityBudget) -> Self {
        let before = self.tree.selected_index();
        let tree = self.tree.move_up();
        Self { tree, ..self }.select_if_moved(before, budget)
    }

    /// Moves the tree cursor down and selects the new row.
    pub fn cursor_down(self, budget: &CapacityBudget) -> Self {
        let before = self.tree.selected_index();
        let tree = self.tree.move_down();
        Self { tree, ..self }.select_if_moved(before, budget)
    }

    /// Selects the row under the cursor, if any.
    pub fn select_current(self, budget: &CapacityBudget) -> Self {
        match self.tree.selected_row().map(|row| row.path.clone()) {
            Some(path) => self.select(&path, budget),
            None => self,
        }
    }

    /// Expands or collapses the selected folder.
    pub fn toggle_selected(self) -> Self {
        let tree = self.tree.with_toggled_selection();
        Self { tree, ..self }
    }

    fn select_if_moved(self, before: usize, budget: &CapacityBudget) -> Self {
        if self.tree.selected_index() == before {
            return self;
        }
        self.select_current(budget)
    }
}

/// `$HOME`, or `/` when it is unset.
pub fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

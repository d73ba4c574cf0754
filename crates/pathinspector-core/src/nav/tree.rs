//! Navigable directory tree.
//!
//! [`DirTree`] keeps a root, the set of expanded folders and a cursor, and
//! flattens them into display rows. Children are read only for expanded
//! folders, and only when the tree is rebuilt.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: PathBuf,
    pub name: String,
    /// Nesting depth (0 = direct child of the root).
    pub depth: usize,
    pub is_dir: bool,
    pub expanded: bool,
    /// Byte size; `None` for folders.
    pub size: Option<u64>,
    /// Type column: `"Folder"`, or a media type guessed from the name.
    pub kind: String,
}

/// Type column text for files whose name gives no hint.
pub const UNKNOWN_KIND: &str = "File";
/// Type column text for folders.
pub const FOLDER_KIND: &str = "Folder";

/// A folder tree with a cursor.
///
/// Immutable: every state transition returns a new `DirTree`. The cursor is
/// clamped to the visible rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirTree {
    root: PathBuf,
    expanded: HashSet<PathBuf>,
    rows: Vec<TreeRow>,
    selected_index: usize,
    filter: RowFilter,
}

/// Which entries become rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowFilter {
    show_hidden: bool,
    folders_only: bool,
}

impl DirTree {
    /// Creates a tree rooted at `root` with every folder collapsed.
    pub fn new(root: PathBuf, show_hidden: bool) -> Self {
        Self::with_filter(
            root,
            RowFilter {
                show_hidden,
                folders_only: false,
            },
        )
    }

    /// A tree that shows folders only, for choosing a folder to list.
    pub fn folders(root: PathBuf, show_hidden: bool) -> Self {
        Self::with_filter(
            root,
            RowFilter {
                show_hidden,
                folders_only: true,
            },
        )
    }

    fn with_filter(root: PathBuf, filter: RowFilter) -> Self {
        let expanded = HashSet::new();
        let rows = build_rows(&root, &expanded, filter);
        Self {
            root,
            expanded,
            rows,
            selected_index: 0,
            filter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.selected_index)
    }

    /// Re-roots the tree, collapsing everything.
    pub fn with_root(self, root: PathBuf) -> Self {
        Self::with_filter(root, self.filter)
    }

    /// Expands the selected folder, or collapses it if already expanded.
    /// No-op on files.
    pub fn with_toggled_selection(self) -> Self {
        let Some(row) = self.selected_row().filter(|r| r.is_dir) else {
            return self;
        };
        let path = row.path.clone();
        let mut expanded = self.expanded;
        if !expanded.remove(&path) {
            expanded.insert(path);
        }
        Self {
            expanded,
            ..self
        }
        .rebuilt()
    }

    /// Moves the cursor to `index`, clamped to the last row.
    pub fn with_selection(self, index: usize) -> Self {
        let selected_index = index.min(self.rows.len().saturating_sub(1));
        Self {
            selected_index,
            ..self
        }
    }

    /// Moves the cursor up by one. No-op at the top.
    pub fn move_up(self) -> Self {
        let index = self.selected_index.saturating_sub(1);
        self.with_selection(index)
    }

    /// Moves the cursor down by one. No-op at the bottom.
    pub fn move_down(self) -> Self {
        let index = self.selected_index + 1;
        self.with_selection(index)
    }

    /// Re-reads the expanded folders from disk.
    pub fn refresh(self) -> Self {
        self.rebuilt()
    }

    fn rebuilt(self) -> Self {
        let rows = build_rows(&self.root, &self.expanded, self.filter);
        let selected = self.selected_index;
        Self { rows, ..self }.with_selection(selected)
    }
}

fn build_rows(root: &Path, expanded: &HashSet<PathBuf>, filter: RowFilter) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_children(root, 0, expanded, filter, &mut rows);
    rows
}

/// Appends the children of `dir`, descending into expanded folders.
fn push_children(
    dir: &Path,
    depth: usize,
    expanded: &HashSet<PathBuf>,
    filter: RowFilter,
    rows: &mut Vec<TreeRow>,
) {
    let children = match read_children(dir, filter) {
        Ok(children) => children,
        Err(e) => {
            tracing::warn!(error = %e, "cannot read tree folder");
            return;
        }
    };

    for child in children {
        let is_expanded = child.is_dir && expanded.contains(&child.path);
        let path = child.path.clone();
        rows.push(TreeRow {
            expanded: is_expanded,
            depth,
            ..child
        });
        if is_expanded {
            push_children(&path, depth + 1, expanded, filter, rows);
        }
    }
}

/// Children of `dir` as depth-0 collapsed rows, directories first, then by name.
fn read_children(dir: &Path, filter: RowFilter) -> CoreResult<Vec<TreeRow>> {
    if !dir.is_dir() {
        return Err(CoreError::NotADirectory(dir.to_path_buf()));
    }
    let read_dir = fs::read_dir(dir).map_err(|e| CoreError::from_io(dir, e))?;

    let mut children: Vec<TreeRow> = read_dir
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = crate::nfc_string(&entry.file_name().to_string_lossy());
            if !filter.show_hidden && name.starts_with('.') {
                return None;
            }
            let path = entry.path();
            let meta = fs::metadata(&path).ok();
            let is_dir = meta.as_ref().is_some_and(|m| m.is_dir());
            if filter.folders_only && !is_dir {
                return None;
            }
            let size = meta.filter(|m| !m.is_dir()).map(|m| m.len());
            let kind = if is_dir {
                FOLDER_KIND.to_string()
            } else {
                mime_guess::from_path(&path)
                    .first_raw()
                    .unwrap_or(UNKNOWN_KIND)
                    .to_string()
            };
            Some(TreeRow {
                path,
                name,
                depth: 0,
                is_dir,
                expanded: false,
                size,
                kind,
            })
        })
        .collect();

    children.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(children)
}

//! Object tree below the current location.

use std::collections::HashSet;

use crate::container::{join_path, Container, ObjectKind};
use crate::data::type_label;

/// Deepest level [`list_tree`] descends to.
pub const MAX_TREE_DEPTH: usize = 32;

/// One object in the tree, with its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Base name.
    pub name: String,
    /// Canonical path.
    pub path: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Kind and type, e.g. `Dataset(Float: 2×3)`.
    pub label: String,
    /// Child entries, for groups.
    pub children: Vec<TreeEntry>,
}

impl TreeEntry {
    /// Whether this entry can be expanded.
    pub fn is_group(&self) -> bool {
        self.kind.is_group_like()
    }
}

/// List the children of `path` recursively, at most `max_depth` levels.
///
/// Objects that cannot be inspected are listed as `Unknown` rather than
/// failing the whole listing.
pub fn list_tree(container: &dyn Container, path: &str, max_depth: usize) -> Vec<TreeEntry> {
    if max_depth == 0 {
        return Vec::new();
    }
    let names = match container.list_children(path) {
        Ok(names) => names,
        Err(err) => {
            tracing::debug!("Children of {} not listed: {}", path, err);
            return Vec::new();
        },
    };

    names
        .into_iter()
        .map(|name| {
            let child = join_path(path, &name);
            let kind = container.classify(&child).unwrap_or(ObjectKind::Unknown);
            let label = entry_label(container, &child, kind);
            let children = if kind.is_group_like() {
                list_tree(container, &child, max_depth - 1)
            } else {
                Vec::new()
            };
            TreeEntry {
                name,
                path: child,
                kind,
                label,
                children,
            }
        })
        .collect()
}

fn entry_label(container: &dyn Container, path: &str, kind: ObjectKind) -> String {
    match kind {
        ObjectKind::Dataset => {
            let label = container
                .element_type(path)
                .and_then(|ty| Ok(type_label(&ty, &container.dimensions(path)?)));
            match label {
                Ok(label) => format!("Dataset({})", label),
                Err(err) => {
                    tracing::debug!("Type of {} not read: {}", path, err);
                    "Dataset".to_string()
                },
            }
        },
        other => other.name().to_string(),
    }
}

/// A single row of the tree panel.
#[derive(Debug, Clone)]
pub struct TreeItem {
    /// The entry.
    pub entry: TreeEntry,
    /// Nesting level.
    pub level: usize,
    /// Whether this entry is expanded.
    pub expanded: bool,
}

/// Tree panel state.
///
/// Keeps a flat list of visible rows, rebuilt whenever an entry is expanded
/// or collapsed.
#[derive(Debug, Default)]
pub struct TreeState {
    items: Vec<TreeItem>,
    cursor: usize,
    entries: Vec<TreeEntry>,
    expanded_paths: HashSet<String>,
}

impl TreeState {
    /// Create an empty tree state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listed entries, keeping expansion where paths survive.
    pub fn set_entries(&mut self, entries: Vec<TreeEntry>) {
        self.entries = entries;
        self.rebuild_visible_items();
        self.cursor = 0;
    }

    fn rebuild_visible_items(&mut self) {
        self.items.clear();
        let entries = std::mem::take(&mut self.entries);
        for entry in &entries {
            self.add_visible_recursive(entry, 0);
        }
        self.entries = entries;
    }

    fn add_visible_recursive(&mut self, entry: &TreeEntry, level: usize) {
        let is_expanded = self.expanded_paths.contains(&entry.path);
        self.items.push(TreeItem {
            entry: entry.clone(),
            level,
            expanded: is_expanded,
        });
        if is_expanded {
            for child in &entry.children {
                self.add_visible_recursive(child, level + 1);
            }
        }
    }

    /// Move the cursor up one row.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    /// Expand the entry under the cursor.
    pub fn expand_current(&mut self) {
        if let Some(item) = self.items.get(self.cursor) {
            if item.entry.is_group() && !item.expanded {
                let path = item.entry.path.clone();
                self.expanded_paths.insert(path);
                self.rebuild_visible_items();
            }
        }
    }

    /// Collapse the entry under the cursor, or move to its parent row.
    pub fn collapse_current(&mut self) {
        let Some(item) = self.items.get(self.cursor) else {
            return;
        };
        if item.entry.is_group() && item.expanded {
            let path = item.entry.path.clone();
            self.expanded_paths.remove(&path);
            self.rebuild_visible_items();
        } else if item.level > 0 {
            let level = item.level;
            if let Some(parent) = self.items[..self.cursor]
                .iter()
                .rposition(|i| i.level < level)
            {
                self.cursor = parent;
            }
        }
    }

    /// Go to the first row.
    pub fn goto_first(&mut self) {
        self.cursor = 0;
    }

    /// Go to the last row.
    pub fn goto_last(&mut self) {
        self.cursor = self.items.len().saturating_sub(1);
    }

    /// All visible rows.
    pub fn visible_items(&self) -> &[TreeItem] {
        &self.items
    }

    /// Cursor row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the entry at `path` is expanded.
    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded_paths.contains(path)
    }

    /// Entry under the cursor.
    pub fn current_entry(&self) -> Option<&TreeEntry> {
        self.items.get(self.cursor).map(|item| &item.entry)
    }

    /// Move the cursor to the row for `target_path`, if visible.
    pub fn goto_node(&mut self, target_path: &str) {
        if let Some(i) = self.items.iter().position(|i| i.entry.path == target_path) {
            self.cursor = i;
        }
    }
}

//! Path resolution, dispatch and history.
//!
//! A path is classified against a container and handed to exactly one of
//! the four handlers of a [`PathHandler`]. The [`Navigator`] wraps this with
//! back/forward history that only changes once a handler has succeeded.

mod history;
mod path_input;
mod tree;

pub use history::{History, NavMode};
pub use path_input::PathInput;
pub use tree::{list_tree, TreeEntry, TreeItem, TreeState, MAX_TREE_DEPTH};

use crate::container::{parent_path, Container, ObjectKind};
use crate::error::Result;

/// Outcome of classifying a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The container itself, with its canonical path.
    Root(String),
    /// A group, with its canonical path.
    Group(String),
    /// A dataset, with its canonical path.
    Dataset(String),
    /// Nothing lives at the path.
    NotFound,
}

impl Resolved {
    /// Canonical path, unless nothing was found.
    pub fn canonical(&self) -> Option<&str> {
        match self {
            Self::Root(p) | Self::Group(p) | Self::Dataset(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

/// Classify `path` in `container`.
///
/// The empty path (and `/`) always resolves to the root.
pub fn resolve(container: &dyn Container, path: &str) -> Result<Resolved> {
    let kind = container.classify(path)?;
    Ok(match kind {
        ObjectKind::Root => Resolved::Root(container.canonical_path(path)?),
        ObjectKind::Group => Resolved::Group(container.canonical_path(path)?),
        ObjectKind::Dataset => Resolved::Dataset(container.canonical_path(path)?),
        ObjectKind::Unknown => Resolved::NotFound,
    })
}

/// Receivers for the four outcomes of [`handle_path`].
pub trait PathHandler {
    /// The path named the container itself.
    fn on_root(&mut self, canonical: &str) -> Result<()>;

    /// The path named a group.
    fn on_group(&mut self, canonical: &str) -> Result<()>;

    /// The path named a dataset.
    fn on_dataset(&mut self, canonical: &str) -> Result<()>;

    /// Nothing lives at the path.
    fn on_not_found(&mut self, path: &str);
}

/// Resolve `path` and dispatch it to exactly one handler.
///
/// Returns the canonical path, or `None` when the path was not found.
pub fn handle_path(
    container: &dyn Container,
    path: &str,
    handler: &mut dyn PathHandler,
) -> Result<Option<String>> {
    let resolved = resolve(container, path)?;
    match &resolved {
        Resolved::Root(canonical) => handler.on_root(canonical)?,
        Resolved::Group(canonical) => handler.on_group(canonical)?,
        Resolved::Dataset(canonical) => handler.on_dataset(canonical)?,
        Resolved::NotFound => {
            tracing::debug!("Path not found: {}", path);
            handler.on_not_found(path);
        },
    }
    Ok(resolved.canonical().map(str::to_string))
}

/// Current location plus history.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    history: History,
}

impl Navigator {
    /// Create a navigator with no location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the location and history.
    pub fn reset(&mut self) {
        self.history.reset();
    }

    /// Current canonical location.
    pub fn current(&self) -> Option<&str> {
        self.history.current()
    }

    /// The history stacks.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Navigate to `path`.
    ///
    /// History is only updated when a handler accepted the target; on errors
    /// and unknown paths nothing changes.
    pub fn navigate(
        &mut self,
        container: &dyn Container,
        path: &str,
        mode: NavMode,
        handler: &mut dyn PathHandler,
    ) -> Result<Option<String>> {
        let canonical = handle_path(container, path, handler)?;
        if let Some(canonical) = &canonical {
            self.history.commit(mode, canonical);
            tracing::debug!("Navigated to {} ({:?})", canonical, mode);
        }
        Ok(canonical)
    }

    /// Step back; `None` when there is nowhere to go.
    pub fn back(
        &mut self,
        container: &dyn Container,
        handler: &mut dyn PathHandler,
    ) -> Result<Option<String>> {
        match self.history.peek_back().map(str::to_string) {
            Some(target) => self.navigate(container, &target, NavMode::Back, handler),
            None => Ok(None),
        }
    }

    /// Step forward; `None` when there is nowhere to go.
    pub fn forward(
        &mut self,
        container: &dyn Container,
        handler: &mut dyn PathHandler,
    ) -> Result<Option<String>> {
        match self.history.peek_forward().map(str::to_string) {
            Some(target) => self.navigate(container, &target, NavMode::Forward, handler),
            None => Ok(None),
        }
    }

    /// Navigate to the parent of the current location; `None` at the root.
    pub fn go_up(
        &mut self,
        container: &dyn Container,
        handler: &mut dyn PathHandler,
    ) -> Result<Option<String>> {
        match self.current().and_then(parent_path) {
            Some(parent) => self.navigate(container, &parent, NavMode::Normal, handler),
            None => Ok(None),
        }
    }
}

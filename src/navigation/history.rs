//! Back/forward history of visited locations.

use crate::container::same_path;

/// How a navigation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavMode {
    /// An explicit new target.
    #[default]
    Normal,
    /// Stepping back through history.
    Back,
    /// Stepping forward through history.
    Forward,
}

/// Visited canonical paths around the current location.
///
/// The stacks are only changed through [`History::commit`], which keeps them
/// consistent: a new target clears the forward stack, the current path is
/// never pushed twice in a row, and the first commit after a reset starts
/// from empty stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
    back: Vec<String>,
    forward: Vec<String>,
    current: Option<String>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything, e.g. when a new container is opened.
    pub fn reset(&mut self) {
        self.back.clear();
        self.forward.clear();
        self.current = None;
    }

    /// Current location.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Where [`NavMode::Back`] would go.
    pub fn peek_back(&self) -> Option<&str> {
        self.back.last().map(String::as_str)
    }

    /// Where [`NavMode::Forward`] would go.
    pub fn peek_forward(&self) -> Option<&str> {
        self.forward.last().map(String::as_str)
    }

    /// Depth of the back stack.
    pub fn back_len(&self) -> usize {
        self.back.len()
    }

    /// Depth of the forward stack.
    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    /// Record a completed navigation to `canonical`.
    pub fn commit(&mut self, mode: NavMode, canonical: &str) {
        let previous = match self.current.take() {
            Some(previous) => previous,
            None => {
                self.back.clear();
                self.forward.clear();
                self.current = Some(canonical.to_string());
                return;
            },
        };

        match mode {
            NavMode::Normal => {
                if !same_path(&previous, canonical) {
                    self.back.push(previous);
                    self.forward.clear();
                }
            },
            NavMode::Back => {
                self.back.pop();
                if !same_path(&previous, canonical) {
                    self.forward.push(previous);
                }
            },
            NavMode::Forward => {
                self.forward.pop();
                if !same_path(&previous, canonical) {
                    self.back.push(previous);
                }
            },
        }
        self.current = Some(canonical.to_string());
    }
}

//! Application state and logic.

use std::path::PathBuf;

use crate::config::{Theme, ViewerConfig};
use crate::container::ObjectKind;
use crate::data_viewer::DataViewerState;
use crate::error::Result;
use crate::explorer::ExplorerState;
use crate::navigation::PathInput;
use crate::session::{Inspection, Session};

/// Panel with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Object tree.
    #[default]
    Tree,
    /// Data table.
    Data,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Current file path.
    pub file_path: Option<PathBuf>,
    /// Open container.
    pub session: Option<Session>,
    /// Explorer state (tree navigation + details).
    pub explorer: ExplorerState,
    /// Data viewer state.
    pub data_viewer: DataViewerState,
    /// "Go to path" prompt.
    pub path_input: PathInput,
    /// Panel with keyboard focus.
    pub focus: Focus,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Error message.
    pub error_message: Option<String>,
    /// Settings.
    pub config: ViewerConfig,
}

impl App {
    /// Create a new application instance.
    pub fn new(file_path: Option<PathBuf>, config: ViewerConfig) -> Self {
        let mut app = Self {
            file_path: None,
            session: None,
            explorer: ExplorerState::new(),
            data_viewer: DataViewerState::new(),
            path_input: PathInput::new(),
            focus: Focus::Tree,
            status: "Ready".to_string(),
            theme: config.theme,
            error_message: None,
            config,
        };
        if let Some(path) = file_path {
            app.load_file(path);
        }
        app
    }

    /// Start with an already opened session.
    pub fn with_session(session: Session) -> Self {
        let mut app = Self::new(None, session.config().clone());
        app.status = format!("{} loaded", session.name());
        app.session = Some(session);
        app.refresh_location();
        app
    }

    /// Load a file.
    pub fn load_file(&mut self, path: PathBuf) {
        match Session::open_file(&path, self.config.clone()) {
            Ok(session) => {
                self.status = format!("{} loaded", session.name());
                self.error_message = None;
                self.session = Some(session);
                self.file_path = Some(path);
                self.refresh_location();
                tracing::info!("File loaded successfully");
            },
            Err(e) => {
                self.error_message = Some(format!("Error loading file: {}", e));
                self.status = "Error loading file".to_string();
                tracing::error!("Error loading file: {}", e);
            },
        }
    }

    /// Object whose attributes and data are shown: the preview, else the location.
    pub fn shown(&self) -> Option<&Inspection> {
        shown_object(&self.explorer, self.session.as_ref())
    }

    fn refresh_location(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        self.explorer.set_entries(session.location().entries.clone());
        self.focus = match session.location().object.kind {
            ObjectKind::Dataset => Focus::Data,
            _ => Focus::Tree,
        };
        self.sync_data_viewer();
    }

    fn sync_data_viewer(&mut self) {
        let path = self
            .shown()
            .filter(|object| object.dataset.is_some())
            .map(|object| object.path.clone());
        self.data_viewer.sync(path.as_deref());
    }

    /// Apply the outcome of a navigation to status and panels.
    fn finish_navigation(&mut self, requested: &str, outcome: Result<Option<String>>) {
        match outcome {
            Ok(Some(canonical)) => {
                self.error_message = None;
                self.status = format!("At {}", canonical);
                self.refresh_location();
            },
            Ok(None) => {
                self.status = format!("Not found: {}", requested);
            },
            Err(e) => {
                tracing::error!("Navigation to {} failed: {}", requested, e);
                self.error_message = Some(e.to_string());
                self.status = format!("Cannot open {}", requested);
            },
        }
    }

    /// Navigate to `path`.
    pub fn navigate(&mut self, path: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let outcome = session.navigate(path);
        self.finish_navigation(path, outcome);
    }

    /// Step back through history.
    pub fn back(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.navigator().history().peek_back().is_none() {
            self.status = "No previous location".to_string();
            return;
        }
        let outcome = session.back();
        self.finish_navigation("previous location", outcome);
    }

    /// Step forward through history.
    pub fn forward(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.navigator().history().peek_forward().is_none() {
            self.status = "No next location".to_string();
            return;
        }
        let outcome = session.forward();
        self.finish_navigation("next location", outcome);
    }

    /// Go to the parent of the current location, keeping the child selected.
    pub fn go_up(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let child = session.current_path().to_string();
        let outcome = session.go_up();
        match outcome {
            Ok(None) => self.status = "Already at the root".to_string(),
            Ok(Some(parent)) => {
                self.finish_navigation("parent", Ok(Some(parent)));
                self.explorer.goto_node(&child);
            },
            Err(e) => self.finish_navigation("parent", Err(e)),
        }
    }

    /// Preview the tree entry under the cursor.
    pub fn preview_current(&mut self) {
        let (Some(session), Some(entry)) = (&self.session, self.explorer.current_entry()) else {
            return;
        };
        let path = entry.path.clone();
        match session.inspect(&path) {
            Ok(Some(inspection)) => self.explorer.set_preview(inspection),
            Ok(None) => {
                self.explorer.clear_preview();
                self.status = format!("Not found: {}", path);
            },
            Err(e) => {
                tracing::error!("Preview of {} failed: {}", path, e);
                self.error_message = Some(e.to_string());
            },
        }
        self.sync_data_viewer();
    }

    /// Move up in the focused panel.
    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Tree => {
                self.explorer.cursor_up();
                self.preview_current();
            },
            Focus::Data => self.move_cursor(-1, 0),
        }
    }

    /// Move down in the focused panel.
    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Tree => {
                self.explorer.cursor_down();
                self.preview_current();
            },
            Focus::Data => self.move_cursor(1, 0),
        }
    }

    /// Jump to the first tree row, or the first column of the table.
    pub fn move_home(&mut self) {
        match self.focus {
            Focus::Tree => {
                self.explorer.goto_first();
                self.preview_current();
            },
            Focus::Data => self.move_cursor(0, isize::MIN),
        }
    }

    /// Jump to the last tree row, or the last column of the table.
    pub fn move_end(&mut self) {
        match self.focus {
            Focus::Tree => {
                self.explorer.goto_last();
                self.preview_current();
            },
            Focus::Data => self.move_cursor(0, isize::MAX),
        }
    }

    /// Collapse in the tree, or move left in the table.
    pub fn move_left(&mut self) {
        match self.focus {
            Focus::Tree => {
                self.explorer.collapse_current();
                self.preview_current();
            },
            Focus::Data => self.move_cursor(0, -1),
        }
    }

    /// Expand in the tree, or move right in the table.
    pub fn move_right(&mut self) {
        match self.focus {
            Focus::Tree => self.explorer.expand_current(),
            Focus::Data => self.move_cursor(0, 1),
        }
    }

    fn move_cursor(&mut self, rows: isize, cols: isize) {
        let shown = shown_object(&self.explorer, self.session.as_ref());
        if let Some(view) = shown.and_then(|o| o.dataset.as_ref()) {
            self.data_viewer.move_cursor(rows, cols, view);
        }
    }

    /// Open the tree entry, or follow the reference under the table cursor.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Tree => {
                if let Some(path) = self.explorer.current_entry().map(|e| e.path.clone()) {
                    self.navigate(&path);
                }
            },
            Focus::Data => self.follow_cell(),
        }
    }

    fn follow_cell(&mut self) {
        let (Some(session), Some(view)) = (
            self.session.as_ref(),
            self.shown().and_then(|o| o.dataset.as_ref()),
        ) else {
            return;
        };
        let Some(cell) = self.data_viewer.current_cell(view, session.container()) else {
            return;
        };
        match cell.target {
            Some(target) => self.navigate(&target.path),
            None => self.status = format!("Not a reference: {}", cell.text),
        }
    }

    /// Show the next page.
    pub fn next_page(&mut self) {
        let shown = shown_object(&self.explorer, self.session.as_ref());
        if let Some(view) = shown.and_then(|o| o.dataset.as_ref()) {
            self.data_viewer.next_page(view);
            self.status = format!("Page {}", view.page_label(self.data_viewer.page));
        }
    }

    /// Show the previous page.
    pub fn prev_page(&mut self) {
        let shown = shown_object(&self.explorer, self.session.as_ref());
        if let Some(view) = shown.and_then(|o| o.dataset.as_ref()) {
            self.data_viewer.prev_page();
            self.status = format!("Page {}", view.page_label(self.data_viewer.page));
        }
    }

    /// Switch focus between tree and table.
    pub fn toggle_focus(&mut self) {
        let has_data = self.shown().is_some_and(|o| o.dataset.is_some());
        self.focus = match self.focus {
            Focus::Tree if has_data => Focus::Data,
            _ => Focus::Tree,
        };
    }

    /// Open the path prompt, pre-filled with the current location.
    pub fn start_path_input(&mut self) {
        let current = self
            .session
            .as_ref()
            .map(|s| s.current_path().to_string())
            .unwrap_or_default();
        self.path_input.start(&current);
    }

    /// Navigate to the typed path.
    pub fn submit_path_input(&mut self) {
        let path = self.path_input.submit();
        self.navigate(&path);
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Dismiss the error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// The previewed object, else the current location.
pub fn shown_object<'a>(
    explorer: &'a ExplorerState,
    session: Option<&'a Session>,
) -> Option<&'a Inspection> {
    explorer
        .preview()
        .or_else(|| session.map(|s| &s.location().object))
}

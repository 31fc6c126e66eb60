//! Runtime settings.

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Gruvbox dark theme.
    #[default]
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Configuration for the data table.
#[derive(Debug, Clone)]
pub struct TableLayoutConfig {
    /// Padding to account for borders and headers.
    pub border_padding: usize,
    /// Width of each column in characters.
    pub column_width: u16,
    /// Maximum number of visible columns.
    pub max_visible_columns: usize,
    /// Width of the row header column.
    pub row_header_width: u16,
}

impl Default for TableLayoutConfig {
    fn default() -> Self {
        Self {
            border_padding: 4,
            column_width: 12,
            max_visible_columns: 20,
            row_header_width: 6,
        }
    }
}

/// Configuration for the panel split.
#[derive(Debug, Clone)]
pub struct PanelLayoutConfig {
    /// Share of the width given to the tree, in percent.
    pub tree_percent: u16,
    /// Height of the attribute table, in rows.
    pub attribute_rows: u16,
}

impl Default for PanelLayoutConfig {
    fn default() -> Self {
        Self {
            tree_percent: 35,
            attribute_rows: 8,
        }
    }
}

/// Combined layout configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Data table.
    pub table: TableLayoutConfig,
    /// Panel split.
    pub panels: PanelLayoutConfig,
}

/// Settings for one viewer session.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Most page labels offered by the page selector.
    pub max_pages: usize,
    /// Deepest level listed in the object tree.
    pub max_tree_depth: usize,
    /// Initial theme.
    pub theme: Theme,
    /// Layout.
    pub layout: LayoutConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_pages: 100,
            max_tree_depth: crate::navigation::MAX_TREE_DEPTH,
            theme: Theme::default(),
            layout: LayoutConfig::default(),
        }
    }
}

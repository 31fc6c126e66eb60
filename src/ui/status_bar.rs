//! Status bar UI component.

use crate::navigation::PathInput;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar.
///
/// An open path prompt takes precedence, then an error, then the status.
pub(super) fn draw_status(
    f: &mut Frame<'_>,
    area: Rect,
    status: &str,
    error: Option<&str>,
    path_input: &PathInput,
    colors: &ThemeColors,
) {
    let (text, fg) = if path_input.is_active() {
        (format!("Go to: {}", path_input.buffer()), colors.yellow)
    } else if let Some(error) = error {
        (format!("Error: {}", error), colors.red)
    } else {
        (status.to_string(), colors.fg0)
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(fg).bg(colors.bg1));
    f.render_widget(paragraph, area);
}

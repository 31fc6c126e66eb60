//! Keymap help bar UI component.

use crate::app::Focus;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(
    f: &mut Frame<'_>,
    area: Rect,
    focus: Focus,
    path_input_active: bool,
    colors: &ThemeColors,
) {
    let keymap_text = if path_input_active {
        "Enter:go | Esc:cancel | Type a path"
    } else {
        match focus {
            Focus::Tree => {
                "q:quit | jk:move | hl:fold | Home/End:first/last | Enter:open | u:up | b/f:back/fwd | g:goto | Tab:table | T:theme"
            },
            Focus::Data => {
                "q:quit | hjkl:move | Enter:follow ref | []:page | u:up | b/f:back/fwd | Tab:tree | T:theme"
            },
        }
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.fg0).bg(colors.bg0));
    f.render_widget(paragraph, area);
}

//! Main screen layout.

use super::keymap_bar::draw_keymap;
use super::status_bar::draw_status;
use super::ThemeColors;
use crate::app::{shown_object, App, Focus};
use crate::data_viewer::ui::{draw_data_viewer, draw_no_data, DataPanel};
use crate::explorer::details::draw_details;
use crate::explorer::tree::{draw_tree, draw_welcome};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the whole screen.
pub(super) fn draw_browser(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Path bar, content, status bar, key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_path_bar(f, app, chunks[0], &colors);

    if app.session.is_some() {
        draw_content(f, app, chunks[1], &colors);
    } else {
        draw_welcome(f, chunks[1], &colors);
    }

    draw_status(
        f,
        chunks[2],
        &app.status,
        app.error_message.as_deref(),
        &app.path_input,
        &colors,
    );
    draw_keymap(f, chunks[3], app.focus, app.path_input.is_active(), &colors);
}

fn draw_path_bar(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let line = match &app.session {
        Some(session) => {
            let history = session.navigator().history();
            Line::from(vec![
                Span::styled(
                    format!(" {} ", session.name()),
                    Style::default()
                        .fg(colors.bg0)
                        .bg(colors.aqua)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {} ", session.current_path()),
                    Style::default().fg(colors.yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("◀{} ▶{}", history.back_len(), history.forward_len()),
                    Style::default().fg(colors.gray),
                ),
            ])
        },
        None => Line::from(Span::styled(" h5pad ", Style::default().fg(colors.yellow))),
    };
    f.render_widget(Paragraph::new(line).style(Style::default().bg(colors.bg1)), area);
}

fn draw_content(f: &mut Frame<'_>, app: &mut App, area: Rect, colors: &ThemeColors) {
    let panels = &app.config.layout.panels;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(panels.tree_percent),
            Constraint::Percentage(100 - panels.tree_percent.min(100)),
        ])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(panels.attribute_rows), Constraint::Min(3)])
        .split(columns[1]);

    let title = app
        .session
        .as_ref()
        .map(|s| s.current_path().to_string())
        .unwrap_or_default();
    draw_tree(f, &mut app.explorer, &title, columns[0], colors);

    let App {
        explorer,
        session,
        data_viewer,
        config,
        focus,
        ..
    } = app;
    let Some(session) = session.as_ref() else {
        return;
    };
    let shown = shown_object(explorer, Some(session));
    draw_details(f, shown, explorer.attribute_scroll, right[0], colors);

    match shown.and_then(|o| o.dataset.as_ref()) {
        Some(view) => {
            let panel = DataPanel {
                view,
                container: session.container(),
                layout: &config.layout.table,
                max_pages: config.max_pages,
                focused: *focus == Focus::Data,
            };
            draw_data_viewer(f, &panel, data_viewer, right[1], colors);
        },
        None => draw_no_data(f, right[1], "No data: select a dataset", colors),
    }
}

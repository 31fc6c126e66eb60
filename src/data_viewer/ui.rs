//! Data table rendering.

use super::DataViewerState;
use crate::config::TableLayoutConfig;
use crate::container::Container;
use crate::data::DatasetView;
use crate::ui::formatters::truncate_to_width;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, Wrap},
    Frame,
};

/// Parameters shared by the data panel widgets.
#[derive(Debug)]
pub struct DataPanel<'a> {
    /// Dataset to show.
    pub view: &'a DatasetView,
    /// Container for resolving references.
    pub container: &'a dyn Container,
    /// Table layout.
    pub layout: &'a TableLayoutConfig,
    /// Most page labels listed in the selector.
    pub max_pages: usize,
    /// Whether the panel has keyboard focus.
    pub focused: bool,
}

/// Draw the data panel: page selector, optional text line and the table.
pub fn draw_data_viewer(
    f: &mut Frame<'_>,
    panel: &DataPanel<'_>,
    state: &mut DataViewerState,
    area: Rect,
    colors: &ThemeColors,
) {
    let text_height = if panel.view.text().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(text_height),
            Constraint::Min(3),
        ])
        .split(area);

    draw_page_selector(f, chunks[0], panel, state, colors);
    if let Some(text) = panel.view.text() {
        let paragraph = Paragraph::new(text.to_string())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Text ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.bg2)),
            )
            .style(Style::default().fg(colors.purple));
        f.render_widget(paragraph, chunks[1]);
    }
    draw_table(f, chunks[2], panel, state, colors);
}

fn draw_page_selector(
    f: &mut Frame<'_>,
    area: Rect,
    panel: &DataPanel<'_>,
    state: &DataViewerState,
    colors: &ThemeColors,
) {
    let count = panel.view.page_count();
    let mut spans = vec![Span::styled(
        format!("Page {}/{} ", (state.page + 1).min(count), count),
        Style::default().fg(colors.fg1),
    )];

    // labels around the shown page, within the materialised cap
    let labels = panel.view.page_labels(panel.max_pages);
    let start = state.page.saturating_sub(2);
    for (i, label) in labels.iter().enumerate().skip(start).take(5) {
        let style = if i == state.page {
            Style::default()
                .fg(colors.bg0)
                .bg(colors.yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.gray)
        };
        spans.push(Span::styled(label.clone(), style));
        spans.push(Span::raw(" "));
    }
    if state.page >= labels.len() && state.page < count {
        spans.push(Span::styled(
            panel.view.page_label(state.page),
            Style::default().fg(colors.bg0).bg(colors.yellow),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_table(
    f: &mut Frame<'_>,
    area: Rect,
    panel: &DataPanel<'_>,
    state: &mut DataViewerState,
    colors: &ThemeColors,
) {
    let layout = panel.layout;
    let col_width = layout.column_width as usize;
    let row_header_width = layout.row_header_width as usize;
    state.visible_rows = (area.height as usize).saturating_sub(3).max(1);
    state.visible_cols = ((area.width as usize).saturating_sub(row_header_width + layout.border_padding)
        / col_width.max(1))
    .clamp(1, layout.max_visible_columns.max(1));
    state.keep_cursor_visible();

    let (total_rows, total_cols) = panel.view.page_shape();
    let start_row = state.scroll.row;
    let start_col = state.scroll.col;
    let end_row = (start_row + state.visible_rows).min(total_rows);
    let end_col = (start_col + state.visible_cols).min(total_cols);

    let page = panel
        .view
        .render_window(state.page, start_row..end_row, start_col..end_col, panel.container);

    let mut rows = Vec::with_capacity(page.rows.len());
    for (offset, line) in page.rows.iter().enumerate() {
        let row_idx = start_row + offset;
        let mut cells = vec![Cell::from(format!("{:>width$}", row_idx, width = row_header_width.saturating_sub(1)))
            .style(Style::default().fg(colors.green))];
        for (col_offset, cell) in line.iter().enumerate() {
            let col_idx = start_col + col_offset;
            let color = if cell.is_navigable() {
                colors.purple
            } else {
                colors.aqua
            };
            let mut style = Style::default().fg(color);
            if cell.is_navigable() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if panel.focused && state.cursor.row == row_idx && state.cursor.col == col_idx {
                style = Style::default()
                    .fg(colors.bg0)
                    .bg(colors.yellow)
                    .add_modifier(Modifier::BOLD);
            }
            cells.push(Cell::from(truncate_to_width(&cell.text, col_width.saturating_sub(1))).style(style));
        }
        rows.push(Row::new(cells));
    }

    let mut header_cells = vec![Cell::from("")];
    for col_idx in start_col..end_col {
        header_cells.push(
            Cell::from(format!("{:>width$}", col_idx, width = col_width.saturating_sub(2))).style(
                Style::default()
                    .fg(colors.green)
                    .add_modifier(Modifier::BOLD),
            ),
        );
    }

    let mut widths = vec![Constraint::Length(layout.row_header_width)];
    for _ in start_col..end_col {
        widths.push(Constraint::Length(layout.column_width));
    }

    let border_color = if panel.focused {
        colors.yellow
    } else {
        colors.bg2
    };
    let title = format!(
        " {} | {} ",
        panel.view.path(),
        panel.view.type_label()
    );
    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title)
                .title_style(Style::default().fg(colors.yellow)),
        )
        .style(Style::default().fg(colors.fg0));

    f.render_widget(table, area);

    if total_rows > state.visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total_rows.saturating_sub(state.visible_rows)).position(start_row);
        f.render_stateful_widget(
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            area,
            &mut scrollbar_state,
        );
    }
}

/// Draw the panel for objects without data.
pub fn draw_no_data(f: &mut Frame<'_>, area: Rect, message: &str, colors: &ThemeColors) {
    let paragraph = Paragraph::new(message.to_string())
        .block(
            Block::default()
                .title(" Data ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2)),
        )
        .style(Style::default().fg(colors.gray));
    f.render_widget(paragraph, area);
}

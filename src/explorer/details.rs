//! Details pane: object summary and attribute table.

use crate::session::Inspection;
use crate::ui::formatters::{format_number, truncate_to_width};
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Summary lines for an object.
pub fn format_summary(object: &Inspection, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Path: ", Style::default().fg(colors.fg1)),
        Span::styled(
            object.path.clone(),
            Style::default().fg(colors.aqua).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({})", object.kind.name()), Style::default().fg(colors.gray)),
    ])];

    if let Some(view) = &object.dataset {
        let (rows, cols) = view.page_shape();
        lines.push(Line::from(vec![
            Span::styled("Type: ", Style::default().fg(colors.fg1)),
            Span::styled(view.type_label(), Style::default().fg(colors.fg0)),
            Span::styled(
                format!(
                    "  {} elements, {} page(s) of {}×{}",
                    format_number(view.pager().buffer().element_count()),
                    format_number(view.page_count()),
                    rows,
                    cols
                ),
                Style::default().fg(colors.gray),
            ),
        ]));
    }
    lines
}

/// Draw the details pane for `object`.
pub fn draw_details(
    f: &mut Frame<'_>,
    object: Option<&Inspection>,
    scroll: u16,
    area: Rect,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .title(" Attributes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .style(Style::default().bg(colors.bg0));

    let Some(object) = object else {
        let paragraph = Paragraph::new("Select an object to view details")
            .block(block)
            .style(Style::default().fg(colors.fg0));
        f.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let summary = format_summary(object, colors);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(summary.len() as u16), Constraint::Min(0)])
        .split(inner);
    f.render_widget(Paragraph::new(summary), chunks[0]);

    let value_width = (chunks[1].width as usize).saturating_sub(20 + 12 + 2);
    let rows: Vec<Row<'_>> = object
        .attributes
        .iter()
        .skip(scroll as usize)
        .map(|attr| {
            let value = match &attr.value {
                Some(value) => Cell::from(truncate_to_width(value, value_width))
                    .style(Style::default().fg(colors.aqua)),
                None => Cell::from("<unreadable>").style(Style::default().fg(colors.red)),
            };
            Row::new(vec![
                Cell::from(truncate_to_width(&attr.name, 20)).style(Style::default().fg(colors.green)),
                Cell::from(attr.type_name.clone()).style(Style::default().fg(colors.gray)),
                value,
            ])
        })
        .collect();

    let header = Row::new(vec!["Name", "Type", "Value"]).style(
        Style::default()
            .fg(colors.yellow)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(
        rows,
        [Constraint::Length(20), Constraint::Length(12), Constraint::Min(10)],
    )
    .header(header)
    .style(Style::default().fg(colors.fg0));

    f.render_widget(table, chunks[1]);
}

//! Tree panel UI rendering.

use super::ExplorerState;
use crate::container::ObjectKind;
use crate::navigation::TreeItem;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the tree panel UI.
pub fn draw_tree(
    f: &mut Frame<'_>,
    explorer: &mut ExplorerState,
    title: &str,
    area: Rect,
    colors: &ThemeColors,
) {
    // Subtract 2 for borders
    let viewport_height = area.height.saturating_sub(2) as usize;
    explorer.adjust_scroll(viewport_height);

    let cursor = explorer.tree().cursor();
    let items: Vec<ListItem<'_>> = explorer
        .tree()
        .visible_items()
        .iter()
        .enumerate()
        .skip(explorer.scroll_offset())
        .take(viewport_height)
        .map(|(idx, item)| ListItem::new(tree_line(item, idx == cursor, colors)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.bg2))
            .style(Style::default().bg(colors.bg0)),
    );

    f.render_widget(list, area);
}

fn tree_line(item: &TreeItem, selected: bool, colors: &ThemeColors) -> Line<'static> {
    let indent = "  ".repeat(item.level);
    let expand_icon = match (item.entry.is_group(), item.expanded) {
        (true, true) => "▼ ",
        (true, false) => "▶ ",
        (false, _) => "  ",
    };

    if selected {
        let text = format!("{}{}{}  {}", indent, expand_icon, item.entry.name, item.entry.label);
        return Line::from(text).style(
            Style::default()
                .fg(colors.bg0)
                .bg(colors.yellow)
                .add_modifier(Modifier::BOLD),
        );
    }

    let name_color = match item.entry.kind {
        ObjectKind::Dataset => dataset_color(&item.entry.label, colors),
        ObjectKind::Unknown => colors.gray,
        _ => colors.fg0,
    };
    Line::from(vec![
        Span::raw(indent),
        Span::raw(expand_icon),
        Span::styled(
            item.entry.name.clone(),
            Style::default().fg(name_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", item.entry.label), Style::default().fg(colors.gray)),
    ])
}

fn dataset_color(label: &str, colors: &ThemeColors) -> Color {
    if label.contains("Float") {
        colors.aqua
    } else if label.contains("Integer") {
        colors.blue
    } else if label.contains("String") || label.contains("Reference") {
        colors.purple
    } else {
        colors.green
    }
}

/// Draw the welcome screen.
pub fn draw_welcome(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "Welcome to h5pad!",
            Style::default()
                .fg(colors.yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Open an HDF5 / netCDF-4 file to get started"),
        Line::from(""),
        Line::from("Usage: h5pad <file.h5>"),
        Line::from(""),
        Line::from("Keyboard shortcuts:"),
        Line::from("  j/k or ↓/↑     - Move"),
        Line::from("  h/l or ←/→     - Collapse/Expand"),
        Line::from("  Enter          - Open entry / follow reference"),
        Line::from("  u or Backspace - Up one level"),
        Line::from("  b/f            - Back/Forward"),
        Line::from("  [ ]            - Previous/next page"),
        Line::from("  g              - Go to path"),
        Line::from("  Tab            - Switch panel"),
        Line::from("  T              - Cycle theme"),
        Line::from("  q              - Quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" h5pad ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2))
                .style(Style::default().bg(colors.bg0)),
        )
        .style(Style::default().fg(colors.fg0));

    f.render_widget(paragraph, area);
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{Category, Emoji};

/// Accent color per category, used for the badge in each row.
pub(crate) fn category_color(category: Category) -> Color {
    match category {
        Category::Smileys => Color::Yellow,
        Category::Nature => Color::Green,
        Category::Food => Color::LightRed,
        Category::Objects => Color::Blue,
        Category::Symbols => Color::Magenta,
    }
}

pub(crate) fn category_style(category: Category) -> Style {
    Style::default().fg(category_color(category))
}

/// One list row: glyph, description, favorite star, category badge and the
/// creation date.
pub(crate) fn emoji_row_line(emoji: &Emoji) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("{}  ", emoji.emoji)),
        Span::styled(
            emoji.description.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if emoji.is_favorite {
        spans.push(Span::styled(" ★", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("[{}]", emoji.category),
        category_style(emoji.category),
    ));
    spans.push(Span::styled(
        format!("  {}", emoji.created_date.format("%Y-%m-%d")),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

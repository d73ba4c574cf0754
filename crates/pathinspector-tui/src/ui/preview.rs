//! Preview pane: shows the inspector's bounded preview text as-is.

use pathinspector_core::config::theme::{parse_color, Theme};
use pathinspector_core::fs::LISTING_MARKER;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_preview(f: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Preview")
        .border_style(Style::default().fg(parse_color(&theme.preview.border_fg)));

    let paragraph = Paragraph::new(preview_lines(text, theme))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// One line per preview line; the truncation marker line is highlighted.
fn preview_lines<'a>(text: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    let marker_style = Style::default().fg(parse_color(&theme.preview.truncation_fg));
    text.lines()
        .map(|line| {
            if line == LISTING_MARKER {
                Line::from(Span::styled(line, marker_style))
            } else {
                Line::from(line)
            }
        })
        .collect()
}

//! Toolbar with the Up and Home buttons, the editable path line and the
//! List button.
//!
//! The path line is colored by whether it names a folder; the List button
//! is dimmed when it does not.

use pathinspector_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the toolbar.
pub struct PathLineProps<'a> {
    pub text: &'a str,
    pub listable: bool,
    pub editing: bool,
}

pub fn render_path_line(f: &mut Frame, area: Rect, props: &PathLineProps<'_>, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(7),
        ])
        .split(area);

    let button = Style::default()
        .fg(parse_color(&theme.panel.button_fg))
        .add_modifier(Modifier::BOLD);
    f.render_widget(Paragraph::new(Span::styled("[Up]", button)), chunks[0]);
    f.render_widget(Paragraph::new(Span::styled("[Home]", button)), chunks[1]);

    let (fg, bg) = if props.listable {
        (&theme.path_line.valid_fg, &theme.path_line.valid_bg)
    } else {
        (&theme.path_line.invalid_fg, &theme.path_line.invalid_bg)
    };
    let line_area = chunks[2];
    let visible = visible_tail(props.text, usize::from(line_area.width.saturating_sub(1)));
    f.render_widget(
        Paragraph::new(Span::raw(visible))
            .style(Style::default().fg(parse_color(fg)).bg(parse_color(bg))),
        line_area,
    );

    if props.editing {
        let offset = u16::try_from(visible.chars().count()).unwrap_or(u16::MAX);
        let x = line_area.x.saturating_add(offset).min(line_area.right().saturating_sub(1));
        f.set_cursor_position(Position::new(x, line_area.y));
    }

    let list_style = if props.listable {
        button
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(Paragraph::new(Span::styled(" [List]", list_style)), chunks[3]);
}

/// The last `width` characters of `text`, so the end of a long path stays visible.
pub fn visible_tail(text: &str, width: usize) -> &str {
    let count = text.chars().count();
    if count <= width {
        return text;
    }
    let skip = count - width;
    text.char_indices()
        .nth(skip)
        .map(|(i, _)| &text[i..])
        .unwrap_or("")
}

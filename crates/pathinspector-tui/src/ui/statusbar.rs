//! Single-row status bar: position in the tree, the current preview
//! budget and key hints for the active mode.

use pathinspector_core::config::theme::{parse_color, Theme};
use pathinspector_core::CapacityBudget;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar.
pub struct StatusBarProps {
    pub row_count: usize,
    pub selected_index: usize,
    pub budget: CapacityBudget,
    pub hints: &'static str,
}

pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps, theme: &Theme) {
    let hint_style = Style::default()
        .fg(parse_color(&theme.panel.border_fg))
        .add_modifier(Modifier::ITALIC);

    let line = Line::from(vec![
        Span::raw(position_text(props.row_count, props.selected_index)),
        Span::raw(format!("  {}", budget_text(&props.budget))),
        Span::styled(format!("  {}", props.hints), hint_style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn position_text(row_count: usize, selected_index: usize) -> String {
    if row_count == 0 {
        " 0/0".to_string()
    } else {
        format!(" {}/{}", selected_index + 1, row_count)
    }
}

fn budget_text(budget: &CapacityBudget) -> String {
    let show = |n: Option<usize>| n.map_or_else(|| "all".to_string(), |n| n.to_string());
    format!(
        "fits {} lines, {} chars",
        show(budget.max_lines),
        show(budget.max_bytes)
    )
}

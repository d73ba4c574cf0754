use pathinspector_core::config::theme::Theme;
use pathinspector_core::nav::DirTree;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
    Frame,
};

use crate::ui::panel::render_tree;

/// Renders the folder chooser as a centered popup over the main view.
pub fn render_folder_chooser(f: &mut Frame, chooser: &DirTree, theme: &Theme) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);
    let title = format!("Open folder: {}", selected_path(chooser));
    render_tree(f, area, chooser, &title, theme);
}

fn selected_path(chooser: &DirTree) -> String {
    chooser
        .selected_row()
        .map(|row| row.path.display().to_string())
        .unwrap_or_else(|| chooser.root().display().to_string())
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

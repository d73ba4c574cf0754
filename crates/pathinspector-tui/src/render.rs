use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::ui::panel::{render_tree, tree_title};
use crate::ui::path_line::{render_path_line, PathLineProps};
use crate::ui::popup::render_folder_chooser;
use crate::ui::preview::render_preview;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

/// Screen regions, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub toolbar: Rect,
    pub tree: Rect,
    pub preview: Rect,
    pub statusbar: Rect,
}

/// Splits `area` into toolbar | tree, preview | status bar.
///
/// `panel_ratio` is the tree's share of the width, clamped to 10..=90 %.
pub fn layout(area: Rect, panel_ratio: f64) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let tree_percent = (panel_ratio.clamp(0.1, 0.9) * 100.0).round() as u16;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(tree_percent),
            Constraint::Percentage(100 - tree_percent),
        ])
        .split(rows[1]);

    Areas {
        toolbar: rows[0],
        tree: columns[0],
        preview: columns[1],
        statusbar: rows[2],
    }
}

/// Cells available for preview text inside the pane border.
pub fn preview_inner(area: Rect, panel_ratio: f64) -> Rect {
    Block::default()
        .borders(Borders::ALL)
        .inner(layout(area, panel_ratio).preview)
}

/// Key hints for the status bar.
pub fn mode_hints(mode: &AppMode) -> &'static str {
    match mode {
        AppMode::Normal => "j/k move  l expand  L list  u up  ~ home  : path  o open  q quit",
        AppMode::EditPath { .. } => "Enter list  Esc cancel",
        AppMode::OpenFolder { .. } => "j/k move  l expand  Enter open  Esc cancel",
    }
}

/// Main render function, composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let inspector = app.inspector();
    let tree = inspector.tree();
    let editing = matches!(app.mode(), AppMode::EditPath { .. });
    let areas = layout(f.area(), app.config().ui.panel_ratio);

    render_path_line(
        f,
        areas.toolbar,
        &PathLineProps {
            text: inspector.path_line(),
            listable: inspector.path_line_is_listable(),
            editing,
        },
        theme,
    );
    render_tree(f, areas.tree, tree, &tree_title(tree), theme);
    render_preview(f, areas.preview, inspector.preview(), theme);
    render_statusbar(
        f,
        areas.statusbar,
        &StatusBarProps {
            row_count: tree.rows().len(),
            selected_index: tree.selected_index(),
            budget: app.budget(),
            hints: mode_hints(app.mode()),
        },
        theme,
    );

    if let AppMode::OpenFolder { chooser } = app.mode() {
        render_folder_chooser(f, chooser, theme);
    }
}

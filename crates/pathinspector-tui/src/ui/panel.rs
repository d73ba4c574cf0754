//! Folder tree panel.

use pathinspector_core::config::theme::{parse_color, Theme};
use pathinspector_core::nav::{DirTree, TreeRow};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const SIZE_WIDTH: usize = 9;
const KIND_WIDTH: usize = 20;
/// Narrower than this, rows show the name only.
const MIN_COLUMNS_WIDTH: usize = 40;

/// Renders the tree with folders highlighted and the cursor row reversed.
pub fn render_tree(f: &mut Frame, area: Rect, tree: &DirTree, title: &str, theme: &Theme) {
    let selected_color = parse_color(&theme.panel.selected_fg);
    let detail_style = Style::default().fg(parse_color(&theme.panel.detail_fg));
    // Borders and the highlight symbol.
    let width = usize::from(area.width.saturating_sub(4));

    let items: Vec<ListItem> = tree
        .rows()
        .iter()
        .map(|row| ListItem::new(row_line(row, width, row_style(row, theme), detail_style)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_owned())
                .border_style(Style::default().fg(parse_color(&theme.panel.border_fg))),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(selected_color),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !tree.rows().is_empty() {
        state.select(Some(tree.selected_index()));
    }

    f.render_stateful_widget(list, area, &mut state);
}

/// Last component of the tree root, or `/`.
pub fn tree_title(tree: &DirTree) -> String {
    tree.root()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "/".to_string())
}

/// Indented name with an expand marker on folders.
pub fn row_label(row: &TreeRow) -> String {
    let indent = "  ".repeat(row.depth);
    let marker = match (row.is_dir, row.expanded) {
        (true, true) => "v ",
        (true, false) => "> ",
        (false, _) => "  ",
    };
    format!("{indent}{marker}{}", row.name)
}

/// Name, size and type columns fitted to `width` cells.
fn row_line(row: &TreeRow, width: usize, name_style: Style, detail_style: Style) -> Line<'static> {
    let label = row_label(row);
    if width < MIN_COLUMNS_WIDTH {
        return Line::from(Span::styled(label, name_style));
    }

    let name_width = width - SIZE_WIDTH - KIND_WIDTH - 2;
    let size = row.size.map(format_size).unwrap_or_default();
    Line::from(vec![
        Span::styled(
            format!("{:<name_width$}", fit(&label, name_width)),
            name_style,
        ),
        Span::styled(format!(" {size:>SIZE_WIDTH$} "), detail_style),
        Span::styled(
            format!("{:<KIND_WIDTH$}", fit(&row.kind, KIND_WIDTH)),
            detail_style,
        ),
    ])
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn row_style(row: &TreeRow, theme: &Theme) -> Style {
    if row.is_dir {
        Style::default()
            .fg(parse_color(&theme.panel.dir_fg))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn row(name: &str, depth: usize, is_dir: bool, expanded: bool) -> TreeRow {
        TreeRow {
            path: PathBuf::from(name),
            name: name.to_string(),
            depth,
            is_dir,
            expanded,
            size: if is_dir { None } else { Some(2048) },
            kind: if is_dir { "Folder" } else { "text/x-rust" }.to_string(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn labels_show_depth_and_state() {
        assert_eq!(row_label(&row("src", 0, true, false)), "> src");
        assert_eq!(row_label(&row("src", 0, true, true)), "v src");
        assert_eq!(row_label(&row("main.rs", 1, false, false)), "    main.rs");
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn wide_rows_show_size_and_kind() {
        let style = Style::default();
        let file = text(&row_line(&row("main.rs", 0, false, false), 60, style, style));
        assert_eq!(file.chars().count(), 60);
        assert!(file.starts_with("  main.rs"));
        assert!(file.contains("   2.0 KB "));
        assert!(file.trim_end().ends_with("text/x-rust"));

        let folder = text(&row_line(&row("src", 0, true, false), 60, style, style));
        assert!(folder.trim_end().ends_with("           Folder"));
    }

    #[test]
    fn narrow_rows_show_name_only() {
        let style = Style::default();
        let line = text(&row_line(&row("main.rs", 0, false, false), 30, style, style));
        assert_eq!(line, "  main.rs");
    }

    #[test]
    fn long_kind_is_cut_to_column() {
        let style = Style::default();
        let mut long = row("doc.docx", 0, false, false);
        long.kind = "application/vnd.openxmlformats-officedocument".to_string();
        let line = text(&row_line(&long, 60, style, style));
        assert_eq!(line.chars().count(), 60);
        assert!(line.ends_with("application/vnd.open"));
    }

    #[test]
    fn title_is_last_component() {
        let tree = DirTree::new(PathBuf::from("/"), false);
        assert_eq!(tree_title(&tree), "/");
    }
}

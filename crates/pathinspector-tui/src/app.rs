use std::path::{Path, PathBuf};

use pathinspector_core::config::settings::{Config, UiConfig};
use pathinspector_core::config::theme::Theme;
use pathinspector_core::dispatch::{Dispatcher, FsSource};
use pathinspector_core::nav::{DirTree, Inspector};
use pathinspector_core::{CapacityBudget, GlyphMetrics, Surface};
use ratatui::layout::Rect;

use crate::input::InputAction;

/// Application mode, determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Typing into the path line. `original` is restored on cancel.
    EditPath { original: String },
    /// Picking a folder to list, starting at the file system root.
    OpenFolder { chooser: DirTree },
}

/// Top-level TUI state.
///
/// Follows the immutable-update convention: every transition consumes
/// `self` and returns the next `App`.
#[derive(Debug, Clone)]
pub struct App {
    inspector: Inspector<FsSource>,
    mode: AppMode,
    config: Config,
    theme: Theme,
    budget: CapacityBudget,
    should_quit: bool,
}

fn config_dir() -> PathBuf {
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("pathinspector")
}

impl App {
    /// Creates an app rooted at `start_dir`, reading config and theme from
    /// the usual locations and falling back to defaults.
    pub fn new(start_dir: &Path) -> anyhow::Result<Self> {
        let cfg_dir = config_dir();
        let config = Config::load(&cfg_dir.join("default.toml")).unwrap_or_else(|e| {
            tracing::debug!("using default config: {e}");
            Config::default()
        });
        let theme = Theme::load(&cfg_dir.join("theme.toml")).unwrap_or_default();
        Self::with_settings(start_dir, config, theme)
    }

    /// Creates an app with explicit settings.
    pub fn with_settings(start_dir: &Path, config: Config, theme: Theme) -> anyhow::Result<Self> {
        let root = start_dir.canonicalize()?;
        let dispatcher = Dispatcher::new(FsSource::from_config(&config));
        let inspector = Inspector::new(dispatcher, root, config.general.show_hidden);

        Ok(Self {
            inspector,
            mode: AppMode::Normal,
            config,
            theme,
            budget: CapacityBudget::default(),
            should_quit: false,
        })
    }

    pub fn inspector(&self) -> &Inspector<FsSource> {
        &self.inspector
    }

    pub fn tree(&self) -> &DirTree {
        self.inspector.tree()
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn budget(&self) -> CapacityBudget {
        self.budget
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Stores the preview pane budget used by the next selection.
    pub fn with_budget(self, budget: CapacityBudget) -> Self {
        Self { budget, ..self }
    }

    /// Re-runs the preview for whatever the path line shows.
    pub fn with_preview_refreshed(self) -> Self {
        let path = PathBuf::from(self.inspector.path_line());
        let inspector = self.inspector.select(&path, &self.budget);
        Self { inspector, ..self }
    }

    /// Applies one input action.
    pub fn apply(self, action: InputAction) -> Self {
        let budget = self.budget;
        match action {
            InputAction::CursorUp => self.map_inspector(|i| i.cursor_up(&budget)),
            InputAction::CursorDown => self.map_inspector(|i| i.cursor_down(&budget)),
            InputAction::Toggle => self.map_inspector(Inspector::toggle_selected),
            InputAction::ListSelected => {
                let target = self
                    .tree()
                    .selected_row()
                    .filter(|row| row.is_dir)
                    .map(|row| row.path.clone());
                match target {
                    Some(path) => self.map_inspector(|i| i.list(&path, &budget)),
                    None => self,
                }
            }
            InputAction::GoUp => self.map_inspector(|i| i.navigate_up(&budget)),
            InputAction::GoHome => self.map_inspector(|i| i.navigate_home(&budget)),
            InputAction::EditPath => {
                let original = self.inspector.path_line().to_string();
                Self {
                    mode: AppMode::EditPath { original },
                    ..self
                }
            }
            InputAction::PathChar(c) => self.edit_path_line(|line| line.push(c)),
            InputAction::PathBackspace => self.edit_path_line(|line| {
                line.pop();
            }),
            InputAction::PathConfirm => self.confirm_path_line(),
            InputAction::PathCancel => self.cancel_path_line(),
            InputAction::OpenFolder => {
                let chooser = DirTree::folders(PathBuf::from("/"), self.config.general.show_hidden);
                Self {
                    mode: AppMode::OpenFolder { chooser },
                    ..self
                }
            }
            InputAction::ChooserUp => self.map_chooser(DirTree::move_up),
            InputAction::ChooserDown => self.map_chooser(DirTree::move_down),
            InputAction::ChooserToggle => self.map_chooser(DirTree::with_toggled_selection),
            InputAction::ChooserConfirm => self.confirm_chooser(),
            InputAction::ChooserCancel => Self {
                mode: AppMode::Normal,
                ..self
            },
            InputAction::Quit => Self {
                should_quit: true,
                ..self
            },
            InputAction::None => self,
        }
    }

    fn map_inspector(self, f: impl FnOnce(Inspector<FsSource>) -> Inspector<FsSource>) -> Self {
        Self {
            inspector: f(self.inspector),
            ..self
        }
    }

    fn edit_path_line(self, edit: impl FnOnce(&mut String)) -> Self {
        let mut line = self.inspector.path_line().to_string();
        edit(&mut line);
        self.map_inspector(|i| i.with_path_line(line))
    }

    fn confirm_path_line(self) -> Self {
        if !self.inspector.path_line_is_listable() {
            return self;
        }
        let budget = self.budget;
        Self {
            mode: AppMode::Normal,
            ..self
        }
        .map_inspector(|i| i.list_path_line(&budget))
    }

    fn cancel_path_line(self) -> Self {
        let original = match &self.mode {
            AppMode::EditPath { original } => original.clone(),
            _ => return self,
        };
        Self {
            mode: AppMode::Normal,
            ..self
        }
        .map_inspector(|i| i.with_path_line(original))
    }

    fn map_chooser(self, f: impl FnOnce(DirTree) -> DirTree) -> Self {
        match self.mode {
            AppMode::OpenFolder { chooser } => Self {
                mode: AppMode::OpenFolder {
                    chooser: f(chooser),
                },
                ..self
            },
            _ => self,
        }
    }

    fn confirm_chooser(self) -> Self {
        let target = match &self.mode {
            AppMode::OpenFolder { chooser } => chooser.selected_row().map(|row| row.path.clone()),
            _ => return self,
        };
        let Some(path) = target else {
            return self;
        };
        let budget = self.budget;
        Self {
            mode: AppMode::Normal,
            ..self
        }
        .map_inspector(|i| i.list(&path, &budget))
    }
}

/// Pixel size of one terminal cell, if the terminal reports it.
pub fn cell_pixels() -> Option<(u32, u32)> {
    let size = crossterm::terminal::window_size().ok()?;
    if size.columns == 0 || size.rows == 0 || size.width == 0 || size.height == 0 {
        return None;
    }
    Some((
        u32::from(size.width / size.columns),
        u32::from(size.height / size.rows),
    ))
}

/// Budget for a preview pane occupying `area` cells.
///
/// Glyph metrics come from the config when set, else from the cell size,
/// else one unit per cell.
pub fn preview_budget(area: Rect, ui: &UiConfig, cell_px: Option<(u32, u32)>) -> CapacityBudget {
    let glyphs = ui
        .glyph_metrics()
        .or_else(|| cell_px.map(|(w, h)| GlyphMetrics::new(w, h)))
        .unwrap_or_default();
    let (cell_w, cell_h) = cell_px.unwrap_or((glyphs.avg_width_px, glyphs.line_height_px));
    let surface = Surface::new(
        u32::from(area.width).saturating_mul(cell_w),
        u32::from(area.height).saturating_mul(cell_h),
    );
    CapacityBudget::estimate(&surface, &glyphs)
}

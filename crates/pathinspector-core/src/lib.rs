//! Path Inspector core library: bounded previews of files and folders.
//!
//! `pathinspector-core` decides what a preview pane shows for a selected
//! path and samples only as much content as the pane can display. It has no
//! rendering code; the terminal front-end (`pathinspector-tui`) is one
//! consumer.
//!
//! # Modules
//!
//! - [`fs`]: classification and the samplers (folder listing, text prefix, file summary).
//! - [`capacity`]: how many lines and characters fit a pane.
//! - [`dispatch`]: routes a selection to the right sampler.
//! - [`nav`]: the folder tree and per-window presenter state.
//! - [`config`]: TOML settings and theme.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod capacity;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fs;
pub mod nav;

pub use capacity::{
    estimate_byte_capacity, estimate_line_capacity, CapacityBudget, GlyphMetrics, Surface,
};
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
pub use dispatch::{Dispatcher, FsSource, PreviewOutcome, PreviewSource};
pub use error::{CoreError, CoreResult};
pub use fs::{
    classify, sample_directory, sample_text, summarize_file, MarkerPolicy, MediaType, PathKind,
};
pub use nav::{DirTree, Inspector, TreeRow};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed), which splits composed
/// characters such as Hangul syllables into their parts. This re-composes them.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}

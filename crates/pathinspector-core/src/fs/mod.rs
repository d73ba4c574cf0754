//! File system sampling for Path Inspector.
//!
//! Every sampler here is best-effort: failures are logged and turned into
//! an empty result rather than returned. See [`classify::classify`] for how
//! a path is routed, [`listing`] for folders, [`text`] for text files, and
//! [`metadata`] with [`media`] for everything else.

pub mod classify;
pub mod listing;
pub mod media;
pub mod metadata;
pub mod text;

pub use classify::{classify, PathKind};
pub use listing::{sample_directory, sample_directory_with, ListingOptions, LISTING_MARKER};
pub use media::{sniff_media_type, ContentSniffer, MediaSniffer, MediaType};
pub use metadata::{summarize_file, summarize_file_as};
pub use text::{sample_text, sample_text_with, MarkerPolicy, TEXT_MARKER};

//! Media type detection by content inspection.
//!
//! The file name only refines what the bytes already say: a text file with an
//! odd extension is still text, and a PNG renamed to `.txt` is still a PNG.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// The number of leading bytes inspected when sniffing.
const SNIFF_SIZE: usize = 8192;

/// Signatures not covered by `image::guess_format`.
const MAGIC: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"\x7fELF", "application/x-executable"),
    (b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
];

/// Application types whose taxonomy derives from `text/plain`.
const TEXT_LIKE_APPLICATION_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/javascript",
    "application/x-javascript",
    "application/ecmascript",
    "application/x-sh",
    "application/x-shellscript",
    "application/toml",
    "application/x-toml",
    "application/yaml",
    "application/x-yaml",
    "application/sql",
    "application/x-sql",
];

/// A detected media type such as `text/plain` or `image/png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType(String);

impl MediaType {
    pub const TEXT_PLAIN: &'static str = "text/plain";
    pub const OCTET_STREAM: &'static str = "application/octet-stream";
    pub const ZERO_SIZE: &'static str = "application/x-zerosize";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_ascii_lowercase())
    }

    pub fn text_plain() -> Self {
        Self::new(Self::TEXT_PLAIN)
    }

    pub fn octet_stream() -> Self {
        Self::new(Self::OCTET_STREAM)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for `text/plain` and every type derived from it.
    pub fn is_text(&self) -> bool {
        self.0.starts_with("text/")
            || TEXT_LIKE_APPLICATION_TYPES.contains(&self.0.as_str())
            || self.0.ends_with("+xml")
            || self.0.ends_with("+json")
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything able to tell the media type of a file.
///
/// Implemented by [`ContentSniffer`] and by any `Fn(&Path) -> MediaType`, so
/// tests can pin the type without crafting file contents.
pub trait MediaSniffer {
    fn sniff(&self, path: &Path) -> MediaType;
}

impl<F> MediaSniffer for F
where
    F: Fn(&Path) -> MediaType,
{
    fn sniff(&self, path: &Path) -> MediaType {
        self(path)
    }
}

/// Sniffs the leading bytes of a file; see [`sniff_media_type`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSniffer;

impl MediaSniffer for ContentSniffer {
    fn sniff(&self, path: &Path) -> MediaType {
        sniff_media_type(path)
    }
}

/// Detects the media type of the file at `path` from its content.
///
/// Unreadable files are typed by name alone, falling back to
/// `application/octet-stream`.
pub fn sniff_media_type(path: &Path) -> MediaType {
    match read_head(path) {
        Ok(head) => {
            let media = sniff_bytes(&head, path);
            tracing::debug!(path = %path.display(), media = %media, "sniffed media type");
            media
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot sniff media type");
            guess_by_name(path).unwrap_or_else(MediaType::octet_stream)
        }
    }
}

fn guess_by_name(path: &Path) -> Option<MediaType> {
    mime_guess::from_path(path).first_raw().map(MediaType::new)
}

fn read_head(path: &Path) -> CoreResult<Vec<u8>> {
    let file = File::open(path).map_err(|e| CoreError::from_io(path, e))?;
    let mut head = Vec::with_capacity(SNIFF_SIZE);
    file.take(SNIFF_SIZE as u64).read_to_end(&mut head)?;
    Ok(head)
}

/// Classifies `head`, using `path` only to refine or break ties.
fn sniff_bytes(head: &[u8], path: &Path) -> MediaType {
    let by_name = guess_by_name(path);

    if head.is_empty() {
        return by_name.unwrap_or_else(|| MediaType::new(MediaType::ZERO_SIZE));
    }

    if let Ok(format) = image::guess_format(head) {
        return MediaType::new(format.to_mime_type());
    }

    if let Some((_, media)) = MAGIC.iter().find(|(magic, _)| head.starts_with(magic)) {
        return MediaType::new(*media);
    }

    if head.contains(&0) {
        return MediaType::octet_stream();
    }

    if looks_like_utf8(head) {
        return by_name
            .filter(MediaType::is_text)
            .unwrap_or_else(MediaType::text_plain);
    }

    by_name
        .filter(|m| !m.is_text())
        .unwrap_or_else(MediaType::octet_stream)
}

/// Valid UTF-8, allowing a sequence cut off by the sniff window.
fn looks_like_utf8(head: &[u8]) -> bool {
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && head.len() - e.valid_up_to() < 4,
    }
}

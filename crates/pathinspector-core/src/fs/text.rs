//! Bounded text previews.
//!
//! A capped preview reserves room for [`TEXT_MARKER`] and never reads more
//! of the file than the cap allows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classify::classify;
use crate::error::{CoreError, CoreResult};

/// Appended to a capped text preview.
pub const TEXT_MARKER: &str = "\n...";

/// When a capped text preview gets [`TEXT_MARKER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// Whenever a cap is given, even if the whole file fit.
    #[default]
    Always,
    /// Only when the file is actually longer than the cap.
    WhenTruncated,
}

/// Reads a preview of the text file at `path`.
///
/// `None` returns the whole file. `Some(cap)` returns at most `cap - 4`
/// bytes of content followed by [`TEXT_MARKER`]. Anything that is not a
/// readable regular file yields an empty string.
pub fn sample_text(path: &Path, max_bytes: Option<usize>) -> String {
    sample_text_with(path, max_bytes, MarkerPolicy::Always)
}

/// [`sample_text`] with an explicit [`MarkerPolicy`].
pub fn sample_text_with(path: &Path, max_bytes: Option<usize>, policy: MarkerPolicy) -> String {
    match read_text(path, max_bytes, policy) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "no text preview");
            String::new()
        }
    }
}

fn read_text(path: &Path, max_bytes: Option<usize>, policy: MarkerPolicy) -> CoreResult<String> {
    if !classify(path).is_file() {
        return Err(CoreError::NotAFile(path.to_path_buf()));
    }

    let mut file = File::open(path).map_err(|e| CoreError::from_io(path, e))?;

    let Some(cap) = max_bytes else {
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        return Ok(decode_whole(&bytes));
    };

    let content_cap = cap.saturating_sub(TEXT_MARKER.len());

    match policy {
        MarkerPolicy::Always => {
            let bytes = read_prefix(file, content_cap.saturating_add(1))?;
            Ok(with_marker(decode_capped(bytes, content_cap)))
        }
        MarkerPolicy::WhenTruncated => {
            // One byte past the cap tells whether the file overflows it.
            let bytes = read_prefix(file, cap.saturating_add(1))?;
            if bytes.len() <= cap {
                return Ok(decode_whole(&bytes));
            }
            Ok(with_marker(decode_capped(bytes, content_cap)))
        }
    }
}

fn read_prefix(file: File, limit: usize) -> CoreResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(limit.min(64 * 1024));
    file.take(limit as u64).read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn with_marker(mut text: String) -> String {
    text.push_str(TEXT_MARKER);
    text
}

/// Decodes a file read in full. Invalid bytes become U+FFFD.
fn decode_whole(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Decodes at most `limit` bytes of `bytes`.
///
/// When the limit cuts the buffer, a multi-byte sequence split by the cut is
/// dropped. Other invalid bytes become U+FFFD, so the result never has more
/// characters than `limit`.
fn decode_capped(mut bytes: Vec<u8>, limit: usize) -> String {
    if bytes.len() <= limit {
        return decode_whole(&bytes);
    }
    bytes.truncate(limit);
    let end = match std::str::from_utf8(&bytes) {
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        _ => bytes.len(),
    };
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn write(tmp: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = tmp.path().join(name);
        stdfs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn capped_preview_reserves_room_for_marker() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "hello.txt", b"hello world");

        assert_eq!(sample_text(&file, Some(8)), "hell\n...");
    }

    #[test]
    fn unbounded_preview_is_verbatim() {
        let tmp = TempDir::new().unwrap();
        let content = "line one\nline two\r\n\ttabbed\n";
        let file = write(&tmp, "full.txt", content.as_bytes());

        assert_eq!(sample_text(&file, None), content);
    }

    #[test]
    fn marker_appended_even_when_file_fits() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "short.txt", b"hi");

        assert_eq!(sample_text(&file, Some(100)), "hi\n...");
    }

    #[test]
    fn capped_preview_never_exceeds_cap() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "long.txt", "abcdefghij\n".repeat(50).as_bytes());

        for cap in [4, 5, 10, 64, 549, 550, 551, 1000] {
            let text = sample_text(&file, Some(cap));
            assert!(text.chars().count() <= cap, "cap {cap}");
            assert!(text.ends_with(TEXT_MARKER), "cap {cap}");
        }
    }

    #[test]
    fn cap_of_four_yields_marker_only() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "a.txt", b"abc");

        assert_eq!(sample_text(&file, Some(4)), TEXT_MARKER);
    }

    #[test]
    fn cap_below_marker_length_still_yields_marker() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "a.txt", b"abc");

        assert_eq!(sample_text(&file, Some(0)), TEXT_MARKER);
        assert_eq!(sample_text(&file, Some(2)), TEXT_MARKER);
    }

    #[test]
    fn empty_file_capped() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "empty.txt", b"");

        assert_eq!(sample_text(&file, Some(20)), TEXT_MARKER);
        assert_eq!(sample_text(&file, None), "");
    }

    #[test]
    fn when_truncated_keeps_short_file_whole() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "short.txt", b"hello");

        assert_eq!(
            sample_text_with(&file, Some(5), MarkerPolicy::WhenTruncated),
            "hello"
        );
        assert_eq!(
            sample_text_with(&file, Some(100), MarkerPolicy::WhenTruncated),
            "hello"
        );
    }

    #[test]
    fn when_truncated_marks_long_file() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "hello.txt", b"hello world");

        assert_eq!(
            sample_text_with(&file, Some(8), MarkerPolicy::WhenTruncated),
            "hell\n..."
        );
    }

    #[test]
    fn cut_multibyte_sequence_is_dropped() {
        let tmp = TempDir::new().unwrap();
        // "é" is two bytes; a cap of 7 leaves room for "ab" plus the first byte of "é".
        let file = write(&tmp, "utf8.txt", "abé and more".as_bytes());

        assert_eq!(sample_text(&file, Some(7)), "ab\n...");
        assert_eq!(sample_text(&file, Some(8)), "abé\n...");
    }

    #[test]
    fn unbounded_preview_keeps_incomplete_tail() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "tail.txt", b"abc\xe2\x82");

        assert_eq!(sample_text(&file, None), "abc\u{FFFD}");
    }

    #[test]
    fn file_within_cap_keeps_incomplete_tail() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "tail.txt", b"abc\xe2\x82");

        assert_eq!(
            sample_text_with(&file, Some(100), MarkerPolicy::WhenTruncated),
            "abc\u{FFFD}"
        );
        assert_eq!(sample_text(&file, Some(100)), "abc\u{FFFD}\n...");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "latin1.txt", b"caf\xe9 au lait");

        let text = sample_text(&file, None);
        assert!(text.starts_with("caf"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn directory_yields_empty() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(sample_text(tmp.path(), Some(100)), "");
        assert_eq!(sample_text(tmp.path(), None), "");
    }

    #[test]
    fn missing_file_yields_empty() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(sample_text(&tmp.path().join("missing.txt"), Some(100)), "");
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_yields_empty() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "locked.txt", b"secret");
        stdfs::set_permissions(&file, stdfs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits; only assert when the open really fails.
        if File::open(&file).is_err() {
            assert_eq!(sample_text(&file, Some(100)), "");
        }
    }
}

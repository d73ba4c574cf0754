//! One-glance summaries for files that cannot be previewed as text.

use std::fs;
use std::path::{Path, PathBuf};

use super::media::{sniff_media_type, MediaType};

/// Summarises the file at `path` as `Name`, `Type` and `Size` lines.
///
/// The media type is sniffed from the content. Never returns an empty
/// string; a size that cannot be read is reported as `0`.
pub fn summarize_file(path: &Path) -> String {
    summarize_file_as(path, &sniff_media_type(path))
}

/// [`summarize_file`] with an already detected media type.
pub fn summarize_file_as(path: &Path, media: &MediaType) -> String {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read file size");
            0
        }
    };

    format!(
        "Name: {}\nType: {}\nSize: {}",
        absolute(path).display(),
        media,
        size
    )
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    #[test]
    fn summary_has_three_lines_in_order() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("image.png");
        stdfs::write(&file, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

        let summary = summarize_file(&file);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("Name: {}", file.display()));
        assert_eq!(lines[1], "Type: image/png");
        assert_eq!(lines[2], "Size: 16");
    }

    #[test]
    fn size_matches_byte_length() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("blob.bin");
        stdfs::write(&file, vec![0u8; 4321]).unwrap();

        let summary = summarize_file(&file);
        assert!(summary.ends_with("\nSize: 4321"));
        assert!(summary.contains("\nType: application/octet-stream\n"));
    }

    #[test]
    fn uses_given_media_type() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        stdfs::write(&file, "abc").unwrap();

        let summary = summarize_file_as(&file, &MediaType::new("image/gif"));
        assert!(summary.contains("\nType: image/gif\n"));
        assert!(summary.ends_with("Size: 3"));
    }

    #[test]
    fn relative_path_is_reported_absolute() {
        let summary = summarize_file_as(Path::new("some/relative.bin"), &MediaType::octet_stream());
        let name = summary.lines().next().unwrap();
        let reported = name.strip_prefix("Name: ").unwrap();
        assert!(Path::new(reported).is_absolute());
        assert!(reported.ends_with("relative.bin"));
    }

    #[test]
    fn missing_file_still_summarised() {
        let tmp = TempDir::new().unwrap();
        let summary = summarize_file(&tmp.path().join("gone.bin"));
        assert_eq!(summary.lines().count(), 3);
        assert!(summary.ends_with("Size: 0"));
    }
}

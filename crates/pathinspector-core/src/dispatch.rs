//! Turns a selected path into what the preview pane should show.
//!
//! The [`Dispatcher`] only decides; all I/O goes through a [`PreviewSource`],
//! so it can be exercised with stubs and never touches a rendering surface.

use std::path::Path;

use crate::capacity::CapacityBudget;
use crate::config::settings::Config;
use crate::fs::{
    classify, sample_directory_with, sample_text_with, summarize_file_as, ContentSniffer,
    ListingOptions, MarkerPolicy, MediaSniffer, MediaType, PathKind,
};

/// What the preview pane should do after a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Blank the pane.
    Clear,
    /// Leave whatever the pane shows untouched.
    Keep,
    /// Replace the pane content.
    Show(String),
}

/// The samplers the dispatcher delegates to.
pub trait PreviewSource {
    fn classify(&self, path: &Path) -> PathKind;
    fn sample_directory(&self, path: &Path, max_entries: Option<usize>) -> Vec<String>;
    fn sample_text(&self, path: &Path, max_bytes: Option<usize>) -> String;
    fn summarize(&self, path: &Path, media: &MediaType) -> String;
    fn sniff(&self, path: &Path) -> MediaType;
}

/// [`PreviewSource`] backed by the local file system.
#[derive(Debug, Clone, Default)]
pub struct FsSource<S = ContentSniffer> {
    sniffer: S,
    listing: ListingOptions,
    marker: MarkerPolicy,
}

impl FsSource<ContentSniffer> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source honouring the `[general]` and `[preview]` settings.
    pub fn from_config(config: &Config) -> Self {
        Self::default()
            .with_listing(ListingOptions {
                show_hidden: config.general.show_hidden,
            })
            .with_marker(config.preview.text_marker)
    }
}

impl<S: MediaSniffer> FsSource<S> {
    /// Swaps the media sniffer.
    pub fn with_sniffer<T: MediaSniffer>(self, sniffer: T) -> FsSource<T> {
        FsSource {
            sniffer,
            listing: self.listing,
            marker: self.marker,
        }
    }

    pub fn with_listing(self, listing: ListingOptions) -> Self {
        Self { listing, ..self }
    }

    pub fn with_marker(self, marker: MarkerPolicy) -> Self {
        Self { marker, ..self }
    }
}

impl<S: MediaSniffer> PreviewSource for FsSource<S> {
    fn classify(&self, path: &Path) -> PathKind {
        classify(path)
    }

    fn sample_directory(&self, path: &Path, max_entries: Option<usize>) -> Vec<String> {
        sample_directory_with(path, max_entries, &self.listing)
    }

    fn sample_text(&self, path: &Path, max_bytes: Option<usize>) -> String {
        sample_text_with(path, max_bytes, self.marker)
    }

    fn summarize(&self, path: &Path, media: &MediaType) -> String {
        summarize_file_as(path, media)
    }

    fn sniff(&self, path: &Path) -> MediaType {
        self.sniffer.sniff(path)
    }
}

/// Routes one selection to the right sampler.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<P> {
    source: P,
}

impl<P: PreviewSource> Dispatcher<P> {
    pub fn new(source: P) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Decides the preview for `path` given the current pane `budget`.
    pub fn dispatch(&self, path: &Path, budget: &CapacityBudget) -> PreviewOutcome {
        let kind = self.source.classify(path);
        tracing::debug!(path = %path.display(), ?kind, ?budget, "dispatching preview");

        match kind {
            PathKind::Invalid => PreviewOutcome::Clear,
            PathKind::Directory => {
                let entries = self.source.sample_directory(path, budget.max_lines);
                if entries.is_empty() {
                    PreviewOutcome::Clear
                } else {
                    PreviewOutcome::Show(entries.join("\n"))
                }
            }
            PathKind::File => {
                let media = self.source.sniff(path);
                if media.is_text() {
                    let text = self.source.sample_text(path, budget.max_bytes);
                    if text.is_empty() {
                        PreviewOutcome::Keep
                    } else {
                        PreviewOutcome::Show(text)
                    }
                } else {
                    PreviewOutcome::Show(self.source.summarize(path, &media))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::{GlyphMetrics, Surface};
    use std::cell::RefCell;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn budget(lines: usize, bytes: usize) -> CapacityBudget {
        CapacityBudget {
            max_lines: Some(lines),
            max_bytes: Some(bytes),
        }
    }

    /// Records which sampler ran, answers from fixed data.
    struct StubSource {
        kind: PathKind,
        media: &'static str,
        entries: Vec<String>,
        text: String,
        calls: RefCell<Vec<&'static str>>,
    }

    impl StubSource {
        fn new(kind: PathKind) -> Self {
            Self {
                kind,
                media: "text/plain",
                entries: Vec::new(),
                text: String::new(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PreviewSource for StubSource {
        fn classify(&self, _: &Path) -> PathKind {
            self.kind
        }

        fn sample_directory(&self, _: &Path, max_entries: Option<usize>) -> Vec<String> {
            self.calls.borrow_mut().push("dir");
            self.entries
                .iter()
                .take(max_entries.unwrap_or(usize::MAX))
                .cloned()
                .collect()
        }

        fn sample_text(&self, _: &Path, _: Option<usize>) -> String {
            self.calls.borrow_mut().push("text");
            self.text.clone()
        }

        fn summarize(&self, _: &Path, media: &MediaType) -> String {
            self.calls.borrow_mut().push("summary");
            format!("summary of {media}")
        }

        fn sniff(&self, _: &Path) -> MediaType {
            MediaType::new(self.media)
        }
    }

    #[test]
    fn invalid_path_clears() {
        let dispatcher = Dispatcher::new(StubSource::new(PathKind::Invalid));
        assert_eq!(
            dispatcher.dispatch(Path::new("/x"), &budget(10, 100)),
            PreviewOutcome::Clear
        );
        assert!(dispatcher.source().calls.borrow().is_empty());
    }

    #[test]
    fn directory_entries_joined_by_newline() {
        let mut source = StubSource::new(PathKind::Directory);
        source.entries = vec!["a".into(), "b".into(), "c".into()];
        let dispatcher = Dispatcher::new(source);

        assert_eq!(
            dispatcher.dispatch(Path::new("/d"), &budget(2, 100)),
            PreviewOutcome::Show("a\nb".into())
        );
    }

    #[test]
    fn empty_directory_clears() {
        let dispatcher = Dispatcher::new(StubSource::new(PathKind::Directory));
        assert_eq!(
            dispatcher.dispatch(Path::new("/d"), &budget(10, 100)),
            PreviewOutcome::Clear
        );
    }

    #[test]
    fn text_file_shows_text() {
        let mut source = StubSource::new(PathKind::File);
        source.text = "hell\n...".into();
        let dispatcher = Dispatcher::new(source);

        assert_eq!(
            dispatcher.dispatch(Path::new("/f"), &budget(10, 8)),
            PreviewOutcome::Show("hell\n...".into())
        );
        assert_eq!(*dispatcher.source().calls.borrow(), vec!["text"]);
    }

    #[test]
    fn unreadable_text_file_keeps_pane() {
        let dispatcher = Dispatcher::new(StubSource::new(PathKind::File));
        assert_eq!(
            dispatcher.dispatch(Path::new("/f"), &budget(10, 100)),
            PreviewOutcome::Keep
        );
    }

    #[test]
    fn binary_file_is_summarised_not_sampled() {
        let mut source = StubSource::new(PathKind::File);
        source.media = "image/png";
        let dispatcher = Dispatcher::new(source);

        assert_eq!(
            dispatcher.dispatch(Path::new("/image.png"), &budget(10, 100)),
            PreviewOutcome::Show("summary of image/png".into())
        );
        assert_eq!(*dispatcher.source().calls.borrow(), vec!["summary"]);
    }

    #[test]
    fn fs_source_previews_directory() {
        let tmp = TempDir::new().unwrap();
        stdfs::create_dir(tmp.path().join("a")).unwrap();
        stdfs::create_dir(tmp.path().join("b")).unwrap();
        stdfs::write(tmp.path().join("x.txt"), "x").unwrap();
        stdfs::write(tmp.path().join("y.txt"), "y").unwrap();

        let dispatcher = Dispatcher::new(FsSource::new());
        let outcome = dispatcher.dispatch(tmp.path(), &budget(3, 1000));

        let PreviewOutcome::Show(text) = outcome else {
            panic!("expected a listing");
        };
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "...");
    }

    #[test]
    fn fs_source_previews_text_with_pane_budget() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("hello.txt");
        stdfs::write(&file, "hello world").unwrap();

        // 4 columns by 2 rows of 8x16 glyphs.
        let budget = CapacityBudget::estimate(&Surface::new(32, 32), &GlyphMetrics::new(8, 16));
        let dispatcher = Dispatcher::new(FsSource::new());

        assert_eq!(
            dispatcher.dispatch(&file, &budget),
            PreviewOutcome::Show("hell\n...".into())
        );
    }

    #[test]
    fn fs_source_honours_marker_policy() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("short.txt");
        stdfs::write(&file, "hi").unwrap();

        let source = FsSource::new().with_marker(MarkerPolicy::WhenTruncated);
        let dispatcher = Dispatcher::new(source);

        assert_eq!(
            dispatcher.dispatch(&file, &budget(10, 100)),
            PreviewOutcome::Show("hi".into())
        );
    }

    #[test]
    fn fs_source_summarises_binary_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("image.png");
        stdfs::write(&file, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

        let dispatcher = Dispatcher::new(FsSource::new());
        let PreviewOutcome::Show(text) = dispatcher.dispatch(&file, &budget(10, 100)) else {
            panic!("binary files are always summarised");
        };
        assert!(text.starts_with("Name: "));
        assert!(text.contains("\nType: image/png\n"));
    }

    #[test]
    fn injected_sniffer_routes_text_file_to_summary() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.txt");
        stdfs::write(&file, "plain words").unwrap();

        let source = FsSource::new().with_sniffer(|_: &Path| MediaType::new("application/zip"));
        let dispatcher = Dispatcher::new(source);

        let PreviewOutcome::Show(text) = dispatcher.dispatch(&file, &budget(10, 100)) else {
            panic!("expected a summary");
        };
        assert!(text.contains("Type: application/zip"));
        assert!(text.ends_with("Size: 11"));
    }

    #[test]
    fn fs_source_from_config_lists_hidden() {
        let tmp = TempDir::new().unwrap();
        stdfs::write(tmp.path().join(".env"), "").unwrap();

        let mut config = Config::default();
        let plain = Dispatcher::new(FsSource::from_config(&config));
        config.general.show_hidden = true;
        let hidden = Dispatcher::new(FsSource::from_config(&config));

        assert_eq!(
            hidden.dispatch(tmp.path(), &CapacityBudget::unbounded()),
            PreviewOutcome::Show(".env".into())
        );
        assert_eq!(
            plain.dispatch(tmp.path(), &CapacityBudget::unbounded()),
            PreviewOutcome::Clear
        );
    }

    #[cfg(unix)]
    #[test]
    fn fs_source_keeps_pane_for_unreadable_text_file() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.txt");
        stdfs::write(&file, "hidden words").unwrap();
        stdfs::set_permissions(&file, stdfs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits; only assert when the open really fails.
        if stdfs::File::open(&file).is_ok() {
            return;
        }

        let dispatcher = Dispatcher::new(FsSource::new());
        assert!(dispatcher.source().sniff(&file).is_text());
        assert_eq!(
            dispatcher.dispatch(&file, &budget(10, 100)),
            PreviewOutcome::Keep
        );
    }

    #[test]
    fn fs_source_types_unsniffable_file_by_name() {
        // A folder opens but cannot be read, like a locked file.
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("notes.txt");
        stdfs::create_dir(&dir).unwrap();

        let source = FsSource::new();
        assert_eq!(source.sniff(&dir), MediaType::text_plain());
        assert_eq!(source.sample_text(&dir, Some(100)), "");
    }

    #[test]
    fn missing_path_clears() {
        let tmp = TempDir::new().unwrap();
        let dispatcher = Dispatcher::new(FsSource::new());
        assert_eq!(
            dispatcher.dispatch(&tmp.path().join("missing"), &budget(10, 100)),
            PreviewOutcome::Clear
        );
    }
}

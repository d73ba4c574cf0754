//! Bounded directory listings.
//!
//! Sub-directories are listed before files because they carry more
//! navigation context. Within each group entries keep the order the file
//! system yields them; no sort is applied. The line budget is shared by
//! both groups.

use std::fs;
use std::path::Path;

use super::classify::classify;

/// Entry shown in place of everything that did not fit.
pub const LISTING_MARKER: &str = "...";

/// Knobs for [`sample_directory_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// Include entries whose name starts with a dot.
    pub show_hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Directories,
    Files,
}

/// Lists the immediate children of `path`, at most `max_entries` of them.
///
/// `None` lists everything. With `Some(n)`, a directory holding more than
/// `n` entries yields exactly `n` items, the last of which is
/// [`LISTING_MARKER`]; with `Some(0)` a non-empty directory yields only the
/// marker. Paths that are not directories yield an empty list.
pub fn sample_directory(path: &Path, max_entries: Option<usize>) -> Vec<String> {
    sample_directory_with(path, max_entries, &ListingOptions::default())
}

/// [`sample_directory`] with explicit [`ListingOptions`].
pub fn sample_directory_with(
    path: &Path,
    max_entries: Option<usize>,
    options: &ListingOptions,
) -> Vec<String> {
    if !classify(path).is_directory() {
        return Vec::new();
    }

    let mut collector = Collector::new(max_entries);

    if collector.extend(children(path, Group::Directories, options)) {
        collector.extend(children(path, Group::Files, options));
    }

    let entries = collector.finish();
    tracing::debug!(
        path = %path.display(),
        ?max_entries,
        shown = entries.len(),
        "sampled directory"
    );
    entries
}

/// Accumulates names against a shared budget.
struct Collector {
    limit: Option<usize>,
    entries: Vec<String>,
    truncated: bool,
}

impl Collector {
    fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            entries: Vec::with_capacity(limit.unwrap_or(0).min(256)),
            truncated: false,
        }
    }

    /// Pushes names until the budget overflows. Returns `false` once it has.
    fn extend(&mut self, names: impl Iterator<Item = String>) -> bool {
        for name in names {
            if !self.push(name) {
                return false;
            }
        }
        true
    }

    fn push(&mut self, name: String) -> bool {
        match self.limit {
            Some(limit) if self.entries.len() >= limit => {
                self.truncated = true;
                false
            }
            _ => {
                self.entries.push(name);
                true
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        if self.truncated {
            // The marker takes the last slot; with a zero budget it is the only one.
            let keep = self.limit.unwrap_or(0).saturating_sub(1);
            self.entries.truncate(keep);
            self.entries.push(LISTING_MARKER.to_string());
        }
        self.entries
    }
}

/// Names of the children of `dir` belonging to `group`, in enumeration order.
///
/// Entries that are neither a directory nor a regular file (dangling links,
/// sockets, FIFOs) belong to no group.
fn children<'a>(
    dir: &'a Path,
    group: Group,
    options: &'a ListingOptions,
) -> impl Iterator<Item = String> + 'a {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => Some(rd),
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "cannot enumerate directory");
            None
        }
    };

    read_dir
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .filter_map(move |entry| {
            let name = crate::nfc_string(&entry.file_name().to_string_lossy());
            if !options.show_hidden && name.starts_with('.') {
                return None;
            }
            let meta = fs::metadata(entry.path()).ok()?;
            let belongs = match group {
                Group::Directories => meta.is_dir(),
                Group::Files => meta.is_file(),
            };
            belongs.then_some(name)
        })
}

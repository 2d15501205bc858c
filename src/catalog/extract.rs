//! Pure extraction of download descriptors from a catalog document.

use chrono::{NaiveDate, NaiveDateTime};

use super::document::{AlbumEntry, CatalogDocument};
use crate::download::MediaItem;

/// Maps a parsed catalog document into a flat ordered sequence of download
/// descriptors.
///
/// For each entry with a parseable creation timestamp, one descriptor is
/// produced per image attachment carrying an `original` URL (filename
/// `YYYY-MM-DD-<index>.jpg`, 0-based in attachment order) and at most one
/// descriptor for a video attachment carrying a `high` URL (filename
/// `YYYY-MM-DD.mp4`). The folder segment is `YYYY/MM/DD`.
///
/// Entries with a missing or unparseable timestamp contribute zero
/// descriptors; extraction never fails. Output order matches catalog order.
///
/// Two entries on the same date produce colliding filenames for equal
/// attachment indexes; the later transfer silently overwrites. This is
/// accepted upstream behavior, kept as-is.
#[must_use]
pub fn extract_media_items(doc: &CatalogDocument) -> Vec<MediaItem> {
    let mut items = Vec::new();

    for entry in &doc.results {
        let Some(created) = entry_timestamp(entry) else {
            continue;
        };

        let date_str = created.format("%Y-%m-%d").to_string();
        let folder = created.format("%Y/%m/%d").to_string();

        for (idx, image) in entry.attached_images.iter().enumerate() {
            if let Some(url) = &image.original {
                items.push(MediaItem::new(
                    format!("{date_str}-{idx}.jpg"),
                    url.clone(),
                    folder.clone(),
                ));
            }
        }

        if let Some(video) = &entry.attached_video
            && let Some(url) = &video.high
        {
            items.push(MediaItem::new(
                format!("{date_str}.mp4"),
                url.clone(),
                folder.clone(),
            ));
        }
    }

    items
}

/// Summary of a catalog document for user-facing reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of album entries.
    pub entries: usize,
    /// Total attached media (images plus videos), counted before URL
    /// filtering.
    pub media: usize,
    /// Oldest entry date among parseable timestamps.
    pub oldest: Option<NaiveDate>,
    /// Newest entry date among parseable timestamps.
    pub newest: Option<NaiveDate>,
}

impl CatalogStats {
    /// Renders the stats as a short human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let base = format!("{} entries, {} media items", self.entries, self.media);
        match (self.oldest, self.newest) {
            (Some(oldest), Some(newest)) => format!("{base} ({oldest} ~ {newest})"),
            _ => base,
        }
    }
}

/// Computes entry/media counts and the covered date range for a catalog.
#[must_use]
pub fn catalog_stats(doc: &CatalogDocument) -> CatalogStats {
    let media = doc
        .results
        .iter()
        .map(|entry| entry.attached_images.len() + usize::from(entry.attached_video.is_some()))
        .sum();

    let mut dates = doc
        .results
        .iter()
        .filter_map(|entry| entry_timestamp(entry).map(|ts| ts.date()));
    let first = dates.next();
    let (oldest, newest) = dates.fold((first, first), |(oldest, newest), date| {
        (oldest.map(|d| d.min(date)), newest.map(|d| d.max(date)))
    });

    CatalogStats {
        entries: doc.results.len(),
        media,
        oldest,
        newest,
    }
}

/// Parses an entry's creation timestamp.
///
/// The trailing literal `Z` is stripped before parsing instead of being
/// treated as a UTC designator. Legacy policy: dates group media into the
/// folders users saw in the service, not into UTC-normalized ones.
///
/// Acceptance is narrower than full ISO-8601: date-only strings and
/// explicit offsets such as `+09:00` do not parse, so those entries are
/// skipped. The API always emits `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`; the
/// narrower forms only show up in hand-edited snapshots.
fn entry_timestamp(entry: &AlbumEntry) -> Option<NaiveDateTime> {
    entry
        .created
        .as_deref()?
        .trim_end_matches('Z')
        .parse()
        .ok()
}

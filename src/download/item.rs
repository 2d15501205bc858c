//! Download descriptor type.

use std::path::{Path, PathBuf};

/// A resolved (destination path, source URL) pair derived from one catalog
/// attachment.
///
/// Immutable once constructed. Identity is positional/date-based, not
/// content-based: the filename encodes the entry date and the attachment
/// index, so two entries on the same date can collide (see
/// [`extract_media_items`](crate::catalog::extract_media_items)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Derived filename, e.g. `2024-03-15-0.jpg` or `2024-03-15.mp4`.
    pub filename: String,
    /// Remote URL to fetch.
    pub url: String,
    /// Date-derived relative folder, e.g. `2024/03/15`.
    pub folder: String,
}

impl MediaItem {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        url: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
            folder: folder.into(),
        }
    }

    /// Destination path under the given output root.
    #[must_use]
    pub fn full_path(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.folder).join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_path_joins_root_folder_filename() {
        let item = MediaItem::new("2024-03-15-0.jpg", "https://cdn/x", "2024/03/15");
        let path = item.full_path(Path::new("/albums"));
        assert_eq!(path, PathBuf::from("/albums/2024/03/15/2024-03-15-0.jpg"));
    }

    #[test]
    fn test_full_path_relative_root() {
        let item = MediaItem::new("2024-03-15.mp4", "https://cdn/v", "2024/03/15");
        let path = item.full_path(Path::new("out"));
        assert_eq!(path, PathBuf::from("out/2024/03/15/2024-03-15.mp4"));
    }
}

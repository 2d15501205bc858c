//! Structured types for the album catalog document.
//!
//! The remote API returns a JSON object with a top-level ordered `results`
//! list. Each entry optionally carries a creation timestamp, a list of
//! image attachments, and at most one video attachment. Fields the tool
//! does not consume are ignored during deserialization; missing lists
//! degrade to empty so that a partially-shaped entry never fails the whole
//! document.

use serde::Deserialize;

/// Parsed album catalog response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    /// Album entries in catalog order. The order is observable: it drives
    /// the per-date image index suffixes.
    #[serde(default)]
    pub results: Vec<AlbumEntry>,
}

/// One dated album entry with its attachments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumEntry {
    /// ISO-8601 creation timestamp, usually with a trailing `Z`.
    pub created: Option<String>,
    /// Image attachments in attachment order.
    #[serde(default)]
    pub attached_images: Vec<ImageAttachment>,
    /// Optional video attachment.
    pub attached_video: Option<VideoAttachment>,
}

/// An image attachment with per-quality URLs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageAttachment {
    /// Original-quality URL. Attachments without it are skipped.
    pub original: Option<String>,
}

/// A video attachment with per-quality URLs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoAttachment {
    /// High-quality URL. Videos without it are skipped.
    pub high: Option<String>,
}

//! Album catalog handling.
//!
//! The catalog is the remote API's JSON response enumerating album entries
//! and their attachments. This module provides the structured document
//! types, the pure extraction step that maps a parsed document into a flat
//! ordered sequence of download descriptors, and the HTTP client that
//! fetches the catalog for a stored child profile.

mod client;
mod document;
mod extract;

pub use client::{CatalogClient, CatalogError, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use document::{AlbumEntry, CatalogDocument, ImageAttachment, VideoAttachment};
pub use extract::{CatalogStats, catalog_stats, extract_media_items};

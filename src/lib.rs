//! Album Downloader Core Library
//!
//! This library provides the core functionality for the albumdl tool,
//! which fetches a remote album catalog (dated entries with attached
//! images and video) and materializes the referenced media as local
//! files under a date-based folder scheme.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Catalog document types, media extraction, API client
//! - [`download`] - HTTP transfer engine with streaming and integrity checks
//! - [`auth`] - Session cookie persistence and request header construction
//! - [`app_config`] - Persisted application settings and child profiles

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app_config;
pub mod auth;
pub mod catalog;
pub mod download;

// Re-export commonly used types
pub use app_config::{AppConfig, ChildProfile, config_dir};
pub use auth::{SessionCookie, SessionStore, auth_headers, cookie_header};
pub use catalog::{
    CatalogClient, CatalogDocument, CatalogError, CatalogStats, catalog_stats, extract_media_items,
};
pub use download::{
    DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS, DownloadEngine, DownloadError, DownloadStats,
    EngineError, HttpClient, MediaItem, TransferStatus,
};

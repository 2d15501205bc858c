//! Concurrent, integrity-checked media transfer engine.
//!
//! This module turns a flat list of download descriptors into files on
//! disk. Transfers are streamed (memory use is bounded regardless of file
//! size), idempotent (a pre-existing destination short-circuits without a
//! network call), and verified against the server-declared Content-Length
//! when one is known. A failed transfer never leaves a partial file behind.
//!
//! # Example
//!
//! ```no_run
//! use albumdl_core::download::{DownloadEngine, HttpClient, MediaItem};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let engine = DownloadEngine::new(20)?;
//! let items = vec![MediaItem::new(
//!     "2024-03-15-0.jpg",
//!     "https://cdn.example.com/a.jpg",
//!     "2024/03/15",
//! )];
//! let stats = engine.run(&client, items, Path::new("./albums"), None).await?;
//! println!("{} succeeded, {} failed", stats.succeeded(), stats.failed());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod engine;
mod error;
mod item;

pub use client::{HttpClient, TransferStatus};
pub use constants::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
pub use engine::{DownloadEngine, DownloadStats, EngineError};
pub use error::DownloadError;
pub use item::MediaItem;

//! # photo-pager
//!
//! Keyed, forward-and-backward page loading over a remote photo collection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use photo_pager::api::RestPhotoApi;
//! use photo_pager::config::AppConfig;
//! use photo_pager::http::HttpClient;
//! use photo_pager::pagination::{Pager, PhotoPagingSource};
//! use photo_pager::repository::PhotoRepository;
//!
//! #[tokio::main]
//! async fn main() -> photo_pager::Result<()> {
//!     let config = AppConfig::default();
//!     let client = HttpClient::with_config(config.http_client_config())?;
//!     let source = PhotoPagingSource::new(PhotoRepository::new(RestPhotoApi::new(client)));
//!
//!     let mut pager = Pager::new(source, config.paging_config());
//!     pager.refresh().await;
//!     for photo in pager.items() {
//!         println!("{}", photo.headline());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Pager: page cache, anchor, load states       │
//! ├──────────────────────────────────────────────┤
//! │ PhotoPagingSource: load(), refresh_key()     │
//! ├──────────────────────────────────────────────┤
//! │ PhotoRepository: transport → ApiResult       │
//! ├──────────────────────────────────────────────┤
//! │ RestPhotoApi → HttpClient (GET /photos)      │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client plumbing
pub mod http;

/// Photo transport client
pub mod api;

/// Transport-to-result conversion
pub mod repository;

/// Paging sources and the page cache
pub mod pagination;

/// YAML configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use api::{PhotoApi, RestPhotoApi};
pub use pagination::{Pager, PagingSource, PhotoPagingSource};
pub use repository::PhotoRepository;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Photo transport client
//!
//! One outbound request per call against the `/photos` collection:
//!
//! ```text
//! GET <base-url>/photos?_page=<page>&_limit=<limit>
//! ```
//!
//! The raw status and body are surfaced as an [`ApiResponse`]; nothing is
//! retried or interpreted beyond decoding the JSON array.

use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{ApiResponse, Photo};
use async_trait::async_trait;
use tracing::debug;

/// Collection path, relative to the base URL
pub const PHOTOS_PATH: &str = "photos";

/// Query parameter carrying the 1-based page number
pub const PAGE_PARAM: &str = "_page";

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "_limit";

/// A source of photo pages
#[async_trait]
pub trait PhotoApi: Send + Sync {
    /// Fetch one page of photos
    ///
    /// Transport failures and undecodable bodies are `Err`; any HTTP status
    /// is `Ok` with the status preserved in the response.
    async fn fetch_photos(&self, page: u32, limit: u32) -> Result<ApiResponse<Vec<Photo>>>;
}

/// REST implementation of [`PhotoApi`] over [`HttpClient`]
#[derive(Debug)]
pub struct RestPhotoApi {
    client: HttpClient,
}

impl RestPhotoApi {
    /// Create a new API client; the client's base URL must be set
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PhotoApi for RestPhotoApi {
    async fn fetch_photos(&self, page: u32, limit: u32) -> Result<ApiResponse<Vec<Photo>>> {
        if page == 0 {
            return Err(Error::invalid_value("page", "must be at least 1"));
        }
        if limit == 0 {
            return Err(Error::invalid_value("limit", "must be at least 1"));
        }

        let request = RequestConfig::new()
            .query(PAGE_PARAM, page)
            .query(LIMIT_PARAM, limit);
        let response = self.client.get(PHOTOS_PATH, request).await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            debug!("Photo page {} failed with status {}", page, status);
            return Ok(ApiResponse::failure(status, text));
        }

        if text.trim().is_empty() {
            return Ok(ApiResponse::empty(status));
        }

        // `null` decodes to an absent body
        let body: Option<Vec<Photo>> = serde_json::from_str(&text).map_err(|e| {
            debug!("Photo page {} has an undecodable body", page);
            Error::decode(e.to_string())
        })?;

        Ok(ApiResponse {
            status,
            body,
            error_body: None,
        })
    }
}

//! Common types used throughout photo-pager
//!
//! Domain records and the uniform result types shared by the transport,
//! repository and paging layers.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// 1-based page number; the first page is key `1`
pub type PageKey = u32;

/// Key of the first page
pub const FIRST_PAGE: PageKey = 1;

// ============================================================================
// Photo
// ============================================================================

/// A photo record as served by the remote endpoint
///
/// Field names match the wire format verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
}

impl Photo {
    /// Create a new photo
    pub fn new(
        id: i64,
        title: impl Into<String>,
        url: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            thumbnail_url: thumbnail_url.into(),
        }
    }

    /// Headline shown for a list entry (`id.title`)
    pub fn headline(&self) -> String {
        format!("{}.{}", self.id, self.title)
    }
}

// ============================================================================
// Transport Response
// ============================================================================

/// Raw outcome of a single transport call
///
/// Carries the status code plus either the decoded body (success statuses)
/// or the error body text (failure statuses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Decoded body, `None` when the response had no payload
    pub body: Option<T>,
    /// Raw body text of a failed response
    pub error_body: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response with a body
    pub fn ok(body: T) -> Self {
        Self {
            status: 200,
            body: Some(body),
            error_body: None,
        }
    }

    /// Successful response without a body
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: None,
            error_body: None,
        }
    }

    /// Failed response with its error body
    pub fn failure(status: u16, error_body: impl Into<String>) -> Self {
        Self {
            status,
            body: None,
            error_body: Some(error_body.into()),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Repository Result
// ============================================================================

/// Uniform success/error result produced at the repository boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult<T> {
    /// Data was fetched
    Success(T),
    /// The fetch failed; only the message survives
    Error(String),
}

impl<T> ApiResult<T> {
    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Error message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(message) => Some(message),
        }
    }
}

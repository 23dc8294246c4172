//! Photo repository
//!
//! Converts transport outcomes into a uniform [`ApiResult`]. Structured error
//! information stops here; callers only ever see a message.

use crate::api::PhotoApi;
use crate::error::Error;
use crate::types::{ApiResult, Photo};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a non-success HTTP status is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// A failure status is an error, even if a body came back
    #[default]
    ShortCircuit,
    /// Ignore the status and only look at the body.
    ///
    /// Kept for endpoints that attach usable payloads to error statuses.
    FallThrough,
}

/// Repository over a [`PhotoApi`]
#[derive(Debug)]
pub struct PhotoRepository<A> {
    api: A,
    status_policy: StatusPolicy,
}

impl<A: PhotoApi> PhotoRepository<A> {
    /// Create a repository with the default status policy
    pub fn new(api: A) -> Self {
        Self::with_policy(api, StatusPolicy::default())
    }

    /// Create a repository with an explicit status policy
    pub fn with_policy(api: A, status_policy: StatusPolicy) -> Self {
        Self { api, status_policy }
    }

    /// Get the underlying API
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Get the status policy
    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Fetch one page of photos
    pub async fn get_photos(&self, page: u32, limit: u32) -> ApiResult<Vec<Photo>> {
        let response = match self.api.fetch_photos(page, limit).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetching photo page {} failed ({:?}): {}", page, e.kind(), e);
                return ApiResult::Error(e.message());
            }
        };

        if !response.is_successful() && self.status_policy == StatusPolicy::ShortCircuit {
            let e = Error::http_status(response.status, response.error_body.unwrap_or_default());
            warn!("Fetching photo page {} failed ({:?}): {}", page, e.kind(), e);
            return ApiResult::Error(e.message());
        }

        match response.body {
            Some(photos) => {
                debug!("Photo page {} returned {} items", page, photos.len());
                ApiResult::Success(photos)
            }
            None => ApiResult::Error(Error::EmptyBody.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{photos, FakePhotoApi, Reply};
    use crate::types::ApiResponse;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_success_passes_photos_through() {
        let repo = PhotoRepository::new(FakePhotoApi::new().ok(photos(1, 3)));

        let result = repo.get_photos(1, 3).await;
        assert_eq!(result, ApiResult::Success(photos(1, 3)));
        assert_eq!(repo.api().calls(), vec![(1, 3)]);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_message() {
        let repo = PhotoRepository::new(FakePhotoApi::new().fail("connection reset"));

        let result = repo.get_photos(1, 30).await;
        assert_eq!(result, ApiResult::error("connection reset"));
    }

    #[tokio::test]
    async fn test_transport_error_without_message() {
        let repo = PhotoRepository::new(FakePhotoApi::new().fail(""));

        let result = repo.get_photos(1, 30).await;
        assert_eq!(result, ApiResult::error("Unknown error"));
    }

    #[tokio::test]
    async fn test_missing_body_is_no_data_found() {
        let api = FakePhotoApi::new().reply(Reply::Response(ApiResponse::empty(200)));
        let repo = PhotoRepository::new(api);

        let result = repo.get_photos(2, 30).await;
        assert_eq!(result, ApiResult::error("No data found"));
    }

    #[tokio::test]
    async fn test_failure_status_short_circuits() {
        let api = FakePhotoApi::new().reply(Reply::Response(ApiResponse {
            status: 500,
            body: Some(photos(1, 2)),
            error_body: Some("server exploded".into()),
        }));
        let repo = PhotoRepository::new(api);

        let result = repo.get_photos(1, 2).await;
        assert_eq!(result, ApiResult::error("server exploded"));
    }

    #[tokio::test]
    async fn test_failure_status_without_error_body() {
        let api = FakePhotoApi::new().reply(Reply::Response(ApiResponse::failure(404, "")));
        let repo = PhotoRepository::new(api);

        let result = repo.get_photos(9, 2).await;
        assert_eq!(result, ApiResult::error("HTTP 404"));
    }

    #[tokio::test]
    async fn test_fall_through_uses_body_despite_status() {
        let api = FakePhotoApi::new().reply(Reply::Response(ApiResponse {
            status: 500,
            body: Some(photos(1, 2)),
            error_body: None,
        }));
        let repo = PhotoRepository::with_policy(api, StatusPolicy::FallThrough);

        let result = repo.get_photos(1, 2).await;
        assert_eq!(result, ApiResult::Success(photos(1, 2)));
    }

    #[tokio::test]
    async fn test_fall_through_without_body_is_no_data_found() {
        let api = FakePhotoApi::new().reply(Reply::Response(ApiResponse::failure(500, "boom")));
        let repo = PhotoRepository::with_policy(api, StatusPolicy::FallThrough);

        let result = repo.get_photos(1, 2).await;
        assert_eq!(result, ApiResult::error("No data found"));
    }
}

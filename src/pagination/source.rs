//! Paging sources
//!
//! A paging source turns a [`LoadParams`] into one [`LoadResult`] and knows
//! how to pick a resume key after the loaded data is invalidated.

use super::types::{LoadParams, LoadResult, Page, PagingState};
use crate::api::PhotoApi;
use crate::repository::PhotoRepository;
use crate::types::{ApiResult, PageKey, Photo, FIRST_PAGE};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, warn};

/// Keyed loader of pages
#[async_trait]
pub trait PagingSource: Send + Sync {
    /// Page key type
    type Key: Copy + Debug + Send + Sync;
    /// Item type
    type Value: Clone + Send + Sync;

    /// Load one page
    async fn load(&self, params: LoadParams<Self::Key>) -> LoadResult<Self::Key, Self::Value>;

    /// Key to reload from after invalidation, based on the anchor position
    ///
    /// `None` restarts from the first page.
    fn refresh_key(&self, state: &PagingState<Self::Key, Self::Value>) -> Option<Self::Key>;
}

/// Page-number source over the photo repository
#[derive(Debug)]
pub struct PhotoPagingSource<A> {
    repository: PhotoRepository<A>,
}

impl<A: PhotoApi> PhotoPagingSource<A> {
    /// Create a paging source
    pub fn new(repository: PhotoRepository<A>) -> Self {
        Self { repository }
    }

    /// Get the repository
    pub fn repository(&self) -> &PhotoRepository<A> {
        &self.repository
    }
}

#[async_trait]
impl<A: PhotoApi> PagingSource for PhotoPagingSource<A> {
    type Key = PageKey;
    type Value = Photo;

    async fn load(&self, params: LoadParams<PageKey>) -> LoadResult<PageKey, Photo> {
        let page = params.key.unwrap_or(FIRST_PAGE);
        let limit = params.load_size;

        match self.repository.get_photos(page, limit).await {
            ApiResult::Success(data) => {
                let prev_key = if page <= FIRST_PAGE {
                    None
                } else {
                    Some(page - 1)
                };
                let next_key = if data.is_empty() {
                    None
                } else {
                    page.checked_add(1)
                };
                debug!(
                    "{:?} load of page {}: {} items, prev={:?} next={:?}",
                    params.load_type,
                    page,
                    data.len(),
                    prev_key,
                    next_key
                );
                LoadResult::Page(Page::new(data, prev_key, next_key))
            }
            ApiResult::Error(message) => {
                warn!("{:?} load of page {} failed: {}", params.load_type, page, message);
                LoadResult::error(message)
            }
        }
    }

    fn refresh_key(&self, state: &PagingState<PageKey, Photo>) -> Option<PageKey> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;

        page.prev_key
            .and_then(|key| key.checked_add(1))
            .or_else(|| page.next_key.and_then(|key| key.checked_sub(1)))
            .filter(|key| *key >= FIRST_PAGE)
    }
}

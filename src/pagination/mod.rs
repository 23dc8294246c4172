//! Pagination module
//!
//! Keyed, forward-and-backward page loading over the photo collection.
//!
//! # Overview
//!
//! - [`PagingSource`] loads one page per [`LoadParams`] and computes the key
//!   to resume from after invalidation.
//! - [`PhotoPagingSource`] is the page-number source over the repository:
//!   `prev_key = page - 1` (none on page 1), `next_key = page + 1` (none once
//!   a page comes back empty).
//! - [`Pager`] caches loaded pages for its owner, tracks the consumer's
//!   anchor and publishes [`CombinedLoadStates`].

mod pager;
mod source;
mod types;

pub use pager::{LoadOutcome, Pager};
pub use source::{PagingSource, PhotoPagingSource};
pub use types::{
    CombinedLoadStates, LoadParams, LoadResult, LoadState, LoadType, Page, PagingConfig,
    PagingState,
};

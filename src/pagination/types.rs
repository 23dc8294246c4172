//! Pagination types
//!
//! Defines the load request/result vocabulary, the paging state used to
//! resume after invalidation, and the load states observed by consumers.

use serde::{Deserialize, Serialize};

/// Direction of a page load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadType {
    /// Initial load or full reload
    Refresh,
    /// Next page after the last loaded one
    Append,
    /// Previous page before the first loaded one
    Prepend,
}

/// A request for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams<K> {
    /// Page to load; `None` means the first page
    pub key: Option<K>,
    /// Number of items requested
    pub load_size: u32,
    /// Direction this load was triggered for
    pub load_type: LoadType,
}

impl<K> LoadParams<K> {
    /// Create a refresh request
    pub fn refresh(key: Option<K>, load_size: u32) -> Self {
        Self {
            key,
            load_size,
            load_type: LoadType::Refresh,
        }
    }

    /// Create an append request
    pub fn append(key: K, load_size: u32) -> Self {
        Self {
            key: Some(key),
            load_size,
            load_type: LoadType::Append,
        }
    }

    /// Create a prepend request
    pub fn prepend(key: K, load_size: u32) -> Self {
        Self {
            key: Some(key),
            load_size,
            load_type: LoadType::Prepend,
        }
    }
}

/// One loaded page and the keys of its neighbours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<K, V> {
    /// Items in server order
    pub data: Vec<V>,
    /// Key of the page before this one, `None` at the start
    pub prev_key: Option<K>,
    /// Key of the page after this one, `None` at the end
    pub next_key: Option<K>,
}

impl<K, V> Page<K, V> {
    /// Create a page
    pub fn new(data: Vec<V>, prev_key: Option<K>, next_key: Option<K>) -> Self {
        Self {
            data,
            prev_key,
            next_key,
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the page has no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Outcome of a single load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadResult<K, V> {
    /// The page was loaded
    Page(Page<K, V>),
    /// The load failed
    Error { message: String },
}

impl<K, V> LoadResult<K, V> {
    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Check if this is a page
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// The loaded page, if any
    pub fn page(&self) -> Option<&Page<K, V>> {
        match self {
            Self::Page(page) => Some(page),
            Self::Error { .. } => None,
        }
    }
}

/// Sizing of page loads
///
/// Keys are page numbers, so every load (refresh included) must request the
/// same number of items or neighbouring pages would overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Items requested by every load
    pub page_size: u32,
    /// How close to a loaded boundary the anchor may get before
    /// the next page is requested
    pub prefetch_distance: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PagingConfig {
    /// Config with the given page size for every load
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            prefetch_distance: page_size,
        }
    }

    /// Set the prefetch distance
    #[must_use]
    pub fn with_prefetch_distance(mut self, distance: u32) -> Self {
        self.prefetch_distance = distance;
        self
    }
}

/// Snapshot of loaded pages plus the consumer's position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingState<K, V> {
    /// Loaded pages in key order
    pub pages: Vec<Page<K, V>>,
    /// Index of the item the consumer last accessed
    pub anchor_position: Option<usize>,
    /// Config the pages were loaded with
    pub config: PagingConfig,
}

impl<K, V> PagingState<K, V> {
    /// Create a paging state
    pub fn new(
        pages: Vec<Page<K, V>>,
        anchor_position: Option<usize>,
        config: PagingConfig,
    ) -> Self {
        Self {
            pages,
            anchor_position,
            config,
        }
    }

    /// Total number of loaded items
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Check if no items are loaded
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    /// Page containing `position`, or the nearest non-empty page when it
    /// falls outside the loaded range
    ///
    /// Returns `None` when nothing is loaded.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&Page<K, V>> {
        self.page_index_for(position).map(|(page, _)| &self.pages[page])
    }

    /// Item at `position`, clamped to the loaded range
    pub fn closest_item_to_position(&self, position: usize) -> Option<&V> {
        let (page, offset) = self.page_index_for(position)?;
        let data = &self.pages[page].data;
        data.get(offset.min(data.len().checked_sub(1)?))
    }

    /// Map a flat position to (page index, offset within page)
    fn page_index_for(&self, position: usize) -> Option<(usize, usize)> {
        // Empty pages hold no position; never land on one
        let last = self.pages.iter().rposition(|page| !page.is_empty())?;
        let mut page = 0;
        let mut offset = position;
        while page < last && offset >= self.pages[page].len() {
            offset -= self.pages[page].len();
            page += 1;
        }
        Some((page, offset))
    }
}

/// State of one load direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// A load is in flight
    Loading,
    /// Idle; `end_of_pagination_reached` is set when no further page exists
    Loaded { end_of_pagination_reached: bool },
    /// The last load failed
    Error { message: String },
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Loaded {
            end_of_pagination_reached: false,
        }
    }
}

impl LoadState {
    /// Check if a load is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the last load failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Check if no further page exists in this direction
    pub fn end_of_pagination_reached(&self) -> bool {
        matches!(
            self,
            Self::Loaded {
                end_of_pagination_reached: true
            }
        )
    }
}

/// Load states for every direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedLoadStates {
    pub refresh: LoadState,
    pub append: LoadState,
    pub prepend: LoadState,
}

impl CombinedLoadStates {
    /// State for one direction
    pub fn get(&self, load_type: LoadType) -> &LoadState {
        match load_type {
            LoadType::Refresh => &self.refresh,
            LoadType::Append => &self.append,
            LoadType::Prepend => &self.prepend,
        }
    }

    /// Replace the state for one direction, returning the old one
    pub fn set(&mut self, load_type: LoadType, state: LoadState) -> LoadState {
        let slot = match load_type {
            LoadType::Refresh => &mut self.refresh,
            LoadType::Append => &mut self.append,
            LoadType::Prepend => &mut self.prepend,
        };
        std::mem::replace(slot, state)
    }

    /// Check if any direction is loading
    pub fn is_loading(&self) -> bool {
        self.refresh.is_loading() || self.append.is_loading() || self.prepend.is_loading()
    }
}

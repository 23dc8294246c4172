//! In-memory page cache driven by consumer access
//!
//! A [`Pager`] owns the pages loaded from one [`PagingSource`] for the
//! lifetime of its owner. Dropping the pager discards them. Loads take
//! `&mut self`, so at most one load is ever in flight per pager.

use super::source::PagingSource;
use super::types::{
    CombinedLoadStates, LoadParams, LoadResult, LoadState, LoadType, Page, PagingConfig,
    PagingState,
};
use futures::stream::{self, Stream};
use std::collections::{HashMap, VecDeque};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// What a pager operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Pages holding this many items in total were stored
    Loaded { items: usize },
    /// The load failed; see the load state for the direction
    Failed { message: String },
    /// Nothing to load in that direction
    Skipped,
}

/// Page cache over a paging source
pub struct Pager<S: PagingSource> {
    source: S,
    config: PagingConfig,
    pages: VecDeque<Page<S::Key, S::Value>>,
    anchor_position: Option<usize>,
    states: watch::Sender<CombinedLoadStates>,
    failed: HashMap<LoadType, LoadParams<S::Key>>,
}

/// Order in which failed directions are retried
const RETRY_ORDER: [LoadType; 3] = [LoadType::Refresh, LoadType::Prepend, LoadType::Append];

impl<S: PagingSource> Pager<S> {
    /// Create an empty pager; nothing is loaded until [`Pager::refresh`]
    pub fn new(source: S, config: PagingConfig) -> Self {
        let (states, _) = watch::channel(CombinedLoadStates::default());
        Self {
            source,
            config,
            pages: VecDeque::new(),
            anchor_position: None,
            states,
            failed: HashMap::new(),
        }
    }

    /// Get the paging source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the paging config
    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Current load states
    pub fn load_states(&self) -> CombinedLoadStates {
        self.states.borrow().clone()
    }

    /// Observe load state transitions
    pub fn subscribe(&self) -> watch::Receiver<CombinedLoadStates> {
        self.states.subscribe()
    }

    /// Number of loaded items
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Number of loaded pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Last accessed position
    pub fn anchor_position(&self) -> Option<usize> {
        self.anchor_position
    }

    /// Item at `index` without moving the anchor
    pub fn peek(&self, index: usize) -> Option<&S::Value> {
        self.items().nth(index)
    }

    /// Item at `index`, recording it as the consumer's position
    pub fn access(&mut self, index: usize) -> Option<&S::Value> {
        if index >= self.item_count() {
            return None;
        }
        self.anchor_position = Some(index);
        self.peek(index)
    }

    /// All loaded items in order
    pub fn items(&self) -> impl Iterator<Item = &S::Value> {
        self.pages.iter().flat_map(|page| page.data.iter())
    }

    /// Loaded pages in key order
    pub fn pages(&self) -> impl Iterator<Item = &Page<S::Key, S::Value>> {
        self.pages.iter()
    }

    /// Copy of the loaded pages and anchor
    pub fn snapshot(&self) -> PagingState<S::Key, S::Value> {
        PagingState::new(
            self.pages.iter().cloned().collect(),
            self.anchor_position,
            self.config,
        )
    }

    /// Reload around the anchor, replacing every loaded page on success
    pub async fn refresh(&mut self) -> LoadOutcome {
        let key = self.source.refresh_key(&self.snapshot());
        info!("Refreshing from key {:?}", key);
        self.run(LoadParams::refresh(key, self.config.page_size))
            .await
    }

    /// Load the page after the last loaded one
    pub async fn append(&mut self) -> LoadOutcome {
        match self.pages.back().and_then(|page| page.next_key) {
            Some(key) => self.run(LoadParams::append(key, self.config.page_size)).await,
            None => LoadOutcome::Skipped,
        }
    }

    /// Load the page before the first loaded one
    pub async fn prepend(&mut self) -> LoadOutcome {
        match self.pages.front().and_then(|page| page.prev_key) {
            Some(key) => self.run(LoadParams::prepend(key, self.config.page_size)).await,
            None => LoadOutcome::Skipped,
        }
    }

    /// Re-issue every failed load with its original request
    ///
    /// A failed refresh goes first; if it succeeds the other directions are
    /// dropped along with the pages they extended. Stops at the first load
    /// that fails again. A failed request stays pending until it succeeds,
    /// so an abandoned retry can be issued again.
    pub async fn retry(&mut self) -> LoadOutcome {
        let mut items = None;
        for load_type in RETRY_ORDER {
            let Some(params) = self.failed.get(&load_type).copied() else {
                continue;
            };
            debug!("Retrying {:?} load of key {:?}", load_type, params.key);
            match self.run(params).await {
                LoadOutcome::Loaded { items: loaded } => {
                    items = Some(items.unwrap_or(0) + loaded);
                }
                outcome => return outcome,
            }
        }
        items.map_or(LoadOutcome::Skipped, |items| LoadOutcome::Loaded { items })
    }

    /// Directions whose last load failed and is awaiting [`Pager::retry`]
    pub fn pending_retries(&self) -> Vec<LoadType> {
        RETRY_ORDER
            .into_iter()
            .filter(|load_type| self.failed.contains_key(load_type))
            .collect()
    }

    /// Direction that should be loaded given the anchor position
    pub fn prefetch_hint(&self) -> Option<LoadType> {
        let anchor = self.anchor_position?;
        let count = self.item_count();
        let distance = self.config.prefetch_distance as usize;
        let states = self.states.borrow();

        let can_append = self.pages.back().is_some_and(|page| page.next_key.is_some())
            && !states.append.is_loading()
            && !states.append.is_error();
        if can_append && anchor + distance >= count {
            return Some(LoadType::Append);
        }

        let can_prepend = self.pages.front().is_some_and(|page| page.prev_key.is_some())
            && !states.prepend.is_loading()
            && !states.prepend.is_error();
        if can_prepend && anchor < distance {
            return Some(LoadType::Prepend);
        }

        None
    }

    /// Run the load suggested by [`Pager::prefetch_hint`], if any
    pub async fn load_hinted(&mut self) -> LoadOutcome {
        match self.prefetch_hint() {
            Some(LoadType::Append) => self.append().await,
            Some(LoadType::Prepend) => self.prepend().await,
            Some(LoadType::Refresh) | None => LoadOutcome::Skipped,
        }
    }

    /// Stream of pages: a refresh followed by appends until the end of the
    /// collection or the first error
    pub fn into_stream(self) -> impl Stream<Item = LoadResult<S::Key, S::Value>> {
        stream::unfold((self, Some(LoadType::Refresh)), |(mut pager, next)| async move {
            let Some(load_type) = next else {
                return None;
            };
            let outcome = match load_type {
                LoadType::Refresh => pager.refresh().await,
                LoadType::Append => pager.append().await,
                LoadType::Prepend => pager.prepend().await,
            };

            match outcome {
                LoadOutcome::Loaded { .. } => {
                    let Some(page) = pager.pages.back().cloned() else {
                        return None;
                    };
                    let next = page.next_key.map(|_| LoadType::Append);
                    Some((LoadResult::Page(page), (pager, next)))
                }
                LoadOutcome::Failed { message } => {
                    Some((LoadResult::error(message), (pager, None)))
                }
                LoadOutcome::Skipped => None,
            }
        })
    }

    async fn run(&mut self, params: LoadParams<S::Key>) -> LoadOutcome {
        let load_type = params.load_type;
        let previous = self.set_state(load_type, LoadState::Loading);

        // Restores the previous state if this future is dropped mid-load
        let guard = LoadingGuard {
            states: &self.states,
            load_type,
            previous: Some(previous),
        };
        let result = self.source.load(params).await;
        guard.disarm();

        match result {
            LoadResult::Page(page) => {
                let items = page.len();
                self.store(load_type, page);
                // New pages invalidate every pending retry
                if load_type == LoadType::Refresh {
                    self.failed.clear();
                } else {
                    self.failed.remove(&load_type);
                }
                LoadOutcome::Loaded { items }
            }
            LoadResult::Error { message } => {
                warn!("{:?} load failed: {}", load_type, message);
                self.set_state(
                    load_type,
                    LoadState::Error {
                        message: message.clone(),
                    },
                );
                self.failed.insert(load_type, params);
                LoadOutcome::Failed { message }
            }
        }
    }

    fn store(&mut self, load_type: LoadType, page: Page<S::Key, S::Value>) {
        let prepend_end = page.prev_key.is_none();
        let append_end = page.next_key.is_none();

        match load_type {
            LoadType::Refresh => {
                self.pages.clear();
                self.pages.push_back(page);
                self.anchor_position = None;
                self.states.send_modify(|states| {
                    states.refresh = LoadState::Loaded {
                        end_of_pagination_reached: false,
                    };
                    states.append = LoadState::Loaded {
                        end_of_pagination_reached: append_end,
                    };
                    states.prepend = LoadState::Loaded {
                        end_of_pagination_reached: prepend_end,
                    };
                });
            }
            LoadType::Append => {
                self.pages.push_back(page);
                self.set_state(
                    LoadType::Append,
                    LoadState::Loaded {
                        end_of_pagination_reached: append_end,
                    },
                );
            }
            LoadType::Prepend => {
                let shift = page.len();
                self.pages.push_front(page);
                self.anchor_position = self.anchor_position.map(|anchor| anchor + shift);
                self.set_state(
                    LoadType::Prepend,
                    LoadState::Loaded {
                        end_of_pagination_reached: prepend_end,
                    },
                );
            }
        }
    }

    fn set_state(&self, load_type: LoadType, state: LoadState) -> LoadState {
        let mut previous = LoadState::default();
        self.states.send_modify(|states| {
            previous = states.set(load_type, state);
        });
        previous
    }
}

impl<S: PagingSource> std::fmt::Debug for Pager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("config", &self.config)
            .field("pages", &self.pages.len())
            .field("items", &self.item_count())
            .field("anchor_position", &self.anchor_position)
            .finish_non_exhaustive()
    }
}

struct LoadingGuard<'a> {
    states: &'a watch::Sender<CombinedLoadStates>,
    load_type: LoadType,
    previous: Option<LoadState>,
}

impl LoadingGuard<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!("{:?} load abandoned", self.load_type);
            self.states.send_modify(|states| {
                states.set(self.load_type, previous);
            });
        }
    }
}

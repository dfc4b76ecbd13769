//! Tag-based query cache. Queries store their JSON result together with the
//! tags they provide and the request that produced them; mutations invalidate
//! tags. Invalidation marks subscribed entries stale and hands their requests
//! back for refetching, and drops entries nobody is subscribed to.
//!
//! Matching: a type-only tag (`Student`) matches every tag of that type, an
//! id tag (`Teacher:42`, `Teacher:LIST`) matches only itself.

mod tag;

pub use tag::{Tag, TagId, TagKind};

use serde_json::Value;
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant,
};
use tracing::debug;

use crate::api::RequestDescriptor;

/// Derives the provided tags from a (re)fetched JSON result.
pub type TagProvider = Arc<dyn Fn(&Value) -> Vec<Tag> + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    #[must_use]
    pub fn of(request: &RequestDescriptor) -> Self {
        Self(request.cache_key())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct Entry {
    value: Value,
    tags: Vec<Tag>,
    request: RequestDescriptor,
    provider: TagProvider,
    stale: bool,
    fetched_at: Instant,
}

/// Request to replay for a stale subscribed entry.
#[derive(Clone)]
pub struct Refetch {
    pub key: QueryKey,
    pub request: RequestDescriptor,
    pub provider: TagProvider,
}

impl fmt::Debug for Refetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refetch")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct State {
    entries: HashMap<QueryKey, Entry>,
    subscribers: HashMap<QueryKey, usize>,
}

#[derive(Clone, Default)]
pub struct QueryCache {
    state: Arc<Mutex<State>>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("QueryCache")
            .field("entries", &state.entries.len())
            .field("subscriptions", &state.subscribers.len())
            .finish()
    }
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh cached value for `key`. Stale entries are not served.
    #[must_use]
    pub fn fresh(&self, key: &QueryKey) -> Option<Value> {
        self.lock()
            .entries
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.value.clone())
    }

    /// Cached value for `key`, stale or not.
    #[must_use]
    pub fn peek(&self, key: &QueryKey) -> Option<Value> {
        self.lock().entries.get(key).map(|entry| entry.value.clone())
    }

    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.lock().entries.get(key).is_some_and(|entry| entry.stale)
    }

    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Tags currently provided by `key`.
    #[must_use]
    pub fn tags(&self, key: &QueryKey) -> Vec<Tag> {
        self.lock()
            .entries
            .get(key)
            .map(|entry| entry.tags.clone())
            .unwrap_or_default()
    }

    /// Age of the cached value for `key`.
    #[must_use]
    pub fn age(&self, key: &QueryKey) -> Option<std::time::Duration> {
        self.lock()
            .entries
            .get(key)
            .map(|entry| entry.fetched_at.elapsed())
    }

    /// Stores a fetched result. The last write for a key wins.
    pub fn store(
        &self,
        key: QueryKey,
        value: Value,
        request: RequestDescriptor,
        provider: TagProvider,
    ) {
        let tags = provider(&value);
        let rendered: Vec<String> = tags.iter().map(ToString::to_string).collect();
        debug!(key = %key, tags = ?rendered, "cache store");
        self.lock().entries.insert(
            key,
            Entry {
                value,
                tags,
                request,
                provider,
                stale: false,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Registers interest in `key` until the returned guard is dropped.
    #[must_use]
    pub fn subscribe(&self, key: QueryKey) -> Subscription {
        *self.lock().subscribers.entry(key.clone()).or_insert(0) += 1;
        Subscription {
            cache: self.clone(),
            key,
        }
    }

    #[must_use]
    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.lock().subscribers.get(key).copied().unwrap_or(0)
    }

    fn unsubscribe(&self, key: &QueryKey) {
        let mut state = self.lock();
        if let Some(count) = state.subscribers.get_mut(key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                state.subscribers.remove(key);
            }
        }
    }

    /// Invalidates every entry providing a tag matched by `tags`.
    /// Subscribed entries are marked stale and returned for refetching,
    /// the rest are dropped.
    pub fn invalidate(&self, tags: &[Tag]) -> Vec<Refetch> {
        if tags.is_empty() {
            return Vec::new();
        }

        let mut state = self.lock();
        let State {
            entries,
            subscribers,
        } = &mut *state;

        let matched: Vec<QueryKey> = entries
            .iter()
            .filter(|(_, entry)| {
                entry
                    .tags
                    .iter()
                    .any(|provided| tags.iter().any(|tag| tag.matches(provided)))
            })
            .map(|(key, _)| key.clone())
            .collect();

        let mut refetch = Vec::new();
        for key in matched {
            if subscribers.get(&key).copied().unwrap_or(0) > 0 {
                if let Some(entry) = entries.get_mut(&key) {
                    entry.stale = true;
                    refetch.push(Refetch {
                        key: key.clone(),
                        request: entry.request.clone(),
                        provider: entry.provider.clone(),
                    });
                }
            } else {
                debug!(key = %key, "dropping unsubscribed cache entry");
                entries.remove(&key);
            }
        }

        refetch.sort_by(|a, b| a.key.cmp(&b.key));
        refetch
    }

    /// Drops every cached value. Subscriptions stay registered.
    pub fn reset(&self) {
        self.lock().entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

/// Live interest in a cached query. Dropping it stops refetches for the key;
/// an in-flight request simply goes unobserved.
#[derive(Debug)]
pub struct Subscription {
    cache: QueryCache,
    key: QueryKey,
}

impl Subscription {
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cache.unsubscribe(&self.key);
    }
}

//! In-memory [`DocumentStore`] and its atomically swappable handle.
//!
//! [`InMemoryStore`] owns both collections and is never mutated after
//! construction. [`SharedStore`] publishes the current store behind an
//! `Arc`; a reload builds a complete replacement first and then swaps the
//! pointer, so a query that already took a snapshot keeps reading the old
//! corpus to the end.

use std::sync::{Arc, RwLock};

use crate::models::{CoursePage, Topic};

use super::DocumentStore;

/// Immutable in-memory corpus.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    topics: Vec<Topic>,
    pages: Vec<CoursePage>,
}

impl InMemoryStore {
    pub fn new(topics: Vec<Topic>, pages: Vec<CoursePage>) -> Self {
        Self { topics, pages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of posts across all topics.
    pub fn post_count(&self) -> usize {
        self.topics.iter().map(|t| t.posts.len()).sum()
    }
}

impl DocumentStore for InMemoryStore {
    fn topics(&self) -> &[Topic] {
        &self.topics
    }

    fn pages(&self) -> &[CoursePage] {
        &self.pages
    }
}

/// A published [`InMemoryStore`] that can be replaced while being read.
///
/// The lock guards only the `Arc` itself and is held just long enough to
/// clone or overwrite it; scoring always runs against an owned snapshot.
#[derive(Debug, Default)]
pub struct SharedStore {
    current: RwLock<Arc<InMemoryStore>>,
}

impl SharedStore {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// The store as of this call.
    pub fn snapshot(&self) -> Arc<InMemoryStore> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Publish a fully built replacement, returning the previous store.
    pub fn replace(&self, store: InMemoryStore) -> Arc<InMemoryStore> {
        let next = Arc::new(store);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }
}

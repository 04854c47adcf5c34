//! Document store abstraction for Course TA.
//!
//! The [`DocumentStore`] trait is the only view the ranker has of the
//! corpora, which keeps the engine testable with injected fixtures and
//! independent of how the JSON dumps are located or read.
//!
//! Stores are read-only once built. Implementations must be `Send + Sync`
//! so a single loaded store can serve any number of concurrent callers.

pub mod memory;

pub use memory::{InMemoryStore, SharedStore};

use crate::models::{CoursePage, Topic};

/// Read-only access to the forum and course-page collections.
///
/// Both slices keep their load order; the ranker relies on it to break
/// ties between equally relevant documents.
pub trait DocumentStore: Send + Sync {
    /// Forum topics, in corpus order.
    fn topics(&self) -> &[Topic];

    /// Course pages, in corpus order.
    fn pages(&self) -> &[CoursePage];

    /// Total number of documents across both collections.
    fn len(&self) -> usize {
        self.topics().len() + self.pages().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Loading the forum and course-page dumps into a document store.
//!
//! The scrapers write two JSON arrays: `discourse_posts.json` (topics with
//! nested posts) and `course_content.json` (course pages). Loading never
//! fails the process:
//!
//! - a missing file yields the built-in sample corpus (or nothing, when
//!   `data.use_sample_when_missing` is off);
//! - an unreadable file, or one that is not a JSON array, yields an empty
//!   collection with a warning;
//! - an array element that cannot be decoded is skipped with a warning and
//!   the remaining elements are kept.
//!
//! An empty store is valid: every question then gets the fallback answer.

use std::path::Path;

use course_ta_core::models::{CoursePage, Post, Topic};
use course_ta_core::store::{InMemoryStore, SharedStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;

/// Document counts for a loaded store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusCounts {
    pub topics: usize,
    pub posts: usize,
    pub pages: usize,
}

impl CorpusCounts {
    pub fn of(store: &InMemoryStore) -> Self {
        use course_ta_core::store::DocumentStore;
        Self {
            topics: store.topics().len(),
            posts: store.post_count(),
            pages: store.pages().len(),
        }
    }
}

/// Build a store from the configured dumps.
pub fn load_store(config: &Config) -> InMemoryStore {
    let data = &config.data;

    let topics = load_array::<Topic>(&data.discourse_path).unwrap_or_else(|| {
        missing(&data.discourse_path, data.use_sample_when_missing, sample_topics)
    });
    let pages = load_array::<CoursePage>(&data.course_path).unwrap_or_else(|| {
        missing(&data.course_path, data.use_sample_when_missing, sample_pages)
    });

    let store = InMemoryStore::new(topics, pages);
    let counts = CorpusCounts::of(&store);
    info!(
        topics = counts.topics,
        posts = counts.posts,
        pages = counts.pages,
        "corpus loaded"
    );
    store
}

/// Rebuild the store from disk and publish it in one swap.
pub fn reload(config: &Config, shared: &SharedStore) -> CorpusCounts {
    let store = load_store(config);
    let counts = CorpusCounts::of(&store);
    shared.replace(store);
    counts
}

fn missing<T>(path: &Path, use_sample: bool, sample: fn() -> Vec<T>) -> Vec<T> {
    if use_sample {
        info!(path = %path.display(), "data file not found, using built-in sample corpus");
        sample()
    } else {
        info!(path = %path.display(), "data file not found, collection left empty");
        Vec::new()
    }
}

/// Decode a JSON array of `T` element by element.
///
/// Returns `None` only when the file does not exist.
fn load_array<T: DeserializeOwned>(path: &Path) -> Option<Vec<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read data file");
            return Some(Vec::new());
        }
    };

    Some(decode_array(&content, path))
}

fn decode_array<T: DeserializeOwned>(content: &str, path: &Path) -> Vec<T> {
    let elements = match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Array(elements)) => elements,
        Ok(_) => {
            warn!(path = %path.display(), "data file is not a JSON array");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse data file");
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "skipping malformed record");
                None
            }
        })
        .collect()
}

/// Sample forum threads served when no dump has been scraped yet.
pub fn sample_topics() -> Vec<Topic> {
    vec![
        Topic {
            id: 155939,
            title: "GA5 Question 8 Clarification".to_string(),
            url: "https://discourse.onlinedegree.iitm.ac.in/t/ga5-question-8-clarification/155939"
                .to_string(),
            created_at: None,
            posts: vec![Post::from_raw(
                "Use the model that's mentioned in the question. If it says gpt-3.5-turbo-0125, use that specifically.",
            )],
        },
        Topic {
            id: 165959,
            title: "GA4 Data Sourcing Discussion Thread TDS Jan 2025".to_string(),
            url: "https://discourse.onlinedegree.iitm.ac.in/t/ga4-data-sourcing-discussion-thread-tds-jan-2025/165959"
                .to_string(),
            created_at: None,
            posts: vec![Post::from_raw(
                "If you score 10/10 and get a bonus, the dashboard will show 110.",
            )],
        },
    ]
}

/// Sample course page served when no dump has been scraped yet.
pub fn sample_pages() -> Vec<CoursePage> {
    vec![CoursePage {
        url: "https://tds.s-anand.net/#/docker".to_string(),
        title: "Docker and Podman Guide".to_string(),
        content: "This course recommends using Podman, but Docker is also acceptable for assignments."
            .to_string(),
    }]
}

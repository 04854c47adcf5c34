//! Ranking of both corpora against one question.
//!
//! # Algorithm
//!
//! 1. Score every topic (kind `discourse`), then every course page
//!    (kind `course`).
//! 2. Drop candidates whose relevance is zero.
//! 3. Stable-sort by relevance, descending. Equal scores keep corpus
//!    order, so topics precede pages at the same score.
//! 4. Truncate to `max_candidates`.
//!
//! An empty result is the pipeline's signal to return the fallback answer.

use crate::models::{CandidateDoc, ProcessedQuestion, ScoredCandidate};
use crate::score::Scorer;
use crate::store::DocumentStore;

/// Retrieval and composition limits, decoupled from application config.
///
/// The defaults are the engine's standard behavior; applications may
/// override them from their own configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerParams {
    /// Maximum ranked candidates kept.
    pub max_candidates: usize,
    /// Maximum links attached to a composed answer. Values above
    /// [`crate::compose::MAX_LINKS`] are clamped to it.
    pub max_links: usize,
    /// Maximum excerpts joined into the answer text.
    pub max_excerpts: usize,
    /// Leading posts of each topic considered for excerpts.
    pub posts_per_topic: usize,
    /// Posts with this many characters or fewer are never quoted.
    pub min_post_chars: usize,
    /// Excerpt length before truncation with `...`.
    pub excerpt_chars: usize,
}

impl Default for AnswerParams {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            max_links: 3,
            max_excerpts: 2,
            posts_per_topic: 2,
            min_post_chars: 50,
            excerpt_chars: 200,
        }
    }
}

/// Rank all documents in `store` for `question`.
pub fn rank<'a, S>(
    question: &ProcessedQuestion,
    store: &'a S,
    scorer: &dyn Scorer,
    params: &AnswerParams,
) -> Vec<ScoredCandidate<'a>>
where
    S: DocumentStore + ?Sized,
{
    let keywords = &question.keywords;
    if keywords.is_empty() {
        return Vec::new();
    }

    let topics = store.topics().iter().map(|topic| ScoredCandidate {
        doc: CandidateDoc::Topic(topic),
        relevance: scorer.score_topic(keywords, topic),
    });
    let pages = store.pages().iter().map(|page| ScoredCandidate {
        doc: CandidateDoc::Page(page),
        relevance: scorer.score_page(keywords, page),
    });

    let mut candidates: Vec<ScoredCandidate<'a>> =
        topics.chain(pages).filter(|c| c.relevance > 0).collect();

    // `sort_by` is stable: ties keep corpus order.
    candidates.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    candidates.truncate(params.max_candidates);
    candidates
}

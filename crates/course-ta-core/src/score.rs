//! Keyword-overlap relevance scoring.
//!
//! A keyword contributes [`TITLE_WEIGHT`] when it appears anywhere in a
//! document's title and [`BODY_WEIGHT`] for every body field it appears
//! in. Topics have one body field per post, so a keyword present in three
//! posts of the same thread counts three times. Course pages have no
//! scored title and a single body (their `content`).
//!
//! Matching is a case-insensitive substring test: no tokenization,
//! stemming, or rarity weighting.

use crate::models::{CoursePage, Topic};

/// Points for a keyword found in the title.
pub const TITLE_WEIGHT: u32 = 2;

/// Points for each body field containing a keyword.
pub const BODY_WEIGHT: u32 = 1;

/// Text fields of one document, as seen by [`score`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFields<'a> {
    pub title: Option<&'a str>,
    pub bodies: &'a [&'a str],
}

/// Relevance scoring strategy used by the ranker.
///
/// Swapping in a different matcher (tokenized, normalized, ...) only
/// requires a new implementation; the ranker and composer are unaffected.
pub trait Scorer: Send + Sync {
    fn score_topic(&self, keywords: &[String], topic: &Topic) -> u32;
    fn score_page(&self, keywords: &[String], page: &CoursePage) -> u32;
}

/// The default case-insensitive substring scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordOverlapScorer;

impl Scorer for KeywordOverlapScorer {
    fn score_topic(&self, keywords: &[String], topic: &Topic) -> u32 {
        let needles = lowered(keywords);
        score_lowered(
            &needles,
            Some(topic.title.as_str()),
            topic.posts.iter().map(|p| p.raw.as_str()),
        )
    }

    fn score_page(&self, keywords: &[String], page: &CoursePage) -> u32 {
        let needles = lowered(keywords);
        score_lowered(&needles, None, std::iter::once(page.content.as_str()))
    }
}

/// Score `keywords` against an arbitrary set of fields.
pub fn score(keywords: &[String], fields: ScoreFields<'_>) -> u32 {
    let needles = lowered(keywords);
    score_lowered(&needles, fields.title, fields.bodies.iter().copied())
}

/// Lower-case keywords, dropping empty ones (they would match any text).
fn lowered(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| k.to_lowercase())
        .collect()
}

fn score_lowered<'a>(
    needles: &[String],
    title: Option<&str>,
    bodies: impl Iterator<Item = &'a str>,
) -> u32 {
    if needles.is_empty() {
        return 0;
    }

    let mut total = 0;

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        let title = title.to_lowercase();
        for needle in needles {
            if title.contains(needle.as_str()) {
                total += TITLE_WEIGHT;
            }
        }
    }

    for body in bodies.filter(|b| !b.is_empty()) {
        let body = body.to_lowercase();
        for needle in needles {
            if body.contains(needle.as_str()) {
                total += BODY_WEIGHT;
            }
        }
    }

    total
}

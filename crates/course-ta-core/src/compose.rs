//! Answer composition from ranked candidates.
//!
//! Forum topics are quoted: the first `posts_per_topic` posts of each
//! topic may each contribute one excerpt, provided they are longer than
//! `min_post_chars`. Course pages are linked but never quoted. The answer
//! text joins the first `max_excerpts` excerpts behind a fixed lead-in,
//! and the link list is cut to `max_links`, never more than [`MAX_LINKS`].

use crate::models::{Answer, CandidateDoc, Link, ScoredCandidate};
use crate::rank::AnswerParams;

/// Upper bound on links attached to any answer, whatever `max_links` says.
pub const MAX_LINKS: usize = 3;

/// Lead-in placed before the joined excerpts.
pub const EXCERPT_PREFIX: &str = "Based on the available information: ";

/// Answer text used when candidates matched but none had quotable posts.
pub const LINKS_ONLY_TEXT: &str =
    "I found some relevant discussions, but please check the linked resources for detailed information.";

/// Link text for a topic with no title.
pub const UNTITLED_TOPIC: &str = "Discourse discussion";

/// Link text for a course page with no title.
pub const UNTITLED_PAGE: &str = "Course content";

/// Compose an answer from candidates in rank order.
///
/// An empty slice yields the links-only text with no links; the pipeline
/// never calls this with an empty ranking.
pub fn compose(candidates: &[ScoredCandidate<'_>], params: &AnswerParams) -> Answer {
    let mut parts: Vec<String> = Vec::new();
    let mut links: Vec<Link> = Vec::new();

    for candidate in candidates {
        match candidate.doc {
            CandidateDoc::Topic(topic) => {
                links.push(Link::new(&topic.url, or_default_text(&topic.title, UNTITLED_TOPIC)));
                parts.extend(
                    topic
                        .posts
                        .iter()
                        .take(params.posts_per_topic)
                        .filter_map(|post| excerpt(&post.raw, params)),
                );
            }
            CandidateDoc::Page(page) => {
                links.push(Link::new(&page.url, or_default_text(&page.title, UNTITLED_PAGE)));
            }
        }
    }

    let answer = if parts.is_empty() {
        LINKS_ONLY_TEXT.to_string()
    } else {
        let joined = parts
            .iter()
            .take(params.max_excerpts)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{}{}", EXCERPT_PREFIX, joined)
    };

    links.truncate(params.max_links.min(MAX_LINKS));

    Answer { answer, links }
}

/// Quote a post body, or `None` if it is too short to be useful.
///
/// Lengths are counted in characters. Bodies longer than `excerpt_chars`
/// are cut to exactly that many characters followed by `...`.
pub fn excerpt(raw: &str, params: &AnswerParams) -> Option<String> {
    let len = raw.chars().count();
    if len <= params.min_post_chars {
        return None;
    }
    if len <= params.excerpt_chars {
        return Some(raw.to_string());
    }
    let mut cut: String = raw.chars().take(params.excerpt_chars).collect();
    cut.push_str("...");
    Some(cut)
}

fn or_default_text<'a>(text: &'a str, default: &'a str) -> &'a str {
    if text.is_empty() {
        default
    } else {
        text
    }
}

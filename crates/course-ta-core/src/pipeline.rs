//! The answer pipeline.
//!
//! A single linear decision per question:
//!
//! 1. A matching predefined rule answers immediately; retrieval never runs.
//! 2. Otherwise every document is ranked against the question keywords.
//! 3. An empty ranking yields the [fallback answer](fallback_answer).
//! 4. Otherwise the ranked candidates are composed into the answer.
//!
//! The engine holds no mutable state and borrows the store per call, so a
//! single engine can serve concurrent callers.

use serde::Serialize;

use crate::compose::compose;
use crate::models::{Answer, CandidateKind, Link, ProcessedQuestion};
use crate::predefined::PredefinedMatcher;
use crate::rank::{rank, AnswerParams};
use crate::score::{KeywordOverlapScorer, Scorer};
use crate::store::DocumentStore;

/// Answer text when nothing in the corpus matches.
pub const FALLBACK_TEXT: &str = "I don't have specific information about this question in my current knowledge base. Please check the TDS course materials or ask on the Discourse forum for more detailed assistance.";

/// Course site root, linked from the fallback answer.
pub const COURSE_SITE_URL: &str = "https://tds.s-anand.net";

/// Forum root, linked from the fallback answer.
pub const FORUM_URL: &str = "https://discourse.onlinedegree.iitm.ac.in";

/// The fixed apology returned when retrieval finds nothing.
pub fn fallback_answer() -> Answer {
    Answer {
        answer: FALLBACK_TEXT.to_string(),
        links: vec![
            Link::new(COURSE_SITE_URL, "TDS Course Materials"),
            Link::new(FORUM_URL, "TDS Discourse Forum"),
        ],
    }
}

/// How an answer was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum AnswerPath {
    Predefined { rule: &'static str },
    Retrieved { count: usize },
    Fallback,
}

/// A ranked document as reported in an [`AnswerTrace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracedCandidate {
    pub kind: CandidateKind,
    pub url: String,
    pub relevance: u32,
}

/// An answer together with the decision that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerTrace {
    #[serde(flatten)]
    pub path: AnswerPath,
    pub candidates: Vec<TracedCandidate>,
    pub answer: Answer,
}

/// Predefined rules, a scorer, and limits bundled into one answerer.
pub struct AnswerEngine {
    matcher: PredefinedMatcher,
    scorer: Box<dyn Scorer>,
    params: AnswerParams,
}

impl Default for AnswerEngine {
    fn default() -> Self {
        Self::new(AnswerParams::default())
    }
}

impl AnswerEngine {
    /// Builtin rules and the keyword-overlap scorer with the given limits.
    pub fn new(params: AnswerParams) -> Self {
        Self {
            matcher: PredefinedMatcher::builtin(),
            scorer: Box::new(KeywordOverlapScorer),
            params,
        }
    }

    pub fn with_matcher(mut self, matcher: PredefinedMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn params(&self) -> &AnswerParams {
        &self.params
    }

    /// Answer `question` from `store`. Never fails.
    pub fn answer<S>(&self, question: &ProcessedQuestion, store: &S) -> Answer
    where
        S: DocumentStore + ?Sized,
    {
        self.explain(question, store).answer
    }

    /// Answer `question` and report which path was taken.
    pub fn explain<S>(&self, question: &ProcessedQuestion, store: &S) -> AnswerTrace
    where
        S: DocumentStore + ?Sized,
    {
        if let Some(rule) = self.matcher.find_rule(question) {
            return AnswerTrace {
                path: AnswerPath::Predefined { rule: rule.name },
                candidates: Vec::new(),
                answer: (rule.answer)(),
            };
        }

        let ranked = rank(question, store, self.scorer.as_ref(), &self.params);
        if ranked.is_empty() {
            return AnswerTrace {
                path: AnswerPath::Fallback,
                candidates: Vec::new(),
                answer: fallback_answer(),
            };
        }

        let candidates = ranked
            .iter()
            .map(|c| TracedCandidate {
                kind: c.kind(),
                url: c.url().to_string(),
                relevance: c.relevance,
            })
            .collect();

        AnswerTrace {
            path: AnswerPath::Retrieved {
                count: ranked.len(),
            },
            candidates,
            answer: compose(&ranked, &self.params),
        }
    }
}

/// Answer `question` with the default engine.
pub fn generate_answer<S>(question: &ProcessedQuestion, store: &S) -> Answer
where
    S: DocumentStore + ?Sized,
{
    AnswerEngine::default().answer(question, store)
}

//! Core data models used throughout Course TA.
//!
//! Documents ([`Topic`], [`CoursePage`]) arrive as JSON produced by the
//! scrapers. Decoding is lenient: a missing, null, or mistyped field falls
//! back to its empty default so that one damaged record never stops the
//! rest of the corpus from being scored.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Decode a field, substituting `T::default()` when the value is present
/// but has the wrong shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list element by element, dropping entries that fail to decode.
/// A non-array value yields an empty list.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Coarse category assigned to a question by the preprocessing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ModelUsage,
    EnvironmentSetup,
    GradingSystem,
    ScheduleInquiry,
    #[default]
    #[serde(other)]
    Other,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ModelUsage => "model_usage",
            QuestionType::EnvironmentSetup => "environment_setup",
            QuestionType::GradingSystem => "grading_system",
            QuestionType::ScheduleInquiry => "schedule_inquiry",
            QuestionType::Other => "other",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student question after preprocessing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedQuestion {
    #[serde(default)]
    pub original_question: String,
    #[serde(default)]
    pub cleaned_question: String,
    #[serde(default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ProcessedQuestion {
    /// Build a question whose cleaned text equals the original.
    pub fn new<I, K>(question: &str, question_type: QuestionType, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            original_question: question.to_string(),
            cleaned_question: question.to_string(),
            question_type,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single message within a forum topic, reduced to plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "or_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub post_number: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub username: String,
    #[serde(default, deserialize_with = "or_default")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "or_default")]
    pub raw: String,
}

impl Post {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }
}

/// A forum discussion thread. `posts` keeps the forum's original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default, deserialize_with = "or_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub url: String,
    #[serde(default, deserialize_with = "or_default")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub posts: Vec<Post>,
}

/// A scraped page of static course material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoursePage {
    #[serde(default, deserialize_with = "or_default")]
    pub url: String,
    #[serde(default, deserialize_with = "or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub content: String,
}

/// Which corpus a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Discourse,
    Course,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Discourse => "discourse",
            CandidateKind::Course => "course",
        }
    }
}

/// A document borrowed from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateDoc<'a> {
    Topic(&'a Topic),
    Page(&'a CoursePage),
}

/// A document paired with its relevance for one query. Never outlives the
/// store it borrows from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub doc: CandidateDoc<'a>,
    pub relevance: u32,
}

impl<'a> ScoredCandidate<'a> {
    pub fn kind(&self) -> CandidateKind {
        match self.doc {
            CandidateDoc::Topic(_) => CandidateKind::Discourse,
            CandidateDoc::Page(_) => CandidateKind::Course,
        }
    }

    pub fn url(&self) -> &'a str {
        match self.doc {
            CandidateDoc::Topic(t) => &t.url,
            CandidateDoc::Page(p) => &p.url,
        }
    }
}

/// A supporting link shown with an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub text: String,
}

impl Link {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// The final response: non-empty text plus up to three links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub links: Vec<Link>,
}

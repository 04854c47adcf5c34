//! Turns a raw student question into a [`ProcessedQuestion`].
//!
//! Keyword extraction is deliberately simple: lower-case, split on
//! anything that is not alphanumeric or one of `-./` (so `gpt-3.5-turbo-0125`
//! and `10/10` survive as single tokens), drop short tokens and stop words,
//! and deduplicate in first-seen order.
//!
//! The category is the first cue list with a hit, checked in the order of
//! [`CATEGORY_CUES`].

use course_ta_core::models::{ProcessedQuestion, QuestionType};

/// Cue phrases per category, in priority order.
pub const CATEGORY_CUES: &[(QuestionType, &[&str])] = &[
    (
        QuestionType::ModelUsage,
        &["gpt", "model", "openai", "ai proxy", "ai-proxy", "llm"],
    ),
    (
        QuestionType::EnvironmentSetup,
        &["docker", "podman", "install", "setup", "environment", "container"],
    ),
    (
        QuestionType::GradingSystem,
        &["score", "grade", "bonus", "marks", "dashboard"],
    ),
    (
        QuestionType::ScheduleInquiry,
        &["exam", "schedule", "deadline", "end-term", "date"],
    ),
];

const MIN_KEYWORD_CHARS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "and", "any", "are", "because", "been",
    "before", "being", "but", "can", "could", "did", "does", "doing", "for", "from", "had", "has",
    "have", "having", "her", "here", "his", "how", "into", "its", "just", "may", "might", "more",
    "most", "must", "not", "now", "off", "once", "only", "other", "our", "out", "over", "own",
    "same", "she", "should", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "too", "under", "until", "use", "used",
    "very", "was", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your",
];

/// Preprocess `question`. Total over all input, including empty strings.
pub fn process_question(question: &str) -> ProcessedQuestion {
    let cleaned = clean(question);
    let keywords = extract_keywords(&cleaned);
    let question_type = classify(&cleaned);

    ProcessedQuestion {
        original_question: question.to_string(),
        cleaned_question: cleaned,
        question_type,
        keywords,
    }
}

/// Collapse runs of whitespace and trim.
pub fn clean(question: &str) -> String {
    question.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for token in lower.split(|c: char| !(c.is_alphanumeric() || matches!(c, '-' | '.' | '/'))) {
        let token = token.trim_matches(|c| matches!(c, '-' | '.' | '/'));
        if token.chars().count() < MIN_KEYWORD_CHARS || STOP_WORDS.contains(&token) {
            continue;
        }
        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

pub fn classify(text: &str) -> QuestionType {
    let lower = text.to_lowercase();
    CATEGORY_CUES
        .iter()
        .find(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
        .map(|(question_type, _)| *question_type)
        .unwrap_or(QuestionType::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_model_names_whole() {
        let q = process_question(
            "The question asks to use gpt-3.5-turbo-0125 model but the ai-proxy provided by Anand sir only supports gpt-4o-mini.",
        );
        assert!(q.keywords.contains(&"gpt-3.5-turbo-0125".to_string()));
        assert!(q.keywords.contains(&"gpt-4o-mini".to_string()));
        assert!(q.keywords.contains(&"ai-proxy".to_string()));
        assert_eq!(q.question_type, QuestionType::ModelUsage);
    }

    #[test]
    fn test_stop_words_short_tokens_and_duplicates_removed() {
        let keywords = extract_keywords("Is the Docker docker setup OK for me?");
        assert_eq!(keywords, vec!["docker", "setup"]);
    }

    #[test]
    fn test_trailing_punctuation_trimmed() {
        let keywords = extract_keywords("Scores 10/10. Dashboard... ok");
        assert_eq!(keywords, vec!["scores", "10/10", "dashboard"]);
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(
            classify("I know Docker but have not used Podman before"),
            QuestionType::EnvironmentSetup
        );
        assert_eq!(
            classify("If a student scores 10/10 on GA4 as well as a bonus, how would it appear on the dashboard?"),
            QuestionType::GradingSystem
        );
        assert_eq!(
            classify("When is the TDS Sep 2025 end-term exam?"),
            QuestionType::ScheduleInquiry
        );
        // Model cues outrank container cues.
        assert_eq!(classify("Which model runs inside docker?"), QuestionType::ModelUsage);
        assert_eq!(classify("How do I submit project 1?"), QuestionType::Other);
    }

    #[test]
    fn test_cleaned_and_original() {
        let q = process_question("  How   do I\n submit?  ");
        assert_eq!(q.original_question, "  How   do I\n submit?  ");
        assert_eq!(q.cleaned_question, "How do I submit?");
        assert_eq!(q.keywords, vec!["submit"]);
    }

    #[test]
    fn test_empty_question() {
        let q = process_question("");
        assert!(q.keywords.is_empty());
        assert_eq!(q.cleaned_question, "");
        assert_eq!(q.question_type, QuestionType::Other);
    }
}

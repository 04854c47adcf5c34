//! Curated answers that override retrieval for known question patterns.
//!
//! The table is an ordered list of [`Rule`]s. A rule applies when the
//! question's category equals the rule's category and the rule's trigger
//! accepts the question. Rules are tried in order and the first match
//! wins; new rules are appended with [`PredefinedMatcher::with_rule`]
//! without touching the matcher itself.
//!
//! | Category | Trigger |
//! |----------|---------|
//! | `model_usage` | a keyword equals `gpt-3.5-turbo-0125`, or the question mentions `gpt3.5` |
//! | `environment_setup` | the question mentions `docker` or `podman` |
//! | `grading_system` | the question mentions `bonus`, and `10/10` or `dashboard` |
//! | `schedule_inquiry` | the question mentions `sep 2025` and `end-term` |

use crate::models::{Answer, Link, ProcessedQuestion, QuestionType};

/// What a trigger sees of a question.
#[derive(Debug, Clone)]
pub struct RuleInput<'a> {
    pub question_type: QuestionType,
    pub keywords: &'a [String],
    /// The original question as typed.
    pub question: &'a str,
    /// The original question, lower-cased.
    pub question_lower: String,
}

impl<'a> RuleInput<'a> {
    pub fn new(question: &'a ProcessedQuestion) -> Self {
        Self {
            question_type: question.question_type,
            keywords: &question.keywords,
            question: &question.original_question,
            question_lower: question.original_question.to_lowercase(),
        }
    }

    /// Whether the lower-cased question contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.question_lower.contains(needle)
    }

    /// Whether any keyword equals `word`, ignoring case.
    pub fn has_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k.to_lowercase() == word)
    }
}

/// One curated override.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Identifier used in traces and logs.
    pub name: &'static str,
    pub question_type: QuestionType,
    pub trigger: fn(&RuleInput<'_>) -> bool,
    pub answer: fn() -> Answer,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("question_type", &self.question_type)
            .finish_non_exhaustive()
    }
}

impl Rule {
    pub fn matches(&self, input: &RuleInput<'_>) -> bool {
        self.question_type == input.question_type && (self.trigger)(input)
    }
}

/// Ordered rule table.
#[derive(Debug, Clone)]
pub struct PredefinedMatcher {
    rules: Vec<Rule>,
}

impl Default for PredefinedMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PredefinedMatcher {
    /// A matcher with no rules; every question falls through to retrieval.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard course rules, in priority order.
    pub fn builtin() -> Self {
        Self {
            rules: vec![MODEL_USAGE, CONTAINER_TOOLING, DASHBOARD_BONUS, END_TERM_SCHEDULE],
        }
    }

    /// Append a rule with lower priority than every existing one.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule matching `question`, if any.
    pub fn find_rule(&self, question: &ProcessedQuestion) -> Option<&Rule> {
        let input = RuleInput::new(question);
        self.rules.iter().find(|rule| rule.matches(&input))
    }

    /// The curated answer for `question`, or `None` to fall through.
    pub fn find(&self, question: &ProcessedQuestion) -> Option<Answer> {
        self.find_rule(question).map(|rule| (rule.answer)())
    }
}

pub const MODEL_USAGE: Rule = Rule {
    name: "gpt-3.5-turbo-0125",
    question_type: QuestionType::ModelUsage,
    trigger: |q| q.has_keyword("gpt-3.5-turbo-0125") || q.mentions("gpt3.5"),
    answer: || Answer {
        answer: "You must use `gpt-3.5-turbo-0125`, even if the AI Proxy only supports `gpt-4o-mini`. Use the OpenAI API directly for this question.".to_string(),
        links: vec![Link::new(
            "https://discourse.onlinedegree.iitm.ac.in/t/ga5-question-8-clarification/155939/4",
            "Use the model that's mentioned in the question.",
        )],
    },
};

pub const CONTAINER_TOOLING: Rule = Rule {
    name: "docker_vs_podman",
    question_type: QuestionType::EnvironmentSetup,
    trigger: |q| q.mentions("docker") || q.mentions("podman"),
    answer: || Answer {
        answer: "While Docker knowledge is valuable, we recommend using Podman for this course as it's the officially supported container tool. However, Docker is also acceptable for completing assignments.".to_string(),
        links: vec![Link::new(
            "https://tds.s-anand.net/#/docker",
            "TDS Docker/Podman Documentation",
        )],
    },
};

pub const DASHBOARD_BONUS: Rule = Rule {
    name: "bonus_scoring",
    question_type: QuestionType::GradingSystem,
    trigger: |q| q.mentions("bonus") && (q.question.contains("10/10") || q.mentions("dashboard")),
    answer: || Answer {
        answer: "If a student scores 10/10 on GA4 as well as a bonus, it would appear as '110' on the dashboard, indicating 10 out of 10 plus the bonus point.".to_string(),
        links: vec![Link::new(
            "https://discourse.onlinedegree.iitm.ac.in/t/ga4-data-sourcing-discussion-thread-tds-jan-2025/165959/388",
            "GA4 scoring discussion",
        )],
    },
};

pub const END_TERM_SCHEDULE: Rule = Rule {
    name: "sep_2025_end_term",
    question_type: QuestionType::ScheduleInquiry,
    trigger: |q| q.mentions("sep 2025") && q.mentions("end-term"),
    answer: || Answer {
        answer: "I don't have information about the TDS Sep 2025 end-term exam schedule yet, as this information is not available at this time.".to_string(),
        links: Vec::new(),
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, question_type: QuestionType, keywords: &[&str]) -> ProcessedQuestion {
        ProcessedQuestion::new(text, question_type, keywords.iter().copied())
    }

    #[test]
    fn test_model_usage_by_keyword() {
        let q = question("Which model?", QuestionType::ModelUsage, &["gpt-3.5-turbo-0125"]);
        let answer = PredefinedMatcher::builtin().find(&q).unwrap();
        assert!(answer.answer.contains("gpt-3.5-turbo-0125"));
        assert_eq!(answer.links.len(), 1);
        assert!(answer.links[0].url.ends_with("/155939/4"));
    }

    #[test]
    fn test_model_usage_by_question_text() {
        let q = question(
            "Should we use the OpenAI API for GPT3.5 turbo?",
            QuestionType::ModelUsage,
            &["openai"],
        );
        assert_eq!(
            PredefinedMatcher::builtin().find_rule(&q).map(|r| r.name),
            Some("gpt-3.5-turbo-0125")
        );
    }

    #[test]
    fn test_keyword_trigger_is_exact() {
        let q = question("Which model?", QuestionType::ModelUsage, &["gpt-3.5-turbo"]);
        assert!(PredefinedMatcher::builtin().find(&q).is_none());
    }

    #[test]
    fn test_container_rule() {
        let q = question(
            "I know Docker but have not used Podman before. Should I use Docker for this course?",
            QuestionType::EnvironmentSetup,
            &["docker", "podman"],
        );
        let answer = PredefinedMatcher::builtin().find(&q).unwrap();
        assert!(answer.answer.contains("Podman"));
        assert_eq!(answer.links[0].url, "https://tds.s-anand.net/#/docker");
    }

    #[test]
    fn test_dashboard_rule_needs_bonus_and_score() {
        let matcher = PredefinedMatcher::builtin();
        let hit = question(
            "If a student scores 10/10 on GA4 as well as a bonus, how would it appear?",
            QuestionType::GradingSystem,
            &[],
        );
        assert!(matcher.find(&hit).unwrap().answer.contains("'110'"));

        let via_dashboard = question("Bonus on the Dashboard?", QuestionType::GradingSystem, &[]);
        assert!(matcher.find(&via_dashboard).is_some());

        let no_bonus = question("What does 10/10 on the dashboard mean?", QuestionType::GradingSystem, &[]);
        assert!(matcher.find(&no_bonus).is_none());

        let bonus_only = question("Is there a bonus?", QuestionType::GradingSystem, &[]);
        assert!(matcher.find(&bonus_only).is_none());
    }

    #[test]
    fn test_schedule_rule_has_no_links() {
        let q = question(
            "When is the TDS Sep 2025 end-term exam?",
            QuestionType::ScheduleInquiry,
            &[],
        );
        let answer = PredefinedMatcher::builtin().find(&q).unwrap();
        assert!(answer.answer.contains("Sep 2025 end-term"));
        assert!(answer.links.is_empty());
    }

    #[test]
    fn test_category_must_match() {
        let q = question("I use docker", QuestionType::Other, &["docker"]);
        assert!(PredefinedMatcher::builtin().find(&q).is_none());
        let q = question("I use docker", QuestionType::GradingSystem, &["docker"]);
        assert!(PredefinedMatcher::builtin().find(&q).is_none());
    }

    #[test]
    fn test_appended_rule_has_lowest_priority() {
        const CUSTOM: Rule = Rule {
            name: "custom_docker",
            question_type: QuestionType::EnvironmentSetup,
            trigger: |q| q.mentions("docker") || q.mentions("wsl"),
            answer: || Answer {
                answer: "custom".to_string(),
                links: Vec::new(),
            },
        };
        let matcher = PredefinedMatcher::builtin().with_rule(CUSTOM);
        assert_eq!(matcher.rules().len(), 5);

        let docker = question("docker?", QuestionType::EnvironmentSetup, &[]);
        assert_eq!(matcher.find_rule(&docker).map(|r| r.name), Some("docker_vs_podman"));

        let wsl = question("wsl?", QuestionType::EnvironmentSetup, &[]);
        assert_eq!(matcher.find(&wsl).unwrap().answer, "custom");
    }

    #[test]
    fn test_empty_matcher_never_matches() {
        let q = question("docker", QuestionType::EnvironmentSetup, &[]);
        assert!(PredefinedMatcher::empty().find(&q).is_none());
    }
}

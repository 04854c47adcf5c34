//! The `ta ask` command.
//!
//! Preprocesses a free-text question, runs it through the answer engine
//! against the configured corpus, and prints the result either as text
//! or as the JSON answer object served by the HTTP API.

use anyhow::Result;
use course_ta_core::pipeline::{AnswerEngine, AnswerPath, AnswerTrace};
use tracing::debug;

use crate::config::Config;
use crate::corpus;
use crate::preprocess::process_question;

/// Answer `question` against the configured corpus.
pub fn ask(config: &Config, question: &str) -> AnswerTrace {
    let store = corpus::load_store(config);
    let engine = AnswerEngine::new(config.answer.params());
    let processed = process_question(question);
    debug!(
        question_type = %processed.question_type,
        keywords = ?processed.keywords,
        "question processed"
    );
    engine.explain(&processed, &store)
}

pub fn run_ask(config: &Config, question: &str, json: bool, explain: bool) -> Result<()> {
    let trace = ask(config, question);

    if json {
        let out = if explain {
            serde_json::to_string_pretty(&trace)?
        } else {
            serde_json::to_string_pretty(&trace.answer)?
        };
        println!("{}", out);
        return Ok(());
    }

    println!("{}", trace.answer.answer);
    if !trace.answer.links.is_empty() {
        println!();
        println!("Links:");
        for link in &trace.answer.links {
            println!("  - {}: {}", link.text, link.url);
        }
    }

    if explain {
        println!();
        match &trace.path {
            AnswerPath::Predefined { rule } => println!("Path: predefined ({})", rule),
            AnswerPath::Retrieved { count } => println!("Path: retrieved ({} candidates)", count),
            AnswerPath::Fallback => println!("Path: fallback"),
        }
        for (i, c) in trace.candidates.iter().enumerate() {
            println!(
                "  {}. [{}] relevance={}  {}",
                i + 1,
                c.kind.as_str(),
                c.relevance,
                c.url
            );
        }
    }

    Ok(())
}

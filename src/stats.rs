//! Corpus statistics.
//!
//! Gives a quick summary of what the engine will search: topic, post and
//! page counts, and which files they came from. Used by `ta stats` to
//! confirm a scrape landed where the config expects it.

use anyhow::Result;
use chrono::{DateTime, Utc};
use course_ta_core::models::Topic;
use course_ta_core::store::DocumentStore;

use crate::config::Config;
use crate::corpus::{self, CorpusCounts};

/// Load the corpus and print a summary.
pub fn run_stats(config: &Config) -> Result<()> {
    let store = corpus::load_store(config);
    let counts = CorpusCounts::of(&store);

    println!("Course TA — Corpus Stats");
    println!("========================");
    println!();
    println!(
        "  Discourse:   {} ({})",
        config.data.discourse_path.display(),
        file_state(&config.data.discourse_path)
    );
    println!(
        "  Course:      {} ({})",
        config.data.course_path.display(),
        file_state(&config.data.course_path)
    );
    println!();
    println!("  Topics:      {}", counts.topics);
    println!("  Posts:       {}", counts.posts);
    println!("  Pages:       {}", counts.pages);

    if let Some((first, last)) = topic_date_range(store.topics()) {
        println!(
            "  Topic dates: {} → {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
    }

    let untitled = store.topics().iter().filter(|t| t.title.is_empty()).count()
        + store.pages().iter().filter(|p| p.title.is_empty()).count();
    if untitled > 0 {
        println!("  Untitled:    {}", untitled);
    }

    let empty_topics = store.topics().iter().filter(|t| t.posts.is_empty()).count();
    if empty_topics > 0 {
        println!("  No posts:    {}", empty_topics);
    }

    if store.is_empty() {
        println!();
        println!("  Corpus is empty: every question will get the fallback answer.");
    }

    Ok(())
}

/// Earliest and latest topic creation time, ignoring undated topics.
fn topic_date_range(topics: &[Topic]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let mut dates = topics.iter().filter_map(|t| t.created_at);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

fn file_state(path: &std::path::Path) -> String {
    match std::fs::metadata(path) {
        Ok(m) => format_bytes(m.len()),
        Err(_) => "missing".to_string(),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

//! TOML configuration for the `ta` binary and HTTP server.
//!
//! ```toml
//! [data]
//! discourse_path = "data/discourse_posts.json"
//! course_path = "data/course_content.json"
//!
//! [answer]
//! max_candidates = 5
//!
//! [server]
//! bind = "127.0.0.1:8000"
//! ```
//!
//! Every section is optional; omitted values take the defaults below.

use anyhow::{Context, Result};
use course_ta_core::compose::MAX_LINKS;
use course_ta_core::rank::AnswerParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub answer: AnswerConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_discourse_path")]
    pub discourse_path: PathBuf,
    #[serde(default = "default_course_path")]
    pub course_path: PathBuf,
    /// Serve the built-in sample corpus for any dump that does not exist.
    #[serde(default = "default_true")]
    pub use_sample_when_missing: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            discourse_path: default_discourse_path(),
            course_path: default_course_path(),
            use_sample_when_missing: true,
        }
    }
}

fn default_discourse_path() -> PathBuf {
    PathBuf::from("data/discourse_posts.json")
}
fn default_course_path() -> PathBuf {
    PathBuf::from("data/course_content.json")
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnswerConfig {
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_max_links")]
    pub max_links: usize,
    #[serde(default = "default_max_excerpts")]
    pub max_excerpts: usize,
    #[serde(default = "default_posts_per_topic")]
    pub posts_per_topic: usize,
    #[serde(default = "default_min_post_chars")]
    pub min_post_chars: usize,
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self::from(AnswerParams::default())
    }
}

fn default_max_candidates() -> usize {
    AnswerParams::default().max_candidates
}
fn default_max_links() -> usize {
    AnswerParams::default().max_links
}
fn default_max_excerpts() -> usize {
    AnswerParams::default().max_excerpts
}
fn default_posts_per_topic() -> usize {
    AnswerParams::default().posts_per_topic
}
fn default_min_post_chars() -> usize {
    AnswerParams::default().min_post_chars
}
fn default_excerpt_chars() -> usize {
    AnswerParams::default().excerpt_chars
}

impl From<AnswerParams> for AnswerConfig {
    fn from(p: AnswerParams) -> Self {
        Self {
            max_candidates: p.max_candidates,
            max_links: p.max_links,
            max_excerpts: p.max_excerpts,
            posts_per_topic: p.posts_per_topic,
            min_post_chars: p.min_post_chars,
            excerpt_chars: p.excerpt_chars,
        }
    }
}

impl AnswerConfig {
    pub fn params(&self) -> AnswerParams {
        AnswerParams {
            max_candidates: self.max_candidates,
            max_links: self.max_links,
            max_excerpts: self.max_excerpts,
            posts_per_topic: self.posts_per_topic,
            min_post_chars: self.min_post_chars,
            excerpt_chars: self.excerpt_chars,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Config {
    /// Defaults for commands run without a config file.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}

fn validate(config: &Config) -> Result<()> {
    let a = &config.answer;
    for (name, value) in [
        ("max_candidates", a.max_candidates),
        ("max_links", a.max_links),
        ("max_excerpts", a.max_excerpts),
        ("posts_per_topic", a.posts_per_topic),
        ("excerpt_chars", a.excerpt_chars),
    ] {
        if value == 0 {
            anyhow::bail!("answer.{} must be >= 1", name);
        }
    }

    if a.max_links > MAX_LINKS {
        anyhow::bail!("answer.max_links must be <= {}", MAX_LINKS);
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}

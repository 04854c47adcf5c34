//! # Course TA
//!
//! A virtual teaching assistant that answers free-text course questions
//! from two offline corpora: scraped forum threads and course-site pages.
//!
//! The ranking and answer logic lives in [`course_ta_core`]; this crate
//! wraps it with configuration, corpus loading, question preprocessing, a
//! CLI, and an HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌──────────────────────────────┐
//! │ JSON dumps │──▶│   corpus   │──▶│ course_ta_core               │
//! │ forum/site │   │   loader   │   │ predefined ▶ rank ▶ compose  │
//! └────────────┘   └────────────┘   └──────────────┬───────────────┘
//!                                                  │
//!                      ┌───────────────────────────┤
//!                      ▼                           ▼
//!                 ┌──────────┐               ┌──────────┐
//!                 │   CLI    │               │   HTTP   │
//!                 │   (ta)   │               │ /api/    │
//!                 └──────────┘               └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! ta stats                                   # what is loaded
//! ta ask "Should I use Docker or Podman?"    # answer one question
//! ta ask "GA4 bonus on dashboard?" --json --explain
//! ta serve                                   # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Loading the JSON dumps into a document store |
//! | [`preprocess`] | Keyword extraction and question classification |
//! | [`ask`] | The `ta ask` command |
//! | [`stats`] | The `ta stats` command |
//! | [`server`] | HTTP API |

pub mod ask;
pub mod config;
pub mod corpus;
pub mod preprocess;
pub mod server;
pub mod stats;

//! # Course TA Core
//!
//! The retrieval-and-ranking engine behind Course TA: data models, the
//! document store abstraction, the keyword-overlap scorer, the ranker,
//! answer composition, curated predefined answers, and the pipeline that
//! ties them together.
//!
//! This crate performs no filesystem or network I/O and does not log.
//! Every function on the answer path is total: any [`ProcessedQuestion`]
//! produces a well-formed [`Answer`], falling back to a fixed apology when
//! nothing in the corpus matches.
//!
//! ```rust
//! use course_ta_core::models::{ProcessedQuestion, QuestionType, Topic, Post};
//! use course_ta_core::pipeline::generate_answer;
//! use course_ta_core::store::InMemoryStore;
//!
//! let store = InMemoryStore::new(
//!     vec![Topic {
//!         title: "Project 1 deadline".into(),
//!         url: "https://forum.example/t/project-1/1".into(),
//!         posts: vec![Post::from_raw("The deadline for project 1 has been extended by one week for everyone.")],
//!         ..Topic::default()
//!     }],
//!     Vec::new(),
//! );
//! let question = ProcessedQuestion::new("When is the project deadline?", QuestionType::Other, ["deadline"]);
//! let answer = generate_answer(&question, &store);
//! assert!(answer.answer.starts_with("Based on the available information: "));
//! assert_eq!(answer.links.len(), 1);
//! ```
//!
//! [`ProcessedQuestion`]: models::ProcessedQuestion
//! [`Answer`]: models::Answer

pub mod compose;
pub mod models;
pub mod pipeline;
pub mod predefined;
pub mod rank;
pub mod score;
pub mod store;

#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

//! FAQ matching core: a fixed knowledge base of canned question/answer
//! pairs, TF-IDF scoring, and threshold-gated answer selection.

pub mod chat;
mod error;
pub mod knowledge;
pub mod matcher;
pub mod scoring;
pub mod text;
pub mod vectorizer;

pub use chat::{ChatLoop, Responder};
pub use error::{Error, KnowledgeBaseError, Result};
pub use knowledge::{CategoryEntry, FlattenedCorpus, KnowledgeBase};
pub use matcher::{
    DEFAULT_MATCH_THRESHOLD, FALLBACK_ANSWER, FaqMatcher, Match, MatchOutcome, MatcherConfig,
    answer, select_best,
};
pub use scoring::{SparseVector, cosine_similarity};
pub use text::{normalize, tokenize};
pub use vectorizer::{TfidfVectorizer, score};

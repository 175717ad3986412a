//! Answer selection over a fitted knowledge base.
//!
//! # Example
//!
//! ```
//! use faqbot_core::{FaqMatcher, KnowledgeBase, MatcherConfig};
//!
//! let matcher = FaqMatcher::new(KnowledgeBase::reference(), MatcherConfig::default());
//! assert_eq!(
//!     matcher.answer("How do I track my shipment?"),
//!     "You can track your shipment using the tracking ID sent to your email after dispatch."
//! );
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::Responder;
use crate::knowledge::{FlattenedCorpus, KnowledgeBase};
use crate::text::normalize;
use crate::vectorizer::TfidfVectorizer;

/// Best score must be strictly greater than this to count as a match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.2;

/// Returned when no question clears the threshold.
pub const FALLBACK_ANSWER: &str = "I'm sorry, I couldn't find an answer to that question. Please contact support for further assistance.";

/// Matching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

const fn default_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_fallback() -> String {
    FALLBACK_ANSWER.to_string()
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            fallback: default_fallback(),
        }
    }
}

/// A knowledge base question selected for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// Position in the flattened corpus.
    pub index: usize,
    pub category: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    Matched(Match<'a>),
    /// Nothing cleared the threshold. `best_score` is `None` for an empty corpus.
    NoConfidentMatch { best_score: Option<f64> },
}

impl MatchOutcome<'_> {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    #[must_use]
    pub const fn best_score(&self) -> Option<f64> {
        match self {
            Self::Matched(m) => Some(m.score),
            Self::NoConfidentMatch { best_score } => *best_score,
        }
    }
}

/// Index and value of the first maximum in `scores`, if it is strictly above `threshold`.
///
/// Ties resolve to the lowest index. NaN scores never win.
#[must_use]
pub fn select_best(scores: &[f64], threshold: f64) -> Option<(usize, f64)> {
    best_of(scores).filter(|(_, score)| *score > threshold)
}

fn best_of(scores: &[f64]) -> Option<(usize, f64)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .fold(None, |best, (index, score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((index, score)),
        })
}

/// Knowledge base flattened and fitted once, shared read-only by every query.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    knowledge_base: KnowledgeBase,
    corpus: FlattenedCorpus,
    vectorizer: TfidfVectorizer,
    config: MatcherConfig,
}

impl FaqMatcher {
    #[must_use]
    pub fn new(knowledge_base: KnowledgeBase, config: MatcherConfig) -> Self {
        let corpus = knowledge_base.flatten();
        let vectorizer = TfidfVectorizer::fit(corpus.questions.as_slice());

        debug!(
            "Matcher ready: {} questions in {} categories, threshold {}",
            corpus.len(),
            knowledge_base.category_count(),
            config.threshold
        );

        Self {
            knowledge_base,
            corpus,
            vectorizer,
            config,
        }
    }

    #[must_use]
    pub const fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    #[must_use]
    pub const fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Similarity of the normalized query to every question, in flattened order.
    #[must_use]
    pub fn scores(&self, query: &str) -> Vec<f64> {
        self.vectorizer.score(&normalize(query))
    }

    pub fn match_query(&self, query: &str) -> MatchOutcome<'_> {
        self.outcome(&self.scores(query))
    }

    /// The matched answer, or the configured fallback.
    pub fn answer(&self, query: &str) -> &str {
        self.answer_for(&self.match_query(query))
    }

    /// Answer text for an outcome produced by this matcher.
    #[must_use]
    pub fn answer_for<'a>(&'a self, outcome: &MatchOutcome<'a>) -> &'a str {
        match outcome {
            MatchOutcome::Matched(m) => m.answer,
            MatchOutcome::NoConfidentMatch { .. } => self.config.fallback.as_str(),
        }
    }

    /// Up to `limit` questions with a non-zero score, highest first.
    ///
    /// Equal scores keep flattened order. The threshold is not applied.
    pub fn rank(&self, query: &str, limit: usize) -> Vec<Match<'_>> {
        self.ranked(&self.scores(query), limit)
    }

    /// Outcome and ranked candidates from a single scoring pass.
    pub fn explain(&self, query: &str, limit: usize) -> (MatchOutcome<'_>, Vec<Match<'_>>) {
        let scores = self.scores(query);
        (self.outcome(&scores), self.ranked(&scores, limit))
    }

    fn outcome(&self, scores: &[f64]) -> MatchOutcome<'_> {
        if let Some((index, score)) = select_best(scores, self.config.threshold) {
            debug!(
                "Matched question #{index} with score {score:.4}: {}",
                self.corpus.questions[index]
            );
            return MatchOutcome::Matched(self.candidate(index, score));
        }

        let best_score = best_of(scores).map(|(_, score)| score);
        match best_score {
            Some(score) => debug!(
                "Best score {score:.4} not above threshold {}",
                self.config.threshold
            ),
            None => debug!("No questions to match against"),
        }
        MatchOutcome::NoConfidentMatch { best_score }
    }

    fn ranked(&self, scores: &[f64], limit: usize) -> Vec<Match<'_>> {
        let mut ranked: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, score)| *score > 0.0)
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(index, score)| self.candidate(index, score))
            .collect()
    }

    fn candidate(&self, index: usize, score: f64) -> Match<'_> {
        Match {
            index,
            category: &self.corpus.categories[index],
            question: &self.corpus.questions[index],
            answer: &self.corpus.answers[index],
            score,
        }
    }
}

impl Responder for FaqMatcher {
    fn respond(&self, query: &str) -> String {
        self.answer(query).to_string()
    }
}

/// Answer `query` from `knowledge_base` with the default threshold and fallback.
///
/// Fits a fresh vector space per call; hold a [`FaqMatcher`] to reuse one.
#[must_use]
pub fn answer(query: &str, knowledge_base: &KnowledgeBase) -> String {
    FaqMatcher::new(knowledge_base.clone(), MatcherConfig::default())
        .answer(query)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn duplicate_question_kb() -> KnowledgeBase {
        KnowledgeBase::from_categories([
            ("first", strings(&["reset my password"]), strings(&["first answer"])),
            ("second", strings(&["reset my password"]), strings(&["second answer"])),
        ])
        .expect("valid knowledge base")
    }

    #[test]
    fn select_best_is_strictly_above_threshold() {
        assert_eq!(select_best(&[0.2], 0.2), None);
        assert_eq!(select_best(&[0.1, 0.2, 0.05], 0.2), None);
        assert_eq!(select_best(&[0.1, 0.2000001], 0.2), Some((1, 0.200_000_1)));
    }

    #[test]
    fn select_best_prefers_first_maximum() {
        assert_eq!(select_best(&[0.3, 0.9, 0.9, 0.1], 0.2), Some((1, 0.9)));
        assert_eq!(select_best(&[0.5, 0.5], 0.2), Some((0, 0.5)));
    }

    #[test]
    fn select_best_handles_empty_and_nan() {
        assert_eq!(select_best(&[], 0.2), None);
        assert_eq!(select_best(&[f64::NAN, 0.4], 0.2), Some((1, 0.4)));
        assert_eq!(select_best(&[f64::NAN], 0.2), None);
    }

    #[test]
    fn tie_goes_to_first_in_flattened_order() {
        let matcher = FaqMatcher::new(duplicate_question_kb(), MatcherConfig::default());
        assert_eq!(matcher.answer("Reset my password!"), "first answer");

        let ranked = matcher.rank("reset my password", 5);
        let indices: Vec<usize> = ranked.iter().map(|m| m.index).collect();
        assert_eq!(indices, [0, 1]);
        assert_eq!(ranked[1].category, "second");
    }

    #[test]
    fn empty_knowledge_base_falls_back() {
        let matcher = FaqMatcher::new(KnowledgeBase::empty(), MatcherConfig::default());
        assert_eq!(
            matcher.match_query("anything"),
            MatchOutcome::NoConfidentMatch { best_score: None }
        );
        assert_eq!(matcher.answer("anything"), FALLBACK_ANSWER);
        assert!(matcher.rank("anything", 3).is_empty());
    }

    #[test]
    fn custom_fallback_and_threshold() {
        let config = MatcherConfig {
            threshold: 0.99,
            fallback: "Ask a human.".to_string(),
        };
        let matcher = FaqMatcher::new(KnowledgeBase::reference(), config);
        // Shares terms with a question but is not close enough for 0.99
        assert_eq!(matcher.answer("my order"), "Ask a human.");
        assert!(matcher.match_query("Where is my order?").is_match());
    }

    #[test]
    fn best_score_equal_to_threshold_falls_back() {
        let kb = KnowledgeBase::reference();
        let default_matcher = FaqMatcher::new(kb.clone(), MatcherConfig::default());
        let best = default_matcher
            .match_query("customer")
            .best_score()
            .unwrap_or_default();
        assert!(best > DEFAULT_MATCH_THRESHOLD && best < 1.0, "best score {best}");

        let at_boundary = FaqMatcher::new(
            kb.clone(),
            MatcherConfig {
                threshold: best,
                ..MatcherConfig::default()
            },
        );
        assert_eq!(
            at_boundary.match_query("customer"),
            MatchOutcome::NoConfidentMatch {
                best_score: Some(best)
            }
        );
        assert_eq!(at_boundary.answer("customer"), FALLBACK_ANSWER);

        let just_below = FaqMatcher::new(
            kb,
            MatcherConfig {
                threshold: best - 1e-9,
                ..MatcherConfig::default()
            },
        );
        assert_eq!(
            just_below.answer("customer"),
            "You can contact our customer service at support@example.com or call 123-456-7890."
        );
    }

    #[test]
    fn explain_agrees_with_match_and_rank() {
        let matcher = FaqMatcher::new(KnowledgeBase::reference(), MatcherConfig::default());
        let query = "How do I track my order?";

        let (outcome, ranked) = matcher.explain(query, 3);
        assert_eq!(outcome, matcher.match_query(query));
        assert_eq!(ranked, matcher.rank(query, 3));
        assert_eq!(matcher.answer_for(&outcome), matcher.answer(query));
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].question, "How do I track my shipment?");
    }

    #[test]
    fn exposes_fitted_state() {
        let matcher = FaqMatcher::new(KnowledgeBase::reference(), MatcherConfig::default());
        assert_eq!(matcher.knowledge_base(), &KnowledgeBase::reference());
        assert_eq!(matcher.vectorizer().document_count(), 9);
        assert!(matcher.vectorizer().vocabulary_size() > 0);
    }

    #[test]
    fn outcome_reports_best_score() {
        let matcher = FaqMatcher::new(KnowledgeBase::reference(), MatcherConfig::default());
        let outcome = matcher.match_query("zzz qqq");
        assert_eq!(outcome.best_score(), Some(0.0));
        assert!(!outcome.is_match());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn config_fields_default_when_missing() {
        let config: MatcherConfig =
            serde_json::from_str(r#"{"threshold": 0.5}"#).expect("valid JSON should deserialize");
        assert!((config.threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.fallback, FALLBACK_ANSWER);
    }
}

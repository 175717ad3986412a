//! Immutable catalog of canned question/answer pairs.
//!
//! A [`KnowledgeBase`] is an ordered list of named categories. Every category
//! holds parallel question and answer sequences whose lengths are checked
//! when the knowledge base is built, so matching code can index them without
//! further checks.

mod reference;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::KnowledgeBaseError;

/// Questions and answers of one category, paired by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    questions: Vec<String>,
    answers: Vec<String>,
}

impl CategoryEntry {
    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Iterate over `(question, answer)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.questions
            .iter()
            .map(String::as_str)
            .zip(self.answers.iter().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Ordered, validated set of categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    categories: Vec<(String, CategoryEntry)>,
}

impl KnowledgeBase {
    /// A knowledge base with no categories. Every query against it falls back.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// The built-in e-commerce catalog: store policies, orders and products.
    #[must_use]
    pub fn reference() -> Self {
        reference::build()
    }

    /// Build from `(name, questions, answers)` triples, keeping their order.
    pub fn from_categories<I, N>(categories: I) -> Result<Self, KnowledgeBaseError>
    where
        I: IntoIterator<Item = (N, Vec<String>, Vec<String>)>,
        N: Into<String>,
    {
        categories
            .into_iter()
            .try_fold(Self::builder(), |builder, (name, questions, answers)| {
                builder.category(name, questions, answers)
            })
            .map(KnowledgeBaseBuilder::build)
    }

    /// Fail with [`KnowledgeBaseError::Empty`] if there is nothing to match against.
    pub fn ensure_not_empty(&self) -> Result<(), KnowledgeBaseError> {
        if self.question_count() == 0 {
            return Err(KnowledgeBaseError::Empty);
        }
        Ok(())
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryEntry)> {
        self.categories
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, entry)| entry)
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|(_, entry)| entry.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Concatenate every category in order into parallel global sequences.
    #[must_use]
    pub fn flatten(&self) -> FlattenedCorpus {
        let total = self.question_count();
        let mut corpus = FlattenedCorpus {
            questions: Vec::with_capacity(total),
            answers: Vec::with_capacity(total),
            categories: Vec::with_capacity(total),
        };

        for (name, entry) in &self.categories {
            for (question, answer) in entry.pairs() {
                corpus.questions.push(question.to_string());
                corpus.answers.push(answer.to_string());
                corpus.categories.push(name.clone());
            }
        }

        corpus
    }
}

/// Accumulates categories and checks them as they are added.
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    categories: Vec<(String, CategoryEntry)>,
}

impl KnowledgeBaseBuilder {
    pub fn category(
        mut self,
        name: impl Into<String>,
        questions: Vec<String>,
        answers: Vec<String>,
    ) -> Result<Self, KnowledgeBaseError> {
        let name = name.into();

        if questions.len() != answers.len() {
            return Err(KnowledgeBaseError::LengthMismatch {
                category: name,
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        if self.categories.iter().any(|(existing, _)| *existing == name) {
            return Err(KnowledgeBaseError::DuplicateCategory(name));
        }

        self.categories
            .push((name, CategoryEntry { questions, answers }));
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> KnowledgeBase {
        KnowledgeBase {
            categories: self.categories,
        }
    }
}

/// All questions and answers of a knowledge base as parallel sequences.
///
/// `questions[i]`, `answers[i]` and `categories[i]` describe the same pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedCorpus {
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub categories: Vec<String>,
}

impl FlattenedCorpus {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Serialize for KnowledgeBase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, entry) in &self.categories {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct RawCategory {
    #[serde(default)]
    questions: Vec<String>,
    #[serde(default)]
    answers: Vec<String>,
}

struct KnowledgeBaseVisitor;

impl<'de> Visitor<'de> for KnowledgeBaseVisitor {
    type Value = KnowledgeBase;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category name to {questions, answers}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut builder = KnowledgeBase::builder();
        while let Some((name, raw)) = access.next_entry::<String, RawCategory>()? {
            builder = builder
                .category(name, raw.questions, raw.answers)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(builder.build())
    }
}

impl<'de> Deserialize<'de> for KnowledgeBase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KnowledgeBaseVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn flatten_preserves_category_then_entry_order() {
        let kb = KnowledgeBase::from_categories([
            ("b", strings(&["q1", "q2"]), strings(&["a1", "a2"])),
            ("a", strings(&["q3"]), strings(&["a3"])),
        ])
        .expect("valid knowledge base");

        let corpus = kb.flatten();
        assert_eq!(corpus.questions, strings(&["q1", "q2", "q3"]));
        assert_eq!(corpus.answers, strings(&["a1", "a2", "a3"]));
        assert_eq!(corpus.categories, strings(&["b", "b", "a"]));
        assert_eq!(corpus.len(), kb.question_count());
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test asserts on the error value")]
    fn mismatched_lengths_are_rejected() {
        let err = KnowledgeBase::from_categories([(
            "orders",
            strings(&["q1", "q2"]),
            strings(&["a1"]),
        )])
        .unwrap_err();

        assert_eq!(
            err,
            KnowledgeBaseError::LengthMismatch {
                category: "orders".to_string(),
                questions: 2,
                answers: 1,
            }
        );
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test asserts on the error value")]
    fn duplicate_categories_are_rejected() {
        let err = KnowledgeBase::from_categories([
            ("general", strings(&["q"]), strings(&["a"])),
            ("general", strings(&["q"]), strings(&["a"])),
        ])
        .unwrap_err();
        assert_eq!(err, KnowledgeBaseError::DuplicateCategory("general".into()));
    }

    #[test]
    fn empty_knowledge_base_is_flagged_on_demand() {
        let kb = KnowledgeBase::empty();
        assert!(kb.flatten().is_empty());
        assert_eq!(kb.ensure_not_empty(), Err(KnowledgeBaseError::Empty));
        assert!(KnowledgeBase::reference().ensure_not_empty().is_ok());
    }

    #[test]
    fn reference_catalog_shape() {
        let kb = KnowledgeBase::reference();
        let names: Vec<&str> = kb.categories().map(|(name, _)| name).collect();
        assert_eq!(names, ["general", "orders", "products"]);
        assert!(kb.categories().all(|(_, entry)| entry.len() == 3));
        assert_eq!(kb.question_count(), 9);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn json_preserves_document_order() {
        let json = r#"{
            "zeta": {"questions": ["z?"], "answers": ["z!"]},
            "alpha": {"questions": ["a?"], "answers": ["a!"]}
        }"#;
        let kb: KnowledgeBase = serde_json::from_str(json).expect("valid JSON should deserialize");
        let names: Vec<&str> = kb.categories().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha"]);

        let back = serde_json::to_string(&kb).expect("knowledge base should serialize");
        let again: KnowledgeBase = serde_json::from_str(&back).expect("round trip should parse");
        assert_eq!(kb, again);
    }

    #[test]
    #[expect(clippy::unwrap_used, reason = "Test asserts on the error value")]
    fn json_runs_validation() {
        let json = r#"{"orders": {"questions": ["q1", "q2"], "answers": ["a1"]}}"#;
        let err = serde_json::from_str::<KnowledgeBase>(json).unwrap_err();
        assert!(err.to_string().contains("2 questions but 1 answers"));
    }
}

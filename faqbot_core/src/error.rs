use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(#[from] KnowledgeBaseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation failures raised while building a [`crate::KnowledgeBase`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KnowledgeBaseError {
    #[error("Knowledge base has no questions")]
    Empty,

    #[error(
        "Category '{category}' has {questions} questions but {answers} answers"
    )]
    LengthMismatch {
        category: String,
        questions: usize,
        answers: usize,
    },

    #[error("Category '{0}' is defined more than once")]
    DuplicateCategory(String),
}

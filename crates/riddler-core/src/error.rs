//! Error types surfaced to the UI layer.
//!
//! Scoring never fails: problems inside the similarity computation degrade
//! to a numeric default. Only pool selection, submission and upload have
//! outcomes that the user needs to see, and those are classified here so a
//! front end can pick between a warning and an informational notice without
//! string matching.

use thiserror::Error;

/// Rejected upload form. The pool is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("answer must not be empty")]
    EmptyAnswer,

    #[error("category must not be empty")]
    EmptyCategory,
}

/// Why a draw produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The selected category has no records at all. Draw state is unchanged.
    #[error("category '{0}' has no riddles")]
    EmptyCategory(String),

    /// Every record in the selection has been drawn this cycle. The drawn
    /// set has been cleared, so the next draw starts a fresh cycle.
    #[error("all riddles in '{0}' have been used")]
    Exhausted(String),
}

impl DrawError {
    /// Returns `true` if this outcome is informational rather than a warning.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, DrawError::Exhausted(_))
    }
}

/// Why an answer could not be judged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no riddle is currently shown")]
    NoPrompt,

    #[error("answer must not be empty")]
    EmptyAnswer,
}

/// Failure of the upload path.
#[derive(Debug, Error)]
pub enum AddRecordError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The pool could not be written. The in-memory pool was rolled back.
    #[error("failed to save riddle pool: {0:#}")]
    Persist(anyhow::Error),
}

//! Core data model types for riddler.
//!
//! A riddle pool is a flat list of [`Record`]s. Categories are plain labels
//! carried on each record; there is no separate category table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Label given to records that have no category.
pub const UNCATEGORIZED: &str = "未分类";

/// Label of the "no filter" selection. Never stored on a record.
pub const MIXED: &str = "混合";

/// A single riddle: question, reference answer, and the explanation shown
/// after judging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique positive identifier within the pool.
    pub id: u32,
    /// The riddle text shown to the player.
    pub question: String,
    /// Reference answer that candidate answers are scored against.
    pub answer: String,
    /// Punchline or explanation revealed after an answer is judged.
    pub explanation: String,
    /// Category label. Never empty.
    pub category: String,
}

/// An upload form, as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub question: String,
    pub answer: String,
    pub explanation: String,
    /// `None` files the record under [`UNCATEGORIZED`].
    pub category: Option<String>,
}

impl NewRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Default::default()
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Trim every field and check the required ones, producing the record
    /// that would be stored under `id`.
    pub fn into_record(self, id: u32) -> Result<Record, ValidationError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        let answer = self.answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer);
        }
        let category = match &self.category {
            Some(label) => {
                let label = label.trim();
                if label.is_empty() {
                    return Err(ValidationError::EmptyCategory);
                }
                label.to_string()
            }
            None => UNCATEGORIZED.to_string(),
        };

        Ok(Record {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            explanation: self.explanation.trim().to_string(),
            category,
        })
    }
}

/// Which part of the pool draws come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategorySelection {
    /// The whole pool.
    #[default]
    Mixed,
    /// Only records whose category equals this label.
    Category(String),
}

impl CategorySelection {
    /// Returns `true` if `record` belongs to this selection.
    pub fn admits(&self, record: &Record) -> bool {
        match self {
            CategorySelection::Mixed => true,
            CategorySelection::Category(label) => record.category == *label,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategorySelection::Mixed => MIXED,
            CategorySelection::Category(label) => label,
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategorySelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == MIXED || s.eq_ignore_ascii_case("mixed") {
            Ok(CategorySelection::Mixed)
        } else {
            Ok(CategorySelection::Category(s.to_string()))
        }
    }
}

//! Verdict threshold and the report shown after an answer is judged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Record;

/// Default pass threshold. A score must be strictly greater to pass.
pub const DEFAULT_THRESHOLD: f64 = 0.30;

/// Binary judgement of a candidate answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct!"),
            Verdict::Incorrect => write!(f, "Incorrect"),
        }
    }
}

/// Turns a continuous similarity score into a [`Verdict`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictPolicy {
    pub threshold: f64,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl VerdictPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn judge(&self, score: f64) -> Verdict {
        if score > self.threshold {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    /// Judge `score` for `record` and assemble the full report.
    pub fn report(&self, record: &Record, score: f64) -> JudgeReport {
        JudgeReport {
            record_id: record.id,
            verdict: self.judge(score),
            score,
            answer: record.answer.clone(),
            explanation: record.explanation.clone(),
        }
    }
}

/// Judge with the default threshold.
pub fn judge(score: f64) -> Verdict {
    VerdictPolicy::default().judge(score)
}

/// Render a score as a percentage with two fraction digits: `0.4567` → `45.67%`.
pub fn format_percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Everything the UI shows after judging an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeReport {
    pub record_id: u32,
    pub verdict: Verdict,
    pub score: f64,
    /// The reference answer.
    pub answer: String,
    pub explanation: String,
}

impl fmt::Display for JudgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.verdict)?;
        writeln!(f)?;
        writeln!(f, "Answer: {}", self.answer)?;
        writeln!(f)?;
        writeln!(f, "Explanation: {}", self.explanation)?;
        writeln!(f)?;
        write!(f, "Similarity: {}", format_percent(self.score))
    }
}

//! riddler-core: answer-judging engine and riddle pool.
//!
//! This crate holds everything the quiz needs besides the user interface:
//! text segmentation, the hybrid lexical + TF-IDF similarity score, the
//! verdict threshold, the riddle pool with its no-repeat draw policy, and
//! JSON persistence of the pool.

pub mod config;
pub mod error;
pub mod model;
pub mod pool;
pub mod session;
pub mod similarity;
pub mod store;
pub mod tokenizer;
pub mod verdict;

pub use error::{AddRecordError, DrawError, SubmitError, ValidationError};
pub use model::{CategorySelection, NewRecord, Record};
pub use session::QuizSession;
pub use similarity::{Scorer, SimilarityWeights};
pub use verdict::{JudgeReport, Verdict, VerdictPolicy};

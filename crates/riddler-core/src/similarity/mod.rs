//! Hybrid lexical + semantic answer similarity.
//!
//! The score blends two views of the same pair of strings:
//!
//! - **lexical**: shared unique tokens divided by the size of the larger
//!   token set, so one exact keyword in a two-token answer counts for half;
//! - **semantic**: cosine similarity of TF-IDF vectors fitted on just the
//!   two answers.
//!
//! `combined = lexical_weight * lexical + semantic_weight * semantic`.

mod tfidf;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::tokenizer::{token_set, JiebaSegmenter, Segmenter};

/// Default weight of exact keyword overlap.
pub const DEFAULT_LEXICAL_WEIGHT: f64 = 0.7;
/// Default weight of the TF-IDF cosine term.
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.3;

/// Blend weights. The defaults favour keyword overlap: riddle answers are
/// short, synonyms are rare but paraphrases are common.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub lexical: f64,
    pub semantic: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            lexical: DEFAULT_LEXICAL_WEIGHT,
            semantic: DEFAULT_SEMANTIC_WEIGHT,
        }
    }
}

/// The individual terms of one score computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    pub lexical: f64,
    pub semantic: f64,
    pub combined: f64,
}

impl SimilarityBreakdown {
    const ZERO: Self = Self {
        lexical: 0.0,
        semantic: 0.0,
        combined: 0.0,
    };
}

/// Scores a candidate answer against a reference answer.
#[derive(Clone)]
pub struct Scorer {
    segmenter: Arc<dyn Segmenter>,
    weights: SimilarityWeights,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            segmenter: Arc::new(JiebaSegmenter),
            weights: SimilarityWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn weights(&self) -> SimilarityWeights {
        self.weights
    }

    /// Blended similarity of `candidate` to `reference`.
    ///
    /// Returns 0.0 when either string has no tokens.
    pub fn score(&self, candidate: &str, reference: &str) -> f64 {
        self.breakdown(candidate, reference).combined
    }

    /// Like [`Scorer::score`], but keeps the lexical and semantic terms.
    pub fn breakdown(&self, candidate: &str, reference: &str) -> SimilarityBreakdown {
        let candidate_set = token_set(self.segmenter.as_ref(), candidate);
        let reference_set = token_set(self.segmenter.as_ref(), reference);

        if candidate_set.is_empty() || reference_set.is_empty() {
            return SimilarityBreakdown::ZERO;
        }

        let common = candidate_set.intersection(&reference_set).count();
        let lexical = common as f64 / candidate_set.len().max(reference_set.len()) as f64;

        let candidate_doc: Vec<String> = candidate_set.into_iter().collect();
        let reference_doc: Vec<String> = reference_set.into_iter().collect();
        let semantic = match tfidf::pairwise_similarity(&candidate_doc, &reference_doc) {
            Ok(sim) => sim,
            Err(e) => {
                tracing::debug!("semantic term unavailable ({e}), using 0.0");
                0.0
            }
        };

        let combined = self.weights.lexical * lexical + self.weights.semantic * semantic;
        tracing::debug!(lexical, semantic, combined, "scored answer");

        SimilarityBreakdown {
            lexical,
            semantic,
            combined,
        }
    }
}

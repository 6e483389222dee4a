//! Minimal TF-IDF vectorizer over pre-segmented documents.
//!
//! Weights follow the common smoothed formulation:
//!
//! idf(t) = ln((1 + n) / (1 + df(t))) + 1
//!
//! where n is the number of fitted documents and df(t) the number of
//! documents containing t. A term's weight in a document is its raw count
//! times its idf.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum VectorizeError {
    #[error("empty vocabulary")]
    EmptyVocabulary,

    #[error("document vector has zero norm")]
    ZeroNorm,
}

/// Vocabulary and idf weights learned from a set of documents.
#[derive(Debug, Clone)]
pub(crate) struct TfIdfModel {
    /// Term → column index. Ordered so vectors are laid out identically
    /// regardless of document order.
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfModel {
    pub(crate) fn fit(documents: &[&[String]]) -> Result<Self, VectorizeError> {
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in documents {
            let mut seen: Vec<&str> = doc.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        if df.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (index, (term, count)) in df.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Weighted term vector for `document`. Terms outside the vocabulary are
    /// ignored.
    pub(crate) fn transform(&self, document: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.idf.len()];
        for term in document {
            if let Some(&index) = self.vocabulary.get(term) {
                vector[index] += self.idf[index];
            }
        }
        vector
    }
}

pub(crate) fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, VectorizeError> {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(VectorizeError::ZeroNorm);
    }

    Ok((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// Fit a model on the two documents and return the cosine similarity of
/// their weighted vectors.
pub(crate) fn pairwise_similarity(a: &[String], b: &[String]) -> Result<f64, VectorizeError> {
    let model = TfIdfModel::fit(&[a, b])?;
    cosine_similarity(&model.transform(a), &model.transform(b))
}

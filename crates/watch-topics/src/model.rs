//! Topic model contract.
//!
//! A topic model fits a whole corpus in one blocking batch call and returns
//! the topic-keyword mapping plus a document-topic distribution matrix.

use serde::{Deserialize, Serialize};

use crate::error::TopicsError;

/// Tolerance used when checking that a distribution row sums to one.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Trait for batch topic models.
///
/// Implementations may keep internal state between calls, so a model is
/// owned by exactly one classifier.
pub trait TopicModel: Send {
    /// Number of topics K this model produces.
    fn num_topics(&self) -> usize;

    /// Fit the model on `documents` and return their topic assignment.
    fn fit_transform(&mut self, documents: &[&str]) -> Result<TopicFit, TopicsError>;
}

/// Output of one model fit.
#[derive(Debug, Clone)]
pub struct TopicFit {
    /// Representative words per topic, best first (length K)
    pub topic_words: Vec<Vec<String>>,
    /// Word weights per topic, best first (length K), for visualization
    pub topic_weights: Vec<Vec<(String, f64)>>,
    /// N×K document-topic distribution
    pub doc_topics: TopicDistribution,
}

/// Row-stochastic N×K document-topic matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDistribution {
    rows: Vec<Vec<f64>>,
    num_topics: usize,
}

impl TopicDistribution {
    /// Build a distribution, checking every row.
    ///
    /// Rows must have exactly `num_topics` finite, non-negative entries
    /// summing to 1 within [`ROW_SUM_TOLERANCE`].
    pub fn new(rows: Vec<Vec<f64>>, num_topics: usize) -> Result<Self, TopicsError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != num_topics {
                return Err(TopicsError::InvalidDistribution(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    num_topics
                )));
            }
            if row.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(TopicsError::InvalidDistribution(format!(
                    "row {} has negative or non-finite entries",
                    i
                )));
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(TopicsError::InvalidDistribution(format!(
                    "row {} sums to {}",
                    i, sum
                )));
            }
        }
        Ok(Self { rows, num_topics })
    }

    pub fn num_documents(&self) -> usize {
        self.rows.len()
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, document: usize) -> Option<&[f64]> {
        self.rows.get(document).map(Vec::as_slice)
    }

    /// Index of the largest entry in a row; ties go to the lowest index.
    pub fn dominant_topic(&self, document: usize) -> Option<usize> {
        self.row(document).and_then(argmax)
    }

    /// Dominant topic of every document, in order.
    pub fn dominant_topics(&self) -> Vec<usize> {
        self.rows
            .iter()
            .map(|row| argmax(row).unwrap_or(0))
            .collect()
    }
}

/// First index holding the maximum value.
fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

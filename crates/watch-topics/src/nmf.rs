//! Non-negative matrix factorization topic model.
//!
//! The TF-IDF matrix V (N documents × M terms) is approximated as W·H with
//! W (N×K) and H (K×M) non-negative, using Lee–Seung multiplicative updates
//! on the Frobenius loss. Rows of H rank the vocabulary per topic; rows of W,
//! normalized to sum to one, give each document's topic distribution.
//!
//! V stays sparse; only the factors are dense, so memory is O((N + M)·K).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::TopicsConfig;
use crate::error::TopicsError;
use crate::model::{TopicDistribution, TopicFit, TopicModel};
use crate::tfidf::{SparseVector, TfIdf};

/// Guards divisions in the update rules.
const EPSILON: f64 = 1e-10;

type Matrix = Vec<Vec<f64>>;

/// Topic model backed by NMF over TF-IDF title vectors.
pub struct NmfTopicModel {
    config: TopicsConfig,
}

impl NmfTopicModel {
    /// Create a model, validating the configuration.
    pub fn new(config: TopicsConfig) -> Result<Self, TopicsError> {
        config.validate().map_err(TopicsError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TopicsConfig {
        &self.config
    }
}

impl TopicModel for NmfTopicModel {
    fn num_topics(&self) -> usize {
        self.config.num_topics
    }

    fn fit_transform(&mut self, documents: &[&str]) -> Result<TopicFit, TopicsError> {
        let k = self.config.num_topics;
        let tfidf = TfIdf::fit(documents);
        if tfidf.term_count() == 0 {
            return Err(TopicsError::EmptyVocabulary);
        }

        let v: Vec<SparseVector> = documents.iter().map(|d| tfidf.transform(d)).collect();
        let factors = factorize(&v, tfidf.term_count(), &self.config);
        info!(
            documents = documents.len(),
            terms = tfidf.term_count(),
            num_topics = k,
            iterations = factors.iterations,
            loss = factors.loss,
            "Fitted topic model"
        );

        let keep = self.config.top_words.max(self.config.visualization_top_n);
        let topic_weights: Vec<Vec<(String, f64)>> = factors
            .h
            .iter()
            .map(|row| ranked_terms(row, tfidf.vocabulary(), keep))
            .collect();
        let topic_words = topic_weights
            .iter()
            .map(|weights| {
                weights
                    .iter()
                    .take(self.config.top_words)
                    .map(|(word, _)| word.clone())
                    .collect()
            })
            .collect();

        let rows = factors.w.iter().map(|row| normalize_row(row)).collect();
        let doc_topics = TopicDistribution::new(rows, k)?;

        Ok(TopicFit {
            topic_words,
            topic_weights,
            doc_topics,
        })
    }
}

struct Factors {
    w: Matrix,
    h: Matrix,
    iterations: usize,
    loss: f64,
}

/// Run multiplicative updates until the relative loss change falls below
/// the tolerance or the iteration cap is hit.
fn factorize(v: &[SparseVector], m: usize, config: &TopicsConfig) -> Factors {
    let n = v.len();
    let k = config.num_topics;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let total: f64 = v.iter().flatten().map(|(_, x)| x).sum();
    let scale = (total / (n * m) as f64 / k as f64).sqrt().max(EPSILON);
    let mut random_matrix = |rows: usize, cols: usize| -> Matrix {
        (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| scale * (rng.random::<f64>() + 0.01))
                    .collect()
            })
            .collect()
    };
    let mut w = random_matrix(n, k);
    let mut h = random_matrix(k, m);

    let v_norm_sq: f64 = v.iter().flatten().map(|(_, x)| x * x).sum();
    let mut previous = f64::INFINITY;
    let mut loss = f64::INFINITY;
    let mut iterations = 0;

    for round in 0..config.max_iterations {
        iterations = round + 1;

        // H <- H * (W^T V) / (W^T W H)
        let wtv = transpose_times_sparse(&w, v, k, m);
        let wtwh = multiply(&gram_of_columns(&w, k), &h);
        for (h_row, (num_row, den_row)) in h.iter_mut().zip(wtv.iter().zip(&wtwh)) {
            for (value, (num, den)) in h_row.iter_mut().zip(num_row.iter().zip(den_row)) {
                *value *= num / (den + EPSILON);
            }
        }

        // W <- W * (V H^T) / (W H H^T)
        let vht = sparse_times_transpose(v, &h, k);
        let hht = gram_of_rows(&h);
        let whht = multiply(&w, &hht);
        for (w_row, (num_row, den_row)) in w.iter_mut().zip(vht.iter().zip(&whht)) {
            for (value, (num, den)) in w_row.iter_mut().zip(num_row.iter().zip(den_row)) {
                *value *= num / (den + EPSILON);
            }
        }

        // ||V - WH||^2 = ||V||^2 - 2 tr(W^T V H^T) + <W^T W, H H^T>
        let cross: f64 = w
            .iter()
            .zip(&vht)
            .flat_map(|(a, b)| a.iter().zip(b).map(|(x, y)| x * y))
            .sum();
        let quad: f64 = gram_of_columns(&w, k)
            .iter()
            .zip(&hht)
            .flat_map(|(a, b)| a.iter().zip(b).map(|(x, y)| x * y))
            .sum();
        loss = (v_norm_sq - 2.0 * cross + quad).max(0.0);

        if previous.is_finite() && (previous - loss).abs() <= config.tolerance * previous.max(EPSILON)
        {
            debug!(round, loss, "Factorization converged");
            break;
        }
        previous = loss;
    }

    Factors {
        w,
        h,
        iterations,
        loss,
    }
}

/// W^T V as a dense K×M matrix.
fn transpose_times_sparse(w: &Matrix, v: &[SparseVector], k: usize, m: usize) -> Matrix {
    let mut out = vec![vec![0.0; m]; k];
    for (w_row, v_row) in w.iter().zip(v) {
        for &(j, x) in v_row {
            for (a, out_row) in out.iter_mut().enumerate() {
                out_row[j] += w_row[a] * x;
            }
        }
    }
    out
}

/// V H^T as a dense N×K matrix.
fn sparse_times_transpose(v: &[SparseVector], h: &Matrix, k: usize) -> Matrix {
    v.iter()
        .map(|v_row| {
            (0..k)
                .map(|a| v_row.iter().map(|&(j, x)| x * h[a][j]).sum())
                .collect()
        })
        .collect()
}

/// W^T W (K×K) for an N×K matrix.
fn gram_of_columns(w: &Matrix, k: usize) -> Matrix {
    let mut out = vec![vec![0.0; k]; k];
    for row in w {
        for a in 0..k {
            for b in 0..k {
                out[a][b] += row[a] * row[b];
            }
        }
    }
    out
}

/// H H^T (K×K) for a K×M matrix.
fn gram_of_rows(h: &Matrix) -> Matrix {
    h.iter()
        .map(|a| h.iter().map(|b| dot(a, b)).collect())
        .collect()
}

/// Dense product of an R×K and a K×C matrix.
fn multiply(left: &Matrix, right: &Matrix) -> Matrix {
    let cols = right.first().map_or(0, Vec::len);
    left.iter()
        .map(|l_row| {
            let mut out = vec![0.0; cols];
            for (x, r_row) in l_row.iter().zip(right) {
                for (o, y) in out.iter_mut().zip(r_row) {
                    *o += x * y;
                }
            }
            out
        })
        .collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Scale a row to sum to one; an all-zero row becomes uniform.
fn normalize_row(row: &[f64]) -> Vec<f64> {
    let sum: f64 = row.iter().sum();
    if sum > EPSILON && sum.is_finite() {
        row.iter().map(|x| x / sum).collect()
    } else {
        vec![1.0 / row.len() as f64; row.len()]
    }
}

/// Vocabulary terms with positive weight, heaviest first.
///
/// Equal weights keep vocabulary (alphabetical) order.
fn ranked_terms(weights: &[f64], vocabulary: &[String], keep: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(usize, f64)> = weights
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, w)| *w > EPSILON)
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(keep)
        .map(|(i, w)| (vocabulary[i].clone(), w))
        .collect()
}

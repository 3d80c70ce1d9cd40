//! Topic configuration.

use serde::{Deserialize, Serialize};

/// Configuration for topic fitting and labeling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// Number of topics K
    #[serde(default = "default_num_topics")]
    pub num_topics: usize,

    /// Representative words kept per topic
    #[serde(default = "default_top_words")]
    pub top_words: usize,

    /// Upper bound on factorization rounds
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Relative loss change below which fitting stops early
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Seed for factor initialization
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Corpora smaller than this are labeled `Uncategorized` without fitting
    #[serde(default = "default_min_documents")]
    pub min_documents: usize,

    /// Keywords per topic in the visualization
    #[serde(default = "default_visualization_top_n")]
    pub visualization_top_n: usize,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            num_topics: default_num_topics(),
            top_words: default_top_words(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            seed: default_seed(),
            min_documents: default_min_documents(),
            visualization_top_n: default_visualization_top_n(),
        }
    }
}

fn default_num_topics() -> usize {
    20
}
fn default_top_words() -> usize {
    15
}
fn default_max_iterations() -> usize {
    200
}
fn default_tolerance() -> f64 {
    1e-4
}
fn default_seed() -> u64 {
    42
}
fn default_min_documents() -> usize {
    2
}
fn default_visualization_top_n() -> usize {
    20
}

impl TopicsConfig {
    /// Config with a specific topic count and defaults elsewhere.
    pub fn with_num_topics(num_topics: usize) -> Self {
        Self {
            num_topics,
            ..Default::default()
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_topics == 0 {
            return Err("num_topics must be > 0".to_string());
        }
        if self.top_words == 0 {
            return Err("top_words must be > 0".to_string());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        if !(self.tolerance >= 0.0 && self.tolerance.is_finite()) {
            return Err(format!("tolerance must be >= 0, got {}", self.tolerance));
        }
        if self.min_documents < 2 {
            return Err(format!(
                "min_documents must be >= 2, got {}",
                self.min_documents
            ));
        }
        Ok(())
    }
}

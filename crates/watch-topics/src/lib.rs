//! # watch-topics
//!
//! Unsupervised topic categories for watch-history titles.
//!
//! Titles are too short and too numerous to label by hand, so the whole
//! corpus is fitted once with a topic model and each title is assigned its
//! dominant topic. Very small corpora skip fitting and fall back to
//! `Uncategorized`.
//!
//! ## Features
//! - TF-IDF vectorization with English stop words
//! - Non-negative matrix factorization topic model (deterministic seed)
//! - Dominant-topic labeling with a small-corpus fallback
//! - Category assignment back onto a watch history table
//! - Keyword-weight visualization of the most recent fit

pub mod assign;
pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod nmf;
pub mod tfidf;
pub mod visualize;

pub use assign::{assign_categories, category_counts};
pub use classifier::{Classification, TopicClassifier, VideoCategories};
pub use config::TopicsConfig;
pub use error::TopicsError;
pub use model::{TopicDistribution, TopicFit, TopicModel};
pub use nmf::NmfTopicModel;
pub use tfidf::TfIdf;
pub use visualize::{render_topic_weights, VISUALIZATION_FILE, WEIGHTS_FILE};

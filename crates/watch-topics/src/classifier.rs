//! Topic classification of video titles.
//!
//! Wraps a [`TopicModel`] with the small-corpus guard and keeps the most
//! recent fit around for keyword lookup and visualization.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};
use watch_types::CategoryLabel;

use crate::config::TopicsConfig;
use crate::error::TopicsError;
use crate::model::{TopicDistribution, TopicFit, TopicModel};
use crate::nmf::NmfTopicModel;
use crate::visualize::render_topic_weights;

/// Result of classifying a batch of titles.
#[derive(Debug, Clone)]
pub struct Classification {
    /// One label per input title, same order
    pub categories: Vec<CategoryLabel>,
    /// Representative words per topic; empty when the model was not run
    pub topic_keywords: Vec<Vec<String>>,
    /// Document-topic matrix; `None` when the model was not run
    pub distributions: Option<TopicDistribution>,
}

/// Labels and keywords only, as handed to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCategories {
    pub categories: Vec<CategoryLabel>,
    pub topic_keywords: Vec<Vec<String>>,
}

/// Classifies titles into `Topic_k` categories.
pub struct TopicClassifier<M: TopicModel = NmfTopicModel> {
    model: M,
    min_documents: usize,
    last_fit: Option<TopicFit>,
}

impl TopicClassifier<NmfTopicModel> {
    /// Create a classifier backed by NMF.
    pub fn new(config: TopicsConfig) -> Result<Self, TopicsError> {
        let min_documents = config.min_documents;
        let model = NmfTopicModel::new(config)?;
        Ok(Self::with_model(model, min_documents))
    }
}

impl<M: TopicModel> TopicClassifier<M> {
    /// Create a classifier around any topic model.
    ///
    /// `min_documents` is clamped to at least 2.
    pub fn with_model(model: M, min_documents: usize) -> Self {
        Self {
            model,
            min_documents: min_documents.max(2),
            last_fit: None,
        }
    }

    pub fn num_topics(&self) -> usize {
        self.model.num_topics()
    }

    /// Most recent successful fit, if any.
    pub fn last_fit(&self) -> Option<&TopicFit> {
        self.last_fit.as_ref()
    }

    /// Fit the model on `titles` and label each with its dominant topic.
    ///
    /// Fewer than `min_documents` titles skips the model: every title is
    /// `Uncategorized` and the previous fit is kept.
    pub fn classify(&mut self, titles: &[&str]) -> Result<Classification, TopicsError> {
        if titles.len() < self.min_documents {
            warn!(
                titles = titles.len(),
                min_documents = self.min_documents,
                "Not enough titles for topic modeling, labeling all as Uncategorized"
            );
            return Ok(Classification {
                categories: vec![CategoryLabel::Uncategorized; titles.len()],
                topic_keywords: Vec::new(),
                distributions: None,
            });
        }

        let fit = self.model.fit_transform(titles).map_err(|e| {
            error!(error = %e, "Topic model failed");
            e
        })?;

        if fit.doc_topics.num_documents() != titles.len() {
            let e = TopicsError::Model(format!(
                "model returned {} rows for {} titles",
                fit.doc_topics.num_documents(),
                titles.len()
            ));
            error!(error = %e, "Topic model failed");
            return Err(e);
        }

        let categories = fit
            .doc_topics
            .dominant_topics()
            .into_iter()
            .map(CategoryLabel::Topic)
            .collect();

        info!(
            titles = titles.len(),
            num_topics = fit.doc_topics.num_topics(),
            "Classified titles"
        );

        let classification = Classification {
            categories,
            topic_keywords: fit.topic_words.clone(),
            distributions: Some(fit.doc_topics.clone()),
        };
        self.last_fit = Some(fit);
        Ok(classification)
    }

    /// Labels and topic keywords for `titles`.
    pub fn get_video_categories(&mut self, titles: &[&str]) -> Result<VideoCategories, TopicsError> {
        let Classification {
            categories,
            topic_keywords,
            ..
        } = self.classify(titles)?;
        Ok(VideoCategories {
            categories,
            topic_keywords,
        })
    }

    /// Write the visualization of the last fit into `dir`.
    ///
    /// Returns `Ok(None)` when nothing has been fitted yet.
    pub fn render_last_fit(
        &self,
        dir: &Path,
        top_n: usize,
    ) -> Result<Option<PathBuf>, TopicsError> {
        match &self.last_fit {
            Some(fit) => render_topic_weights(&fit.topic_weights, dir, top_n).map(Some),
            None => {
                warn!("No topic model fitted yet, skipping visualization");
                Ok(None)
            }
        }
    }
}

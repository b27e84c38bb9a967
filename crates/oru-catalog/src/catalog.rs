//! The catalog collaborator.

use std::future::Future;

use oru_model::Metric;

use crate::error::Result;

/// Source of reference metrics.
///
/// Implementations return the complete catalog, in catalog order, with each
/// metric's condition, diagnostic and groups resolved. No filtering happens
/// on this side: matching is the analysis' job. Results are not cached by
/// the analysis, so implementations that are expensive to query should cache
/// internally.
pub trait MetricCatalog {
    fn metrics(&self) -> impl Future<Output = Result<Vec<Metric>>> + Send;
}

impl<T: MetricCatalog + Sync> MetricCatalog for &T {
    fn metrics(&self) -> impl Future<Output = Result<Vec<Metric>>> + Send {
        (**self).metrics()
    }
}

/// A fixed catalog held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryCatalog {
    metrics: Vec<Metric>,
}

impl InMemoryCatalog {
    pub fn new(metrics: Vec<Metric>) -> Self {
        Self { metrics }
    }
}

impl From<Vec<Metric>> for InMemoryCatalog {
    fn from(metrics: Vec<Metric>) -> Self {
        Self::new(metrics)
    }
}

impl MetricCatalog for InMemoryCatalog {
    async fn metrics(&self) -> Result<Vec<Metric>> {
        Ok(self.metrics.clone())
    }
}

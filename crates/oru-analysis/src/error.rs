use oru_catalog::CatalogError;
use oru_model::DecodeError;
use thiserror::Error;

/// Failures that abort an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to decode lab report: {0}")]
    Decode(#[from] DecodeError),
    #[error("failed to load metric catalog: {0}")]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#![deny(unsafe_code)]

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod matcher;
pub mod pipeline;

pub use aggregate::{Aggregation, aggregate};
pub use classify::{classify, classify_match};
pub use error::{AnalysisError, Result};
pub use matcher::{MatchOutcome, MatchedResult, match_results, metric_fits};
pub use pipeline::{AnalysisOptions, AnalysisOutcome, analyse, analyse_extraction};

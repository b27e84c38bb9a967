//! CLI library components for lab report analysis.

pub mod logging;
pub mod summary;

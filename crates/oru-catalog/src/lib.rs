#![deny(unsafe_code)]

pub mod catalog;
pub mod csv_catalog;
pub mod error;

pub use crate::catalog::{InMemoryCatalog, MetricCatalog};
pub use crate::csv_catalog::{
    CONDITIONS_FILE, CsvCatalog, METRICS_FILE, default_catalog_dir, parse_catalog,
};
pub use crate::error::{CatalogError, Result};

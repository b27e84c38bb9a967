//! Catalog backed by reference CSV files.
//!
//! A catalog directory holds two files:
//!
//! - `diagnostic_metrics.csv`: one row per metric with its codes, units,
//!   population, reference ranges, diagnostic and diagnostic groups
//! - `conditions.csv`: condition names with the metrics they involve
//!
//! Header names are matched ignoring case and separators, so
//! `oru_sonic_codes`, `oruSonicCodes` and `ORU Sonic Codes` all name the
//! same column.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use oru_model::{Condition, Diagnostic, Group, Metric, MetricGender};
use tracing::{debug, info};

use crate::catalog::MetricCatalog;
use crate::error::{CatalogError, Result};

pub const METRICS_FILE: &str = "diagnostic_metrics.csv";
pub const CONDITIONS_FILE: &str = "conditions.csv";

const CATALOG_ENV_VAR: &str = "ORU_CATALOG_DIR";

/// Sentinel ages meaning "no bound".
const UNBOUNDED_MIN_AGE: &str = "0";
const UNBOUNDED_MAX_AGE: &str = "200";

/// Catalog directory from `ORU_CATALOG_DIR`, or `./catalog`.
pub fn default_catalog_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CATALOG_ENV_VAR) {
        return PathBuf::from(dir);
    }
    PathBuf::from("catalog")
}

/// Reads the catalog files on every request.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    dir: PathBuf,
}

impl CsvCatalog {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn load(&self) -> Result<Vec<Metric>> {
        let metrics_path = self.dir.join(METRICS_FILE);
        let conditions_path = self.dir.join(CONDITIONS_FILE);
        let metrics_csv = tokio::fs::read(&metrics_path)
            .await
            .map_err(|e| CatalogError::io(&metrics_path, e))?;
        let conditions_csv = tokio::fs::read(&conditions_path)
            .await
            .map_err(|e| CatalogError::io(&conditions_path, e))?;

        let metrics = parse_catalog(&metrics_path, &metrics_csv, &conditions_path, &conditions_csv)?;
        info!(
            dir = %self.dir.display(),
            metric_count = metrics.len(),
            "loaded metric catalog"
        );
        Ok(metrics)
    }
}

impl MetricCatalog for CsvCatalog {
    async fn metrics(&self) -> Result<Vec<Metric>> {
        self.load().await
    }
}

/// Parses catalog CSV contents already in memory.
///
/// The paths are only used in error messages.
pub fn parse_catalog(
    metrics_path: &Path,
    metrics_csv: &[u8],
    conditions_path: &Path,
    conditions_csv: &[u8],
) -> Result<Vec<Metric>> {
    let metric_rows = read_csv_rows(metrics_path, metrics_csv)?;
    let condition_rows = read_csv_rows(conditions_path, conditions_csv)?;
    build_catalog(metrics_path, &metric_rows, conditions_path, &condition_rows)
}

/// A data row with its 1-based line number in the file.
type CsvRow = (usize, BTreeMap<String, String>);

fn read_csv_rows(path: &Path, contents: &[u8]) -> Result<Vec<CsvRow>> {
    let csv_error = |e: csv::Error| CatalogError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(contents);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let keys: Vec<String> = headers.iter().map(column_key).collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let mut row = BTreeMap::new();
        for (key, value) in keys.iter().zip(record.iter()) {
            row.insert(key.clone(), value.trim().to_string());
        }
        // Line 1 is the header.
        rows.push((idx + 2, row));
    }
    Ok(rows)
}

/// Normalizes a header: no BOM, lower case, letters and digits only.
fn column_key(header: &str) -> String {
    header
        .trim_matches('\u{feff}')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

struct RowReader<'a> {
    path: &'a Path,
    line: usize,
    row: &'a BTreeMap<String, String>,
}

impl RowReader<'_> {
    fn get(&self, column: &str) -> Result<&str> {
        self.row
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| self.invalid(format!("missing column {column}")))
    }

    fn invalid(&self, message: impl Into<String>) -> CatalogError {
        CatalogError::invalid_row(self.path, self.line, message)
    }

    fn list(&self, column: &str, delimiter: char) -> Result<Vec<String>> {
        Ok(split_list(self.get(column)?, delimiter))
    }

    fn age(&self, column: &str, unbounded: &str) -> Result<Option<u32>> {
        let raw = self.get(column)?;
        if raw.is_empty() || raw == unbounded {
            return Ok(None);
        }
        raw.parse::<u32>()
            .map(Some)
            .map_err(|_| self.invalid(format!("invalid {column}: {raw:?}")))
    }

    /// Reference limit; unparseable values and zero mean "not set".
    fn limit(&self, column: &str) -> Result<Option<f64>> {
        let raw = self.get(column)?;
        Ok(raw
            .parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan() && *value != 0.0))
    }
}

fn split_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

struct ConditionRow {
    name: String,
    metric_names: Vec<String>,
}

struct MetricRow {
    metric: Metric,
    diagnostic: Option<String>,
}

fn build_catalog(
    metrics_path: &Path,
    metric_rows: &[CsvRow],
    conditions_path: &Path,
    condition_rows: &[CsvRow],
) -> Result<Vec<Metric>> {
    let conditions = condition_rows
        .iter()
        .map(|(line, row)| {
            let reader = RowReader {
                path: conditions_path,
                line: *line,
                row,
            };
            Ok(ConditionRow {
                name: reader.get("name")?.to_string(),
                metric_names: reader.list("diagnosticmetrics", ',')?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // A diagnostic collects the groups of every row naming it.
    let mut diagnostic_groups: BTreeMap<String, Vec<Group>> = BTreeMap::new();
    let mut parsed = Vec::with_capacity(metric_rows.len());
    for (line, row) in metric_rows {
        let reader = RowReader {
            path: metrics_path,
            line: *line,
            row,
        };
        let parsed_row = parse_metric_row(&reader, &conditions)?;
        if let Some(diagnostic) = &parsed_row.diagnostic {
            let groups = diagnostic_groups.entry(diagnostic.clone()).or_default();
            for group in reader.list("diagnosticgroups", ',')? {
                if !groups.iter().any(|g| g.name == group) {
                    groups.push(Group { name: group });
                }
            }
        }
        parsed.push(parsed_row);
    }

    let mut seen = BTreeSet::new();
    let mut metrics = Vec::with_capacity(parsed.len());
    for MetricRow {
        mut metric,
        diagnostic,
    } in parsed
    {
        let key = (
            metric.name.clone(),
            metric.oru_sonic_codes.clone(),
            metric.oru_sonic_units.clone(),
        );
        if !seen.insert(key) {
            debug!(metric = %metric.name, "ignoring duplicate metric row");
            continue;
        }
        metric.diagnostic = diagnostic.map(|name| Diagnostic {
            groups: diagnostic_groups.get(&name).cloned().unwrap_or_default(),
            name,
        });
        metrics.push(metric);
    }
    Ok(metrics)
}

fn parse_metric_row(reader: &RowReader<'_>, conditions: &[ConditionRow]) -> Result<MetricRow> {
    let name = reader.get("name")?.to_string();
    let gender_raw = reader.get("gender")?;
    let gender = gender_raw
        .parse::<MetricGender>()
        .map_err(|e| reader.invalid(e))?;
    let diagnostic = Some(reader.get("diagnostic")?)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    let condition = conditions
        .iter()
        .find(|c| c.metric_names.contains(&name))
        .map(|c| Condition {
            name: c.name.clone(),
        });

    let metric = Metric {
        oru_sonic_codes: reader.list("orusoniccodes", ';')?,
        oru_sonic_units: reader.list("orusonicunits", ';')?,
        units: reader.list("units", ';')?,
        min_age: reader.age("minage", UNBOUNDED_MIN_AGE)?,
        max_age: reader.age("maxage", UNBOUNDED_MAX_AGE)?,
        gender,
        standard_lower: reader.limit("standardlower")?,
        standard_higher: reader.limit("standardhigher")?,
        everlab_lower: reader.limit("everlablower")?,
        everlab_higher: reader.limit("everlabhigher")?,
        condition,
        diagnostic: None,
        name,
    };
    Ok(MetricRow { metric, diagnostic })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_keys_ignore_case_and_separators() {
        assert_eq!(column_key("\u{feff}name"), "name");
        assert_eq!(column_key("oru_sonic_codes"), "orusoniccodes");
        assert_eq!(column_key("oruSonicCodes"), "orusoniccodes");
        assert_eq!(column_key("ORU Sonic Codes"), "orusoniccodes");
    }

    #[test]
    fn split_list_trims_and_drops_empty_items() {
        assert_eq!(split_list(" GLU ; GLUC;;", ';'), vec!["GLU", "GLUC"]);
        assert!(split_list("", ';').is_empty());
    }
}

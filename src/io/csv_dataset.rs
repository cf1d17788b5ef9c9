//! Delimited dataset reader.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use ndarray::{Array1, Array2};

use crate::data::Dataset;

/// Configuration for reading delimited dataset files.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Column name holding the target values.
    pub target_column: String,
    /// Optional list of feature columns to load (in order).
    /// When `None`, all non-target columns are treated as features.
    pub feature_columns: Option<Vec<String>>,
    /// Columns to ignore when auto-selecting features.
    pub ignore_columns: Vec<String>,
    /// Field delimiter, comma by default.
    pub delimiter: u8,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            target_column: "target".to_string(),
            feature_columns: None,
            ignore_columns: vec!["id".to_string(), "index".to_string()],
            delimiter: b',',
        }
    }
}

/// Read a delimited file into a `Dataset` using the default configuration.
pub fn read_csv_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_csv_dataset_with_config(path, &CsvReaderConfig::default())
}

/// Read a delimited file into a `Dataset` using a custom configuration.
pub fn read_csv_dataset_with_config<P: AsRef<Path>>(
    path: P,
    config: &CsvReaderConfig,
) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset file: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read dataset header row")?
        .clone();

    let target_idx = find_column(&headers, &config.target_column)
        .ok_or_else(|| anyhow!("Missing target column '{}'", config.target_column))?;

    let feature_indices = resolve_feature_indices(&headers, config, target_idx)?;
    if feature_indices.is_empty() {
        return Err(anyhow!("No feature columns detected in header"));
    }

    let mut features = Vec::new();
    let mut targets = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let target = record
            .get(target_idx)
            .ok_or_else(|| anyhow!("Missing target value at row {}", row_idx + 1))?
            .parse::<f64>()
            .with_context(|| format!("Invalid target at row {}", row_idx + 1))?;
        targets.push(target);

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.parse::<f64>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }
    }

    let n_samples = targets.len();
    let n_features = feature_indices.len();
    let x = Array2::from_shape_vec((n_samples, n_features), features)
        .context("Failed to build feature matrix")?;
    let y = Array1::from_vec(targets);

    let feature_names = feature_indices
        .iter()
        .map(|&idx| headers.get(idx).unwrap_or("").to_string())
        .collect();

    Dataset::new(x, y, feature_names, config.target_column.clone())
        .map_err(|e| anyhow!("Inconsistent dataset shapes: {}", e))
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

fn resolve_feature_indices(
    headers: &StringRecord,
    config: &CsvReaderConfig,
    target_idx: usize,
) -> Result<Vec<usize>> {
    if let Some(names) = &config.feature_columns {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = find_column(headers, name)
                .ok_or_else(|| anyhow!("Missing feature column '{}'", name))?;
            indices.push(idx);
        }
        return Ok(indices);
    }

    let mut ignore = HashSet::new();
    for name in &config.ignore_columns {
        ignore.insert(name.to_ascii_lowercase());
    }

    let mut indices = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if idx == target_idx {
            continue;
        }
        if ignore.contains(&header.to_ascii_lowercase()) {
            continue;
        }
        indices.push(idx);
    }

    Ok(indices)
}

//! Product and asset file loading.
//!
//! Product definitions are JSON or TOML, asset data is CSV (`date,value`
//! header) or JSON (`[{date, value}]`). The format follows the extension.

use std::path::Path;

use note_core::market_data::PriceSeries;
use note_models::simulation::{asset_series, AssetRecord, ProductDefinition};
use tracing::debug;

use crate::{CliError, Result};

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

fn read(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_error(path: &Path, error: impl ToString) -> CliError {
    CliError::Parse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Loads a product definition.
pub fn load_product(path: &Path) -> Result<ProductDefinition> {
    let definition: ProductDefinition = match extension(path).as_str() {
        "json" => serde_json::from_str(&read(path)?).map_err(|e| parse_error(path, e))?,
        "toml" => toml::from_str(&read(path)?).map_err(|e| parse_error(path, e))?,
        _ => {
            return Err(CliError::UnsupportedFormat {
                kind: "product",
                path: path.to_path_buf(),
                expected: "json or toml",
            })
        }
    };
    debug!(
        path = %path.display(),
        events = definition.income_barrier_events.len(),
        "loaded product definition"
    );
    Ok(definition)
}

/// Loads asset prices.
pub fn load_assets(path: &Path) -> Result<PriceSeries> {
    let records: Vec<AssetRecord> = match extension(path).as_str() {
        "csv" => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.to_path_buf()));
            }
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_path(path)
                .map_err(|e| parse_error(path, e))?;
            reader
                .deserialize()
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| parse_error(path, e))?
        }
        "json" => serde_json::from_str(&read(path)?).map_err(|e| parse_error(path, e))?,
        _ => {
            return Err(CliError::UnsupportedFormat {
                kind: "asset",
                path: path.to_path_buf(),
                expected: "csv or json",
            })
        }
    };
    let series = asset_series(&records)?;
    debug!(path = %path.display(), points = series.len(), "loaded asset prices");
    Ok(series)
}

/// Writes rendered output to a file.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

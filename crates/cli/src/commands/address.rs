//! Address dataset commands.

use std::path::Path;

use erp_dashboard_core::AddressCatalog;
use erp_dashboard_core::address::{DatasetIssue, ProvinceRecord, flatten, validate_nodes};
use tracing::{error, info};

use super::print_json;

/// Validate a dataset file and report every issue found.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the dataset
/// has any issues.
pub async fn validate(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %file.display(), "Validating address dataset");

    let content = read_file(file).await?;
    let issues = check(&content)?;

    if !issues.is_empty() {
        error!("Dataset validation failed:");
        for issue in &issues {
            error!("  - {issue}");
        }
        return Err(format!("{} dataset issues found", issues.len()).into());
    }

    info!("Dataset is consistent");
    Ok(())
}

/// Print every province.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded.
pub async fn provinces(dataset: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load(dataset).await?;
    print_json(&catalog.list_provinces())?;
    Ok(())
}

/// Print the cities of a province.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded.
pub async fn cities(
    province_code: &str,
    dataset: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load(dataset).await?;
    print_json(&catalog.list_cities(province_code))?;
    Ok(())
}

/// Print the districts of a city.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded.
pub async fn districts(
    city_code: &str,
    dataset: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load(dataset).await?;
    print_json(&catalog.list_districts(city_code))?;
    Ok(())
}

/// Parse a dataset document and run the data-quality checks on it.
fn check(content: &str) -> Result<Vec<DatasetIssue>, serde_json::Error> {
    let records: Vec<ProvinceRecord> = serde_json::from_str(content)?;
    let nodes = flatten(records);
    info!(nodes = nodes.len(), "Parsed dataset");
    Ok(validate_nodes(&nodes))
}

/// Load a catalog from `dataset`, or the bundled dataset when `None`.
async fn load(dataset: Option<&Path>) -> Result<AddressCatalog, Box<dyn std::error::Error>> {
    let catalog = match dataset {
        Some(path) => AddressCatalog::from_json(&read_file(path).await?)?,
        None => AddressCatalog::embedded()?,
    };
    Ok(catalog)
}

async fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

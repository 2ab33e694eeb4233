//! CSV fixture import for the ingredient and tag catalogs
//!
//! Reads the upstream data files: `ingredients.csv` with
//! `name,measurement_unit` columns and `tags.csv` with `name,slug`.
//! Rows are matched by name, so re-running an import only adds what
//! is missing.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::data::StoreError;
use crate::data::sqlite::repositories as repos;

#[derive(Debug, Deserialize)]
struct IngredientRecord {
    name: String,
    measurement_unit: String,
}

#[derive(Debug, Deserialize)]
struct TagRecord {
    name: String,
    slug: String,
}

/// Counts from one import run
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportReport {
    pub created: usize,
    pub existing: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.created + self.existing
    }
}

fn bad_row(path: &Path, e: csv::Error) -> StoreError {
    // csv errors carry the record and line position in their message
    StoreError::validation(format!("{}: {}", path.display(), e))
}

pub async fn import_ingredients(
    pool: &SqlitePool,
    path: &Path,
) -> Result<ImportReport, StoreError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut report = ImportReport::default();

    for result in reader.deserialize::<IngredientRecord>() {
        let record = result.map_err(|e| bad_row(path, e))?;
        let (row, created) =
            repos::get_or_create_ingredient(pool, &record.name, &record.measurement_unit).await?;
        if created {
            tracing::debug!(name = %row.name, unit = %row.measurement_unit, "ingredient imported");
            report.created += 1;
        } else {
            report.existing += 1;
        }
    }

    Ok(report)
}

pub async fn import_tags(pool: &SqlitePool, path: &Path) -> Result<ImportReport, StoreError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut report = ImportReport::default();

    for result in reader.deserialize::<TagRecord>() {
        let record = result.map_err(|e| bad_row(path, e))?;
        let (row, created) = repos::get_or_create_tag(pool, &record.name, &record.slug).await?;
        if created {
            tracing::debug!(name = %row.name, slug = %row.slug, "tag imported");
            report.created += 1;
        } else {
            report.existing += 1;
        }
    }

    Ok(report)
}

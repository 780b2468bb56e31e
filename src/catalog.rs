//! Tabular CMIP6 data catalogs.
//!
//! A catalog is a table of dataset records (one row per file or store) held
//! in memory as an Arrow [`RecordBatch`] of string columns. Searches return a
//! [`CatalogFrame`], a fresh filtered copy owned by the caller.
//!
//! Catalogs can be built from records, from a catalog CSV, or from an ESM
//! collection JSON file whose `catalog_file` points at such a CSV.

use arrow::compute::{concat_batches, filter_record_batch};
use arrow::csv::reader::Format;
use arrow_array::{Array, ArrayRef, BooleanArray, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Cmip6Error, Result};
use crate::query::SearchQuery;

/// Column holding the dataset location
pub const URI_COLUMN: &str = "uri";

/// Columns of a [`CatalogRecord`], in table order
pub const CATALOG_COLUMNS: [&str; 11] = [
    "experiment_id",
    "variable_id",
    "frequency",
    "activity_id",
    "source_id",
    "member_id",
    "institution_id",
    "table_id",
    "long_name",
    "units",
    URI_COLUMN,
];

/// Something that can answer facet queries with a table of matching records
pub trait Catalog {
    /// Return the records matching every facet of `query`
    fn search(&self, query: &SearchQuery) -> Result<CatalogFrame>;
}

/// One dataset record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub experiment_id: String,
    pub variable_id: String,
    pub frequency: String,
    pub activity_id: String,
    pub source_id: String,
    pub member_id: String,
    pub institution_id: String,
    pub table_id: String,
    pub long_name: String,
    pub units: String,
    pub uri: String,
}

impl CatalogRecord {
    fn field(&self, column: &str) -> &str {
        match column {
            "experiment_id" => &self.experiment_id,
            "variable_id" => &self.variable_id,
            "frequency" => &self.frequency,
            "activity_id" => &self.activity_id,
            "source_id" => &self.source_id,
            "member_id" => &self.member_id,
            "institution_id" => &self.institution_id,
            "table_id" => &self.table_id,
            "long_name" => &self.long_name,
            "units" => &self.units,
            _ => &self.uri,
        }
    }
}

/// A table of catalog records, typically the result of a search
#[derive(Debug, Clone)]
pub struct CatalogFrame {
    batch: RecordBatch,
}

impl CatalogFrame {
    /// Wrap a record batch
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Number of records
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Whether the frame has no records
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// The underlying Arrow batch
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Access a string column by name
    pub fn column(&self, name: &str) -> Result<&StringArray> {
        self.batch
            .column_by_name(name)
            .and_then(|column| column.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| Cmip6Error::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Non-null values of a column in row order
    pub fn values(&self, name: &str) -> Result<Vec<&str>> {
        Ok(self.column(name)?.iter().flatten().collect())
    }

    /// Distinct non-null values of a column, sorted
    pub fn distinct(&self, name: &str) -> Result<BTreeSet<&str>> {
        Ok(self.column(name)?.iter().flatten().collect())
    }

    /// Value of a column in the first record
    pub fn first(&self, name: &str) -> Result<&str> {
        let column = self.column(name)?;
        if column.is_empty() {
            return Err(Cmip6Error::EmptyResult {
                query: format!("first value of {}", name),
            });
        }
        if column.is_null(0) {
            return Err(Cmip6Error::MissingColumn {
                column: name.to_string(),
            });
        }
        Ok(column.value(0))
    }

    /// Records whose `column` equals `value`
    pub fn rows_where(&self, column: &str, value: &str) -> Result<CatalogFrame> {
        let mask = equality_mask(self.column(column)?, value);
        Ok(CatalogFrame::new(filter_record_batch(&self.batch, &mask)?))
    }
}

fn equality_mask(column: &StringArray, value: &str) -> BooleanArray {
    column.iter().map(|cell| Some(cell == Some(value))).collect()
}

/// ESM collection description (the JSON side of an intake-esm catalog)
#[derive(Debug, Clone, Deserialize)]
struct EsmCollection {
    #[serde(default)]
    id: Option<String>,
    catalog_file: String,
    #[serde(default)]
    assets: Option<AssetSpec>,
}

#[derive(Debug, Clone, Deserialize)]
struct AssetSpec {
    column_name: String,
}

/// In-memory CMIP6 catalog
#[derive(Debug, Clone)]
pub struct EsmCatalog {
    id: String,
    table: CatalogFrame,
}

impl EsmCatalog {
    /// Build a catalog from an existing record batch
    pub fn from_batch(id: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            id: id.into(),
            table: CatalogFrame::new(batch),
        }
    }

    /// Build a catalog from records
    pub fn from_records(id: impl Into<String>, records: &[CatalogRecord]) -> Result<Self> {
        let schema = string_schema(CATALOG_COLUMNS.iter().map(|c| c.to_string()));
        let columns: Vec<ArrayRef> = CATALOG_COLUMNS
            .iter()
            .map(|column| {
                let values: Vec<&str> = records.iter().map(|r| r.field(column)).collect();
                Arc::new(StringArray::from(values)) as ArrayRef
            })
            .collect();
        let batch = RecordBatch::try_new(schema, columns)?;
        Ok(Self::from_batch(id, batch))
    }

    /// Load a catalog from a CSV file with a header row
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Self::load_csv(path, None, &path.display().to_string())
    }

    /// Load a catalog from an ESM collection JSON file, or directly from a
    /// CSV file when the path ends in `.csv`
    pub fn open(path: &Path) -> Result<Self> {
        if path.extension().is_some_and(|ext| ext == "csv") {
            return Self::from_csv_path(path);
        }

        let content = std::fs::read_to_string(path)?;
        let collection: EsmCollection = serde_json::from_str(&content)?;

        if collection.catalog_file.contains("://") {
            return Err(Cmip6Error::Config {
                message: format!(
                    "Remote catalog files are not supported: {}",
                    collection.catalog_file
                ),
            });
        }

        let csv_path = resolve_relative(path, &collection.catalog_file);
        let id = collection
            .id
            .unwrap_or_else(|| path.display().to_string());
        let asset_column = collection.assets.map(|a| a.column_name);

        info!(
            catalog = %id,
            catalog_file = %csv_path.display(),
            "Opening ESM collection"
        );

        Self::load_csv(&csv_path, asset_column.as_deref(), &id)
    }

    fn load_csv(path: &Path, asset_column: Option<&str>, id: &str) -> Result<Self> {
        let header = read_header(path)?;
        let names = header.into_iter().map(|name| match asset_column {
            Some(asset) if name == asset => URI_COLUMN.to_string(),
            _ => name,
        });
        let schema = string_schema(names);

        let reader = arrow::csv::ReaderBuilder::new(schema.clone())
            .with_header(true)
            .build(File::open(path)?)?;
        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        let batch = concat_batches(&schema, &batches)?;

        info!(
            catalog = id,
            records = batch.num_rows(),
            columns = batch.num_columns(),
            "Catalog loaded"
        );

        Ok(Self::from_batch(id, batch))
    }

    /// Catalog identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.table.num_rows()
    }

    /// Whether the catalog has no records
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Catalog for EsmCatalog {
    fn search(&self, query: &SearchQuery) -> Result<CatalogFrame> {
        let batch = self.table.record_batch();
        let mut keep = vec![true; batch.num_rows()];

        for (column, value) in query.facets() {
            let cells = self.table.column(column)?;
            for (keep, cell) in keep.iter_mut().zip(cells.iter()) {
                *keep &= cell == Some(value);
            }
        }

        let matches = filter_record_batch(batch, &BooleanArray::from(keep))?;
        debug!(
            catalog = %self.id,
            query = %query,
            matches = matches.num_rows(),
            "Catalog search"
        );
        Ok(CatalogFrame::new(matches))
    }
}

fn string_schema(names: impl IntoIterator<Item = String>) -> SchemaRef {
    let fields: Vec<Field> = names
        .into_iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Column names from the header row of a CSV file
fn read_header(path: &Path) -> Result<Vec<String>> {
    let (schema, _) = Format::default()
        .with_header(true)
        .infer_schema(File::open(path)?, Some(0))?;

    if schema.fields().is_empty() {
        return Err(Cmip6Error::InvalidParameter {
            param: "catalog".to_string(),
            message: format!("Catalog file has no header row: {}", path.display()),
        });
    }

    Ok(schema
        .fields()
        .iter()
        .map(|field| field.name().trim_start_matches('\u{feff}').to_string())
        .collect())
}

fn resolve_relative(base: &Path, file: &str) -> PathBuf {
    let file = Path::new(file);
    if file.is_absolute() {
        return file.to_path_buf();
    }
    base.parent()
        .map(|dir| dir.join(file))
        .unwrap_or_else(|| file.to_path_buf())
}

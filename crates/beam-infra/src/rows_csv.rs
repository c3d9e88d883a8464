//! CSV import of material rows
//!
//! Expected header (case-insensitive, any order):
//! Material,Category,Quantity,Unit,Emission Factor[,Emissions]
//!
//! Category and Unit may be absent. An Emissions column is read past and
//! ignored since emissions are always recomputed. Cells are handed over
//! unparsed; numeric validation happens in the ledger.
//!
//! Every record becomes one row, blank ones included, so a rejected row's
//! index is its position among the data records. Lines with no delimiters
//! at all are not records and are dropped by the reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use beam_domain::model::RowInput;
use beam_types::Cell;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CsvLoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<CsvLoaderError> for beam_types::Error {
    fn from(err: CsvLoaderError) -> Self {
        match err {
            CsvLoaderError::IoError(e) => beam_types::Error::Io(e),
            CsvLoaderError::CsvError(e) => beam_types::Error::Csv(e),
            CsvLoaderError::MissingColumn(column) => beam_types::Error::InvalidInput(format!(
                "Missing required column: {}",
                column
            )),
        }
    }
}

struct Columns {
    material: usize,
    category: Option<usize>,
    quantity: usize,
    unit: Option<usize>,
    emission_factor: usize,
}

/// Load rows from a CSV file
pub fn load_rows_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RowInput>, CsvLoaderError> {
    let file = File::open(path)?;
    read_rows(file)
}

/// Read rows from any CSV source
pub fn read_rows<R: Read>(source: R) -> Result<Vec<RowInput>, CsvLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = locate_columns(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            warn!(line, row = rows.len() + 1, "blank CSV record kept in place");
        }
        rows.push(parse_record(&record, &columns));
    }

    debug!(rows = rows.len(), "CSV rows read");
    Ok(rows)
}

fn locate_columns(headers: &csv::StringRecord) -> Result<Columns, CsvLoaderError> {
    let find = |names: &[&str]| {
        headers.iter().position(|h| {
            let normalized = h.trim().to_lowercase().replace('_', " ");
            names.iter().any(|name| normalized == *name)
        })
    };
    let require = |names: &[&str], label: &str| {
        find(names).ok_or_else(|| CsvLoaderError::MissingColumn(label.to_string()))
    };

    Ok(Columns {
        material: require(&["material"], "Material")?,
        category: find(&["category"]),
        quantity: require(&["quantity"], "Quantity")?,
        unit: find(&["unit"]),
        emission_factor: require(&["emission factor", "factor"], "Emission Factor")?,
    })
}

fn parse_record(record: &csv::StringRecord, columns: &Columns) -> RowInput {
    let text = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .unwrap_or("")
            .to_string()
    };
    let cell = |idx: usize| record.get(idx).map(Cell::from_text).unwrap_or(Cell::Empty);

    RowInput {
        material: text(Some(columns.material)),
        category: text(columns.category),
        quantity: cell(columns.quantity),
        unit: text(columns.unit),
        emission_factor: cell(columns.emission_factor),
        emissions: None,
    }
}

//! Infrastructure layer: ledger documents on disk and CSV row import

pub mod ledger_file;
pub mod rows_csv;

pub use ledger_file::{ComponentRows, LedgerDocument, LedgerFile};
pub use rows_csv::{load_rows_from_csv, read_rows, CsvLoaderError};

//! gastos-ingest: reading bank CSV exports and shaping their records into transaction rows.

pub mod error;
pub mod parsers;
pub mod types;

pub use error::{AmountError, ScanError};
pub use parsers::bank_export::{ExportRecord, PREAMBLE_RECORDS, parse_export_bytes, read_export};
pub use types::{RecordShape, TransactionRow, parse_amount};

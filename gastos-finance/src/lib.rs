//! gastos-finance: bucket rules, the ledger scanner and the monthly ledger store

pub mod category_rules;
pub mod diagnostics;
pub mod scanner;
pub mod store;

pub use category_rules::classify;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use gastos_core::{Bucket, MonthlyTotals};
pub use gastos_ingest::ScanError;
pub use scanner::LedgerScanner;
pub use store::{MonthlyLedgerStore, StoreError};

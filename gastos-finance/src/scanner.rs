//! Ledger scanner: turns a bank export into debit and Pix totals.

use std::path::Path;

use gastos_core::MonthlyTotals;
use gastos_ingest::{ExportRecord, ScanError, TransactionRow, parse_export_bytes, read_export};

use crate::category_rules::classify;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};

/// Scans transaction exports, reporting skipped rows to a [`DiagnosticSink`].
#[derive(Debug, Clone, Default)]
pub struct LedgerScanner<S = TracingSink> {
    sink: S,
}

impl LedgerScanner<TracingSink> {
    pub fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl<S: DiagnosticSink> LedgerScanner<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Sum debit expenses and Pix transfers in the export at `path`.
    ///
    /// Row-level problems are reported and skipped. A missing file or an
    /// undecodable one is an error.
    pub fn scan(&self, path: impl AsRef<Path>) -> Result<MonthlyTotals, ScanError> {
        let records = read_export(path)?;
        Ok(self.accumulate(&records))
    }

    /// Like [`scan`](Self::scan), but an undecodable export yields zero totals
    /// (and a [`Diagnostic::DecodeFailure`]) instead of an error.
    pub fn scan_or_zero(&self, path: impl AsRef<Path>) -> Result<MonthlyTotals, ScanError> {
        self.zero_on_decode(self.scan(path))
    }

    /// Scan an export that is already in memory.
    pub fn scan_bytes(&self, bytes: &[u8], origin: &Path) -> Result<MonthlyTotals, ScanError> {
        let records = parse_export_bytes(bytes, origin)?;
        Ok(self.accumulate(&records))
    }

    /// Classify and sum data records (preamble already removed).
    pub fn accumulate(&self, records: &[ExportRecord]) -> MonthlyTotals {
        let mut totals = MonthlyTotals::default();

        for record in records {
            let Some(row) = TransactionRow::from_record(record) else {
                self.sink.report(Diagnostic::MalformedRow {
                    line: record.line,
                    fields: record.fields.clone(),
                });
                continue;
            };

            let Some(bucket) = classify(&row) else {
                continue;
            };

            match row.parsed_amount() {
                Ok(amount) => totals.add(bucket, amount),
                Err(_) => self.sink.report(Diagnostic::InvalidAmount {
                    line: row.line,
                    raw: row.amount.clone(),
                }),
            }
        }

        totals
    }

    fn zero_on_decode(
        &self,
        result: Result<MonthlyTotals, ScanError>,
    ) -> Result<MonthlyTotals, ScanError> {
        match result {
            Err(ScanError::Decode { path, message, .. }) => {
                self.sink.report(Diagnostic::DecodeFailure { path, message });
                Ok(MonthlyTotals::default())
            }
            other => other,
        }
    }
}

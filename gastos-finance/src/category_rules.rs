//! Deterministic bucket rules for transaction rows.
//!
//! Priority: debit type > Pix description > nothing.

use gastos_core::Bucket;
use gastos_ingest::TransactionRow;

const DEBIT_KIND: &str = "debito";
const PIX_MARKER: &str = "pix";

/// Decide which total a row feeds, if any.
pub fn classify(row: &TransactionRow) -> Option<Bucket> {
    if row.kind.to_lowercase() == DEBIT_KIND {
        return Some(Bucket::DebitExpense);
    }

    // Pix needs a non-empty type column
    if !row.kind.is_empty() && row.description.to_lowercase().contains(PIX_MARKER) {
        return Some(Bucket::PixTransfer);
    }

    None
}

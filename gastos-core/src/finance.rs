//! Monthly totals and the two buckets a transaction can land in

use serde::{Deserialize, Serialize};

/// Which running total a transaction row contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    DebitExpense,
    PixTransfer,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::DebitExpense, Bucket::PixTransfer];

    /// Key used for this bucket in the persisted store
    pub fn store_key(&self) -> &'static str {
        match self {
            Bucket::DebitExpense => "despesas",
            Bucket::PixTransfer => "pix",
        }
    }
}

/// Debit expenses and Pix transfers accumulated over one scan.
///
/// Serialized with the store's fixed literal keys: `{"despesas": .., "pix": ..}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotals {
    #[serde(rename = "despesas")]
    pub expenses: f64,
    pub pix: f64,
}

impl MonthlyTotals {
    pub fn new(expenses: f64, pix: f64) -> Self {
        Self { expenses, pix }
    }

    /// Add `amount` to the accumulator for `bucket`
    pub fn add(&mut self, bucket: Bucket, amount: f64) {
        match bucket {
            Bucket::DebitExpense => self.expenses += amount,
            Bucket::PixTransfer => self.pix += amount,
        }
    }

    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::DebitExpense => self.expenses,
            Bucket::PixTransfer => self.pix,
        }
    }

    /// True when neither bucket received anything
    pub fn is_zero(&self) -> bool {
        self.expenses == 0.0 && self.pix == 0.0
    }
}

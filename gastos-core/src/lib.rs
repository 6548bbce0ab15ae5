//! gastos-core: value types shared by the scanner, the store and the CLI

pub mod finance;

pub use finance::{Bucket, MonthlyTotals};

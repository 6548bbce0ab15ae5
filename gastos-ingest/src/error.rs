use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole scan. Row-level problems never end up here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The export is not valid UTF-8.
    #[error("invalid UTF-8 in {}: {message}", path.display())]
    Decode {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },
}

impl ScanError {
    pub fn is_decode(&self) -> bool {
        matches!(self, ScanError::Decode { .. })
    }
}

/// Why an amount field could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("not a number: {0}")]
    Parse(#[from] ParseFloatError),

    #[error("amount is not finite")]
    NonFinite,
}

use crate::error::AmountError;
use crate::parsers::bank_export::ExportRecord;

/// How a record's field count maps onto the logical transaction fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Fewer than 4 fields; not a transaction.
    TooShort(usize),
    /// 4 or 5 fields: date, amount, type, description (a 5th field is ignored).
    Compact,
    /// 6 or more fields: date, _, amount, _, type, description.
    Full,
}

impl RecordShape {
    pub const MIN_FIELDS: usize = 4;
    pub const FULL_FIELDS: usize = 6;

    pub fn of(field_count: usize) -> Self {
        match field_count {
            n if n < Self::MIN_FIELDS => RecordShape::TooShort(n),
            n if n < Self::FULL_FIELDS => RecordShape::Compact,
            _ => RecordShape::Full,
        }
    }

    /// Positions of (date, amount, type, description), if the shape has them.
    pub fn positions(&self) -> Option<[usize; 4]> {
        match self {
            RecordShape::TooShort(_) => None,
            RecordShape::Compact => Some([0, 1, 2, 3]),
            RecordShape::Full => Some([0, 2, 4, 5]),
        }
    }
}

/// One data record of the export with its fields named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    /// 1-based line in the source file
    pub line: u64,
    pub date: String,
    /// Raw amount text, thousands separators still present
    pub amount: String,
    /// Transaction type column ("debito", "credito", ...)
    pub kind: String,
    pub description: String,
}

impl TransactionRow {
    /// Name the fields of `record`, or `None` if it has too few of them.
    pub fn from_record(record: &ExportRecord) -> Option<Self> {
        let [date, amount, kind, description] =
            RecordShape::of(record.fields.len()).positions()?;
        let field = |i: usize| record.fields[i].clone();

        Some(Self {
            line: record.line,
            date: field(date),
            amount: field(amount),
            kind: field(kind),
            description: field(description),
        })
    }

    pub fn parsed_amount(&self) -> Result<f64, AmountError> {
        parse_amount(&self.amount)
    }
}

/// Parse an amount written with comma thousands separators ("1,234.56").
/// `NaN` and infinities are rejected.
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let value: f64 = raw.replace(',', "").trim().parse()?;
    if !value.is_finite() {
        return Err(AmountError::NonFinite);
    }
    Ok(value)
}

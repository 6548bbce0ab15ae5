//! Bank transaction export reader (CSV)
//!
//! Exports start with three preamble records (account name, period, column
//! titles) followed by one record per transaction:
//!   Data,Descrição,Valor,Saldo,Tipo,Histórico
//!   2024-01-05,Mercado,"1,234.56",0,debito,COMPRA CARTAO
//!
//! Older exports use the compact 4-column layout `date,amount,type,description`.
//! A blank line is a record with no fields, in the preamble as well as among
//! the transactions.

use std::fs;
use std::path::Path;

use crate::error::ScanError;

/// Records at the top of every export that never hold transactions.
pub const PREAMBLE_RECORDS: usize = 3;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A raw data record of the export, fields not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// 1-based line where the record starts
    pub line: u64,
    pub fields: Vec<String>,
}

/// Read an export file and return its data records (preamble removed).
pub fn read_export(path: impl AsRef<Path>) -> Result<Vec<ExportRecord>, ScanError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export_bytes(&bytes, path)
}

/// Split already-loaded export bytes into data records.
///
/// `origin` is only used to label errors.
pub fn parse_export_bytes(bytes: &[u8], origin: &Path) -> Result<Vec<ExportRecord>, ScanError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    // The whole file is decoded first, so the preamble is validated too
    let text = std::str::from_utf8(body).map_err(|err| {
        let line = body[..err.valid_up_to()].iter().filter(|&&b| b == b'\n').count() as u64 + 1;
        ScanError::Decode {
            path: origin.to_path_buf(),
            line: Some(line),
            message: err.to_string(),
        }
    })?;

    let mut out = Vec::new();
    for (line, raw) in split_records(text).into_iter().skip(PREAMBLE_RECORDS) {
        out.push(ExportRecord {
            line,
            fields: split_fields(raw, line, origin)?,
        });
    }

    Ok(out)
}

#[derive(Clone, Copy)]
enum Quote {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Cut `text` into the raw text of each record with its starting line.
/// Newlines inside quoted fields stay within their record.
fn split_records(text: &str) -> Vec<(u64, &str)> {
    let mut out = Vec::new();
    let mut state = Quote::FieldStart;
    let mut start = 0;
    let mut start_line = 1;
    let mut line = 1;

    for (i, c) in text.char_indices() {
        state = match (state, c) {
            (Quote::Quoted, '"') => Quote::QuoteInQuoted,
            (Quote::Quoted, '\n') => {
                line += 1;
                Quote::Quoted
            }
            (Quote::Quoted, _) => Quote::Quoted,
            (Quote::FieldStart, '"') | (Quote::QuoteInQuoted, '"') => Quote::Quoted,
            (_, ',') => Quote::FieldStart,
            (_, '\n') => {
                out.push((start_line, &text[start..i]));
                line += 1;
                start = i + 1;
                start_line = line;
                Quote::FieldStart
            }
            _ => Quote::Unquoted,
        };
    }

    if start < text.len() {
        out.push((start_line, &text[start..]));
    }
    out
}

fn split_fields(raw: &str, line: u64, origin: &Path) -> Result<Vec<String>, ScanError> {
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(raw.as_bytes());

    match rdr.records().next() {
        Some(Ok(record)) => Ok(record.iter().map(str::to_string).collect()),
        // Reading already-decoded text can only fail on encoding
        Some(Err(err)) => Err(ScanError::Decode {
            path: origin.to_path_buf(),
            line: Some(line),
            message: err.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

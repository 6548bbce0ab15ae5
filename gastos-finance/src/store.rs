//! Monthly ledger store: one JSON file mapping month labels to totals.
//!
//! ```json
//! {
//!     "01/2024": {
//!         "despesas": 1530.25,
//!         "pix": 420.0
//!     }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gastos_core::MonthlyTotals;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a JSON object. It is never overwritten.
    #[error("{} is not a valid ledger store: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// JSON has no NaN or infinity; writing one would lose the month.
    #[error("totals for {month} are not finite: {totals:?}")]
    NonFinite { month: String, totals: MonthlyTotals },

    #[error("serialize ledger store: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Month label → totals, persisted as a single JSON document.
#[derive(Debug, Clone)]
pub struct MonthlyLedgerStore {
    path: PathBuf,
}

impl MonthlyLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole mapping in file order; empty when the file does not exist yet.
    pub fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(self.corrupt(format!("top level is {}, expected an object", kind_of(&other)))),
            Err(e) => Err(self.corrupt(e.to_string())),
        }
    }

    /// Set `month` to `totals`, keeping every other entry as it was.
    pub fn upsert(&self, month: &str, totals: MonthlyTotals) -> Result<()> {
        if !(totals.expenses.is_finite() && totals.pix.is_finite()) {
            return Err(StoreError::NonFinite {
                month: month.to_string(),
                totals,
            });
        }

        let mut map = self.load()?;
        let replaced = map.insert(month.to_string(), serde_json::to_value(totals)?).is_some();
        self.save(&map)?;

        tracing::debug!(
            path = %self.path.display(),
            month,
            replaced,
            months = map.len(),
            "ledger store updated"
        );
        Ok(())
    }

    /// Totals stored for `month`, if it is present and well formed.
    pub fn get(&self, month: &str) -> Result<Option<MonthlyTotals>> {
        let map = self.load()?;
        Ok(map
            .get(month)
            .and_then(|v| serde_json::from_value(v.clone()).ok()))
    }

    /// Entries shaped like totals, in file order. Other entries are skipped.
    pub fn months(&self) -> Result<Vec<(String, MonthlyTotals)>> {
        let map = self.load()?;
        let mut out = Vec::with_capacity(map.len());
        for (month, value) in map {
            match serde_json::from_value::<MonthlyTotals>(value) {
                Ok(totals) => out.push((month, totals)),
                Err(e) => tracing::debug!(%month, error = %e, "skipping entry without totals"),
            }
        }
        Ok(out)
    }

    fn save(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        map.serialize(&mut ser)?;

        fs::write(&self.path, buf).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, reason: String) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_in(dir: &tempfile::TempDir) -> MonthlyLedgerStore {
        MonthlyLedgerStore::new(dir.path().join("despesas_mensais.json"))
    }

    #[test]
    fn test_first_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());

        store.upsert("01/2024", MonthlyTotals::new(10.0, 2.0)).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.get("01/2024").unwrap(), Some(MonthlyTotals::new(10.0, 2.0)));
    }

    #[test]
    fn test_upsert_keeps_other_months() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"01/2024": {"despesas": 10.0, "pix": 2.0}}"#).unwrap();

        store.upsert("02/2024", MonthlyTotals::new(5.0, 0.0)).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "01/2024": {"despesas": 10.0, "pix": 2.0},
                "02/2024": {"despesas": 5.0, "pix": 0.0}
            })
        );
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.upsert("01/2024", MonthlyTotals::new(1.0, 1.0)).unwrap();
        store.upsert("02/2024", MonthlyTotals::new(2.0, 2.0)).unwrap();
        store.upsert("01/2024", MonthlyTotals::new(3.0, 0.5)).unwrap();

        let months = store.months().unwrap();
        assert_eq!(
            months,
            vec![
                ("01/2024".to_string(), MonthlyTotals::new(3.0, 0.5)),
                ("02/2024".to_string(), MonthlyTotals::new(2.0, 2.0)),
            ]
        );
    }

    #[test]
    fn test_unrelated_entries_survive_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"nota": "março sem dados", "12/2023": {"despesas": 1, "pix": 2, "extra": true}}"#).unwrap();

        store.upsert("01/2024", MonthlyTotals::default()).unwrap();

        let map = store.load().unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, ["nota", "12/2023", "01/2024"]);
        assert_eq!(map["nota"], json!("março sem dados"));
        assert_eq!(map["12/2023"], json!({"despesas": 1, "pix": 2, "extra": true}));

        // The string entry has no totals shape
        assert_eq!(store.months().unwrap().len(), 2);
    }

    #[test]
    fn test_output_is_indented_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.upsert("março/2024", MonthlyTotals::new(1.5, 0.0)).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            text,
            "{\n    \"março/2024\": {\n        \"despesas\": 1.5,\n        \"pix\": 0.0\n    }\n}"
        );
    }

    #[test]
    fn test_corrupt_store_is_an_error_and_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{\"01/2024\": {\"despesas\": 10.0,").unwrap();

        let err = store.upsert("02/2024", MonthlyTotals::new(5.0, 0.0)).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "{\"01/2024\": {\"despesas\": 10.0,"
        );
    }

    #[test]
    fn test_non_finite_totals_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.upsert("01/2024", MonthlyTotals::new(10.0, 2.0)).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.upsert("01/2024", MonthlyTotals::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, StoreError::NonFinite { ref month, .. } if month == "01/2024"));
        let err = store.upsert("02/2024", MonthlyTotals::new(0.0, f64::INFINITY)).unwrap_err();
        assert!(matches!(err, StoreError::NonFinite { .. }));

        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert_eq!(store.get("01/2024").unwrap(), Some(MonthlyTotals::new(10.0, 2.0)));
    }

    #[test]
    fn test_non_object_store_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[1, 2]").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("an array"), "{err}");
    }

    #[test]
    fn test_empty_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_missing_parent_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let store = MonthlyLedgerStore::new(dir.path().join("nested/ledger.json"));
        store.upsert("01/2024", MonthlyTotals::new(1.0, 0.0)).unwrap();
        assert!(store.path().exists());
    }
}

pub mod bank_export;

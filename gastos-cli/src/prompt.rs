use anyhow::Result;
use chrono::Local;
use std::io::{self, BufRead, Write};

/// Month label for the current local month, e.g. `10/2026`.
pub fn current_month() -> String {
    Local::now().format("%m/%Y").to_string()
}

/// Ask for the month on stdin; an empty answer picks `current_month()`.
pub fn prompt_month() -> Result<String> {
    let default = current_month();
    print!("Por favor, insira o mês no formato MM/AAAA [{default}]: ");
    io::stdout().flush().ok();
    read_month(&mut io::stdin().lock(), &default)
}

pub fn read_month(input: &mut impl BufRead, default: &str) -> Result<String> {
    let mut s = String::new();
    input.read_line(&mut s)?;
    let s = s.trim();
    if s.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(s.to_string())
    }
}

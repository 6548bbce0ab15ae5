use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gastos_core::{Bucket, MonthlyTotals};
use gastos_finance::{LedgerScanner, MonthlyLedgerStore};
use std::path::PathBuf;

mod config;
mod logging;
mod prompt;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "gastos", version, about = "Monthly debit and Pix totals from a bank CSV export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the export and store the month's totals (default)
    Run(RunArgs),

    /// List the months recorded in the ledger store
    Months {
        /// Ledger store (defaults to files.store from config)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Month label, e.g. 01/2024 (prompted for when absent)
    #[arg(long)]
    month: Option<String>,

    /// Bank export to scan (defaults to files.transactions from config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Ledger store to update (defaults to files.store from config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Fail on an undecodable export instead of recording zero totals
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.gastos/config.toml with the defaults
    Init,
}

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Command::Run(RunArgs::default())) {
        Command::Run(args) => {
            let cfg = config::load_config()?;
            run(args, &cfg)?;
        }

        Command::Months { store } => {
            let cfg = config::load_config()?;
            list_months(store.unwrap_or(cfg.files.store), &cfg.display.currency)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

fn run(args: RunArgs, cfg: &Config) -> Result<()> {
    let month = match args.month {
        Some(m) => m,
        None => prompt::prompt_month()?,
    };
    let csv_path = args.csv.unwrap_or_else(|| cfg.files.transactions.clone());
    let store_path = args.store.unwrap_or_else(|| cfg.files.store.clone());

    let scanner = LedgerScanner::new();
    let totals = if args.strict {
        scanner.scan(&csv_path)
    } else {
        scanner.scan_or_zero(&csv_path)
    }
    .with_context(|| format!("scanning {}", csv_path.display()))?;

    print!("{}", render_totals(&month, totals, &cfg.display.currency));

    MonthlyLedgerStore::new(&store_path)
        .upsert(&month, totals)
        .with_context(|| format!("updating {}", store_path.display()))?;

    println!(
        "Arquivo {} atualizado com os totais de despesas e PIX para {}.",
        store_path.display(),
        month
    );
    Ok(())
}

fn list_months(store_path: PathBuf, currency: &str) -> Result<()> {
    let store = MonthlyLedgerStore::new(&store_path);
    let months = store
        .months()
        .with_context(|| format!("reading {}", store_path.display()))?;

    if months.is_empty() {
        println!("Nenhum mês registrado em {}", store_path.display());
        return Ok(());
    }

    for (month, totals) in &months {
        println!("{}", render_month_line(month, *totals, currency));
    }
    Ok(())
}

fn render_month_line(month: &str, totals: MonthlyTotals, currency: &str) -> String {
    let columns: Vec<String> = Bucket::ALL
        .iter()
        .map(|b| format!("{} {currency} {:.2}", b.store_key(), totals.get(*b)))
        .collect();
    format!("{month}: {}", columns.join(" | "))
}

fn render_totals(month: &str, totals: MonthlyTotals, currency: &str) -> String {
    format!(
        "Total de despesas para {month}: {currency} {:.2}\n\
         Total de transferências por PIX para {month}: {currency} {:.2}\n",
        totals.expenses, totals.pix
    )
}

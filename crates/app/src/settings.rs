//! Handles settings for the application.
//!
//! Values are layered: defaults, then the optional TOML file
//! (`config/ledger.toml` or `--config`), then `LEDGER_*` environment
//! variables, then command-line flags.
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Deserialize;

use engine::{Amount, SortField, persistence::DEFAULT_PATH};

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/ledger.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file holding the transactions.
    pub file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_PATH.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ledger", version)]
#[command(about = "Personal finance tracker: category-tagged transactions in a JSON file")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the transactions file (default: transactions.json).
    #[arg(long)]
    pub file: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Without a command the interactive menu starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show all transactions, grouped by category, or as one sorted list.
    List {
        /// Sort every transaction by `category`, `amount` or `date`.
        #[arg(long, value_parser = parse_sort_field)]
        sort: Option<SortField>,
        /// Sort in descending order.
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Record a new transaction.
    Add(AddArgs),
    /// Replace a transaction, keeping its position.
    Update(UpdateArgs),
    /// Remove a transaction.
    Delete(DeleteArgs),
    /// Per-category totals and the grand total.
    Summary,
    /// Transactions whose category, date or amount contain the term.
    Search { term: String },
    /// Open the table view.
    Table,
}

#[derive(Debug, ClapArgs)]
#[command(allow_negative_numbers = true)]
pub struct AddArgs {
    pub category: String,
    #[arg(value_parser = parse_amount)]
    pub amount: Amount,
    /// Transaction date, YYYY-MM-DD (default: today).
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, ClapArgs)]
#[command(allow_negative_numbers = true)]
pub struct UpdateArgs {
    pub category: String,
    /// Position inside the category, as shown by `list` (starts at 1).
    #[arg(value_parser = parse_position)]
    pub position: usize,
    #[arg(value_parser = parse_amount)]
    pub amount: Amount,
    /// New date, YYYY-MM-DD (default: keep the current one).
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, ClapArgs)]
pub struct DeleteArgs {
    pub category: String,
    /// Position inside the category, as shown by `list` (starts at 1).
    #[arg(value_parser = parse_position)]
    pub position: usize,
}

fn parse_sort_field(raw: &str) -> std::result::Result<SortField, String> {
    SortField::try_from(raw)
}

fn parse_amount(raw: &str) -> std::result::Result<Amount, String> {
    raw.parse::<Amount>().map_err(|err| err.to_string())
}

/// Turns a one-based position typed by the user into a store index.
pub fn parse_position(raw: &str) -> std::result::Result<usize, String> {
    let position: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("\"{}\" is not a position", raw.trim()))?;
    position
        .checked_sub(1)
        .ok_or_else(|| "positions start at 1".to_string())
}

pub fn load(args: &Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("LEDGER"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(file) = &args.file {
        settings.file = file.clone();
    }
    if let Some(log_level) = &args.log_level {
        settings.log_level = log_level.clone();
    }

    Ok(settings)
}

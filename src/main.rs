//! Offline driver — parses a JSON dump of raw messages and prints the
//! extracted expense records.
//!
//! Input is a JSON array of Gmail-API-shaped messages, read from a path
//! argument or stdin. Output is a JSON array of expense records on
//! stdout; diagnostics go to stderr via tracing.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;

use mail_expense::batch::{self, parse_batch};
use mail_expense::message::RawMessage;
use mail_expense::parser::ExpenseParser;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Optional comma-separated bank filter, e.g. "hdfc,icici".
    let bank_filter: Vec<String> = std::env::var("MAIL_EXPENSE_BANKS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let messages: Vec<RawMessage> = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            batch::load_messages(&path)
                .with_context(|| format!("failed to load messages from {}", path.display()))?
        }
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            serde_json::from_str(&raw).context("failed to parse message JSON from stdin")?
        }
    };

    let parser = ExpenseParser::new();
    let expenses: Vec<_> = parse_batch(&parser, &messages)
        .into_iter()
        .filter(|e| batch::matches_bank_filter(e, &bank_filter))
        .collect();

    serde_json::to_writer_pretty(std::io::stdout().lock(), &expenses)?;
    println!();

    eprintln!(
        "{} transaction(s) extracted from {} message(s)",
        expenses.len(),
        messages.len()
    );
    Ok(())
}

//! Batch processing — runs the engine over many messages with
//! per-message fault isolation.
//!
//! One unparseable message (malformed tree, undecodable content, no
//! amount) is skipped and logged; it never aborts its siblings. Each
//! extracted record is wrapped with the caller-side identifying fields
//! (message id, thread id, deep link) and the batch is returned newest
//! first.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{InputError, Result};
use crate::expense::EmailExpense;
use crate::message::RawMessage;
use crate::parser::ExpenseParser;

/// Source tag stamped on every wrapped record.
pub const GMAIL_SOURCE: &str = "gmail";

/// Deep link back to the source message.
pub fn message_link(id: &str) -> String {
    format!("https://mail.google.com/mail/u/0/#inbox/{id}")
}

/// Parse a batch of raw messages into wrapped expense records, newest
/// first.
pub fn parse_batch(parser: &ExpenseParser, messages: &[RawMessage]) -> Vec<EmailExpense> {
    let mut expenses: Vec<EmailExpense> = messages
        .iter()
        .filter_map(|msg| match parser.parse(msg) {
            Some(expense) => Some(EmailExpense {
                id: msg.id.clone(),
                thread_id: msg.thread_id.clone(),
                link: message_link(&msg.id),
                source: GMAIL_SOURCE.to_string(),
                expense,
            }),
            None => {
                debug!(id = %msg.id, "no transaction extracted");
                None
            }
        })
        .collect();

    expenses.sort_by(|a, b| b.expense.date.cmp(&a.expense.date));
    info!(
        extracted = expenses.len(),
        scanned = messages.len(),
        "batch parsed"
    );
    expenses
}

/// Whether an expense passes a case-insensitive bank-substring filter.
///
/// An empty filter passes everything.
pub fn matches_bank_filter(expense: &EmailExpense, banks: &[String]) -> bool {
    if banks.is_empty() {
        return true;
    }
    let bank = expense.expense.bank.to_lowercase();
    banks.iter().any(|b| bank.contains(&b.to_lowercase()))
}

/// Load a JSON array of raw messages from a file.
pub fn load_messages(path: &Path) -> Result<Vec<RawMessage>> {
    let raw = std::fs::read_to_string(path).map_err(InputError::from)?;
    let messages: Vec<RawMessage> = serde_json::from_str(&raw).map_err(InputError::from)?;
    Ok(messages)
}

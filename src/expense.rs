//! Output records — the structured transaction produced by the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Debit (outgoing/expense) vs credit (incoming/income).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

/// A transaction record extracted from one notification message.
///
/// Constructed once by the engine and handed to the caller; never mutated
/// afterwards. Field bounds are enforced at extraction time: amount is
/// within `(0, 10_000_000)` at 2 decimal places, merchant is a non-empty
/// string of at most 30 characters, description at most 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExpense {
    /// Receive day, local calendar.
    pub date: NaiveDate,
    /// Transaction amount, 2 decimal places.
    pub amount: Decimal,
    /// Counterparty label, or "Unknown Merchant".
    pub merchant: String,
    /// Category table label, or "Others".
    pub category: String,
    /// Cleaned subject line.
    pub description: String,
    /// Institution display name, or "Unknown Bank".
    pub bank: String,
    pub transaction_type: TransactionType,
}

/// A parsed expense plus the caller-side identifying fields.
///
/// The engine itself knows nothing about mailbox ids or deep links; the
/// batch layer wraps its output with them so downstream consumers can
/// jump back to the source message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailExpense {
    /// Mailbox-native message id.
    pub id: String,
    /// Conversation thread id.
    pub thread_id: String,
    /// Deep link to the source message.
    pub link: String,
    /// Originating source, always "gmail" for now.
    pub source: String,
    #[serde(flatten)]
    pub expense: ParsedExpense,
}

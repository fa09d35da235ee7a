//! The extraction engine — turns one raw message into at most one
//! transaction record.
//!
//! Assembly is gated: first the body must resolve to non-empty text,
//! then an in-bounds amount must be found in subject + body. A message
//! failing either gate is dropped with a diagnostic. The remaining
//! fields (merchant, category, institution, direction) always produce a
//! value, each with its own sentinel, so they never reject a message.
//!
//! Every table the engine consults is owned data on [`ExpenseParser`],
//! injected at construction — tuning the heuristics never touches the
//! control flow here.

pub mod amount;
pub mod bank;
pub mod body;
pub mod category;
pub mod direction;
pub mod merchant;

use tracing::debug;

use crate::expense::ParsedExpense;
use crate::message::RawMessage;

pub use amount::{AmountExtractor, AmountRule};
pub use bank::{BankDirectory, UNKNOWN_BANK};
pub use category::{CategoryRule, CategoryTable, OTHER_CATEGORY};
pub use direction::DirectionRules;
pub use merchant::{MerchantExtractor, MerchantRule, UNKNOWN_MERCHANT};

/// Maximum length of a cleaned description.
const MAX_DESCRIPTION_LEN: usize = 100;

/// Heuristic expense extraction engine.
///
/// Stateless and pure: one configured instance can be shared across
/// threads and invoked concurrently with no coordination.
pub struct ExpenseParser {
    amounts: AmountExtractor,
    merchants: MerchantExtractor,
    banks: BankDirectory,
    categories: CategoryTable,
    direction: DirectionRules,
}

impl Default for ExpenseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseParser {
    /// Engine with the default heuristic tables.
    pub fn new() -> Self {
        Self {
            amounts: AmountExtractor::default_patterns(),
            merchants: MerchantExtractor::default_patterns(),
            banks: BankDirectory::default_directory(),
            categories: CategoryTable::default_table(),
            direction: DirectionRules::default_rules(),
        }
    }

    /// Engine with custom tables, for tuning without code changes.
    pub fn with_tables(
        amounts: AmountExtractor,
        merchants: MerchantExtractor,
        banks: BankDirectory,
        categories: CategoryTable,
        direction: DirectionRules,
    ) -> Self {
        Self {
            amounts,
            merchants,
            banks,
            categories,
            direction,
        }
    }

    /// Extract a transaction record from one message.
    ///
    /// Returns `None` when no body or no plausible amount can be
    /// recovered — an ordinary outcome for non-transactional mail, not
    /// an error. Never panics on malformed input.
    pub fn parse(&self, msg: &RawMessage) -> Option<ParsedExpense> {
        let subject = msg.subject();

        let body = match &msg.payload {
            Some(payload) => body::resolve_body(payload),
            None => String::new(),
        };
        if body.trim().is_empty() {
            debug!(id = %msg.id, "no body recovered, dropping message");
            return None;
        }

        let combined = format!("{subject} {body}");
        let Some(amount) = self.amounts.extract(&combined) else {
            // Keep the searched text around for offline pattern tuning.
            debug!(
                id = %msg.id,
                subject,
                preview = %preview(&combined),
                "no amount recovered, dropping message"
            );
            return None;
        };

        let date = msg.local_date()?;
        let merchant = self.merchants.extract(subject, &body);
        let category = self.categories.classify(&merchant, &combined).to_string();
        let transaction_type = self.direction.classify(&combined);

        Some(ParsedExpense {
            date,
            amount,
            merchant,
            category,
            description: clean_description(subject),
            bank: self.banks.identify(msg.from()).to_string(),
            transaction_type,
        })
    }
}

/// Subject line cleaned for display: basic punctuation kept, whitespace
/// collapsed, truncated.
fn clean_description(subject: &str) -> String {
    let kept: String = subject
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '.' | ',' | ':')
        })
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_DESCRIPTION_LEN)
        .collect()
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::TransactionType;
    use crate::message::{Header, MessagePart, PartBody};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use rust_decimal_macros::dec;

    fn encode(text: &str) -> String {
        STANDARD.encode(text).replace('+', "-").replace('/', "_")
    }

    fn make_message(subject: &str, from: &str, body: &str) -> RawMessage {
        RawMessage {
            id: "msg-001".into(),
            thread_id: "thread-001".into(),
            internal_date: 1_714_550_400_000,
            payload: Some(MessagePart {
                mime_type: Some("multipart/alternative".into()),
                headers: vec![
                    Header {
                        name: "Subject".into(),
                        value: subject.into(),
                    },
                    Header {
                        name: "From".into(),
                        value: from.into(),
                    },
                ],
                body: None,
                parts: vec![MessagePart {
                    mime_type: Some("text/plain".into()),
                    body: Some(PartBody {
                        data: Some(encode(body)),
                    }),
                    ..Default::default()
                }],
            }),
        }
    }

    #[test]
    fn extracts_full_record_from_debit_alert() {
        let msg = make_message(
            "Transaction Alert",
            "alerts@hdfcbank.com",
            "Rs. 1,234.56 debited from your account at AMAZON on 2024-05-01",
        );
        let expense = ExpenseParser::new().parse(&msg).unwrap();
        assert_eq!(expense.amount, dec!(1234.56));
        assert_eq!(expense.transaction_type, TransactionType::Debit);
        assert_eq!(expense.category, "Shopping");
        assert_eq!(expense.merchant, "AMAZON");
        assert_eq!(expense.bank, "HDFC Bank");
        assert_eq!(expense.description, "Transaction Alert");
        assert_eq!(expense.date, msg.local_date().unwrap());
    }

    #[test]
    fn empty_payload_yields_none() {
        let msg = RawMessage {
            id: "msg-002".into(),
            thread_id: String::new(),
            internal_date: 1_714_550_400_000,
            payload: Some(MessagePart::default()),
        };
        assert!(ExpenseParser::new().parse(&msg).is_none());
    }

    #[test]
    fn missing_payload_yields_none() {
        let msg = RawMessage {
            id: "msg-003".into(),
            thread_id: String::new(),
            internal_date: 1_714_550_400_000,
            payload: None,
        };
        assert!(ExpenseParser::new().parse(&msg).is_none());
    }

    #[test]
    fn out_of_bounds_amount_yields_none() {
        let msg = make_message(
            "Alert",
            "alerts@sbi.co.in",
            "Rs. 99,999,999 debited",
        );
        assert!(ExpenseParser::new().parse(&msg).is_none());
    }

    #[test]
    fn merchant_falls_back_to_subject_token() {
        let msg = make_message(
            "SBI Alert Notice",
            "alerts@sbi.co.in",
            "Dear Customer, Rs. 500 was deducted.",
        );
        let expense = ExpenseParser::new().parse(&msg).unwrap();
        assert_eq!(expense.merchant, "Notice");
        assert_eq!(expense.bank, "State Bank of India");
        assert_eq!(expense.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn credit_notification_is_classified_as_credit() {
        let msg = make_message(
            "Salary Credit Advice",
            "noreply@icicibank.com",
            "INR 50,000.00 has been credited to your account",
        );
        let expense = ExpenseParser::new().parse(&msg).unwrap();
        assert_eq!(expense.transaction_type, TransactionType::Credit);
        assert_eq!(expense.amount, dec!(50000.00));
        assert_eq!(expense.bank, "ICICI Bank");
    }

    #[test]
    fn unknown_sender_gets_bank_sentinel() {
        let msg = make_message("Alert", "billing@someshop.example", "Rs. 250 paid");
        let expense = ExpenseParser::new().parse(&msg).unwrap();
        assert_eq!(expense.bank, UNKNOWN_BANK);
    }

    #[test]
    fn description_is_cleaned_and_truncated() {
        let subject = format!("Payment! @Alert# {}", "x".repeat(120));
        let msg = make_message(&subject, "alerts@hdfcbank.com", "Rs. 10 paid");
        let expense = ExpenseParser::new().parse(&msg).unwrap();
        assert!(expense.description.starts_with("Payment Alert"));
        assert_eq!(expense.description.chars().count(), 100);
        assert!(!expense.description.contains('@'));
    }

    #[test]
    fn clean_description_keeps_basic_punctuation() {
        assert_eq!(
            clean_description("Txn: Rs. 450, card x1234 - done!"),
            "Txn: Rs. 450, card x1234 - done"
        );
    }

    #[test]
    fn parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExpenseParser>();
    }
}

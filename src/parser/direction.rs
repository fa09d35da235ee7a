//! Transaction-direction classifier — tiered keyword lookup.
//!
//! Three tiers, checked strictly in priority order:
//!
//! 1. structured-table debit markers (a table cell explicitly stating
//!    the transaction type),
//! 2. credit-indicating phrases,
//! 3. generic debit-indicating phrases.
//!
//! The first tier with any keyword present wins, so an unambiguous
//! structured marker overrides free-text wording even when both occur in
//! the same message. An unclassifiable transaction defaults to debit —
//! the system is expense-tracking biased.

use tracing::debug;

use crate::expense::TransactionType;

/// Tiered direction keyword tables.
pub struct DirectionRules {
    structured_debit: Vec<String>,
    credit: Vec<String>,
    debit: Vec<String>,
}

impl DirectionRules {
    /// The default keyword tiers.
    pub fn default_rules() -> Self {
        let structured_debit = [
            r#"id="trantype">purchase"#,
            r#"trantype">purchase</td>"#,
            "transaction type: purchase",
            "transaction type: withdrawal",
            ">purchase<",
            "purchase</td>",
            r#"transaction type">purchase"#,
        ];
        let credit = [
            "credited",
            "credit transaction",
            "amount credited",
            "deposited",
            "refund",
            "cashback",
            "reward",
            "salary",
            "contribution credit",
            "reversal",
            "interest credited",
            "dividend",
            "payment received",
            "has been credited",
            "neft transaction",
            "fund transfer received",
            "transaction type: credit",
            "transaction type: deposit",
        ];
        let debit = [
            "debited",
            "charged",
            "payment",
            "withdrawal",
            "purchase",
            "spent",
            "paid",
            "transaction alert",
            "card used",
            "amount debited",
            "debit",
            "pos / ecom",
            "online transaction",
            "card transaction",
        ];
        Self {
            structured_debit: structured_debit.iter().map(|k| k.to_string()).collect(),
            credit: credit.iter().map(|k| k.to_string()).collect(),
            debit: debit.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Build a classifier from custom keyword tiers.
    pub fn new(structured_debit: Vec<String>, credit: Vec<String>, debit: Vec<String>) -> Self {
        Self {
            structured_debit,
            credit,
            debit,
        }
    }

    /// Classify subject + body text as debit or credit.
    pub fn classify(&self, text: &str) -> TransactionType {
        let text = text.to_lowercase();

        if let Some(keyword) = first_hit(&self.structured_debit, &text) {
            debug!(keyword, "structured debit marker");
            return TransactionType::Debit;
        }
        if let Some(keyword) = first_hit(&self.credit, &text) {
            debug!(keyword, "credit keyword");
            return TransactionType::Credit;
        }
        if let Some(keyword) = first_hit(&self.debit, &text) {
            debug!(keyword, "debit keyword");
            return TransactionType::Debit;
        }

        debug!("no direction keyword, defaulting to debit");
        TransactionType::Debit
    }
}

fn first_hit<'a>(keywords: &'a [String], text: &str) -> Option<&'a str> {
    keywords
        .iter()
        .find(|k| text.contains(k.as_str()))
        .map(|k| k.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> DirectionRules {
        DirectionRules::default_rules()
    }

    #[test]
    fn debit_keywords_classify_as_debit() {
        assert_eq!(
            rules().classify("Rs. 500 debited from your account"),
            TransactionType::Debit
        );
        assert_eq!(
            rules().classify("Your card was charged at the terminal"),
            TransactionType::Debit
        );
    }

    #[test]
    fn credit_keywords_classify_as_credit() {
        assert_eq!(
            rules().classify("INR 50,000 has been credited to your account"),
            TransactionType::Credit
        );
        assert_eq!(rules().classify("Cashback of Rs. 20"), TransactionType::Credit);
        assert_eq!(
            rules().classify("Refund processed for order 1234"),
            TransactionType::Credit
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            rules().classify("SALARY CREDITED FOR APRIL"),
            TransactionType::Credit
        );
    }

    #[test]
    fn structured_marker_overrides_credit_keyword() {
        // A structured purchase cell beats a free-text credit phrase in
        // the same message.
        let text = r#"<td id="tranType">PURCHASE</td> disputed amounts are credited back"#;
        assert_eq!(rules().classify(text), TransactionType::Debit);
    }

    #[test]
    fn credit_beats_generic_debit_wording() {
        // "payment received" is a credit phrase even though "payment"
        // alone is a debit keyword.
        assert_eq!(
            rules().classify("Payment received towards your loan"),
            TransactionType::Credit
        );
    }

    #[test]
    fn unclassifiable_text_defaults_to_debit() {
        assert_eq!(
            rules().classify("Monthly account statement attached"),
            TransactionType::Debit
        );
    }

    #[test]
    fn custom_tiers_are_honored() {
        let custom = DirectionRules::new(vec![], vec!["incoming wire".into()], vec![]);
        assert_eq!(
            custom.classify("Incoming wire from ACME"),
            TransactionType::Credit
        );
        assert_eq!(custom.classify("anything else"), TransactionType::Debit);
    }
}

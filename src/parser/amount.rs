//! Amount extractor — ordered monetary patterns over subject + body text.
//!
//! Patterns run strictly in declaration order, most structured first:
//! labelled table columns, then transaction phrases, then bare
//! currency-marked numbers and trailing colon-number lines as the
//! generic fallback. Within a pattern, matches are scanned in order of
//! appearance and the first in-bounds value wins; a pattern whose every
//! candidate is out of bounds falls through to the next one.

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Upper bound on a plausible notification amount. Anything at or above
/// this is a mis-parse (account numbers, reference ids), not a
/// transaction.
const MAX_PLAUSIBLE_AMOUNT: Decimal = dec!(10_000_000);

/// A single monetary pattern with a compiled regex.
///
/// Capture group 1 must hold the numeric text (digits, thousands
/// separators, optional 2-digit fraction).
#[derive(Debug, Clone)]
pub struct AmountRule {
    /// Short label for diagnostics.
    pub label: &'static str,
    /// Compiled regex for matching.
    pub regex: Regex,
}

impl AmountRule {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

/// Ordered monetary pattern table.
pub struct AmountExtractor {
    rules: Vec<AmountRule>,
}

impl AmountExtractor {
    /// The default pattern table, covering the notification formats of
    /// the supported institutions.
    pub fn default_patterns() -> Self {
        const NUM: &str = r"([0-9,]+(?:\.[0-9]{2})?)";
        let rules = vec![
            // Structured table columns
            AmountRule::new(
                "amount-inr-column",
                &format!(r"(?i)amount\s*\(\s*inr\s*\)[:\s]*{NUM}"),
            ),
            AmountRule::new(
                "amount-rs-column",
                &format!(r"(?i)amount\s*\(\s*rs\.?\s*\)[:\s]*{NUM}"),
            ),
            AmountRule::new(
                "transaction-amount",
                &format!(r"(?i)transaction\s*amount[:\s]*(?:inr|rs\.?|₹)?\s*{NUM}"),
            ),
            AmountRule::new(
                "amount-labelled",
                &format!(r"(?i)amount[:\s]+(?:inr|rs\.?|₹)?\s*{NUM}"),
            ),
            AmountRule::new("table-cell", &format!(r"(?i)<td[^>]*>\s*{NUM}\s*</td>")),
            // Transaction phrases
            AmountRule::new(
                "debited-phrase",
                &format!(r"(?i)debited[:\s]+(?:inr|rs\.?|₹)?\s*{NUM}"),
            ),
            AmountRule::new(
                "credited-phrase",
                &format!(r"(?i)credited[:\s]+(?:inr|rs\.?|₹)?\s*{NUM}"),
            ),
            AmountRule::new(
                "paid-phrase",
                &format!(r"(?i)paid[:\s]+(?:inr|rs\.?|₹)?\s*{NUM}"),
            ),
            AmountRule::new(
                "withdrawn-phrase",
                &format!(r"(?i)withdrawn[:\s]+(?:inr|rs\.?|₹)?\s*{NUM}"),
            ),
            AmountRule::new("value-labelled", &format!(r"(?i)value[:\s]*{NUM}")),
            // Generic fallbacks
            AmountRule::new(
                "currency-marked",
                &format!(r"(?i)(?:inr|rs\.?|₹)\s*{NUM}"),
            ),
            AmountRule::new("colon-line", &format!(r"(?m):\s*{NUM}\s*$")),
        ];
        Self { rules }
    }

    /// Build an extractor from a custom rule table.
    pub fn new(rules: Vec<AmountRule>) -> Self {
        Self { rules }
    }

    /// Return the first in-bounds amount, or `None` when no pattern
    /// yields one.
    pub fn extract(&self, text: &str) -> Option<Decimal> {
        for rule in &self.rules {
            let mut rejected = 0usize;
            for caps in rule.regex.captures_iter(text) {
                let Some(raw) = caps.get(1) else { continue };
                let Ok(value) = raw.as_str().replace(',', "").parse::<Decimal>() else {
                    continue;
                };
                if value > Decimal::ZERO && value < MAX_PLAUSIBLE_AMOUNT {
                    debug!(rule = rule.label, %value, "amount accepted");
                    return Some(value.round_dp(2));
                }
                rejected += 1;
            }
            if rejected > 0 {
                debug!(
                    rule = rule.label,
                    rejected, "all candidates out of bounds, trying next pattern"
                );
            }
        }
        None
    }
}

//! Merchant extractor — ordered counterparty patterns with a subject
//! fallback.
//!
//! Structured/labelled fields run first (terminal owner name, merchant
//! name, labelled HTML table cells), then generic prepositional phrases
//! ("at/from/to X"), then bare table cells as the structural last
//! resort. The first candidate passing the acceptance predicate wins.
//! When nothing matches, the subject line is tokenized and the first
//! qualifying token is used; failing that, a sentinel.

use regex::Regex;
use tracing::debug;

/// Sentinel when no counterparty can be recovered.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Maximum length of a cleaned merchant label.
const MAX_MERCHANT_LEN: usize = 30;

/// Subject tokens never usable as a merchant fallback.
const SUBJECT_STOPLIST: [&str; 5] = ["transaction", "debited", "credited", "payment", "alert"];

/// Candidates that are grammatical filler rather than a counterparty.
/// The prepositional patterns would otherwise capture the possessive in
/// phrases like "debited from your account at AMAZON".
const FILLER_WORDS: [&str; 5] = ["your", "you", "the", "this", "account"];

/// A single counterparty pattern with a compiled regex.
///
/// Capture group 1 holds the candidate text.
#[derive(Debug, Clone)]
pub struct MerchantRule {
    /// Short label for diagnostics.
    pub label: &'static str,
    /// Compiled regex for matching.
    pub regex: Regex,
}

impl MerchantRule {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

/// Ordered counterparty pattern table.
pub struct MerchantExtractor {
    rules: Vec<MerchantRule>,
}

impl MerchantExtractor {
    /// The default pattern table.
    pub fn default_patterns() -> Self {
        // Candidate text: letters, digits, spaces, masking asterisks,
        // hyphens, dots. Terminated by a line break or end of text for
        // the labelled-line patterns, by punctuation for the phrase
        // patterns.
        const CAND_LINE: &str = r"([a-z0-9\s*.\-]+?)(?:\r|\n|$)";
        const CAND_WORD: &str = r"([a-z0-9\s*.\-]+?)(?:\s|$|,|\.|;)";
        let rules = vec![
            // Labelled fields in structured notifications
            MerchantRule::new(
                "terminal-owner-name",
                &format!(r"(?i)terminal\s*owner\s*name[:\s]*{CAND_LINE}"),
            ),
            MerchantRule::new(
                "terminal-name",
                &format!(r"(?i)terminal\s*name[:\s]*{CAND_LINE}"),
            ),
            MerchantRule::new(
                "merchant-name",
                &format!(r"(?i)merchant\s*name[:\s]*{CAND_LINE}"),
            ),
            MerchantRule::new("location-line", &format!(r"(?i)location[:\s]*{CAND_LINE}")),
            // Labelled HTML table cells
            MerchantRule::new(
                "terminal-owner-cell",
                r"(?i)<td[^>]*>terminal owner name</td>\s*<td[^>]*>([^<]+)</td>",
            ),
            MerchantRule::new(
                "location-cell",
                r"(?i)<td[^>]*>location</td>\s*<td[^>]*>([^<]+)</td>",
            ),
            MerchantRule::new("bank-cell", r#"(?i)<td[^>]*id="bank"[^>]*>([^<]+)</td>"#),
            MerchantRule::new(
                "term-location-cell",
                r#"(?i)<td[^>]*id="termLocation"[^>]*>([^<]+)</td>"#,
            ),
            // Generic prepositional phrases
            MerchantRule::new(
                "prepositional",
                &format!(r"(?i)(?:at|from|to)\s+{CAND_WORD}"),
            ),
            MerchantRule::new(
                "merchant-labelled",
                &format!(r"(?i)merchant[:\s]+{CAND_WORD}"),
            ),
            MerchantRule::new(
                "transaction-labelled",
                &format!(r"(?i)transaction[:\s]+{CAND_WORD}"),
            ),
            // Bare table cells, structural last resort
            MerchantRule::new("bare-cell", r"(?i)<td[^>]*>([a-z0-9\s*.\-]+?)</td>"),
        ];
        Self { rules }
    }

    /// Build an extractor from a custom rule table.
    pub fn new(rules: Vec<MerchantRule>) -> Self {
        Self { rules }
    }

    /// Extract a counterparty label from subject and body text.
    ///
    /// Always yields a non-empty label of at most 30 characters, falling
    /// back to [`UNKNOWN_MERCHANT`].
    pub fn extract(&self, subject: &str, body: &str) -> String {
        let text = format!("{subject} {body}");
        for rule in &self.rules {
            for caps in rule.regex.captures_iter(&text) {
                let Some(raw) = caps.get(1) else { continue };
                let candidate = raw.as_str().trim().replace('*', "");
                if !is_acceptable(&candidate) {
                    continue;
                }
                let cleaned = clean_merchant_name(&candidate);
                if !cleaned.is_empty() {
                    debug!(rule = rule.label, merchant = %cleaned, "merchant matched");
                    return cleaned;
                }
            }
        }

        // Fall back to the first meaningful subject token.
        let fallback = subject
            .split_whitespace()
            .find(|word| {
                word.chars().count() > 3 && !SUBJECT_STOPLIST.contains(&word.to_lowercase().as_str())
            })
            .map(clean_merchant_name)
            .filter(|cleaned| !cleaned.is_empty());

        match fallback {
            Some(merchant) => {
                debug!(%merchant, "merchant from subject token");
                merchant
            }
            None => UNKNOWN_MERCHANT.to_string(),
        }
    }
}

/// Acceptance predicate for a trimmed, unmasked candidate.
fn is_acceptable(candidate: &str) -> bool {
    let len = candidate.chars().count();
    if len <= 2 || len >= 50 {
        return false;
    }
    let lower = candidate.to_lowercase();
    if lower.contains("bank") || lower.contains("card") {
        return false;
    }
    if candidate.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    !FILLER_WORDS.contains(&lower.as_str())
}

/// Strip everything but word characters, spaces, hyphens and dots;
/// collapse whitespace runs; truncate.
fn clean_merchant_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '.'))
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_MERCHANT_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> MerchantExtractor {
        MerchantExtractor::default_patterns()
    }

    #[test]
    fn labelled_terminal_owner_wins() {
        let body = "Terminal Owner Name: SWIGGY BANGALORE\nAmount (INR): 450.00";
        assert_eq!(extractor().extract("Alert", body), "SWIGGY BANGALORE");
    }

    #[test]
    fn labelled_cell_beats_prepositional_phrase() {
        let body = r#"paid at counter <td>Terminal Owner Name</td><td>DMART HYDERABAD</td>"#;
        assert_eq!(extractor().extract("Alert", body), "DMART HYDERABAD");
    }

    #[test]
    fn masking_asterisks_are_removed() {
        let body = "Merchant Name: AMA**N RETAIL\n";
        assert_eq!(extractor().extract("", body), "AMAN RETAIL");
    }

    #[test]
    fn prepositional_phrase_skips_possessive_filler() {
        let body = "Rs. 1,234.56 debited from your account at AMAZON on 2024-05-01";
        assert_eq!(extractor().extract("Transaction Alert", body), "AMAZON");
    }

    #[test]
    fn candidates_containing_bank_or_card_are_rejected() {
        // "HDFCBANK" fails the predicate; the next match is used.
        let body = "from HDFCBANK info at UDUPI today";
        assert_eq!(extractor().extract("", body), "UDUPI");
    }

    #[test]
    fn purely_numeric_candidates_are_rejected() {
        let body = "at 123456 then at BIGBAZAAR store";
        assert_eq!(extractor().extract("", body), "BIGBAZAAR");
    }

    #[test]
    fn subject_token_fallback_honors_stoplist_and_length() {
        // "SBI" too short, "Alert" stoplisted, "Notice" qualifies.
        assert_eq!(extractor().extract("SBI Alert Notice", "no merchants here"), "Notice");
    }

    #[test]
    fn sentinel_when_nothing_qualifies() {
        // Every subject token is short or stoplisted, the body has no
        // pattern material.
        assert_eq!(extractor().extract("SBI OTP Alert", "987654"), UNKNOWN_MERCHANT);
    }

    #[test]
    fn cleanup_strips_specials_collapses_spaces_and_truncates() {
        assert_eq!(clean_merchant_name("  M/S  ACME   & SONS  "), "MS ACME SONS");
        let long = "A".repeat(40);
        assert_eq!(clean_merchant_name(&long).chars().count(), 30);
    }

    #[test]
    fn result_is_never_longer_than_thirty_chars() {
        let body = "Merchant Name: VERY LONG MERCHANT TRADING COMPANY LTD X\n";
        let merchant = extractor().extract("", body);
        assert!(merchant.chars().count() <= 30);
        assert!(merchant.starts_with("VERY LONG"));
    }
}

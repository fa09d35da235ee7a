//! Institution identifier — sender-domain substring lookup.

/// Sentinel when the sender matches no known institution.
pub const UNKNOWN_BANK: &str = "Unknown Bank";

/// Ordered mapping from lower-cased sender-domain substring to
/// institution display name.
///
/// Entries are scanned in declaration order, so overlapping substrings
/// (a parent domain and a subdomain both present) resolve
/// deterministically to the earlier entry.
pub struct BankDirectory {
    entries: Vec<(String, String)>,
}

impl BankDirectory {
    /// The default institution table.
    pub fn default_directory() -> Self {
        let entries = [
            ("icicibank.com", "ICICI Bank"),
            ("hdfcbank.com", "HDFC Bank"),
            ("axisbank.com", "Axis Bank"),
            ("sbi.co.in", "State Bank of India"),
            ("alerts.sbi.co.in", "State Bank of India"),
            ("kotak.com", "Kotak Mahindra Bank"),
            ("yesbank.in", "Yes Bank"),
            ("pnb.co.in", "Punjab National Bank"),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(domain, name)| (domain.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Build a directory from a custom table. Domain substrings are
    /// stored lower-cased.
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(domain, name)| (domain.to_lowercase(), name))
                .collect(),
        }
    }

    /// Map a sender address to an institution name, case-insensitive.
    pub fn identify(&self, sender: &str) -> &str {
        let sender = sender.to_lowercase();
        self.entries
            .iter()
            .find(|(domain, _)| sender.contains(domain))
            .map(|(_, name)| name.as_str())
            .unwrap_or(UNKNOWN_BANK)
    }
}

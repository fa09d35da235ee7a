//! Category classifier — ordered keyword tables over merchant + content.
//!
//! Categories are scanned in table order and keywords in list order; the
//! first keyword found as a substring of the combined lower-cased text
//! wins. No scoring, no weighting — declaration order is the tie-break.

/// Sentinel when no category keyword matches.
pub const OTHER_CATEGORY: &str = "Others";

/// One category and its keyword list.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered category keyword table.
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// The default category table.
    pub fn default_table() -> Self {
        let table: [(&str, &[&str]); 9] = [
            (
                "Shopping",
                &[
                    "amazon", "flipkart", "myntra", "ajio", "shopping", "mall", "store", "market",
                    "retail", "purchase", "bigbasket", "grofers", "blinkit",
                ],
            ),
            (
                "Food & Dining",
                &[
                    "swiggy", "zomato", "dominos", "pizza", "restaurant", "cafe", "food", "dining",
                    "mcdonald", "kfc", "burger", "starbucks", "dunkin",
                ],
            ),
            (
                "Transportation",
                &[
                    "uber", "ola", "rapido", "metro", "bus", "taxi", "auto", "petrol", "fuel",
                    "diesel", "gas", "parking", "toll", "travel",
                ],
            ),
            (
                "Entertainment",
                &[
                    "netflix",
                    "amazon prime",
                    "disney",
                    "hotstar",
                    "spotify",
                    "youtube",
                    "movie",
                    "cinema",
                    "theatre",
                    "bookmyshow",
                    "entertainment",
                    "music",
                ],
            ),
            (
                "Utilities",
                &[
                    "electricity",
                    "power",
                    "gas",
                    "water",
                    "internet",
                    "broadband",
                    "wifi",
                    "mobile",
                    "phone",
                    "recharge",
                    "bill",
                    "utility",
                    "bsnl",
                    "airtel",
                    "jio",
                ],
            ),
            (
                "Banking",
                &[
                    "bank", "atm", "interest", "fd", "deposit", "loan", "emi", "credit", "debit",
                    "transfer", "payment", "fee", "charge",
                ],
            ),
            (
                "Healthcare",
                &[
                    "hospital", "clinic", "pharmacy", "medicine", "doctor", "medical", "health",
                    "apollo", "fortis", "1mg", "pharmeasy",
                ],
            ),
            (
                "Travel",
                &[
                    "flight",
                    "airline",
                    "hotel",
                    "booking",
                    "makemytrip",
                    "goibibo",
                    "cleartrip",
                    "indigo",
                    "spicejet",
                    "air india",
                    "vacation",
                ],
            ),
            (
                "Groceries",
                &[
                    "grocery",
                    "vegetables",
                    "fruits",
                    "milk",
                    "bread",
                    "supermarket",
                    "hypermarket",
                    "dmart",
                    "more",
                    "reliance fresh",
                    "spencer",
                ],
            ),
        ];
        let rules = table
            .into_iter()
            .map(|(name, keywords)| CategoryRule {
                name: name.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// Build a classifier from a custom table.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Classify from merchant text plus full content text.
    pub fn classify(&self, merchant: &str, content: &str) -> &str {
        let text = format!("{merchant} {content}").to_lowercase();
        for rule in &self.rules {
            for keyword in &rule.keywords {
                if text.contains(keyword.as_str()) {
                    return &rule.name;
                }
            }
        }
        OTHER_CATEGORY
    }
}

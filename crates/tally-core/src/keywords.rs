//! Built-in keyword rules used when no learned association matches
//!
//! The table is an ordered slice: categories are checked top to bottom and each
//! category's keywords left to right, so a description that contains keywords
//! from several categories always resolves to the same one.

/// A fixed category with its trigger keywords (lower-case substrings)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

/// Default keyword table. Order is significant.
pub static KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: "Food",
        keywords: &[
            "food",
            "restaurant",
            "pizza",
            "burger",
            "snack",
            "canteen",
            "grocery",
            "zomato",
            "swiggy",
        ],
    },
    KeywordRule {
        category: "Transport",
        keywords: &[
            "uber", "bus", "cab", "metro", "train", "fuel", "petrol", "diesel", "taxi",
        ],
    },
    KeywordRule {
        category: "Utilities",
        keywords: &[
            "bill",
            "rent",
            "wifi",
            "electricity",
            "water",
            "gas",
            "maintenance",
        ],
    },
    KeywordRule {
        category: "Entertainment",
        keywords: &[
            "movie", "game", "netflix", "prime", "spotify", "cinema", "recharge",
        ],
    },
    KeywordRule {
        category: "Health",
        keywords: &[
            "doctor", "medicine", "hospital", "pharmacy", "gym", "fitness",
        ],
    },
    KeywordRule {
        category: "Shopping",
        keywords: &[
            "amazon",
            "flipkart",
            "shopping",
            "myntra",
            "clothes",
            "electronics",
        ],
    },
    KeywordRule {
        category: "Education",
        keywords: &[
            "book", "tuition", "course", "school", "college", "exam", "fees",
        ],
    },
];

impl KeywordRule {
    /// First keyword of this rule contained in `normalized`, if any
    pub fn matching_keyword(&self, normalized: &str) -> Option<&'static str> {
        self.keywords
            .iter()
            .copied()
            .find(|kw| normalized.contains(kw))
    }
}

/// Find the default category for already-normalized text
pub fn lookup(normalized: &str) -> Option<&'static str> {
    KEYWORD_RULES
        .iter()
        .find(|rule| rule.matching_keyword(normalized).is_some())
        .map(|rule| rule.category)
}

/// Normalize a description for matching: lower-case and trim
pub fn normalize(description: &str) -> String {
    description.trim().to_lowercase()
}

//! Expense categorization engine
//!
//! Suggests a category (and an expected amount) for a free-text expense
//! description and learns from expenses the user confirms.
//!
//! Priority: learned associations (user confirmations) → built-in keyword
//! rules → "Other".
//!
//! Learned keys are lower-cased, trimmed descriptions matched as substrings of
//! the incoming description. When several learned keys match, the winner is
//! picked by [`MatchPolicy`], never by map iteration order.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::keywords::{self, KEYWORD_RULES};
use crate::store::ExpenseStore;

/// Category returned when nothing matches
pub const DEFAULT_CATEGORY: &str = "Other";

/// How to choose between several learned keys found in one description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Longest key wins; equal lengths go to the most recently learned key
    #[default]
    LongestKey,
    /// Most recently learned key wins regardless of length
    MostRecent,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LongestKey => "longest",
            Self::MostRecent => "recent",
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "longest" | "longest_key" => Ok(Self::LongestKey),
            "recent" | "most_recent" => Ok(Self::MostRecent),
            _ => Err(format!("Unknown match policy: {}", s)),
        }
    }
}

/// Where a suggested category came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Matched a learned association
    Learned,
    /// Matched a built-in keyword rule
    Keyword,
    /// Nothing matched
    Default,
}

impl SuggestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learned => "learned",
            Self::Keyword => "keyword",
            Self::Default => "default",
        }
    }
}

/// A category suggestion with the reason it was chosen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub category: String,
    pub source: SuggestionSource,
    /// The learned key or keyword that matched
    pub matched: Option<String>,
}

impl Suggestion {
    fn fallback() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            source: SuggestionSource::Default,
            matched: None,
        }
    }
}

/// A learned description key and the category it maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedAssociation {
    pub key: String,
    pub category: String,
}

/// Every amount learned for a category, in learning order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmountHistory {
    pub category: String,
    pub amounts: Vec<f64>,
}

/// Serializable copy of the learned state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnedSnapshot {
    /// Associations in learning order (oldest first)
    pub associations: Vec<LearnedAssociation>,
    /// Histories sorted by category name
    pub histories: Vec<CategoryAmountHistory>,
}

/// Result of rebuilding learned state from a store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayResult {
    pub expenses_processed: usize,
    pub expenses_learned: usize,
    /// Rows with a missing description or category
    pub expenses_skipped: usize,
}

#[derive(Debug, Clone)]
struct LearnedEntry {
    category: String,
    /// Bumped on every learn that touches this key
    seq: u64,
}

#[derive(Debug, Default)]
struct LearnedState {
    associations: HashMap<String, LearnedEntry>,
    histories: HashMap<String, Vec<f64>>,
    next_seq: u64,
}

impl LearnedState {
    fn upsert(&mut self, key: String, category: &str, amount: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.associations.insert(
            key,
            LearnedEntry {
                category: category.to_string(),
                seq,
            },
        );
        self.histories
            .entry(category.to_string())
            .or_default()
            .push(amount);
    }

    fn best_learned_match(&self, normalized: &str, policy: MatchPolicy) -> Option<(&str, &str)> {
        let candidates = self
            .associations
            .iter()
            .filter(|(key, _)| normalized.contains(key.as_str()));

        let best = match policy {
            MatchPolicy::LongestKey => {
                candidates.max_by_key(|(key, entry)| (key.chars().count(), entry.seq))
            }
            MatchPolicy::MostRecent => candidates.max_by_key(|(_, entry)| entry.seq),
        };

        best.map(|(key, entry)| (key.as_str(), entry.category.as_str()))
    }

    fn suggest(&self, description: &str, policy: MatchPolicy) -> Suggestion {
        let normalized = keywords::normalize(description);
        if normalized.is_empty() {
            return Suggestion::fallback();
        }

        if let Some((key, category)) = self.best_learned_match(&normalized, policy) {
            debug!(
                "Learned pattern matched for '{}': {} (key '{}')",
                normalized, category, key
            );
            return Suggestion {
                category: category.to_string(),
                source: SuggestionSource::Learned,
                matched: Some(key.to_string()),
            };
        }

        for rule in KEYWORD_RULES {
            if let Some(kw) = rule.matching_keyword(&normalized) {
                debug!(
                    "Keyword matched for '{}': {} (keyword '{}')",
                    normalized, rule.category, kw
                );
                return Suggestion {
                    category: rule.category.to_string(),
                    source: SuggestionSource::Keyword,
                    matched: Some(kw.to_string()),
                };
            }
        }

        debug!("Falling back to '{}' for '{}'", DEFAULT_CATEGORY, normalized);
        Suggestion::fallback()
    }

    fn associations_in_order(&self) -> Vec<LearnedAssociation> {
        let mut entries: Vec<_> = self.associations.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.seq);
        entries
            .into_iter()
            .map(|(key, entry)| LearnedAssociation {
                key: key.clone(),
                category: entry.category.clone(),
            })
            .collect()
    }

    fn mean_amount(&self, category: &str) -> f64 {
        match self.histories.get(category) {
            Some(amounts) if !amounts.is_empty() => {
                amounts.iter().sum::<f64>() / amounts.len() as f64
            }
            _ => 0.0,
        }
    }
}

/// Categorization engine holding the learned associations and amount histories
///
/// Both maps sit behind one `RwLock`, so readers never see a key whose
/// category or history is only partly written. Suggestions take the read lock
/// and may run in parallel; `learn` takes the write lock.
#[derive(Debug, Default)]
pub struct Categorizer {
    policy: MatchPolicy,
    state: RwLock<LearnedState>,
}

impl Categorizer {
    /// Create an empty engine
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            state: RwLock::new(LearnedState::default()),
        }
    }

    /// Build an engine by replaying every stored expense
    pub fn from_store<S: ExpenseStore + ?Sized>(policy: MatchPolicy, store: &S) -> Result<Self> {
        let categorizer = Self::new(policy);
        categorizer.replay(store)?;
        Ok(categorizer)
    }

    /// Build an engine from a snapshot
    ///
    /// Associations are re-learned in snapshot order so recency survives the
    /// round-trip. Histories are restored as given.
    pub fn restore(policy: MatchPolicy, snapshot: LearnedSnapshot) -> Self {
        let mut state = LearnedState::default();

        for assoc in snapshot.associations {
            let key = keywords::normalize(&assoc.key);
            if key.is_empty() {
                continue;
            }
            let seq = state.next_seq;
            state.next_seq += 1;
            state.associations.insert(
                key,
                LearnedEntry {
                    category: assoc.category,
                    seq,
                },
            );
        }

        for history in snapshot.histories {
            state
                .histories
                .entry(history.category)
                .or_default()
                .extend(history.amounts);
        }

        Self {
            policy,
            state: RwLock::new(state),
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    fn read(&self) -> RwLockReadGuard<'_, LearnedState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LearnedState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Suggest a category for a description. Never fails; unmatched or blank
    /// input yields "Other".
    pub fn suggest_category(&self, description: &str) -> String {
        self.explain(description).category
    }

    /// Like [`suggest_category`](Self::suggest_category) but reports which rule matched
    pub fn explain(&self, description: &str) -> Suggestion {
        self.read().suggest(description, self.policy)
    }

    /// Mean of past amounts for the suggested category, or 0 with no history
    pub fn suggest_amount(&self, description: &str) -> f64 {
        let state = self.read();
        let suggestion = state.suggest(description, self.policy);
        state.mean_amount(&suggestion.category)
    }

    /// Record a confirmed expense
    ///
    /// Blank descriptions are ignored. The normalized description becomes a
    /// learned key for `category` (replacing any earlier category for that key)
    /// and `amount` is appended to the category's history. Amounts already
    /// recorded under a previous category for the same key stay there.
    pub fn learn(&self, description: &str, category: &str, amount: f64) {
        self.try_learn(description, category, amount);
    }

    /// Returns false when the input was ignored
    fn try_learn(&self, description: &str, category: &str, amount: f64) -> bool {
        let key = keywords::normalize(description);
        if key.is_empty() {
            debug!("Ignoring learn with blank description");
            return false;
        }
        if !amount.is_finite() {
            warn!("Ignoring learn for '{}': amount {} is not finite", key, amount);
            return false;
        }

        debug!("Learning '{}' → {} ({})", key, category, amount);
        self.write().upsert(key, category, amount);
        true
    }

    /// Learn every stored expense in insertion order
    ///
    /// Rows without a description or category are skipped, as are rows
    /// `learn` itself would ignore.
    pub fn replay<S: ExpenseStore + ?Sized>(&self, store: &S) -> Result<ReplayResult> {
        let mut result = ReplayResult::default();

        for expense in store.expenses_in_order()? {
            result.expenses_processed += 1;
            let learned = match (&expense.description, &expense.category) {
                (Some(description), Some(category)) => {
                    self.try_learn(description, category, expense.amount)
                }
                _ => false,
            };
            if learned {
                result.expenses_learned += 1;
            } else {
                result.expenses_skipped += 1;
            }
        }

        info!(
            "Replayed {} expenses ({} learned, {} skipped)",
            result.expenses_processed, result.expenses_learned, result.expenses_skipped
        );
        Ok(result)
    }

    /// Learned associations, oldest first
    pub fn learned_associations(&self) -> Vec<LearnedAssociation> {
        self.read().associations_in_order()
    }

    /// Learned category for an exact key, if any
    pub fn learned_category(&self, description: &str) -> Option<String> {
        let key = keywords::normalize(description);
        self.read()
            .associations
            .get(&key)
            .map(|entry| entry.category.clone())
    }

    /// Amounts recorded for a category, in learning order
    pub fn category_history(&self, category: &str) -> Vec<f64> {
        self.read()
            .histories
            .get(category)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of learned keys
    pub fn len(&self) -> usize {
        self.read().associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the learned state into a serializable snapshot
    pub fn snapshot(&self) -> LearnedSnapshot {
        let state = self.read();
        let histories: BTreeMap<String, Vec<f64>> = state
            .histories
            .iter()
            .map(|(category, amounts)| (category.clone(), amounts.clone()))
            .collect();

        LearnedSnapshot {
            associations: state.associations_in_order(),
            histories: histories
                .into_iter()
                .map(|(category, amounts)| CategoryAmountHistory { category, amounts })
                .collect(),
        }
    }
}

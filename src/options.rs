//! The Option List: the fixed set of strings a recommendation is drawn from.
//!
//! An `OptionList` is built once at startup and never mutated. Construction
//! rejects an empty list, so every draw afterwards is defined.

use std::sync::Arc;

use rand::Rng;

/// Built-in lunch options served by `GET /recommendation`.
pub const LUNCH_OPTIONS: [&str; 5] = ["Sushi", "Pizza", "Burrito", "Ramen", "Tacos"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionListError {
    #[error("Option list must contain at least one entry")]
    Empty,
}

/// Immutable, non-empty list of recommendation candidates.
///
/// Cloning is cheap: the entries live behind an `Arc` and are shared by all
/// request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
    items: Arc<[String]>,
}

impl OptionList {
    /// Creates a list from the given entries, preserving their order.
    pub fn new<I, S>(items: I) -> Result<Self, OptionListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(OptionListError::Empty);
        }
        Ok(Self {
            items: items.into(),
        })
    }

    /// The built-in lunch list.
    pub fn lunch() -> Self {
        Self {
            items: LUNCH_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Draws an entry uniformly at random using the supplied generator.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction, so the range is never empty
        let index = rng.gen_range(0..self.items.len());
        &self.items[index]
    }

    /// Draws an entry uniformly at random using the thread-local generator.
    pub fn pick(&self) -> &str {
        self.choose(&mut rand::thread_rng())
    }

    /// Whether `value` is one of the entries (exact, case-sensitive match).
    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }

    /// Entries in their original order.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Number of entries (always at least one).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Default for OptionList {
    fn default() -> Self {
        Self::lunch()
    }
}

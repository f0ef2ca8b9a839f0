//! Shared application state for request handlers.

use crate::options::OptionList;

/// Shared application state, cloneable across handlers.
///
/// Holds the read-only Option List; handlers never mutate it, so no locking
/// is involved.
#[derive(Clone, Debug)]
pub struct AppState {
    pub options: OptionList,
}

impl AppState {
    /// Creates a new application state around the given Option List.
    pub fn new(options: OptionList) -> Self {
        Self { options }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(OptionList::lunch())
    }
}

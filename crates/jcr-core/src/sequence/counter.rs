//! Monthly document counter state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Next available sequence number per calendar month.
///
/// Keys are month numbers rendered as strings (`"1"`..`"12"`), which is
/// also the on-disk representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterState(BTreeMap<String, u32>);

impl CounterState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// State holding only `month`, restarted at 1.
    ///
    /// This is the reset operation: every other month is discarded.
    pub fn reset(month: u32) -> Self {
        let mut state = Self::new();
        state.set(month, 1);
        state
    }

    /// Start-of-batch state: the stored value, or a fresh one, with an
    /// entry for `month` guaranteed.
    pub fn load_or_default(stored: Option<CounterState>, month: u32) -> Self {
        let mut state = stored.unwrap_or_default();
        state.0.entry(month.to_string()).or_insert(1);
        state
    }

    /// Next sequence number for `month` (1 when unknown).
    pub fn next(&self, month: u32) -> u32 {
        self.get(month).unwrap_or(1)
    }

    pub fn get(&self, month: u32) -> Option<u32> {
        self.0.get(&month.to_string()).copied()
    }

    pub fn set(&mut self, month: u32, next: u32) {
        self.0.insert(month.to_string(), next);
    }

    /// Stored entries as `(month key, next sequence)`.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(u32, u32)> for CounterState {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (month, next) in iter {
            state.set(month, next);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_missing() {
        let state = CounterState::load_or_default(None, 6);
        assert_eq!(state, CounterState::from_iter([(6, 1)]));
    }

    #[test]
    fn test_missing_month_added_others_kept() {
        let stored = CounterState::from_iter([(5, 12)]);
        let state = CounterState::load_or_default(Some(stored), 6);

        assert_eq!(state.get(5), Some(12));
        assert_eq!(state.get(6), Some(1));
    }

    #[test]
    fn test_existing_month_untouched() {
        let stored = CounterState::from_iter([(6, 5)]);
        let state = CounterState::load_or_default(Some(stored), 6);
        assert_eq!(state.next(6), 5);
    }

    #[test]
    fn test_reset_discards_other_months() {
        let state = CounterState::reset(6);

        assert_eq!(state.entries().collect::<Vec<_>>(), vec![("6", 1)]);
    }

    #[test]
    fn test_json_shape() {
        let state = CounterState::from_iter([(6, 8), (7, 2)]);
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"6":8,"7":2}"#);

        let parsed: CounterState = serde_json::from_str(r#"{"12": 40}"#).unwrap();
        assert_eq!(parsed.next(12), 40);
    }
}

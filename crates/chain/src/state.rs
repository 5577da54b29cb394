//! State labels for finite Markov chains.
//!
//! States are numbered `1..=N` at the public boundary and stored 0-indexed
//! internally. [`StateId`] is the only place the two numberings meet.

use crate::error::ChainError;

/// A 1-indexed state label that has been checked against a chain size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    /// Creates a state label, checking it lies in `1..=n_states`.
    pub fn new(label: usize, n_states: usize) -> Result<Self, ChainError> {
        if label == 0 || label > n_states {
            return Err(ChainError::StateOutOfRange {
                state: label,
                n_states,
            });
        }
        Ok(Self(label - 1))
    }

    /// Creates a state label from a 0-based storage index.
    ///
    /// Only for indices already known to lie inside a chain; callers outside
    /// this crate go through [`StateId::new`] or
    /// [`TransitionMatrix::states`](crate::TransitionMatrix::states).
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based storage index.
    pub fn as_index(self) -> usize {
        self.0
    }

    /// Returns the 1-indexed label.
    pub fn label(self) -> usize {
        self.0 + 1
    }

    /// Converts a slice of 1-indexed labels into checked state ids.
    pub fn from_labels(labels: &[usize], n_states: usize) -> Result<Vec<Self>, ChainError> {
        labels.iter().map(|&l| Self::new(l, n_states)).collect()
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_and_index() {
        let s = StateId::new(1, 4).unwrap();
        assert_eq!(s.as_index(), 0);
        assert_eq!(s.label(), 1);

        let s = StateId::new(4, 4).unwrap();
        assert_eq!(s.as_index(), 3);
        assert_eq!(s.label(), 4);
    }

    #[test]
    fn zero_label_rejected() {
        assert!(matches!(
            StateId::new(0, 4),
            Err(ChainError::StateOutOfRange {
                state: 0,
                n_states: 4
            })
        ));
    }

    #[test]
    fn label_past_end_rejected() {
        assert!(matches!(
            StateId::new(5, 4),
            Err(ChainError::StateOutOfRange {
                state: 5,
                n_states: 4
            })
        ));
    }

    #[test]
    fn from_index_round_trip() {
        for i in 0..10 {
            assert_eq!(StateId::from_index(i).as_index(), i);
            assert_eq!(StateId::from_index(i).label(), i + 1);
        }
    }

    #[test]
    fn from_labels_preserves_order() {
        let ids = StateId::from_labels(&[4, 1], 4).unwrap();
        assert_eq!(ids.iter().map(|s| s.as_index()).collect::<Vec<_>>(), [3, 0]);
    }

    #[test]
    fn display_is_label() {
        assert_eq!(StateId::from_index(2).to_string(), "3");
    }

    #[test]
    fn trait_assertions() {
        fn assert_copy<T: Copy>() {}
        fn assert_eq<T: Eq>() {}
        fn assert_hash<T: std::hash::Hash>() {}
        assert_copy::<StateId>();
        assert_eq::<StateId>();
        assert_hash::<StateId>();
    }
}

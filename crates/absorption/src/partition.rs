//! Partition of a chain's states into absorbing and transient sets.

use chainval_chain::{StateId, TransitionMatrix};

use crate::error::AbsorptionError;

/// Absorbing and transient states of an absorbing chain.
///
/// The order of each list is significant: transient states index the rows of
/// every result matrix and absorbing states index the columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePartition {
    absorbing: Vec<StateId>,
    transient: Vec<StateId>,
    /// Column of each state in the absorbing list, `None` for transient states.
    column_of: Vec<Option<usize>>,
}

impl StatePartition {
    /// Builds a partition from 1-indexed state labels.
    ///
    /// # Errors
    ///
    /// Returns [`AbsorptionError::Chain`] if a label is out of range, and
    /// [`AbsorptionError::InvalidPartition`] if either list is empty, a state
    /// is listed twice, the lists don't cover every state, or a state listed
    /// as absorbing can be left (see [`TransitionMatrix::is_absorbing`]).
    pub fn new(
        matrix: &TransitionMatrix,
        absorbing: &[usize],
        transient: &[usize],
    ) -> Result<Self, AbsorptionError> {
        let n = matrix.n_states();
        let absorbing = StateId::from_labels(absorbing, n)?;
        let transient = StateId::from_labels(transient, n)?;
        Self::from_states(matrix, absorbing, transient)
    }

    /// Derives the partition from the matrix itself.
    ///
    /// States that can never be left are absorbing; every other state is
    /// transient. Both lists are in ascending label order.
    pub fn infer(matrix: &TransitionMatrix) -> Result<Self, AbsorptionError> {
        let absorbing = matrix.absorbing_states();
        let transient = matrix
            .states()
            .filter(|s| !absorbing.contains(s))
            .collect();
        Self::from_states(matrix, absorbing, transient)
    }

    fn from_states(
        matrix: &TransitionMatrix,
        absorbing: Vec<StateId>,
        transient: Vec<StateId>,
    ) -> Result<Self, AbsorptionError> {
        let n = matrix.n_states();
        if absorbing.is_empty() {
            return Err(AbsorptionError::InvalidPartition {
                reason: "no absorbing states".to_string(),
            });
        }
        if transient.is_empty() {
            return Err(AbsorptionError::InvalidPartition {
                reason: "no transient states".to_string(),
            });
        }

        let mut seen = vec![false; n];
        for &s in absorbing.iter().chain(transient.iter()) {
            if std::mem::replace(&mut seen[s.as_index()], true) {
                return Err(AbsorptionError::InvalidPartition {
                    reason: format!("state {s} listed more than once"),
                });
            }
        }
        if let Some(missing) = seen.iter().position(|&v| !v) {
            return Err(AbsorptionError::InvalidPartition {
                reason: format!(
                    "state {} is neither absorbing nor transient",
                    missing + 1
                ),
            });
        }

        for &s in &absorbing {
            if !matrix.is_absorbing(s) {
                return Err(AbsorptionError::InvalidPartition {
                    reason: format!(
                        "state {s} listed as absorbing but its self-transition is {}",
                        matrix.prob(s, s)?
                    ),
                });
            }
        }

        let mut column_of = vec![None; n];
        for (col, &s) in absorbing.iter().enumerate() {
            column_of[s.as_index()] = Some(col);
        }

        Ok(Self {
            absorbing,
            transient,
            column_of,
        })
    }

    /// Returns the absorbing states in column order.
    pub fn absorbing(&self) -> &[StateId] {
        &self.absorbing
    }

    /// Returns the transient states in row order.
    pub fn transient(&self) -> &[StateId] {
        &self.transient
    }

    /// Number of states the partition covers.
    pub fn n_states(&self) -> usize {
        self.column_of.len()
    }

    /// Returns the result column of an absorbing state, or `None` if `state`
    /// is transient or not part of the partitioned chain.
    pub fn absorbing_column(&self, state: StateId) -> Option<usize> {
        self.column_of.get(state.as_index()).copied().flatten()
    }

    /// Checks that this partition was built for a chain the size of `matrix`.
    pub(crate) fn check_matches(
        &self,
        matrix: &TransitionMatrix,
    ) -> Result<(), AbsorptionError> {
        if self.n_states() != matrix.n_states() {
            return Err(AbsorptionError::InvalidPartition {
                reason: format!(
                    "partition covers {} states but the matrix has {}",
                    self.n_states(),
                    matrix.n_states()
                ),
            });
        }
        Ok(())
    }
}

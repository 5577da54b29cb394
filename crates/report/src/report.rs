//! Serializable reports pairing exact and simulated results.
//!
//! Both report types print as a plain-text, state-by-state summary through
//! [`std::fmt::Display`] and serialize to JSON through [`to_json`]. Values
//! are written with Rust's shortest round-trip formatting, never rounded.

use std::fmt;

use serde::Serialize;

use crate::comparison::{Comparison, ComparisonCell, Shape};
use crate::error::ReportError;

/// Absorption probabilities: exact versus simulated, per transient/absorbing pair.
#[derive(Debug, Clone, Serialize)]
pub struct AbsorptionReport {
    /// Rows are transient states, columns absorbing states.
    pub comparison: Comparison,
    /// Expected transitions before absorption, per transient state.
    pub expected_steps: Vec<f64>,
    pub n_trajectories: usize,
    pub seed: u64,
}

impl AbsorptionReport {
    /// # Errors
    ///
    /// Returns [`ReportError::ShapeMismatch`] unless `comparison` is a matrix
    /// with one row per entry of `expected_steps`.
    pub fn new(
        comparison: Comparison,
        expected_steps: Vec<f64>,
        n_trajectories: usize,
        seed: u64,
    ) -> Result<Self, ReportError> {
        match comparison.shape() {
            Shape::Matrix { rows, .. } if rows == expected_steps.len() => Ok(Self {
                comparison,
                expected_steps,
                n_trajectories,
                seed,
            }),
            Shape::Matrix { rows, cols } => Err(ReportError::ShapeMismatch {
                exact: (rows, cols),
                simulated: (expected_steps.len(), cols),
            }),
            Shape::Vector { len } => Err(ReportError::ShapeMismatch {
                exact: (len, 1),
                simulated: (expected_steps.len(), 1),
            }),
        }
    }
}

/// One complex eigenvalue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EigenvalueEntry {
    pub re: f64,
    pub im: f64,
}

impl From<(f64, f64)> for EigenvalueEntry {
    fn from((re, im): (f64, f64)) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for EigenvalueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

/// Stationary distribution: both exact methods against the simulated
/// occupancy frequencies.
#[derive(Debug, Clone, Serialize)]
pub struct StationaryReport {
    /// Eigenvector method versus simulation.
    pub eigen: Comparison,
    /// Matrix-power method versus simulation.
    pub power: Comparison,
    pub eigenvalues: Vec<EigenvalueEntry>,
    pub selected_eigenvalue: EigenvalueEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eigenvalue_warning: Option<String>,
    pub power_exponent: u32,
    pub n_observations: u64,
    pub seed: u64,
}

/// Serialize a report to a pretty-printed JSON string.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialization {
        reason: e.to_string(),
    })
}

impl fmt::Display for AbsorptionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = match self.comparison.shape() {
            Shape::Matrix { cols, .. } => cols.max(1),
            Shape::Vector { .. } => 1,
        };
        let rows: Vec<_> = self.comparison.cells().chunks(cols).collect();

        writeln!(
            f,
            "from simulation ({} trajectories, seed {}):",
            self.n_trajectories, self.seed
        )?;
        for row in &rows {
            write_absorption_row(f, row, |c| c.simulated)?;
        }

        writeln!(f)?;
        writeln!(f, "from exact calculation:")?;
        for row in &rows {
            write_absorption_row(f, row, |c| c.exact)?;
        }

        writeln!(f)?;
        writeln!(f, "difference between simulation and calculation:")?;
        for cell in self.comparison.cells() {
            writeln!(
                f,
                "  f({},{}): {}",
                cell.row,
                cell.col.unwrap_or(1),
                cell.difference
            )?;
        }

        writeln!(f)?;
        writeln!(f, "expected steps before absorption:")?;
        for (row, steps) in rows.iter().zip(&self.expected_steps) {
            if let Some(first) = row.first() {
                writeln!(f, "  state {}: {}", first.row, steps)?;
            }
        }
        Ok(())
    }
}

fn write_absorption_row(
    f: &mut fmt::Formatter<'_>,
    row: &[ComparisonCell],
    value: impl Fn(&ComparisonCell) -> f64,
) -> fmt::Result {
    let Some(first) = row.first() else {
        return Ok(());
    };
    write!(f, "  starting from state {}:", first.row)?;
    for (k, cell) in row.iter().enumerate() {
        let sep = if k == 0 { "" } else { "," };
        write!(
            f,
            "{sep} f({},{}) = {}",
            cell.row,
            cell.col.unwrap_or(1),
            value(cell)
        )?;
    }
    writeln!(f)
}

impl fmt::Display for StationaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eigenvalues:")?;
        for ev in &self.eigenvalues {
            write!(f, " {ev}")?;
        }
        writeln!(f)?;
        writeln!(f, "selected eigenvalue: {}", self.selected_eigenvalue)?;
        if let Some(warning) = &self.eigenvalue_warning {
            writeln!(f, "warning: {warning}")?;
        }

        writeln!(f)?;
        writeln!(f, "stationary state from eigenvector:")?;
        write_states(f, &self.eigen, |c| c.exact)?;

        writeln!(f)?;
        writeln!(
            f,
            "stationary state from matrix power (exponent {}):",
            self.power_exponent
        )?;
        write_states(f, &self.power, |c| c.exact)?;

        writeln!(f)?;
        writeln!(
            f,
            "stationary state from simulation ({} observations, seed {}):",
            self.n_observations, self.seed
        )?;
        write_states(f, &self.eigen, |c| c.simulated)?;

        writeln!(f)?;
        writeln!(f, "difference between simulation and eigenvector:")?;
        write_states(f, &self.eigen, |c| c.difference)?;

        writeln!(f)?;
        writeln!(f, "difference between simulation and matrix power:")?;
        write_states(f, &self.power, |c| c.difference)
    }
}

fn write_states(
    f: &mut fmt::Formatter<'_>,
    comparison: &Comparison,
    value: impl Fn(&ComparisonCell) -> f64,
) -> fmt::Result {
    for cell in comparison.cells() {
        writeln!(f, "  state {}: {}", cell.row, value(cell))?;
    }
    Ok(())
}

//! Exact-versus-simulated comparisons and the reports built on them.
//!
//! A [`Comparison`] pairs two equally shaped results element by element and
//! records `simulated - exact` for each cell without rounding. The report
//! types bundle comparisons with run metadata and render as text
//! ([`std::fmt::Display`]) or JSON ([`to_json`]).
//!
//! ```rust
//! use chainval_report::Comparison;
//! use ndarray::array;
//!
//! let exact = array![0.25, 0.75];
//! let simulated = array![0.3, 0.7];
//! let cmp = Comparison::vectors(exact.view(), simulated.view()).unwrap();
//! assert!((cmp.max_abs_difference() - 0.05).abs() < 1e-12);
//! ```

pub mod comparison;
pub mod error;
pub mod report;

pub use comparison::{Comparison, ComparisonCell, Shape};
pub use error::ReportError;
pub use report::{AbsorptionReport, EigenvalueEntry, StationaryReport, to_json};

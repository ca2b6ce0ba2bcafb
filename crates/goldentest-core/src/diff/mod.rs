//! Structural diff engine.
//!
//! Compares the structural views of a reference value and a fresh value and
//! reports every differing path, minus the ignored ones.
//!
//! ## Entry point
//!
//! ```
//! use goldentest_core::diff::{compute_diff, render_report, IgnoreSet};
//! use serde_json::json;
//!
//! let want = json!({"name": "bla", "ts": 1});
//! let got = json!({"name": "blb", "ts": 2});
//! let diff = compute_diff(&want, &got, &IgnoreSet::new(["ts"]));
//! assert_eq!(diff.len(), 1);
//! assert!(render_report(&diff).contains("name"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: object keys are visited in sorted order, arrays by position.
//! - **Empty means equal**: the rendered report is `""` exactly when no path differs.

pub mod engine;
pub mod model;
pub mod report;

pub use engine::{compute_diff, IgnoreSet};
pub use model::{Change, DiffEntry, StructuralDiff};
pub use report::{render_report, REPORT_HEADER};

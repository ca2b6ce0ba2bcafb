//! goldentest core - golden-file comparison engine
//!
//! This crate persists computed values as reference ("golden") files and
//! compares fresh values against them, including:
//! - A generic, immutable-by-convention [`Golden`] handle per golden file
//! - Pluggable encoders: plain JSON and proto3 JSON for schema messages
//! - Field-aware structural diffs with ignored dotted field paths
//! - Batch compares with positional alignment
//! - Structured errors and structured logging for every operation

pub mod diff;
pub mod encoder;
pub mod errors;
pub mod golden;
pub mod logging_facility;
pub mod mode;
pub mod outcome;

// Re-export commonly used types
pub use encoder::{Encoder, JsonEncoder, ProtoJsonEncoder, Shape};
pub use errors::{GoldenError, GoldenErrorKind, Result};
pub use golden::{Golden, Hook};
pub use mode::GoldenMode;
pub use outcome::{BatchOutcome, BatchResult, CompareError, CompareOutcome, CompareResult};

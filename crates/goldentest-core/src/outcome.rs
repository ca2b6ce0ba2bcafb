//! Comparison results.

use crate::errors::GoldenError;
use std::collections::BTreeMap;

/// Result of comparing one reference value against one fresh value.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOutcome<T> {
    /// Value decoded from the golden file
    pub reference: T,
    /// Value computed by the caller
    pub fresh: T,
    /// Rendered structural diff; empty iff the values are equal
    pub diff: String,
}

impl<T> CompareOutcome<T> {
    pub fn new(reference: T, fresh: T, diff: String) -> Self {
        Self {
            reference,
            fresh,
            diff,
        }
    }

    /// True when no difference was found
    pub fn is_ok(&self) -> bool {
        self.diff.is_empty()
    }
}

/// Differing positions of a batch compare. Equal positions are absent.
pub type BatchOutcome<T> = BTreeMap<usize, CompareOutcome<T>>;

/// A compare that stopped early.
///
/// `error` is authoritative. `partial` holds whatever was computed before the
/// failure and is diagnostic only: `None` or an empty map when nothing was
/// compared, an outcome with an empty diff when a hook vetoed a single
/// compare, the differing positions seen so far when a hook vetoed a batch.
#[derive(Debug, Clone)]
pub struct CompareError<P> {
    partial: P,
    error: GoldenError,
}

impl<P> CompareError<P> {
    pub fn new(partial: P, error: GoldenError) -> Self {
        Self { partial, error }
    }

    pub fn error(&self) -> &GoldenError {
        &self.error
    }

    pub fn partial(&self) -> &P {
        &self.partial
    }

    pub fn into_error(self) -> GoldenError {
        self.error
    }

    pub fn into_parts(self) -> (P, GoldenError) {
        (self.partial, self.error)
    }
}

impl<P: Default> From<GoldenError> for CompareError<P> {
    fn from(error: GoldenError) -> Self {
        Self::new(P::default(), error)
    }
}

impl<P> From<CompareError<P>> for GoldenError {
    fn from(err: CompareError<P>) -> Self {
        err.error
    }
}

impl<P> std::fmt::Display for CompareError<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

impl<P: std::fmt::Debug> std::error::Error for CompareError<P> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Result of a single-value compare
pub type CompareResult<T> = Result<CompareOutcome<T>, CompareError<Option<CompareOutcome<T>>>>;

/// Result of a batch compare
pub type BatchResult<T> = Result<BatchOutcome<T>, CompareError<BatchOutcome<T>>>;

//! Structural diff output types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every difference found between two structural views, in visit order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StructuralDiff {
    pub entries: Vec<DiffEntry>,
}

impl StructuralDiff {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Display paths of all entries
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }
}

/// One differing location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEntry {
    /// Dotted path with `[i]` for list positions; empty for the root
    pub path: String,
    pub change: Change,
}

/// What happened at a path, reference side first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum Change {
    /// Present on both sides with different values
    Changed { old: Value, new: Value },
    /// Only in the reference
    Removed { old: Value },
    /// Only in the fresh value
    Added { new: Value },
}

//! Structural diff computation.
//!
//! The core entry point is [`compute_diff`], which walks two
//! `serde_json::Value` trees and produces a [`StructuralDiff`].

use crate::diff::model::{Change, DiffEntry, StructuralDiff};
use serde_json::Value;
use std::collections::BTreeSet;

/// Dotted field paths excluded from comparison.
///
/// Segments name object keys (struct fields or map keys). List positions are
/// transparent: `items.id` ignores `id` in every element of `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: Vec<Vec<String>>,
}

impl IgnoreSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|p| {
                p.as_ref()
                    .split('.')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|segments| !segments.is_empty())
            .collect();
        Self { paths }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn matches(&self, fields: &[String]) -> bool {
        self.paths.iter().any(|p| p.as_slice() == fields)
    }

    /// Ignore paths that name no field in either view, dotted.
    ///
    /// Usually a typo: such a path hides nothing.
    pub fn unmatched(&self, reference: &Value, fresh: &Value) -> Vec<String> {
        self.paths
            .iter()
            .filter(|p| !resolves(p, reference) && !resolves(p, fresh))
            .map(|p| p.join("."))
            .collect()
    }
}

fn resolves(segments: &[String], value: &Value) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return true;
    };
    match value {
        Value::Object(map) => map.get(head).is_some_and(|child| resolves(rest, child)),
        Value::Array(items) => items.iter().any(|item| resolves(segments, item)),
        _ => false,
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn walk(
    reference: &Value,
    fresh: &Value,
    fields: &mut Vec<String>,
    path: &str,
    ignore: &IgnoreSet,
    out: &mut Vec<DiffEntry>,
) {
    match (reference, fresh) {
        (Value::Object(a), Value::Object(b)) => {
            let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
            for key in keys {
                fields.push(key.clone());
                if !ignore.matches(fields) {
                    let child = child_path(path, key);
                    match (a.get(key), b.get(key)) {
                        (Some(old), Some(new)) => walk(old, new, fields, &child, ignore, out),
                        (Some(old), None) => out.push(DiffEntry {
                            path: child,
                            change: Change::Removed { old: old.clone() },
                        }),
                        (None, Some(new)) => out.push(DiffEntry {
                            path: child,
                            change: Change::Added { new: new.clone() },
                        }),
                        (None, None) => {}
                    }
                }
                fields.pop();
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            for i in 0..a.len().max(b.len()) {
                let child = format!("{}[{}]", path, i);
                match (a.get(i), b.get(i)) {
                    (Some(old), Some(new)) => walk(old, new, fields, &child, ignore, out),
                    (Some(old), None) => out.push(DiffEntry {
                        path: child,
                        change: Change::Removed { old: old.clone() },
                    }),
                    (None, Some(new)) => out.push(DiffEntry {
                        path: child,
                        change: Change::Added { new: new.clone() },
                    }),
                    (None, None) => {}
                }
            }
        }
        (old, new) if old != new => out.push(DiffEntry {
            path: path.to_string(),
            change: Change::Changed {
                old: old.clone(),
                new: new.clone(),
            },
        }),
        _ => {}
    }
}

/// Compute every difference between `reference` and `fresh`, skipping
/// ignored paths. Pure and deterministic.
pub fn compute_diff(reference: &Value, fresh: &Value, ignore: &IgnoreSet) -> StructuralDiff {
    let mut entries = Vec::new();
    walk(reference, fresh, &mut Vec::new(), "", ignore, &mut entries);
    StructuralDiff { entries }
}

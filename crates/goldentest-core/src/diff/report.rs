//! Human-readable renderer for structural diffs.

use crate::diff::model::{Change, StructuralDiff};
use serde_json::Value;

/// Header line of every non-empty report.
pub const REPORT_HEADER: &str = "golden diff (-want +got):";

fn label(path: &str) -> &str {
    if path.is_empty() {
        "(root)"
    } else {
        path
    }
}

fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

/// Render a [`StructuralDiff`] as text.
///
/// Returns `""` for an empty diff, so callers can treat an empty report as
/// equality.
pub fn render_report(diff: &StructuralDiff) -> String {
    if diff.is_empty() {
        return String::new();
    }

    let mut out = String::from(REPORT_HEADER);
    out.push('\n');
    for entry in &diff.entries {
        let path = label(&entry.path);
        match &entry.change {
            Change::Changed { old, new } => {
                out.push_str(&format!("- {}: {}\n", path, render_value(old)));
                out.push_str(&format!("+ {}: {}\n", path, render_value(new)));
            }
            Change::Removed { old } => {
                out.push_str(&format!("- {}: {}\n", path, render_value(old)));
            }
            Change::Added { new } => {
                out.push_str(&format!("+ {}: {}\n", path, render_value(new)));
            }
        }
    }
    out
}

//! Cardinality-dependent result shaping
//!
//! Result detail degrades as the result set grows: full views for a
//! handful of rows, minimal views for mid-sized sets, one-line summaries
//! beyond that, and a refusal to enumerate past the top threshold. Advisory
//! notes describing the degradation travel beside the payload, never inside
//! it.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Notes;
use crate::db::DbPool;
use crate::models::AiView;

/// Per-tool shaping thresholds
///
/// These are preserved configuration, not derived constants; hosts tune
/// them per tool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePolicy {
    /// Largest result set rendered with full views
    pub full_max: usize,
    /// Largest result set rendered with minimal views
    pub minimal_max: usize,
    /// Largest result set rendered as one-line summaries
    pub compact_max: usize,
}

impl ShapePolicy {
    /// Create a policy from its three thresholds
    #[must_use]
    pub const fn new(full_max: usize, minimal_max: usize, compact_max: usize) -> Self {
        Self {
            full_max,
            minimal_max,
            compact_max,
        }
    }

    /// Pick the detail tier for a result-set size
    #[must_use]
    pub const fn tier(&self, count: usize) -> Tier {
        if count == 0 {
            Tier::Empty
        } else if count <= self.full_max {
            Tier::Full
        } else if count <= self.minimal_max {
            Tier::Minimal
        } else if count <= self.compact_max {
            Tier::Compact
        } else {
            Tier::Refused
        }
    }
}

impl Default for ShapePolicy {
    fn default() -> Self {
        Self::new(10, 30, 60)
    }
}

/// Detail tier selected for one result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Nothing matched
    Empty,
    /// Full views
    Full,
    /// Minimal views plus a truncation note
    Minimal,
    /// One-line summaries plus a truncation note
    Compact,
    /// Too many to enumerate; empty payload plus a note
    Refused,
}

/// Render a result set at the tier its cardinality selects, appending the
/// matching advisory notes
pub fn shape<R>(rows: &[R], policy: ShapePolicy, pool: &DbPool, notes: &mut Notes) -> Vec<serde_json::Value>
where
    R: AiView + Display,
{
    let count = rows.len();
    match policy.tier(count) {
        Tier::Empty => {
            notes.add("No matching entries found. Loosen the filters, e.g. fewer name or location constraints.");
            Vec::new()
        }
        Tier::Full => rows.iter().map(|row| row.ai_full(pool)).collect(),
        Tier::Minimal => {
            notes.add(format!(
                "{count} matches: showing reduced detail per entry. Narrow the filters for full detail."
            ));
            rows.iter().map(|row| row.ai_minimal(pool)).collect()
        }
        Tier::Compact => {
            notes.add(format!(
                "{count} matches: showing one-line summaries only. Narrow the filters for more detail."
            ));
            rows.iter()
                .map(|row| serde_json::Value::String(row.to_string()))
                .collect()
        }
        Tier::Refused => {
            notes.add(format!(
                "{count} matches, too many to enumerate. Narrow the filters (name, code, location) and try again."
            ));
            Vec::new()
        }
    }
}

//! Star system records and queries

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::types::Value;
use serde_json::json;

use super::{AiView, PlanetQuery, entity_query};
use crate::db::{DbPool, Record, RowValues};

/// One row of the `star_system` table
#[derive(Debug, Clone, Default)]
pub struct StarSystem {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub is_available: bool,
    /// Joined/computed output columns added by the query
    pub extras: BTreeMap<String, Value>,
}

impl Record for StarSystem {
    const TABLE: &'static str = "star_system";
    const COLUMNS: &'static [&'static str] = &["id", "name", "code", "is_available"];

    fn from_row(row: &RowValues) -> Self {
        Self {
            id: row.int("id"),
            name: row.text("name"),
            code: row.text("code"),
            is_available: row.flag("is_available"),
            extras: BTreeMap::new(),
        }
    }

    fn set_extras(&mut self, extras: BTreeMap<String, Value>) {
        self.extras = extras;
    }

    fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extras
    }

    fn to_row(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::Integer(self.id)),
            ("name", Value::Text(self.name.clone())),
            ("code", Value::Text(self.code.clone())),
            ("is_available", Value::Integer(i64::from(self.is_available))),
        ]
    }
}

impl AiView for StarSystem {
    fn ai_full(&self, pool: &DbPool) -> serde_json::Value {
        let planets: Vec<serde_json::Value> = PlanetQuery::new(pool)
            .in_systems([self.id])
            .load()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, system = %self.name, "planet lookup failed");
                Vec::new()
            })
            .iter()
            .map(|planet| planet.ai_minimal(pool))
            .collect();

        json!({
            "name": self.name,
            "code": self.code,
            "is_available": self.is_available,
            "planets": planets,
        })
    }

    fn ai_minimal(&self, _pool: &DbPool) -> serde_json::Value {
        json!({
            "name": self.name,
            "code": self.code,
        })
    }
}

impl fmt::Display for StarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

entity_query! {
    /// Query builder for star systems
    StarSystemQuery(StarSystem) {
        /// Filter by primary key
        by_id => eq("id"),
        /// Filter by name substring
        by_name => like("name"),
        /// Filter by exact code
        by_code => eq("code"),
        /// Filter by any of the given names
        by_names => any("name"),
        /// Filter by availability
        available => flag("is_available"),
    }
}

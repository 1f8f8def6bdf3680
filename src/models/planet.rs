//! Planet records and queries

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::types::Value;
use serde_json::json;

use super::{AiView, StarSystem, entity_query};
use crate::db::{DbPool, Record, Repository, RowValues};

/// One row of the `planet` table
#[derive(Debug, Clone, Default)]
pub struct Planet {
    pub id: i64,
    /// 0 when the planet is not tied to a system (upstream unset sentinel)
    pub id_star_system: i64,
    pub name: String,
    pub code: String,
    pub is_available: bool,
    /// Joined/computed output columns added by the query
    pub extras: BTreeMap<String, Value>,
}

impl Planet {
    /// Resolve the owning star system, if any
    #[must_use]
    pub fn star_system(&self, pool: &DbPool) -> Option<StarSystem> {
        if self.id_star_system == 0 {
            return None;
        }
        Repository::load_by_property(pool, "id", self.id_star_system)
            .ok()
            .flatten()
    }

    /// Star system name: the joined output column when the query added it,
    /// a lookup otherwise
    #[must_use]
    pub fn star_system_name(&self, pool: &DbPool) -> Option<String> {
        self.extra_text("star_system_name")
            .or_else(|| self.star_system(pool).map(|system| system.name))
    }
}

impl Record for Planet {
    const TABLE: &'static str = "planet";
    const COLUMNS: &'static [&'static str] =
        &["id", "id_star_system", "name", "code", "is_available"];

    fn from_row(row: &RowValues) -> Self {
        Self {
            id: row.int("id"),
            id_star_system: row.int("id_star_system"),
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
            ("id_star_system", Value::Integer(self.id_star_system)),
            ("name", Value::Text(self.name.clone())),
            ("code", Value::Text(self.code.clone())),
            ("is_available", Value::Integer(i64::from(self.is_available))),
        ]
    }
}

impl AiView for Planet {
    fn ai_full(&self, pool: &DbPool) -> serde_json::Value {
        let star_system = self
            .star_system(pool)
            .map(|system| system.ai_minimal(pool));

        json!({
            "name": self.name,
            "code": self.code,
            "is_available": self.is_available,
            "star_system": star_system,
        })
    }

    fn ai_minimal(&self, pool: &DbPool) -> serde_json::Value {
        json!({
            "name": self.name,
            "code": self.code,
            "star_system": self.star_system_name(pool),
        })
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

entity_query! {
    /// Query builder for planets
    PlanetQuery(Planet) {
        /// Filter by primary key
        by_id => eq("id"),
        /// Filter by name substring
        by_name => like("name"),
        /// Filter by any of the given names
        by_names => any("name"),
        /// Filter by owning star systems
        in_systems => any("id_star_system"),
        /// Filter by availability
        available => flag("is_available"),
    }
}

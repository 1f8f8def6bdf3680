//! Terminal records and queries
//!
//! Terminals are the tradeable locations: outposts, space stations, city
//! commodity kiosks. Prices attach to terminals, so most location filtering
//! eventually resolves to terminal ids.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use rusqlite::types::Value;
use serde_json::json;

use super::{AiView, Planet, StarSystem, entity_query};
use crate::db::{DbPool, Record, Repository, RowValues};

/// One row of the `terminal` table
#[derive(Debug, Clone, Default)]
pub struct Terminal {
    pub id: i64,
    /// 0 when unset (upstream sentinel)
    pub id_star_system: i64,
    /// 0 for space stations not tied to a planet
    pub id_planet: i64,
    pub name: String,
    pub code: String,
    /// Stored in the `type` column
    pub kind: String,
    pub is_available: bool,
    pub date_modified: String,
    /// Joined/computed output columns added by the query
    pub extras: BTreeMap<String, Value>,
}

impl Terminal {
    /// Stamp the modification time with the current instant
    pub fn touch(&mut self) {
        self.date_modified = Utc::now().to_rfc3339();
    }

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

    /// Resolve the owning planet, if any
    #[must_use]
    pub fn planet(&self, pool: &DbPool) -> Option<Planet> {
        if self.id_planet == 0 {
            return None;
        }
        Repository::load_by_property(pool, "id", self.id_planet)
            .ok()
            .flatten()
    }

    /// Star system name from the joined output column or a lookup
    #[must_use]
    pub fn star_system_name(&self, pool: &DbPool) -> Option<String> {
        self.extra_text("star_system_name")
            .or_else(|| self.star_system(pool).map(|system| system.name))
    }

    /// Planet name from the joined output column or a lookup
    #[must_use]
    pub fn planet_name(&self, pool: &DbPool) -> Option<String> {
        self.extra_text("planet_name")
            .or_else(|| self.planet(pool).map(|planet| planet.name))
    }
}

impl Record for Terminal {
    const TABLE: &'static str = "terminal";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "id_star_system",
        "id_planet",
        "name",
        "code",
        "type",
        "is_available",
        "date_modified",
    ];

    fn from_row(row: &RowValues) -> Self {
        Self {
            id: row.int("id"),
            id_star_system: row.int("id_star_system"),
            id_planet: row.int("id_planet"),
            name: row.text("name"),
            code: row.text("code"),
            kind: row.text("type"),
            is_available: row.flag("is_available"),
            date_modified: row.text("date_modified"),
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
            ("id_planet", Value::Integer(self.id_planet)),
            ("name", Value::Text(self.name.clone())),
            ("code", Value::Text(self.code.clone())),
            ("type", Value::Text(self.kind.clone())),
            ("is_available", Value::Integer(i64::from(self.is_available))),
            ("date_modified", Value::Text(self.date_modified.clone())),
        ]
    }
}

impl AiView for Terminal {
    fn ai_full(&self, pool: &DbPool) -> serde_json::Value {
        let star_system = self
            .star_system(pool)
            .map(|system| system.ai_minimal(pool));
        let planet = self.planet(pool).map(|planet| planet.ai_minimal(pool));

        json!({
            "name": self.name,
            "code": self.code,
            "type": self.kind,
            "is_available": self.is_available,
            "star_system": star_system,
            "planet": planet,
        })
    }

    fn ai_minimal(&self, pool: &DbPool) -> serde_json::Value {
        json!({
            "name": self.name,
            "type": self.kind,
            "star_system": self.star_system_name(pool),
            "planet": self.planet_name(pool),
        })
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

entity_query! {
    /// Query builder for terminals
    TerminalQuery(Terminal) {
        /// Filter by primary key
        by_id => eq("id"),
        /// Filter by name substring
        by_name => like("name"),
        /// Filter by exact code
        by_code => eq("code"),
        /// Filter by terminal type
        by_type => eq("type"),
        /// Filter by owning star systems
        in_systems => any("id_star_system"),
        /// Filter by owning planets
        on_planets => any("id_planet"),
        /// Filter by availability
        available => flag("is_available"),
    }
}

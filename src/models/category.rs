//! Item category records and queries

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::types::Value;
use serde_json::json;

use super::{AiView, entity_query};
use crate::db::{DbPool, Record, RowValues};

/// One row of the `category` table
#[derive(Debug, Clone, Default)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub section: String,
    /// Joined/computed output columns added by the query
    pub extras: BTreeMap<String, Value>,
}

impl Record for Category {
    const TABLE: &'static str = "category";
    const COLUMNS: &'static [&'static str] = &["id", "name", "section"];

    fn from_row(row: &RowValues) -> Self {
        Self {
            id: row.int("id"),
            name: row.text("name"),
            section: row.text("section"),
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
            ("section", Value::Text(self.section.clone())),
        ]
    }
}

impl AiView for Category {
    fn ai_full(&self, _pool: &DbPool) -> serde_json::Value {
        json!({
            "name": self.name,
            "section": self.section,
        })
    }

    fn ai_minimal(&self, _pool: &DbPool) -> serde_json::Value {
        json!({
            "name": self.name,
            "section": self.section,
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.section.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} / {}", self.section, self.name)
        }
    }
}

entity_query! {
    /// Query builder for categories
    CategoryQuery(Category) {
        /// Filter by primary key
        by_id => eq("id"),
        /// Filter by name substring
        by_name => like("name"),
        /// Filter by section
        by_section => eq("section"),
    }
}

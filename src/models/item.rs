//! Item records and queries
//!
//! Items form a parent graph (`id_parent` references another item, 0 when
//! none). Views render the parent relation at most one level deep, so a
//! cyclic parent chain cannot expand unboundedly.

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::types::Value;
use serde_json::json;

use super::{AiView, Category, entity_query};
use crate::db::{DbPool, Record, Repository, RowValues};

/// One row of the `item` table
#[derive(Debug, Clone, Default)]
pub struct Item {
    pub id: i64,
    /// 0 when the item has no parent (upstream sentinel)
    pub id_parent: i64,
    /// 0 when uncategorized
    pub id_category: i64,
    pub name: String,
    pub section: String,
    /// Joined/computed output columns added by the query
    pub extras: BTreeMap<String, Value>,
}

impl Item {
    /// Resolve the parent item, if any
    #[must_use]
    pub fn parent(&self, pool: &DbPool) -> Option<Self> {
        if self.id_parent == 0 {
            return None;
        }
        Repository::load_by_property(pool, "id", self.id_parent)
            .ok()
            .flatten()
    }

    /// Resolve the owning category, if any
    #[must_use]
    pub fn category(&self, pool: &DbPool) -> Option<Category> {
        if self.id_category == 0 {
            return None;
        }
        Repository::load_by_property(pool, "id", self.id_category)
            .ok()
            .flatten()
    }

    /// Category name from the joined output column or a lookup
    #[must_use]
    pub fn category_name(&self, pool: &DbPool) -> Option<String> {
        self.extra_text("category_name")
            .or_else(|| self.category(pool).map(|category| category.name))
    }
}

impl Record for Item {
    const TABLE: &'static str = "item";
    const COLUMNS: &'static [&'static str] =
        &["id", "id_parent", "id_category", "name", "section"];

    fn from_row(row: &RowValues) -> Self {
        Self {
            id: row.int("id"),
            id_parent: row.int("id_parent"),
            id_category: row.int("id_category"),
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
            ("id_parent", Value::Integer(self.id_parent)),
            ("id_category", Value::Integer(self.id_category)),
            ("name", Value::Text(self.name.clone())),
            ("section", Value::Text(self.section.clone())),
        ]
    }
}

impl AiView for Item {
    fn ai_full(&self, pool: &DbPool) -> serde_json::Value {
        let category = self.category(pool).map(|category| category.ai_minimal(pool));
        // Parent renders minimal: its own parent appears as a bare name
        let parent = self.parent(pool).map(|parent| parent.ai_minimal(pool));

        json!({
            "name": self.name,
            "section": self.section,
            "category": category,
            "parent": parent,
        })
    }

    fn ai_minimal(&self, pool: &DbPool) -> serde_json::Value {
        json!({
            "name": self.name,
            "section": self.section,
            "category": self.category_name(pool),
            "parent": self.parent(pool).map(|parent| parent.name),
        })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.section.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} [{}]", self.name, self.section)
        }
    }
}

entity_query! {
    /// Query builder for items
    ItemQuery(Item) {
        /// Filter by primary key
        by_id => eq("id"),
        /// Filter by name substring
        by_name => like("name"),
        /// Filter by any of the given names
        by_names => any("name"),
        /// Filter by owning categories
        in_categories => any("id_category"),
        /// Filter by parent item (0 matches unparented items)
        by_parent => eq("id_parent"),
        /// Filter by section
        by_section => eq("section"),
    }
}

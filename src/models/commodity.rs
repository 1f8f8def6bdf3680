//! Commodity records and queries

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::types::Value;
use serde_json::json;

use super::{AiView, CommodityPriceQuery, entity_query};
use crate::db::{DbPool, Record, RowValues, SortOrder};

/// One row of the `commodity` table
///
/// `price_buy`/`price_sell` are galactic averages; per-terminal prices live
/// in `commodity_price`.
#[derive(Debug, Clone, Default)]
pub struct Commodity {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub kind: String,
    pub price_buy: f64,
    pub price_sell: f64,
    pub is_buyable: bool,
    pub is_sellable: bool,
    pub is_illegal: bool,
    pub is_available: bool,
    /// Joined/computed output columns added by the query
    pub extras: BTreeMap<String, Value>,
}

impl Commodity {
    /// Average profit per unit implied by the galactic prices
    #[must_use]
    pub fn implied_profit(&self) -> f64 {
        self.price_sell - self.price_buy
    }
}

impl Record for Commodity {
    const TABLE: &'static str = "commodity";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "code",
        "kind",
        "price_buy",
        "price_sell",
        "is_buyable",
        "is_sellable",
        "is_illegal",
        "is_available",
    ];

    fn from_row(row: &RowValues) -> Self {
        Self {
            id: row.int("id"),
            name: row.text("name"),
            code: row.text("code"),
            kind: row.text("kind"),
            price_buy: row.real("price_buy"),
            price_sell: row.real("price_sell"),
            is_buyable: row.flag("is_buyable"),
            is_sellable: row.flag("is_sellable"),
            is_illegal: row.flag("is_illegal"),
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
            ("kind", Value::Text(self.kind.clone())),
            ("price_buy", Value::Real(self.price_buy)),
            ("price_sell", Value::Real(self.price_sell)),
            ("is_buyable", Value::Integer(i64::from(self.is_buyable))),
            ("is_sellable", Value::Integer(i64::from(self.is_sellable))),
            ("is_illegal", Value::Integer(i64::from(self.is_illegal))),
            ("is_available", Value::Integer(i64::from(self.is_available))),
        ]
    }
}

impl AiView for Commodity {
    fn ai_full(&self, pool: &DbPool) -> serde_json::Value {
        // Per-terminal buy/sell rows, terminal names joined in
        let buy_sell_options: Vec<serde_json::Value> = CommodityPriceQuery::new(pool)
            .by_commodity(self.id)
            .with_terminal_names()
            .load()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, commodity = %self.name, "price lookup failed");
                Vec::new()
            })
            .iter()
            .map(|price| price.ai_minimal(pool))
            .collect();

        json!({
            "name": self.name,
            "code": self.code,
            "kind": self.kind,
            "price_buy": self.price_buy,
            "price_sell": self.price_sell,
            "is_buyable": self.is_buyable,
            "is_sellable": self.is_sellable,
            "is_illegal": self.is_illegal,
            "buy_sell_options": buy_sell_options,
        })
    }

    fn ai_minimal(&self, _pool: &DbPool) -> serde_json::Value {
        json!({
            "name": self.name,
            "code": self.code,
            "kind": self.kind,
            "price_buy": self.price_buy,
            "price_sell": self.price_sell,
            "is_illegal": self.is_illegal,
        })
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): buy {} / sell {}",
            self.name, self.code, self.price_buy, self.price_sell
        )
    }
}

entity_query! {
    /// Query builder for commodities
    CommodityQuery(Commodity) {
        /// Filter by primary key
        by_id => eq("id"),
        /// Filter by name substring
        by_name => like("name"),
        /// Filter by exact code
        by_code => eq("code"),
        /// Filter by commodity kind
        by_kind => eq("kind"),
        /// Filter by buyability
        buyable => flag("is_buyable"),
        /// Filter by sellability
        sellable => flag("is_sellable"),
        /// Filter by legality
        illegal => flag("is_illegal"),
        /// Filter by availability
        available => flag("is_available"),
    }
}

impl CommodityQuery {
    /// Order by the profit implied by the galactic average prices, best
    /// first, exposing it as a `profit` output column
    #[must_use]
    pub fn by_implied_profit(self) -> Self {
        self.add_col("(commodity.price_sell - commodity.price_buy)", Some("profit"))
            .order_by("profit", SortOrder::Desc)
    }
}

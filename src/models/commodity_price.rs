//! Commodity price records: one row per commodity/terminal pairing

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use rusqlite::types::Value;
use serde_json::json;

use super::{AiView, Terminal, entity_query};
use crate::db::{DbPool, Op, Record, Repository, RowValues};

/// One row of the `commodity_price` table
///
/// A price of 0 on either side means the terminal does not trade that
/// direction; `scu_*` carry the advertised stock/demand volumes.
#[derive(Debug, Clone, Default)]
pub struct CommodityPrice {
    pub id: i64,
    pub id_commodity: i64,
    pub id_terminal: i64,
    pub price_buy: f64,
    pub price_sell: f64,
    pub scu_buy: f64,
    pub scu_sell: f64,
    pub date_modified: String,
    /// Joined/computed output columns added by the query
    pub extras: BTreeMap<String, Value>,
}

impl CommodityPrice {
    /// Stamp the modification time with the current instant
    pub fn touch(&mut self) {
        self.date_modified = Utc::now().to_rfc3339();
    }

    /// Resolve the terminal this price belongs to
    #[must_use]
    pub fn terminal(&self, pool: &DbPool) -> Option<Terminal> {
        if self.id_terminal == 0 {
            return None;
        }
        Repository::load_by_property(pool, "id", self.id_terminal)
            .ok()
            .flatten()
    }

    /// Terminal name from the joined output column or a lookup
    #[must_use]
    pub fn terminal_name(&self, pool: &DbPool) -> Option<String> {
        self.extra_text("terminal_name")
            .or_else(|| self.terminal(pool).map(|terminal| terminal.name))
    }
}

impl Record for CommodityPrice {
    const TABLE: &'static str = "commodity_price";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "id_commodity",
        "id_terminal",
        "price_buy",
        "price_sell",
        "scu_buy",
        "scu_sell",
        "date_modified",
    ];

    fn from_row(row: &RowValues) -> Self {
        Self {
            id: row.int("id"),
            id_commodity: row.int("id_commodity"),
            id_terminal: row.int("id_terminal"),
            price_buy: row.real("price_buy"),
            price_sell: row.real("price_sell"),
            scu_buy: row.real("scu_buy"),
            scu_sell: row.real("scu_sell"),
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
            ("id_commodity", Value::Integer(self.id_commodity)),
            ("id_terminal", Value::Integer(self.id_terminal)),
            ("price_buy", Value::Real(self.price_buy)),
            ("price_sell", Value::Real(self.price_sell)),
            ("scu_buy", Value::Real(self.scu_buy)),
            ("scu_sell", Value::Real(self.scu_sell)),
            ("date_modified", Value::Text(self.date_modified.clone())),
        ]
    }
}

impl AiView for CommodityPrice {
    fn ai_full(&self, pool: &DbPool) -> serde_json::Value {
        let terminal = self.terminal(pool).map(|terminal| terminal.ai_minimal(pool));

        json!({
            "terminal": terminal,
            "price_buy": self.price_buy,
            "price_sell": self.price_sell,
            "scu_buy": self.scu_buy,
            "scu_sell": self.scu_sell,
        })
    }

    fn ai_minimal(&self, pool: &DbPool) -> serde_json::Value {
        json!({
            "terminal": self.terminal_name(pool),
            "price_buy": self.price_buy,
            "price_sell": self.price_sell,
            "scu_buy": self.scu_buy,
            "scu_sell": self.scu_sell,
        })
    }
}

impl fmt::Display for CommodityPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "terminal {}: buy {} / sell {}",
            self.id_terminal, self.price_buy, self.price_sell
        )
    }
}

entity_query! {
    /// Query builder for commodity prices
    CommodityPriceQuery(CommodityPrice) {
        /// Filter by primary key
        by_id => eq("id"),
        /// Filter by commodity
        by_commodity => eq("id_commodity"),
        /// Filter by any of the given terminals
        at_terminals => any("id_terminal"),
    }
}

impl CommodityPriceQuery {
    /// Only rows the terminal actually buys for (stock offered to players)
    #[must_use]
    pub fn buyable(mut self) -> Self {
        self.filter_mut().where_op("price_buy", Op::Gt, 0.0);
        self
    }

    /// Only rows the terminal actually sells for (demand from players)
    #[must_use]
    pub fn sellable(mut self) -> Self {
        self.filter_mut().where_op("price_sell", Op::Gt, 0.0);
        self
    }

    /// Join the terminal table and expose its name as a `terminal_name`
    /// output column, saving a lookup per row
    #[must_use]
    pub fn with_terminal_names(mut self) -> Self {
        self.filter_mut()
            .join("terminal", "id", "commodity_price", "id_terminal");
        self.add_col("terminal.name", Some("terminal_name"))
    }
}

//! LLM tool layer for the trade knowledge base
//!
//! Tools follow the gateway convention: JSON-schema definitions for the
//! LLM channel, plus a synchronous `execute(name, arguments)` dispatch.
//! Each tool returns a JSON payload and a list of advisory notes; the host
//! flushes the notes into the LLM-visible response beside the payload.

mod commodity;
mod item;
mod route;
pub mod shaping;

use std::collections::BTreeSet;

use crate::config::ToolsConfig;
use crate::db::{DbPool, Filter, Op};
use crate::models::{PlanetQuery, StarSystemQuery, TerminalQuery};
use crate::{Error, Result};

pub use shaping::{ShapePolicy, Tier, shape};

/// Append-only advisory note sink, one per tool call
///
/// Notes are side-channel text for the LLM, never part of the primary
/// payload.
#[derive(Debug, Default)]
pub struct Notes {
    items: Vec<String>,
}

impl Notes {
    /// Append one note
    pub fn add(&mut self, note: impl Into<String>) {
        self.items.push(note.into());
    }

    /// True when no notes have accumulated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Accumulated notes in append order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Consume the sink, yielding the accumulated notes
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// One tool invocation's result: the JSON payload plus side-channel notes
#[derive(Debug)]
pub struct ToolOutput {
    /// Primary JSON payload for the tool-call response
    pub payload: serde_json::Value,
    /// Advisory notes for the LLM, in append order
    pub notes: Vec<String>,
}

/// Trade knowledge base tools
pub struct TradeTools {
    pool: DbPool,
    config: ToolsConfig,
}

impl TradeTools {
    /// Create the tool set over a database pool
    #[must_use]
    pub const fn new(pool: DbPool, config: ToolsConfig) -> Self {
        Self { pool, config }
    }

    /// Tool definitions for the LLM channel
    #[must_use]
    pub fn tool_definitions() -> Vec<serde_json::Value> {
        vec![
            serde_json::json!({
                "type": "function",
                "function": {
                    "name": "trade_commodity_info",
                    "description": "Look up tradeable commodities: prices, legality, and where they can be bought or sold. Filter by names, codes, trade flags, and location names.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "names": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Commodity names or codes to match (substring, any-of)"
                            },
                            "is_buyable": {"type": "boolean", "description": "Only commodities that can be bought"},
                            "is_sellable": {"type": "boolean", "description": "Only commodities that can be sold"},
                            "is_illegal": {"type": "boolean", "description": "Restrict by legality"},
                            "locations": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Only commodities traded at these locations (terminal, planet, or star system names)"
                            },
                            "sort_by_profit": {"type": "boolean", "description": "Order by implied profit, best first"}
                        }
                    }
                }
            }),
            serde_json::json!({
                "type": "function",
                "function": {
                    "name": "trade_item_info",
                    "description": "Look up equipment and items by name, category, or section.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "names": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Item names to match (substring, any-of)"
                            },
                            "category": {"type": "string", "description": "Category name to match"},
                            "section": {"type": "string", "description": "Exact section name"}
                        }
                    }
                }
            }),
            serde_json::json!({
                "type": "function",
                "function": {
                    "name": "trade_route_info",
                    "description": "Find the most profitable buy/sell terminal pairs for one commodity.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "commodity": {"type": "string", "description": "Commodity name"},
                            "from_location": {"type": "string", "description": "Restrict buying to this location (terminal, planet, or star system name)"},
                            "max_routes": {"type": "integer", "description": "Maximum number of routes to return"}
                        },
                        "required": ["commodity"]
                    }
                }
            }),
        ]
    }

    /// Execute a named tool with JSON-encoded arguments
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tool`] for an unknown tool name or malformed
    /// arguments, and a data-access error if a query fails
    pub fn execute(&self, name: &str, arguments: &str) -> Result<ToolOutput> {
        let mut notes = Notes::default();
        let payload = match name {
            "trade_commodity_info" => {
                commodity::run(&self.pool, self.config.commodity, arguments, &mut notes)?
            }
            "trade_item_info" => item::run(&self.pool, self.config.item, arguments, &mut notes)?,
            "trade_route_info" => route::run(&self.pool, &self.config.route, arguments, &mut notes)?,
            _ => return Err(Error::Tool(format!("unknown trade tool: {name}"))),
        };

        Ok(ToolOutput {
            payload,
            notes: notes.into_vec(),
        })
    }
}

/// Build an "any of these columns match any of these needles" sub-filter:
/// one OR-combined LIKE predicate per column/needle pairing, intended to be
/// merged as a group
pub(crate) fn name_match_filter(table: &str, columns: &[&str], needles: &[String]) -> Filter {
    let mut filter = Filter::on(table);
    for needle in needles {
        let pattern = format!("%{needle}%");
        for column in columns {
            filter.or_where_op(column, Op::Like, pattern.clone());
        }
    }
    filter
}

/// Resolve location names to terminal ids: direct terminal matches, plus
/// all terminals on matching planets and in matching star systems
pub(crate) fn resolve_terminal_ids(pool: &DbPool, locations: &[String]) -> Result<Vec<i64>> {
    let mut ids: BTreeSet<i64> = BTreeSet::new();

    let terminals = TerminalQuery::new(pool)
        .apply_filter(name_match_filter("terminal", &["name", "code"], locations), false)
        .load()?;
    ids.extend(terminals.iter().map(|terminal| terminal.id));

    let planets = PlanetQuery::new(pool)
        .apply_filter(name_match_filter("planet", &["name", "code"], locations), false)
        .load()?;
    if !planets.is_empty() {
        let planet_ids: Vec<i64> = planets.iter().map(|planet| planet.id).collect();
        let on_planets = TerminalQuery::new(pool).on_planets(planet_ids).load()?;
        ids.extend(on_planets.iter().map(|terminal| terminal.id));
    }

    let systems = StarSystemQuery::new(pool)
        .apply_filter(name_match_filter("star_system", &["name", "code"], locations), false)
        .load()?;
    if !systems.is_empty() {
        let system_ids: Vec<i64> = systems.iter().map(|system| system.id).collect();
        let in_systems = TerminalQuery::new(pool).in_systems(system_ids).load()?;
        ids.extend(in_systems.iter().map(|terminal| terminal.id));
    }

    Ok(ids.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolsConfig;
    use crate::db;

    #[test]
    fn tool_definitions_cover_all_tools() {
        let defs = TradeTools::tool_definitions();
        assert_eq!(defs.len(), 3);
        let names: Vec<&str> = defs
            .iter()
            .map(|d| d["function"]["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"trade_commodity_info"));
        assert!(names.contains(&"trade_item_info"));
        assert!(names.contains(&"trade_route_info"));
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let pool = db::init_memory().unwrap();
        let tools = TradeTools::new(pool, ToolsConfig::default());
        let result = tools.execute("trade_unknown", "{}");
        assert!(matches!(result, Err(Error::Tool(_))));
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        let pool = db::init_memory().unwrap();
        let tools = TradeTools::new(pool, ToolsConfig::default());
        let result = tools.execute("trade_commodity_info", "not json");
        assert!(matches!(result, Err(Error::Tool(_))));
    }

    #[test]
    fn notes_accumulate_in_order() {
        let mut notes = Notes::default();
        assert!(notes.is_empty());
        notes.add("first");
        notes.add("second".to_string());
        assert_eq!(notes.as_slice().len(), 2);
        assert_eq!(notes.as_slice()[0], "first");
        assert_eq!(notes.into_vec(), vec!["first", "second"]);
    }
}

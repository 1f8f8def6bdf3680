//! Commodity information tool

use serde::Deserialize;
use serde_json::json;

use super::{Notes, ShapePolicy, name_match_filter, resolve_terminal_ids, shape};
use crate::db::{DbPool, Filter, FilterValue};
use crate::models::CommodityQuery;
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct CommodityArgs {
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    is_buyable: Option<bool>,
    #[serde(default)]
    is_sellable: Option<bool>,
    #[serde(default)]
    is_illegal: Option<bool>,
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    sort_by_profit: bool,
}

pub(super) fn run(
    pool: &DbPool,
    policy: ShapePolicy,
    arguments: &str,
    notes: &mut Notes,
) -> Result<serde_json::Value> {
    let args: CommodityArgs = serde_json::from_str(arguments)
        .map_err(|e| Error::Tool(format!("trade_commodity_info: invalid arguments: {e}")))?;

    let mut query = CommodityQuery::new(pool);

    if !args.names.is_empty() {
        query = query.apply_filter(
            name_match_filter("commodity", &["name", "code"], &args.names),
            false,
        );
    }
    if let Some(buyable) = args.is_buyable {
        query = query.buyable(buyable);
    }
    if let Some(sellable) = args.is_sellable {
        query = query.sellable(sellable);
    }
    if let Some(illegal) = args.is_illegal {
        query = query.illegal(illegal);
    }

    if !args.locations.is_empty() {
        let terminal_ids = resolve_terminal_ids(pool, &args.locations)?;
        if terminal_ids.is_empty() {
            notes.add(format!(
                "None of the given locations are known: {}.",
                args.locations.join(", ")
            ));
            return Ok(json!({ "commodities": [] }));
        }

        // Whitelist sub-filter: only commodities with a price row at one of
        // the resolved terminals
        let mut whitelist = Filter::on("commodity_price");
        whitelist.join("commodity_price", "id_commodity", "commodity", "id");
        whitelist.where_eq(
            "id_terminal",
            FilterValue::List(terminal_ids.into_iter().map(FilterValue::Int).collect()),
        );
        query = query.apply_filter(whitelist, false).distinct();
    }

    if args.sort_by_profit {
        query = query.by_implied_profit();
    }

    let rows = query.load()?;
    tracing::debug!(count = rows.len(), "commodity lookup");

    let shaped = shape(&rows, policy, pool, notes);
    Ok(json!({ "commodities": shaped }))
}

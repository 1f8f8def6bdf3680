//! Trade route tool: best buy/sell terminal pairs for one commodity

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::json;

use super::{Notes, resolve_terminal_ids};
use crate::config::RouteConfig;
use crate::db::DbPool;
use crate::models::{CommodityPriceQuery, CommodityQuery};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct RouteArgs {
    commodity: String,
    #[serde(default)]
    from_location: Option<String>,
    #[serde(default)]
    max_routes: Option<usize>,
}

struct Candidate {
    buy_at: Option<String>,
    price_buy: f64,
    sell_at: Option<String>,
    price_sell: f64,
    profit_per_unit: f64,
}

pub(super) fn run(
    pool: &DbPool,
    config: &RouteConfig,
    arguments: &str,
    notes: &mut Notes,
) -> Result<serde_json::Value> {
    let args: RouteArgs = serde_json::from_str(arguments)
        .map_err(|e| Error::Tool(format!("trade_route_info: invalid arguments: {e}")))?;
    let max_routes = args.max_routes.unwrap_or(config.max_routes);

    let Some(commodity) = CommodityQuery::new(pool)
        .by_name(&args.commodity)
        .load_one()?
    else {
        notes.add(format!("No commodity matches '{}'.", args.commodity));
        return Ok(json!({ "routes": [] }));
    };

    let mut buy_query = CommodityPriceQuery::new(pool)
        .by_commodity(commodity.id)
        .buyable()
        .with_terminal_names();

    if let Some(location) = &args.from_location {
        let terminal_ids = resolve_terminal_ids(pool, std::slice::from_ref(location))?;
        if terminal_ids.is_empty() {
            notes.add(format!("Unknown start location '{location}'."));
            return Ok(json!({ "routes": [] }));
        }
        buy_query = buy_query.at_terminals(terminal_ids);
    }

    let buy_rows = buy_query.load()?;
    let sell_rows = CommodityPriceQuery::new(pool)
        .by_commodity(commodity.id)
        .sellable()
        .with_terminal_names()
        .load()?;

    if buy_rows.is_empty() {
        notes.add(format!("'{}' cannot be bought anywhere in range.", commodity.name));
        return Ok(json!({ "routes": [] }));
    }

    let mut candidates: Vec<Candidate> = Vec::new();
    for buy in &buy_rows {
        for sell in &sell_rows {
            if sell.id_terminal == buy.id_terminal {
                continue;
            }
            let profit = sell.price_sell - buy.price_buy;
            if profit <= 0.0 {
                continue;
            }
            candidates.push(Candidate {
                buy_at: buy.terminal_name(pool),
                price_buy: buy.price_buy,
                sell_at: sell.terminal_name(pool),
                price_sell: sell.price_sell,
                profit_per_unit: profit,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.profit_per_unit
            .partial_cmp(&a.profit_per_unit)
            .unwrap_or(Ordering::Equal)
    });

    if candidates.is_empty() {
        notes.add(format!(
            "No profitable route found for '{}'. Its sell prices never exceed the available buy prices.",
            commodity.name
        ));
        return Ok(json!({ "routes": [] }));
    }

    let total = candidates.len();
    if total > max_routes {
        notes.add(format!("Showing the top {max_routes} of {total} candidate routes."));
    }

    let routes: Vec<serde_json::Value> = candidates
        .into_iter()
        .take(max_routes)
        .map(|route| {
            json!({
                "commodity": commodity.name,
                "buy_at": route.buy_at,
                "price_buy": route.price_buy,
                "sell_at": route.sell_at,
                "price_sell": route.price_sell,
                "profit_per_unit": route.profit_per_unit,
            })
        })
        .collect();

    tracing::debug!(commodity = %commodity.name, count = routes.len(), "route lookup");
    Ok(json!({ "routes": routes }))
}

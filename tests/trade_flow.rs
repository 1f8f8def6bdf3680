//! End-to-end tool flow against a seeded knowledge base

use tradewinds::db::Repository;
use tradewinds::{Commodity, ToolsConfig, TradeTools, db};

mod common;
use common::{seed_trade_scenario, setup_test_db};

fn make_tools(pool: &tradewinds::DbPool) -> TradeTools {
    TradeTools::new(pool.clone(), ToolsConfig::default())
}

#[test]
fn profit_ordering_returns_gold_before_iron() {
    let pool = setup_test_db();
    seed_trade_scenario(&pool);
    let tools = make_tools(&pool);

    let output = tools
        .execute(
            "trade_commodity_info",
            r#"{"is_sellable": true, "sort_by_profit": true}"#,
        )
        .unwrap();

    let commodities = output.payload["commodities"].as_array().unwrap();
    assert_eq!(commodities.len(), 2);
    assert_eq!(commodities[0]["name"], "Gold", "profit 400 beats 30");
    assert_eq!(commodities[1]["name"], "Iron");
    assert!(output.notes.is_empty(), "full tier carries no notes");
}

#[test]
fn gold_full_view_lists_the_terminal_a_sell_row() {
    let pool = setup_test_db();
    seed_trade_scenario(&pool);
    let tools = make_tools(&pool);

    let output = tools
        .execute("trade_commodity_info", r#"{"names": ["Gold"]}"#)
        .unwrap();

    let options = output.payload["commodities"][0]["buy_sell_options"]
        .as_array()
        .unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0]["terminal"], "Terminal-A");
    assert_eq!(options[0]["price_sell"], 500.0);
}

#[test]
fn terminal_b_whitelist_excludes_gold() {
    let pool = setup_test_db();
    seed_trade_scenario(&pool);
    let tools = make_tools(&pool);

    let output = tools
        .execute(
            "trade_commodity_info",
            r#"{"is_sellable": true, "locations": ["Terminal-B"]}"#,
        )
        .unwrap();

    let commodities = output.payload["commodities"].as_array().unwrap();
    assert_eq!(commodities.len(), 1, "Gold has no price row at Terminal-B");
    assert_eq!(commodities[0]["name"], "Iron");
}

#[test]
fn star_system_whitelist_resolves_through_terminals() {
    let pool = setup_test_db();
    seed_trade_scenario(&pool);
    let tools = make_tools(&pool);

    // Both terminals sit in Stanton, so everything stays visible
    let output = tools
        .execute(
            "trade_commodity_info",
            r#"{"is_sellable": true, "locations": ["Stanton"]}"#,
        )
        .unwrap();

    assert_eq!(output.payload["commodities"].as_array().unwrap().len(), 2);
}

#[test]
fn route_tool_finds_the_iron_route() {
    let pool = setup_test_db();
    seed_trade_scenario(&pool);
    let tools = make_tools(&pool);

    let output = tools
        .execute("trade_route_info", r#"{"commodity": "Iron"}"#)
        .unwrap();

    let routes = output.payload["routes"].as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["buy_at"], "Terminal-B");
    assert_eq!(routes[0]["sell_at"], "Terminal-A");
    assert_eq!(routes[0]["profit_per_unit"], 30.0);
}

#[test]
fn mid_sized_result_sets_degrade_to_minimal_views() {
    let pool = setup_test_db();
    let commodities = Repository::<Commodity>::new(pool.clone());
    for id in 1..=15_i64 {
        commodities
            .persist(&Commodity {
                id,
                name: format!("Ore {id}"),
                code: format!("ORE{id}"),
                is_sellable: true,
                is_available: true,
                ..Commodity::default()
            })
            .unwrap();
    }
    let tools = make_tools(&pool);

    let output = tools
        .execute("trade_commodity_info", r#"{"names": ["Ore"]}"#)
        .unwrap();

    let rows = output.payload["commodities"].as_array().unwrap();
    assert_eq!(rows.len(), 15);
    // Minimal views carry no price sub-records
    assert!(rows[0].get("buy_sell_options").is_none());
    assert_eq!(output.notes.len(), 1);
    assert!(output.notes[0].contains("reduced detail"));
}

#[test]
fn round_trip_preserves_every_declared_field() {
    let pool = setup_test_db();
    let repo = Repository::<Commodity>::new(pool.clone());

    let original = Commodity {
        id: 9,
        name: "Quantanium".to_string(),
        code: "QUAN".to_string(),
        kind: "Raw".to_string(),
        price_buy: 1.5,
        price_sell: 88.25,
        is_buyable: true,
        is_sellable: true,
        is_illegal: false,
        is_available: true,
        ..Commodity::default()
    };
    repo.persist(&original).unwrap();
    // Idempotent under repeated identical calls
    repo.persist(&original).unwrap();

    let loaded = Repository::<Commodity>::load_by_property(&pool, "id", 9)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.name, original.name);
    assert_eq!(loaded.code, original.code);
    assert_eq!(loaded.kind, original.kind);
    assert_eq!(loaded.price_buy, original.price_buy);
    assert_eq!(loaded.price_sell, original.price_sell);
    assert_eq!(loaded.is_buyable, original.is_buyable);
    assert_eq!(loaded.is_sellable, original.is_sellable);
    assert_eq!(loaded.is_illegal, original.is_illegal);
    assert_eq!(loaded.is_available, original.is_available);
}

#[test]
fn schema_version_mismatch_rebuilds_a_file_backed_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("kb.db");

    {
        let pool = db::init(&db_path).unwrap();
        seed_trade_scenario(&pool);
    }

    // Tamper with the stamped version out-of-band
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute("UPDATE skill SET version = 'stale'", []).unwrap();
    }

    let pool = db::init(&db_path).unwrap();
    let conn = pool.get().unwrap();
    let commodity_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM commodity", [], |row| row.get(0))
        .unwrap();
    assert_eq!(commodity_count, 0, "stale data must not survive");

    let versions: Vec<String> = {
        let mut stmt = conn.prepare("SELECT version FROM skill").unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .flatten()
            .collect()
    };
    assert_eq!(versions, vec![db::SCHEMA_VERSION.to_string()]);
}

#[test]
fn matching_version_keeps_a_file_backed_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("kb.db");

    {
        let pool = db::init(&db_path).unwrap();
        seed_trade_scenario(&pool);
    }

    let pool = db::init(&db_path).unwrap();
    let conn = pool.get().unwrap();
    let commodity_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM commodity", [], |row| row.get(0))
        .unwrap();
    assert_eq!(commodity_count, 2, "matching version performs no destructive action");
}

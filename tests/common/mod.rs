//! Shared test utilities

use tradewinds::db::Repository;
use tradewinds::{Commodity, CommodityPrice, DbPool, StarSystem, Terminal, db};

/// Set up an in-memory test database
#[must_use]
pub fn setup_test_db() -> DbPool {
    db::init_memory().expect("failed to init test db")
}

/// Seed the canonical trade scenario:
/// - Gold: buyable nowhere, sells for 500 at Terminal-A
/// - Iron: buys for 50 at Terminal-B, sells for 80 at Terminal-A
pub fn seed_trade_scenario(pool: &DbPool) {
    let systems = Repository::<StarSystem>::new(pool.clone());
    systems
        .persist(&StarSystem {
            id: 1,
            name: "Stanton".to_string(),
            code: "ST".to_string(),
            is_available: true,
            ..StarSystem::default()
        })
        .expect("seed system");

    let terminals = Repository::<Terminal>::new(pool.clone());
    for (id, name, code) in [(1, "Terminal-A", "TA"), (2, "Terminal-B", "TB")] {
        terminals
            .persist(&Terminal {
                id,
                id_star_system: 1,
                name: name.to_string(),
                code: code.to_string(),
                is_available: true,
                ..Terminal::default()
            })
            .expect("seed terminal");
    }

    let commodities = Repository::<Commodity>::new(pool.clone());
    commodities
        .persist(&Commodity {
            id: 1,
            name: "Gold".to_string(),
            code: "GOLD".to_string(),
            price_buy: 100.0,
            price_sell: 500.0,
            is_sellable: true,
            is_available: true,
            ..Commodity::default()
        })
        .expect("seed gold");
    commodities
        .persist(&Commodity {
            id: 2,
            name: "Iron".to_string(),
            code: "IRON".to_string(),
            price_buy: 50.0,
            price_sell: 80.0,
            is_buyable: true,
            is_sellable: true,
            is_available: true,
            ..Commodity::default()
        })
        .expect("seed iron");

    let prices = Repository::<CommodityPrice>::new(pool.clone());
    prices
        .persist(&CommodityPrice {
            id: 1,
            id_commodity: 1,
            id_terminal: 1,
            price_sell: 500.0,
            scu_sell: 120.0,
            ..CommodityPrice::default()
        })
        .expect("seed gold sell");
    prices
        .persist(&CommodityPrice {
            id: 2,
            id_commodity: 2,
            id_terminal: 2,
            price_buy: 50.0,
            scu_buy: 300.0,
            ..CommodityPrice::default()
        })
        .expect("seed iron buy");
    prices
        .persist(&CommodityPrice {
            id: 3,
            id_commodity: 2,
            id_terminal: 1,
            price_sell: 80.0,
            scu_sell: 200.0,
            ..CommodityPrice::default()
        })
        .expect("seed iron sell");
}

//! Item information tool

use serde::Deserialize;
use serde_json::json;

use super::{Notes, ShapePolicy, name_match_filter, shape};
use crate::db::DbPool;
use crate::models::{CategoryQuery, ItemQuery};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct ItemArgs {
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    section: Option<String>,
}

pub(super) fn run(
    pool: &DbPool,
    policy: ShapePolicy,
    arguments: &str,
    notes: &mut Notes,
) -> Result<serde_json::Value> {
    let args: ItemArgs = serde_json::from_str(arguments)
        .map_err(|e| Error::Tool(format!("trade_item_info: invalid arguments: {e}")))?;

    let mut query = ItemQuery::new(pool);

    if !args.names.is_empty() {
        query = query.apply_filter(name_match_filter("item", &["name"], &args.names), false);
    }
    if let Some(section) = &args.section {
        query = query.by_section(section.as_str());
    }
    if let Some(category) = &args.category {
        let categories = CategoryQuery::new(pool).by_name(category).load()?;
        if categories.is_empty() {
            notes.add(format!("No category matches '{category}'."));
            return Ok(json!({ "items": [] }));
        }
        let ids: Vec<i64> = categories.iter().map(|cat| cat.id).collect();
        query = query.in_categories(ids);
    }

    let rows = query.load()?;
    tracing::debug!(count = rows.len(), "item lookup");

    let shaped = shape(&rows, policy, pool, notes);
    Ok(json!({ "items": shaped }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, Repository};
    use crate::models::{Category, Item};

    fn seed(pool: &db::DbPool) {
        let categories = Repository::<Category>::new(pool.clone());
        categories
            .persist(&Category {
                id: 1,
                name: "Helmets".to_string(),
                section: "Armor".to_string(),
                ..Category::default()
            })
            .unwrap();
        categories
            .persist(&Category {
                id: 2,
                name: "Weapons".to_string(),
                section: "Combat".to_string(),
                ..Category::default()
            })
            .unwrap();

        let items = Repository::<Item>::new(pool.clone());
        items
            .persist(&Item {
                id: 1,
                id_category: 1,
                name: "Balor HCH Helmet".to_string(),
                section: "Armor".to_string(),
                ..Item::default()
            })
            .unwrap();
        items
            .persist(&Item {
                id: 2,
                id_category: 2,
                name: "Arclight Pistol".to_string(),
                section: "Combat".to_string(),
                ..Item::default()
            })
            .unwrap();
    }

    #[test]
    fn filters_by_category_name() {
        let pool = db::init_memory().unwrap();
        seed(&pool);
        let mut notes = Notes::default();

        let payload = run(
            &pool,
            ShapePolicy::default(),
            r#"{"category": "Helmets"}"#,
            &mut notes,
        )
        .unwrap();

        let items = payload["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Balor HCH Helmet");
        assert_eq!(items[0]["category"]["name"], "Helmets");
    }

    #[test]
    fn unknown_category_notes_and_returns_empty() {
        let pool = db::init_memory().unwrap();
        seed(&pool);
        let mut notes = Notes::default();

        let payload = run(
            &pool,
            ShapePolicy::default(),
            r#"{"category": "Ship Parts"}"#,
            &mut notes,
        )
        .unwrap();

        assert!(payload["items"].as_array().unwrap().is_empty());
        assert!(notes.as_slice()[0].contains("Ship Parts"));
    }

    #[test]
    fn name_filter_matches_substrings() {
        let pool = db::init_memory().unwrap();
        seed(&pool);
        let mut notes = Notes::default();

        let payload = run(
            &pool,
            ShapePolicy::default(),
            r#"{"names": ["pistol"]}"#,
            &mut notes,
        )
        .unwrap();

        let items = payload["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Arclight Pistol");
    }
}

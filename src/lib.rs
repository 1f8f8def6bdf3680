//! Tradewinds - Galactic trade knowledge base skill for AI voice assistants
//!
//! This library provides the knowledge-base core consumed by a voice
//! assistant's tool-call layer:
//! - Composable SQL query building with parameter binding
//! - A generic typed repository over a pooled SQLite store
//! - Versioned schema lifecycle with destructive recreation
//! - LLM tools with cardinality-adaptive result shaping and advisory notes
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Assistant host                       │
//! │   Voice  │  LLM routing  │  Tool dispatch           │
//! └────────────────────┬────────────────────────────────┘
//!                      │ execute(name, args)
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Trade tools                         │
//! │   commodity  │  item  │  route  │  shaping + notes  │
//! └────────────────────┬────────────────────────────────┘
//!                      │ queries
//! ┌────────────────────▼────────────────────────────────┐
//! │             Data access core                         │
//! │   Filter  │  Repository<R>  │  schema  │  SQLite    │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod tools;

pub use config::{RouteConfig, SkillConfig, ToolsConfig};
pub use db::{DbConn, DbPool, Filter, FilterValue, Op, Record, Repository, SortOrder};
pub use error::{Error, Result};
pub use models::{
    AiView, Category, CategoryQuery, Commodity, CommodityPrice, CommodityPriceQuery,
    CommodityQuery, Item, ItemQuery, Planet, PlanetQuery, StarSystem, StarSystemQuery, Terminal,
    TerminalQuery,
};
pub use tools::{Notes, ShapePolicy, Tier, ToolOutput, TradeTools};

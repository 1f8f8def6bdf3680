//! Typed records and query builders for the trade knowledge base
//!
//! Each entity pairs a [`Record`](crate::db::Record) struct with a query
//! builder whose per-column filter methods are generated by
//! [`entity_query!`] from a declarative column list, instead of being
//! hand-written once per filterable column.

mod category;
mod commodity;
mod commodity_price;
mod item;
mod planet;
mod star_system;
mod terminal;

pub use category::{Category, CategoryQuery};
pub use commodity::{Commodity, CommodityQuery};
pub use commodity_price::{CommodityPrice, CommodityPriceQuery};
pub use item::{Item, ItemQuery};
pub use planet::{Planet, PlanetQuery};
pub use star_system::{StarSystem, StarSystemQuery};
pub use terminal::{Terminal, TerminalQuery};

use crate::db::DbPool;

/// Two-tier AI-facing serialization
///
/// The full view renders related entities through their minimal view; the
/// minimal view reduces related entities to bare name strings. Neither view
/// ever recurses past one level, so cyclic entity graphs (an item whose
/// parent chain loops) cannot expand unboundedly.
pub trait AiView {
    /// Full detail view for small result sets
    fn ai_full(&self, pool: &DbPool) -> serde_json::Value;

    /// Compact view for mid-sized result sets
    fn ai_minimal(&self, pool: &DbPool) -> serde_json::Value;
}

/// Generate an entity query builder: the wrapping struct, the standard
/// fluent surface (`limit`/`offset`/`order_by`/`add_col`/`distinct`/
/// `apply_filter`/`load`/`load_one`), and one filter method per declared
/// column.
///
/// Filter kinds: `eq` (equality, typed value), `like` (substring match),
/// `flag` (boolean column), `any` (`IN` over a list).
macro_rules! entity_query {
    (
        $(#[$struct_meta:meta])*
        $query:ident($record:ty) {
            $( $(#[$meta:meta])* $name:ident => $kind:ident($column:literal) ),* $(,)?
        }
    ) => {
        $(#[$struct_meta])*
        pub struct $query {
            repo: $crate::db::Repository<$record>,
        }

        impl $query {
            /// Create a query over the entity's table
            #[must_use]
            pub fn new(pool: &$crate::db::DbPool) -> Self {
                Self {
                    repo: $crate::db::Repository::new(pool.clone()),
                }
            }

            /// Cap the number of rows returned
            #[must_use]
            pub fn limit(mut self, limit: u32) -> Self {
                self.repo = self.repo.limit(limit);
                self
            }

            /// Skip the first `offset` rows
            #[must_use]
            pub fn offset(mut self, offset: u32) -> Self {
                self.repo = self.repo.offset(offset);
                self
            }

            /// Add or update an ORDER BY directive
            #[must_use]
            pub fn order_by(mut self, field: &str, order: $crate::db::SortOrder) -> Self {
                self.repo = self.repo.order_by(field, order);
                self
            }

            /// Append a computed output column to the SELECT list
            #[must_use]
            pub fn add_col(mut self, expr: &str, alias: Option<&str>) -> Self {
                self.repo = self.repo.add_col(expr, alias);
                self
            }

            /// Deduplicate result rows
            #[must_use]
            pub fn distinct(mut self) -> Self {
                self.repo = self.repo.distinct();
                self
            }

            /// Merge a sub-filter built elsewhere
            #[must_use]
            pub fn apply_filter(mut self, other: $crate::db::Filter, is_or: bool) -> Self {
                self.repo = self.repo.apply_filter(other, is_or);
                self
            }

            /// Mutable access to the underlying filter
            pub fn filter_mut(&mut self) -> &mut $crate::db::Filter {
                self.repo.filter_mut()
            }

            /// Take the accumulated filter, e.g. to merge into another query
            #[must_use]
            pub fn into_filter(self) -> $crate::db::Filter {
                self.repo.into_filter()
            }

            /// Execute and hydrate all matching records
            ///
            /// # Errors
            ///
            /// Returns error on malformed filter composition or a failed query
            pub fn load(self) -> $crate::Result<Vec<$record>> {
                self.repo.load()
            }

            /// Execute and hydrate at most one record
            ///
            /// # Errors
            ///
            /// Returns error on malformed filter composition or a failed query
            pub fn load_one(self) -> $crate::Result<Option<$record>> {
                self.repo.load_one()
            }

            $( entity_query!(@method $(#[$meta])* $name $kind $column); )*
        }
    };

    (@method $(#[$meta:meta])* $name:ident eq $column:literal) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name(mut self, value: impl Into<$crate::db::FilterValue>) -> Self {
            self.repo.filter_mut().where_eq($column, value);
            self
        }
    };
    (@method $(#[$meta:meta])* $name:ident like $column:literal) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name(mut self, value: &str) -> Self {
            self.repo
                .filter_mut()
                .where_op($column, $crate::db::Op::Like, format!("%{value}%"));
            self
        }
    };
    (@method $(#[$meta:meta])* $name:ident flag $column:literal) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name(mut self, value: bool) -> Self {
            self.repo.filter_mut().where_eq($column, value);
            self
        }
    };
    (@method $(#[$meta:meta])* $name:ident any $column:literal) => {
        $(#[$meta])*
        #[must_use]
        pub fn $name<I>(mut self, values: I) -> Self
        where
            I: IntoIterator,
            I::Item: Into<$crate::db::FilterValue>,
        {
            let list: Vec<$crate::db::FilterValue> =
                values.into_iter().map(Into::into).collect();
            self.repo
                .filter_mut()
                .where_eq($column, $crate::db::FilterValue::List(list));
            self
        }
    };
}

pub(crate) use entity_query;

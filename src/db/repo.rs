//! Generic fetch-and-hydrate repository over one table and one record type

use std::collections::BTreeMap;
use std::marker::PhantomData;

use rusqlite::ToSql;
use rusqlite::types::Value;

use super::filter::{Filter, FilterValue, SortOrder, debug_sql};
use super::DbPool;
use crate::{Error, Result};

/// One result row as a name-addressable value mapping
#[derive(Debug, Clone, Default)]
pub struct RowValues {
    values: BTreeMap<String, Value>,
}

impl RowValues {
    /// Capture every column of a rusqlite row by name
    ///
    /// # Errors
    ///
    /// Returns error if a column cannot be read
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let stmt: &rusqlite::Statement<'_> = row.as_ref();
        let mut values = BTreeMap::new();
        for idx in 0..stmt.column_count() {
            let name = stmt.column_name(idx)?.to_string();
            values.insert(name, row.get::<_, Value>(idx)?);
        }
        Ok(Self { values })
    }

    /// Raw value for a column, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Integer column; NULL and missing read as 0 (the upstream unset
    /// sentinel for FK columns)
    #[must_use]
    pub fn int(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(Value::Integer(i)) => *i,
            _ => 0,
        }
    }

    /// Real column; integer values widen, NULL and missing read as 0.0
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn real(&self, key: &str) -> f64 {
        match self.values.get(key) {
            Some(Value::Real(f)) => *f,
            Some(Value::Integer(i)) => *i as f64,
            _ => 0.0,
        }
    }

    /// Text column; NULL and missing read as empty
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        match self.values.get(key) {
            Some(Value::Text(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// Text column as an option
    #[must_use]
    pub fn opt_text(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(Value::Text(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Boolean column stored as INTEGER 0/1
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.int(key) != 0
    }

    /// Columns beyond the declared set, e.g. joined or computed output
    /// columns added by the query
    #[must_use]
    pub fn extras_beyond(&self, columns: &[&str]) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .filter(|(key, _)| !columns.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Contract between the repository and a typed record
///
/// Hydration builds the typed core fields from the declared columns, then
/// lays the remaining row columns into an explicit extras map so convenience
/// accessors can see joined/denormalized output columns.
pub trait Record: Sized {
    /// Owning table name
    const TABLE: &'static str;

    /// Declared columns, kept in lockstep with `init.sql`
    const COLUMNS: &'static [&'static str];

    /// Build the typed core fields from a result row
    fn from_row(row: &RowValues) -> Self;

    /// Attach auxiliary columns beyond the declared set
    fn set_extras(&mut self, extras: BTreeMap<String, Value>);

    /// Auxiliary columns attached at hydration
    fn extras(&self) -> &BTreeMap<String, Value>;

    /// Column/value pairs written by `persist` (booleans as 0/1,
    /// lists and maps as JSON text)
    fn to_row(&self) -> Vec<(&'static str, Value)>;

    /// Text-valued auxiliary column
    fn extra_text(&self, key: &str) -> Option<String> {
        match self.extras().get(key) {
            Some(Value::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Numeric auxiliary column
    #[allow(clippy::cast_precision_loss)]
    fn extra_real(&self, key: &str) -> Option<f64> {
        match self.extras().get(key) {
            Some(Value::Real(f)) => Some(*f),
            Some(Value::Integer(i)) => Some(*i as f64),
            _ => None,
        }
    }
}

/// Generic repository bound to one table and one record type
///
/// Builder methods consume and return the repository so call sites chain
/// fluently; `load` resolves the filter into
/// `SELECT <extra cols>, table.* FROM table <joins> <where> <order> <limit>`
/// and hydrates one record per row.
pub struct Repository<R: Record> {
    pool: DbPool,
    filter: Filter,
    extra_cols: Vec<(String, Option<String>)>,
    distinct: bool,
    _record: PhantomData<R>,
}

impl<R: Record> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            filter: self.filter.clone(),
            extra_cols: self.extra_cols.clone(),
            distinct: self.distinct,
            _record: PhantomData,
        }
    }
}

impl<R: Record> Repository<R> {
    /// Create a repository over the record's table
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            filter: Filter::on(R::TABLE),
            extra_cols: Vec::new(),
            distinct: false,
            _record: PhantomData,
        }
    }

    /// Mutable access to the underlying filter
    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    /// Take the accumulated filter, e.g. to merge into another query
    #[must_use]
    pub fn into_filter(self) -> Filter {
        self.filter
    }

    /// Merge a sub-filter built elsewhere (see [`Filter::apply`])
    #[must_use]
    pub fn apply_filter(mut self, other: Filter, is_or: bool) -> Self {
        self.filter.apply(other, is_or);
        self
    }

    /// Cap the number of rows returned
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.filter.limit(limit);
        self
    }

    /// Skip the first `offset` rows
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.filter.offset(offset);
        self
    }

    /// Add or update an ORDER BY directive
    #[must_use]
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.filter.order_by(field, order);
        self
    }

    /// Append a computed output column to the SELECT list
    #[must_use]
    pub fn add_col(mut self, expr: &str, alias: Option<&str>) -> Self {
        self.extra_cols
            .push((expr.to_string(), alias.map(ToString::to_string)));
        self
    }

    /// Deduplicate result rows (`SELECT DISTINCT`); joins against price
    /// tables multiply rows otherwise
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    fn select_sql(&self, resolved: &super::filter::ResolvedFilter) -> String {
        let mut select_list = String::new();
        for (expr, alias) in &self.extra_cols {
            select_list.push_str(expr);
            if let Some(alias) = alias {
                select_list.push_str(" AS ");
                select_list.push_str(alias);
            }
            select_list.push_str(", ");
        }
        select_list.push_str(R::TABLE);
        select_list.push_str(".*");

        let keyword = if self.distinct { "SELECT DISTINCT" } else { "SELECT" };
        let parts = [
            format!("{keyword} {select_list} FROM {}", R::TABLE),
            resolved.join_sql.clone(),
            resolved.where_sql.clone(),
            resolved.order_sql.clone(),
            resolved.limit_sql.clone(),
            resolved.offset_sql.clone(),
        ];
        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the query and hydrate one record per row
    ///
    /// "No rows" is a valid, non-error outcome. A connection that cannot be
    /// checked out (shutdown teardown race) logs a warning and also yields
    /// no rows.
    ///
    /// # Errors
    ///
    /// Returns error on malformed filter composition or a failed query
    pub fn load(&self) -> Result<Vec<R>> {
        let resolved = self.filter.resolve()?;
        let sql = self.select_sql(&resolved);
        tracing::debug!(sql = %debug_sql(&sql, &resolved.binds), "loading rows");

        let Ok(conn) = self.pool.get() else {
            tracing::warn!(table = R::TABLE, "connection unavailable, returning no rows");
            return Ok(Vec::new());
        };

        let mut stmt = conn.prepare(&sql)?;
        let params = resolved.params();
        let rows = stmt.query_map(params.as_slice(), RowValues::from_row)?;

        let mut records = Vec::new();
        for row in rows.flatten() {
            let mut record = R::from_row(&row);
            record.set_extras(row.extras_beyond(R::COLUMNS));
            records.push(record);
        }
        Ok(records)
    }

    /// Like [`Repository::load`], fetching at most one row
    ///
    /// # Errors
    ///
    /// Returns error on malformed filter composition or a failed query
    pub fn load_one(&self) -> Result<Option<R>> {
        let mut narrowed = self.clone();
        narrowed.filter.limit(1);
        Ok(narrowed.load()?.into_iter().next())
    }

    /// Load at most one record by a single equality predicate
    ///
    /// # Errors
    ///
    /// Returns error on a failed query
    pub fn load_by_property(
        pool: &DbPool,
        field: &str,
        value: impl Into<FilterValue>,
    ) -> Result<Option<R>> {
        let mut repo = Self::new(pool.clone());
        repo.filter.where_eq(field, value);
        repo.load_one()
    }

    /// Upsert a record keyed by its primary key (`INSERT OR REPLACE`);
    /// idempotent under repeated identical calls
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the record declares nothing to write,
    /// [`Error::Database`] if no connection is available, or the underlying
    /// SQLite error on a failed statement
    pub fn persist(&self, record: &R) -> Result<()> {
        let row = record.to_row();
        if row.is_empty() {
            return Err(Error::Persist(format!(
                "record for table '{}' has no columns to write",
                R::TABLE
            )));
        }

        let columns: Vec<&str> = row.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<String> = columns.iter().map(|column| format!(":{column}")).collect();
        let sql = format!(
            "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
            R::TABLE,
            columns.join(", "),
            placeholders.join(", ")
        );

        let named: Vec<(String, Value)> = row
            .into_iter()
            .map(|(column, value)| (format!(":{column}"), value))
            .collect();
        let params: Vec<(&str, &dyn ToSql)> = named
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect();

        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        conn.execute(&sql, params.as_slice())?;
        Ok(())
    }
}

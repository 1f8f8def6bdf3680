//! Composable WHERE/JOIN/ORDER/LIMIT builder with named parameter binding
//!
//! A [`Filter`] accumulates predicates, join edges, ordering, and paging and
//! resolves them into SQL fragments plus a bind list. Resolution is a pure
//! read: resolving the same filter twice yields identical SQL text and an
//! identical bind list. Every predicate value travels through a named bind
//! parameter; only structural identifiers (table and column names supplied
//! by skill code, never by the user) are interpolated into SQL text.

use rusqlite::ToSql;
use rusqlite::types::Value;

use crate::{Error, Result};

/// Typed predicate value. The variant drives the SQL shape of the predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Boolean, coerced to 0/1 when bound
    Bool(bool),
    /// Integer; the value 0 additionally matches NULL (upstream uses 0 as
    /// the unset sentinel for optional FK columns)
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Expands to `IN (...)` with one bind per element, order preserved
    List(Vec<FilterValue>),
    /// A column reference, rendered as a bare identifier and never bound
    Column(String),
}

impl FilterValue {
    /// Reference another column for same-row comparisons
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Convert a scalar variant into its bound SQLite value
    fn to_bind(&self) -> Option<Value> {
        match self {
            Self::Bool(b) => Some(Value::Integer(i64::from(*b))),
            Self::Int(i) => Some(Value::Integer(*i)),
            Self::Float(f) => Some(Value::Real(*f)),
            Self::Text(s) => Some(Value::Text(s.clone())),
            Self::List(_) | Self::Column(_) => None,
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// Comparison operator for a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `LIKE`
    Like,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
}

impl Op {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    const fn is_list_op(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An INNER JOIN edge
#[derive(Debug, Clone, PartialEq, Eq)]
struct Join {
    table: String,
    field: String,
    source_table: String,
    source_field: String,
}

/// One predicate: field, value, optional operator, OR flag
#[derive(Debug, Clone)]
struct Predicate {
    field: String,
    value: FilterValue,
    op: Option<Op>,
    or: bool,
}

/// A predicate tree: top-level predicates plus nested groups from merged
/// filters. Groups render after the top-level predicates, each parenthesized.
#[derive(Debug, Clone, Default)]
struct ConditionSet {
    predicates: Vec<Predicate>,
    groups: Vec<(bool, ConditionSet)>,
}

impl ConditionSet {
    fn is_empty(&self) -> bool {
        self.predicates.is_empty() && self.groups.is_empty()
    }
}

/// Accumulating bind list; names are assigned in resolution order
#[derive(Debug, Default)]
struct Binds {
    items: Vec<(String, Value)>,
}

impl Binds {
    fn push(&mut self, value: Value) -> String {
        let name = format!(":p{}", self.items.len() + 1);
        self.items.push((name.clone(), value));
        name
    }
}

/// Resolved SQL fragments plus the bind list that goes with them
#[derive(Debug)]
pub struct ResolvedFilter {
    /// Empty, or a full `WHERE ...` clause
    pub where_sql: String,
    /// Zero or more `JOIN ... ON ...` clauses
    pub join_sql: String,
    /// Empty, or `ORDER BY ...`
    pub order_sql: String,
    /// Empty, or `LIMIT n` (`LIMIT -1` when only an offset is set)
    pub limit_sql: String,
    /// Empty, or `OFFSET n`
    pub offset_sql: String,
    /// Bind name/value pairs referenced by `where_sql`
    pub binds: Vec<(String, Value)>,
}

impl ResolvedFilter {
    /// Bind pairs in the form rusqlite expects for named parameters
    #[must_use]
    pub fn params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.binds
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}

/// Render SQL with bind values inlined, for diagnostic logging only.
/// The result is never executed.
#[must_use]
pub fn debug_sql(sql: &str, binds: &[(String, Value)]) -> String {
    let mut ordered: Vec<&(String, Value)> = binds.iter().collect();
    // Substitute longer names first so :p1 does not clobber :p10
    ordered.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

    let mut out = sql.to_string();
    for (name, value) in ordered {
        let rendered = match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Real(f) => f.to_string(),
            Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Blob(b) => format!("<blob {} bytes>", b.len()),
        };
        out = out.replace(name.as_str(), &rendered);
    }
    out
}

/// Mutable query-fragment builder
///
/// Constructed fresh per query, mutated by chained builder calls, resolved
/// into SQL text plus binds, then discarded (or [`Filter::clear`]-reset).
#[derive(Debug, Clone, Default)]
pub struct Filter {
    table: Option<String>,
    conditions: ConditionSet,
    joins: Vec<Join>,
    order: Vec<(String, SortOrder)>,
    limit: Option<u32>,
    offset: Option<u32>,
    error: Option<String>,
}

impl Filter {
    /// Create a filter with no base table; field names are used as given
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter whose unqualified field names resolve against `table`
    #[must_use]
    pub fn on(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    /// Base table this filter qualifies unqualified fields with
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// True if no predicates exist at any nesting level
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append an AND predicate with the type-default operator
    /// (`=` for scalars, `IN` for lists)
    pub fn where_eq(&mut self, field: &str, value: impl Into<FilterValue>) -> &mut Self {
        self.push_predicate(field, value.into(), None, false)
    }

    /// Append an AND predicate with an explicit operator
    pub fn where_op(&mut self, field: &str, op: Op, value: impl Into<FilterValue>) -> &mut Self {
        self.push_predicate(field, value.into(), Some(op), false)
    }

    /// Append a predicate combined with OR against its neighbors
    /// ("any of these columns match" idioms)
    pub fn or_where_eq(&mut self, field: &str, value: impl Into<FilterValue>) -> &mut Self {
        self.push_predicate(field, value.into(), None, true)
    }

    /// Append an OR predicate with an explicit operator
    pub fn or_where_op(&mut self, field: &str, op: Op, value: impl Into<FilterValue>) -> &mut Self {
        self.push_predicate(field, value.into(), Some(op), true)
    }

    fn push_predicate(
        &mut self,
        field: &str,
        value: FilterValue,
        op: Option<Op>,
        or: bool,
    ) -> &mut Self {
        if let Err(msg) = Self::validate(field, &value, op) {
            // First invalid call poisons the filter; resolve() surfaces it
            if self.error.is_none() {
                self.error = Some(msg);
            }
            return self;
        }
        let field = self.qualify(field);
        self.conditions.predicates.push(Predicate {
            field,
            value,
            op,
            or,
        });
        self
    }

    fn validate(field: &str, value: &FilterValue, op: Option<Op>) -> std::result::Result<(), String> {
        match value {
            FilterValue::List(items) => {
                if items.is_empty() {
                    return Err(format!("empty list value for field '{field}'"));
                }
                if items.iter().any(|v| matches!(v, FilterValue::List(_) | FilterValue::Column(_))) {
                    return Err(format!("list value for field '{field}' must hold scalars"));
                }
                if op.is_some_and(|op| !op.is_list_op()) {
                    return Err(format!("list value for field '{field}' requires IN or NOT IN"));
                }
            }
            _ => {
                if op.is_some_and(Op::is_list_op) {
                    return Err(format!("IN/NOT IN on field '{field}' requires a list value"));
                }
            }
        }
        Ok(())
    }

    fn qualify(&self, field: &str) -> String {
        if field.contains('.') {
            return field.to_string();
        }
        self.table
            .as_ref()
            .map_or_else(|| field.to_string(), |t| format!("{t}.{field}"))
    }

    /// Record an INNER JOIN edge, resolved as
    /// `JOIN table ON source_table.source_field = table.field`.
    /// Identical edges are recorded once.
    pub fn join(
        &mut self,
        table: &str,
        field: &str,
        source_table: &str,
        source_field: &str,
    ) -> &mut Self {
        self.push_join(Join {
            table: table.to_string(),
            field: field.to_string(),
            source_table: source_table.to_string(),
            source_field: source_field.to_string(),
        });
        self
    }

    fn push_join(&mut self, join: Join) {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
    }

    /// Add or update an ORDER BY directive. Field names are used verbatim so
    /// computed-column aliases stay addressable.
    pub fn order_by(&mut self, field: &str, order: SortOrder) -> &mut Self {
        self.push_order(field.to_string(), order);
        self
    }

    fn push_order(&mut self, field: String, order: SortOrder) {
        if let Some(entry) = self.order.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = order;
        } else {
            self.order.push((field, order));
        }
    }

    /// Cap the number of rows returned
    pub fn limit(&mut self, limit: u32) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` rows
    pub fn offset(&mut self, offset: u32) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    /// Absorb another filter: its joins, paging, and ordering relocate into
    /// this filter, and its whole predicate tree nests as one parenthesized
    /// group combined with `is_or` against this filter's own predicates.
    pub fn apply(&mut self, mut other: Self, is_or: bool) -> &mut Self {
        if self.error.is_none() {
            self.error = other.error.take();
        }
        for join in other.joins.drain(..) {
            self.push_join(join);
        }
        if other.limit.is_some() {
            self.limit = other.limit;
        }
        if other.offset.is_some() {
            self.offset = other.offset;
        }
        for (field, order) in other.order.drain(..) {
            self.push_order(field, order);
        }
        if !other.conditions.is_empty() {
            self.conditions.groups.push((is_or, other.conditions));
        }
        self
    }

    /// Reset to the freshly constructed state, keeping the base table
    pub fn clear(&mut self) -> &mut Self {
        self.conditions = ConditionSet::default();
        self.joins.clear();
        self.order.clear();
        self.limit = None;
        self.offset = None;
        self.error = None;
        self
    }

    /// Resolve the current state into SQL fragments and binds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Filter`] if any builder call recorded a malformed
    /// composition (empty list, list with a scalar operator, ...).
    pub fn resolve(&self) -> Result<ResolvedFilter> {
        if let Some(msg) = &self.error {
            return Err(Error::Filter(msg.clone()));
        }

        let mut binds = Binds::default();
        let body = Self::render_conditions(&self.conditions, &mut binds);
        let where_sql = if body.is_empty() {
            String::new()
        } else {
            format!("WHERE {body}")
        };

        let join_sql = self
            .joins
            .iter()
            .map(|j| {
                format!(
                    "JOIN {} ON {}.{} = {}.{}",
                    j.table, j.source_table, j.source_field, j.table, j.field
                )
            })
            .collect::<Vec<_>>()
            .join(" ");

        let order_sql = if self.order.is_empty() {
            String::new()
        } else {
            let parts: Vec<String> = self
                .order
                .iter()
                .map(|(field, dir)| format!("{field} {}", dir.as_sql()))
                .collect();
            format!("ORDER BY {}", parts.join(", "))
        };

        let limit_sql = match (self.limit, self.offset) {
            (Some(limit), _) => format!("LIMIT {limit}"),
            // SQLite only accepts OFFSET after a LIMIT clause
            (None, Some(_)) => "LIMIT -1".to_string(),
            (None, None) => String::new(),
        };
        let offset_sql = self
            .offset
            .map_or_else(String::new, |offset| format!("OFFSET {offset}"));

        Ok(ResolvedFilter {
            where_sql,
            join_sql,
            order_sql,
            limit_sql,
            offset_sql,
            binds: binds.items,
        })
    }

    fn render_conditions(set: &ConditionSet, binds: &mut Binds) -> String {
        let mut sql = String::new();
        for (i, pred) in set.predicates.iter().enumerate() {
            if i > 0 {
                sql.push_str(if pred.or { " OR " } else { " AND " });
            }
            sql.push_str(&Self::render_predicate(pred, binds));
        }
        for (or, group) in &set.groups {
            let inner = Self::render_conditions(group, binds);
            if inner.is_empty() {
                continue;
            }
            if !sql.is_empty() {
                sql.push_str(if *or { " OR " } else { " AND " });
            }
            sql.push('(');
            sql.push_str(&inner);
            sql.push(')');
        }
        sql
    }

    fn render_predicate(pred: &Predicate, binds: &mut Binds) -> String {
        let field = &pred.field;
        match &pred.value {
            FilterValue::Column(other) => {
                let op = pred.op.unwrap_or(Op::Eq).as_sql();
                format!("{field} {op} {other}")
            }
            FilterValue::List(items) => {
                let op = pred.op.unwrap_or(Op::In).as_sql();
                let names: Vec<String> = items
                    .iter()
                    .filter_map(FilterValue::to_bind)
                    .map(|v| binds.push(v))
                    .collect();
                format!("{field} {op} ({})", names.join(","))
            }
            // 0 doubles as the unset sentinel on optional FK columns upstream
            FilterValue::Int(0) => {
                let op = pred.op.unwrap_or(Op::Eq).as_sql();
                let name = binds.push(Value::Integer(0));
                format!("({field} {op} {name} OR {field} IS NULL)")
            }
            value => {
                let op = pred.op.unwrap_or(Op::Eq).as_sql();
                let name = binds.push(value.to_bind().unwrap_or(Value::Null));
                format!("{field} {op} {name}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_binds_all_values() {
        let mut filter = Filter::on("commodity");
        filter
            .where_eq("name", "Gold")
            .where_op("price_sell", Op::Gt, 10.5)
            .where_eq("is_sellable", true);

        let resolved = filter.resolve().unwrap();
        assert_eq!(
            resolved.where_sql,
            "WHERE commodity.name = :p1 AND commodity.price_sell > :p2 AND commodity.is_sellable = :p3"
        );
        assert_eq!(resolved.binds.len(), 3);
        assert_eq!(resolved.binds[0].1, Value::Text("Gold".to_string()));
        assert_eq!(resolved.binds[1].1, Value::Real(10.5));
        assert_eq!(resolved.binds[2].1, Value::Integer(1));
        // No literal value text leaks into the SQL
        assert!(!resolved.where_sql.contains("Gold"));
        assert!(!resolved.where_sql.contains("10.5"));
    }

    #[test]
    fn zero_int_matches_null() {
        let mut filter = Filter::on("terminal");
        filter.where_eq("id_planet", 0);
        let resolved = filter.resolve().unwrap();
        assert_eq!(
            resolved.where_sql,
            "WHERE (terminal.id_planet = :p1 OR terminal.id_planet IS NULL)"
        );
        assert_eq!(resolved.binds, vec![(":p1".to_string(), Value::Integer(0))]);
    }

    #[test]
    fn zero_int_keeps_explicit_operator() {
        let mut filter = Filter::on("terminal");
        filter.where_op("id_planet", Op::Gt, 0);
        let resolved = filter.resolve().unwrap();
        assert_eq!(
            resolved.where_sql,
            "WHERE (terminal.id_planet > :p1 OR terminal.id_planet IS NULL)"
        );
    }

    #[test]
    fn false_is_not_null_coalesced() {
        let mut filter = Filter::on("commodity");
        filter.where_eq("is_illegal", false);
        let resolved = filter.resolve().unwrap();
        assert_eq!(resolved.where_sql, "WHERE commodity.is_illegal = :p1");
        assert_eq!(resolved.binds[0].1, Value::Integer(0));
    }

    #[test]
    fn list_expands_to_in_with_one_bind_each() {
        let mut filter = Filter::on("commodity");
        filter.where_eq("name", vec!["Gold", "Iron", "Gold"]);
        let resolved = filter.resolve().unwrap();
        assert_eq!(resolved.where_sql, "WHERE commodity.name IN (:p1,:p2,:p3)");
        assert_eq!(resolved.binds[0].1, Value::Text("Gold".to_string()));
        assert_eq!(resolved.binds[1].1, Value::Text("Iron".to_string()));
        assert_eq!(resolved.binds[2].1, Value::Text("Gold".to_string()));
    }

    #[test]
    fn column_reference_is_never_bound() {
        let mut filter = Filter::on("route");
        filter.where_eq("id_system_origin", FilterValue::column("route.id_system_destination"));
        let resolved = filter.resolve().unwrap();
        assert_eq!(
            resolved.where_sql,
            "WHERE route.id_system_origin = route.id_system_destination"
        );
        assert!(resolved.binds.is_empty());
    }

    #[test]
    fn qualified_fields_are_left_alone() {
        let mut filter = Filter::on("commodity");
        filter.where_eq("commodity_price.id_terminal", 4);
        let resolved = filter.resolve().unwrap();
        assert_eq!(resolved.where_sql, "WHERE commodity_price.id_terminal = :p1");
    }

    #[test]
    fn or_predicates_join_in_declaration_order() {
        let mut filter = Filter::on("commodity");
        filter
            .where_op("name", Op::Like, "%gold%")
            .or_where_op("code", Op::Like, "%gold%");
        let resolved = filter.resolve().unwrap();
        assert_eq!(
            resolved.where_sql,
            "WHERE commodity.name LIKE :p1 OR commodity.code LIKE :p2"
        );
    }

    #[test]
    fn apply_nests_other_filter_as_group() {
        let mut a = Filter::on("commodity");
        a.where_eq("is_sellable", true);

        let mut b = Filter::on("commodity_price");
        b.where_eq("id_terminal", 7).where_op("price_sell", Op::Gt, 0.0);
        b.join("commodity_price", "id_commodity", "commodity", "id");

        a.apply(b, false);
        let resolved = a.resolve().unwrap();
        assert_eq!(
            resolved.where_sql,
            "WHERE commodity.is_sellable = :p1 AND (commodity_price.id_terminal = :p2 AND commodity_price.price_sell > :p3)"
        );
        assert_eq!(
            resolved.join_sql,
            "JOIN commodity_price ON commodity.id = commodity_price.id_commodity"
        );
    }

    #[test]
    fn resolve_is_a_pure_read() {
        let mut a = Filter::on("t");
        a.where_eq("p0", 1);
        let mut b = Filter::on("t");
        b.where_eq("p1", 2).where_eq("p2", 3);
        a.apply(b, false);

        let first = a.resolve().unwrap();
        let second = a.resolve().unwrap();
        assert_eq!(first.where_sql, second.where_sql);
        assert_eq!(first.binds, second.binds);
        assert_eq!(first.where_sql, "WHERE t.p0 = :p1 AND (t.p1 = :p2 AND t.p2 = :p3)");
    }

    #[test]
    fn nested_groups_resolve_recursively() {
        let mut inner = Filter::on("planet");
        inner.where_eq("name", "Crusader");

        let mut mid = Filter::on("terminal");
        mid.where_eq("is_available", true);
        mid.apply(inner, true);

        let mut outer = Filter::on("commodity");
        outer.where_eq("is_buyable", true);
        outer.apply(mid, false);

        let resolved = outer.resolve().unwrap();
        assert_eq!(
            resolved.where_sql,
            "WHERE commodity.is_buyable = :p1 AND (terminal.is_available = :p2 OR (planet.name = :p3))"
        );
    }

    #[test]
    fn empty_filter_resolves_to_empty_where() {
        let filter = Filter::on("commodity");
        let resolved = filter.resolve().unwrap();
        assert!(resolved.where_sql.is_empty());
        assert!(resolved.binds.is_empty());
    }

    #[test]
    fn empty_list_poisons_the_filter() {
        let mut filter = Filter::on("commodity");
        filter.where_eq("name", FilterValue::List(Vec::new()));
        let err = filter.resolve().unwrap_err();
        assert!(matches!(err, Error::Filter(_)), "got {err:?}");
    }

    #[test]
    fn scalar_operator_on_list_poisons_the_filter() {
        let mut filter = Filter::on("commodity");
        filter.where_op("name", Op::Gt, vec!["A", "B"]);
        assert!(filter.resolve().is_err());
    }

    #[test]
    fn in_operator_on_scalar_poisons_the_filter() {
        let mut filter = Filter::on("commodity");
        filter.where_op("name", Op::In, "Gold");
        assert!(filter.resolve().is_err());
    }

    #[test]
    fn joins_deduplicate_across_apply() {
        let mut a = Filter::on("commodity");
        a.join("commodity_price", "id_commodity", "commodity", "id");
        let mut b = Filter::on("commodity_price");
        b.join("commodity_price", "id_commodity", "commodity", "id");
        b.where_eq("id_terminal", 1);
        a.apply(b, false);

        let resolved = a.resolve().unwrap();
        assert_eq!(
            resolved.join_sql,
            "JOIN commodity_price ON commodity.id = commodity_price.id_commodity"
        );
    }

    #[test]
    fn offset_without_limit_emits_limit_minus_one() {
        let mut filter = Filter::on("commodity");
        filter.offset(20);
        let resolved = filter.resolve().unwrap();
        assert_eq!(resolved.limit_sql, "LIMIT -1");
        assert_eq!(resolved.offset_sql, "OFFSET 20");
    }

    #[test]
    fn order_by_updates_in_place() {
        let mut filter = Filter::on("commodity");
        filter
            .order_by("name", SortOrder::Asc)
            .order_by("profit", SortOrder::Desc)
            .order_by("name", SortOrder::Desc);
        let resolved = filter.resolve().unwrap();
        assert_eq!(resolved.order_sql, "ORDER BY name DESC, profit DESC");
    }

    #[test]
    fn clear_resets_everything() {
        let mut filter = Filter::on("commodity");
        filter
            .where_eq("name", "Gold")
            .join("commodity_price", "id_commodity", "commodity", "id")
            .order_by("name", SortOrder::Asc)
            .limit(5)
            .offset(10);
        filter.clear();

        let resolved = filter.resolve().unwrap();
        assert!(resolved.where_sql.is_empty());
        assert!(resolved.join_sql.is_empty());
        assert!(resolved.order_sql.is_empty());
        assert!(resolved.limit_sql.is_empty());
        assert!(filter.table().is_some());
    }

    #[test]
    fn debug_sql_inlines_binds() {
        let mut filter = Filter::on("commodity");
        filter.where_eq("name", "O'Brien").where_eq("id", 3);
        let resolved = filter.resolve().unwrap();
        let rendered = debug_sql(&resolved.where_sql, &resolved.binds);
        assert_eq!(
            rendered,
            "WHERE commodity.name = 'O''Brien' AND commodity.id = 3"
        );
    }
}

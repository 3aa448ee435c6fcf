//! Rendering of `taller_core::filter` predicate trees into SQL.
//!
//! Produces a `WHERE` clause with `$n` placeholders plus the ordered bind
//! values, following the same `(clause, binds, next_index)` shape used for
//! every dynamically-built query in this crate.

use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;
use taller_core::filter::{FilterQuery, Predicate};

/// Typed bind value for dynamically-built filter queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Bool(bool),
}

/// A rendered filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
    /// Empty when the query is unfiltered, otherwise starts with `WHERE `.
    pub where_clause: String,
    pub bind_values: Vec<BindValue>,
    /// Next free placeholder index.
    pub next_index: u32,
}

/// Render `query` starting at placeholder `$1`.
pub fn render_filter(query: &FilterQuery) -> SqlFilter {
    let mut bind_values = Vec::new();
    let mut bind_idx = 1u32;

    let conditions: Vec<String> = query
        .predicates()
        .iter()
        .map(|p| render_predicate(p, &mut bind_values, &mut bind_idx))
        .collect();

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    SqlFilter {
        where_clause,
        bind_values,
        next_index: bind_idx,
    }
}

fn render_predicate(predicate: &Predicate, binds: &mut Vec<BindValue>, bind_idx: &mut u32) -> String {
    match predicate {
        Predicate::Contains { column, needle } => {
            let sql = format!("{}::text ILIKE ${bind_idx}", quote_ident(column));
            *bind_idx += 1;
            binds.push(BindValue::Text(format!("%{}%", escape_like(needle))));
            sql
        }
        Predicate::Equals { column, value } => {
            let sql = format!("{} = ${bind_idx}", quote_ident(column));
            *bind_idx += 1;
            binds.push(BindValue::Bool(*value));
            sql
        }
        Predicate::Any(children) => join_group(children, " OR ", "FALSE", binds, bind_idx),
        Predicate::All(children) => join_group(children, " AND ", "TRUE", binds, bind_idx),
    }
}

fn join_group(
    children: &[Predicate],
    separator: &str,
    empty: &str,
    binds: &mut Vec<BindValue>,
    bind_idx: &mut u32,
) -> String {
    if children.is_empty() {
        return empty.to_string();
    }
    let parts: Vec<String> = children
        .iter()
        .map(|c| render_predicate(c, binds, bind_idx))
        .collect();
    format!("({})", parts.join(separator))
}

/// Double-quote an identifier, doubling any embedded quotes.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Escape `LIKE` metacharacters so the needle matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub fn bind_filter_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub fn bind_filter_values_scalar<'q>(
    mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    bind_values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
        }
    }
    q
}

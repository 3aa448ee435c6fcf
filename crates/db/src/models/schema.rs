//! Rows read from `information_schema` during schema introspection.

use sqlx::FromRow;

/// One column of a table as reported by `information_schema.columns`.
#[derive(Debug, Clone, FromRow)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
}

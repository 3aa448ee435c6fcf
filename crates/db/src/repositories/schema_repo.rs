//! Schema introspection against `information_schema.columns`.
//!
//! Run once at startup; the resulting [`SchemaCatalog`] is shared read-only
//! so filter construction never queries the catalog per request.

use sqlx::PgPool;
use taller_core::schema::{ColumnKind, EntitySchema, SchemaCatalog};
use taller_core::workshop;

use crate::models::schema::ColumnInfo;

/// Reads table shapes from the live database.
pub struct SchemaRepo;

impl SchemaRepo {
    /// Columns of `table` in the current schema, in ordinal order.
    ///
    /// A table that does not exist yields an empty list.
    pub async fn list_columns(pool: &PgPool, table: &str) -> Result<Vec<ColumnInfo>, sqlx::Error> {
        sqlx::query_as::<_, ColumnInfo>(
            "SELECT column_name::text AS column_name, data_type::text AS data_type \
             FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = $1 \
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(pool)
        .await
    }

    /// Build the capability descriptor for one table.
    pub async fn load_entity_schema(pool: &PgPool, table: &str) -> Result<EntitySchema, sqlx::Error> {
        let columns = Self::list_columns(pool, table).await?;
        Ok(columns
            .into_iter()
            .map(|c| {
                let kind = ColumnKind::from_sql_type(&c.data_type);
                (c.column_name, kind)
            })
            .collect())
    }

    /// Build the catalog for every entity type the API filters.
    pub async fn load_catalog(pool: &PgPool) -> Result<SchemaCatalog, sqlx::Error> {
        let mut catalog = SchemaCatalog::new();

        let workshops = Self::load_entity_schema(pool, workshop::TABLE_NAME).await?;
        tracing::info!(
            table = workshop::TABLE_NAME,
            columns = workshops.len(),
            "Loaded entity schema"
        );
        catalog.register(workshop::ENTITY_TYPE, workshops);

        Ok(catalog)
    }
}

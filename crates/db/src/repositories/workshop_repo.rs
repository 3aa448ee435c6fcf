//! Repository for the `talleres` table.

use sqlx::PgPool;
use taller_core::filter::FilterQuery;
use taller_core::types::DbId;
use taller_core::validation::ValidatedWorkshop;
use taller_core::workshop::derive_state;

use crate::filter_sql::{bind_filter_values, bind_filter_values_scalar, render_filter};
use crate::models::workshop::Workshop;

/// Column list shared across queries, aliased to the model's field names.
const COLUMNS: &str = "\
    id, nombre AS name, turno AS shift, hora_inicio AS start_time, \
    hora_fin AS end_time, sede AS site, fecha_inicio AS start_date, \
    fecha_fin AS end_date, capacidad_alumnos AS capacity, \
    descripcion AS description, requisitos AS requirements, \
    temario AS syllabus, estado AS state, created_at, updated_at";

/// Pre-delete check for dependent records.
pub trait RelationGuard: Send + Sync {
    /// `true` if `workshop` has dependents and must not be deleted.
    fn has_relations(&self, workshop: &Workshop) -> bool;
}

/// Guard used until workshops have related tables; never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRelations;

impl RelationGuard for NoRelations {
    fn has_relations(&self, _workshop: &Workshop) -> bool {
        false
    }
}

/// Result of a guarded delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    HasRelations,
}

/// Provides CRUD operations for workshops.
pub struct WorkshopRepo;

impl WorkshopRepo {
    /// Insert a new workshop, returning the created row.
    ///
    /// `estado` is derived from the capacity here, never taken from input.
    pub async fn create(pool: &PgPool, input: &ValidatedWorkshop) -> Result<Workshop, sqlx::Error> {
        let state = derive_state(input.capacity);
        let query = format!(
            "INSERT INTO talleres \
                (nombre, turno, hora_inicio, hora_fin, sede, fecha_inicio, fecha_fin, \
                 capacidad_alumnos, descripcion, requisitos, temario, estado) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workshop>(&query)
            .bind(&input.name)
            .bind(input.shift.as_str())
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.site)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.capacity)
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(&input.syllabus)
            .bind(state.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a workshop by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM talleres WHERE id = $1");
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List workshops matching `filter`, in insertion order.
    pub async fn list(
        pool: &PgPool,
        filter: &FilterQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Workshop>, sqlx::Error> {
        let rendered = render_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM talleres {} \
             ORDER BY id ASC \
             LIMIT ${} OFFSET ${}",
            rendered.where_clause,
            rendered.next_index,
            rendered.next_index + 1
        );
        tracing::debug!(
            where_clause = %rendered.where_clause,
            binds = rendered.bind_values.len(),
            "Listing workshops"
        );

        let q = bind_filter_values(sqlx::query_as::<_, Workshop>(&query), &rendered.bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count workshops matching `filter` (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &FilterQuery) -> Result<i64, sqlx::Error> {
        let rendered = render_filter(filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT AS count FROM talleres {}",
            rendered.where_clause
        );

        let q = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&query), &rendered.bind_values);
        q.fetch_one(pool).await
    }

    /// Replace every writable field of a workshop and re-derive its state.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ValidatedWorkshop,
    ) -> Result<Option<Workshop>, sqlx::Error> {
        let state = derive_state(input.capacity);
        let query = format!(
            "UPDATE talleres SET \
                nombre = $2, \
                turno = $3, \
                hora_inicio = $4, \
                hora_fin = $5, \
                sede = $6, \
                fecha_inicio = $7, \
                fecha_fin = $8, \
                capacidad_alumnos = $9, \
                descripcion = $10, \
                requisitos = $11, \
                temario = $12, \
                estado = $13 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.shift.as_str())
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.site)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.capacity)
            .bind(&input.description)
            .bind(&input.requirements)
            .bind(&input.syllabus)
            .bind(state.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a workshop unless `guard` reports dependents.
    ///
    /// The row is locked while the guard runs so it cannot change underneath
    /// the decision. A refused delete leaves the row untouched.
    pub async fn delete_guarded(
        pool: &PgPool,
        id: DbId,
        guard: &dyn RelationGuard,
    ) -> Result<DeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM talleres WHERE id = $1 FOR UPDATE");
        let Some(workshop) = sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(DeleteOutcome::NotFound);
        };

        if guard.has_relations(&workshop) {
            tx.rollback().await?;
            return Ok(DeleteOutcome::HasRelations);
        }

        sqlx::query("DELETE FROM talleres WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(DeleteOutcome::Deleted)
    }
}

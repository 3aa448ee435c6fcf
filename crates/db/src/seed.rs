//! Demo data for a fresh database.
//!
//! Inserts the four reference workshops (capacities 25, 30, 50, 20) through
//! the same validation and repository path the API uses, so their states
//! are derived like any other write.

use serde_json::json;
use sqlx::PgPool;
use taller_core::filter::FilterQuery;
use taller_core::validation::{validate_workshop, FieldViolation, WorkshopInput};

use crate::models::workshop::Workshop;
use crate::repositories::WorkshopRepo;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Seed workshop '{name}' failed validation: {violations:?}")]
    Invalid {
        name: String,
        violations: Vec<FieldViolation>,
    },
}

#[allow(clippy::too_many_arguments)]
fn input(
    name: &str,
    shift: &str,
    start_time: &str,
    end_time: &str,
    site: &str,
    start_date: &str,
    end_date: &str,
    capacity: i64,
    description: &str,
    requirements: &str,
    syllabus: &str,
) -> WorkshopInput {
    WorkshopInput {
        name: Some(name.into()),
        shift: Some(shift.into()),
        start_time: Some(start_time.into()),
        end_time: Some(end_time.into()),
        site: Some(site.into()),
        start_date: Some(start_date.into()),
        end_date: Some(end_date.into()),
        capacity: Some(json!(capacity)),
        description: Some(description.into()),
        requirements: Some(requirements.into()),
        syllabus: Some(syllabus.into()),
    }
}

/// The reference workshops, as raw input.
pub fn demo_workshops() -> Vec<WorkshopInput> {
    vec![
        input(
            "Taller de Robótica Inicial",
            "mañana",
            "08:00",
            "10:00",
            "Campus Central",
            "2025-01-15",
            "2025-02-15",
            25,
            "Introducción a la robótica educativa.",
            "Nociones básicas de informática",
            "Motores, sensores, estructuras y programación básica",
        ),
        input(
            "Taller de Programación en Python",
            "tarde",
            "15:00",
            "17:00",
            "Laboratorio 2",
            "2025-03-01",
            "2025-04-01",
            30,
            "Fundamentos de Python orientado a proyectos.",
            "Conocimiento básico de computación",
            "Variables, condicionales, funciones, módulos",
        ),
        input(
            "Taller de Impresión 3D",
            "mañana",
            "10:00",
            "12:00",
            "Centro de Innovación",
            "2025-02-01",
            "2025-03-01",
            50,
            "Uso de impresoras 3D y modelado básico.",
            "Ninguno",
            "Modelado, fusión de capas, parámetros de impresión",
        ),
        input(
            "Taller de Fotografía Digital",
            "tarde",
            "14:00",
            "16:00",
            "Sala Multimedia",
            "2025-04-01",
            "2025-05-01",
            20,
            "Fundamentos de fotografía y edición básica.",
            "Contar con cámara (puede ser de celular)",
            "Composición, iluminación, edición",
        ),
    ]
}

/// Insert the demo workshops if the table is empty.
///
/// Returns the inserted rows; empty when the table already had data.
pub async fn seed_workshops(pool: &PgPool) -> Result<Vec<Workshop>, SeedError> {
    let existing = WorkshopRepo::count(pool, &FilterQuery::new()).await?;
    if existing > 0 {
        tracing::info!(existing, "Workshops already present, skipping seed");
        return Ok(Vec::new());
    }

    let mut created = Vec::new();
    for raw in demo_workshops() {
        let validated = validate_workshop(&raw).map_err(|violations| SeedError::Invalid {
            name: raw.name.clone().unwrap_or_default(),
            violations,
        })?;
        created.push(WorkshopRepo::create(pool, &validated).await?);
    }

    tracing::info!(count = created.len(), "Seeded demo workshops");
    Ok(created)
}

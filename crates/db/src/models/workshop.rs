//! Workshop entity model.
//!
//! Rust field names are English; the `talleres` table keeps the original
//! Spanish column names, aliased in the repository's column list.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;
use taller_core::filter::{FieldValue, FilterRecord};
use taller_core::types::{DbId, Timestamp};

/// A row from the `talleres` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workshop {
    pub id: DbId,
    pub name: String,
    pub shift: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub site: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity: i32,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub syllabus: Option<String>,
    pub state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn text(value: &Option<String>) -> FieldValue<'_> {
    match value {
        Some(v) => FieldValue::Text(v),
        None => FieldValue::Null,
    }
}

/// Column lookup by the table's own column names, so the same predicates
/// that are rendered to SQL can be checked against loaded rows.
impl FilterRecord for Workshop {
    fn field(&self, column: &str) -> Option<FieldValue<'_>> {
        match column {
            "nombre" => Some(FieldValue::Text(&self.name)),
            "turno" => Some(FieldValue::Text(&self.shift)),
            "sede" => Some(FieldValue::Text(&self.site)),
            "descripcion" => Some(text(&self.description)),
            "requisitos" => Some(text(&self.requirements)),
            "temario" => Some(text(&self.syllabus)),
            "estado" => Some(FieldValue::Text(&self.state)),
            _ => None,
        }
    }
}

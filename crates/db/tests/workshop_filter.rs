//! Integration tests for the list filter pipeline against real data.
//!
//! Seeds the four demo workshops and checks search/state filtering,
//! counting, windowing, and behaviour against tables with a different shape.

use sqlx::PgPool;
use taller_core::filter::{build_list_query, FilterQuery};
use taller_core::schema::{ColumnKind, EntitySchema};
use taller_core::workshop;
use taller_db::filter_sql::{bind_filter_values_scalar, render_filter};
use taller_db::repositories::{SchemaRepo, WorkshopRepo};
use taller_db::seed::seed_workshops;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn workshop_schema(pool: &PgPool) -> EntitySchema {
    SchemaRepo::load_entity_schema(pool, workshop::TABLE_NAME)
        .await
        .unwrap()
}

async fn names_for(pool: &PgPool, search: Option<&str>, state: Option<&str>) -> Vec<String> {
    let schema = workshop_schema(pool).await;
    let query = build_list_query(search, state, &schema);
    WorkshopRepo::list(pool, &query, 100, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.name)
        .collect()
}

// ---------------------------------------------------------------------------
// Schema introspection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_schema_reflects_talleres_columns(pool: PgPool) {
    let schema = workshop_schema(&pool).await;
    for column in ["nombre", "turno", "estado", "capacidad_alumnos", "temario"] {
        assert!(schema.has_attribute(column), "missing {column}");
    }
    assert_eq!(schema.kind_of("nombre"), Some(ColumnKind::Text));
    assert_eq!(schema.kind_of("capacidad_alumnos"), Some(ColumnKind::Other));
    assert!(!schema.has_attribute("name"));
    assert!(!schema.has_attribute("state"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_registers_workshop_entity(pool: PgPool) {
    let catalog = SchemaRepo::load_catalog(&pool).await.unwrap();
    assert!(catalog.has_attribute(workshop::ENTITY_TYPE, "estado"));
    assert!(!catalog.has_attribute(workshop::ENTITY_TYPE, "state"));
    assert!(!catalog.has_attribute("unknown", "estado"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_table_yields_empty_schema(pool: PgPool) {
    let schema = SchemaRepo::load_entity_schema(&pool, "no_such_table")
        .await
        .unwrap();
    assert!(schema.is_empty());
}

// ---------------------------------------------------------------------------
// Filtering seeded workshops
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_derives_states(pool: PgPool) {
    let created = seed_workshops(&pool).await.unwrap();
    let states: Vec<&str> = created.iter().map(|w| w.state.as_str()).collect();
    assert_eq!(states, vec!["available", "available", "full", "available"]);

    // A second run leaves the table alone.
    assert!(seed_workshops(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_accented_term_returns_single_match(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let names = names_for(&pool, Some("impresión"), None).await;
    assert_eq!(names, vec!["Taller de Impresión 3D"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_is_case_insensitive_and_whitespace_tolerant(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let names = names_for(&pool, Some("   PYTHON    "), None).await;
    assert_eq!(names, vec!["Taller de Programación en Python"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_terms_are_ored(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let names = names_for(&pool, Some("robótica fotografía"), None).await;
    assert_eq!(
        names,
        vec!["Taller de Robótica Inicial", "Taller de Fotografía Digital"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_state_text(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let names = names_for(&pool, Some("full"), None).await;
    assert_eq!(names, vec!["Taller de Impresión 3D"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_wildcards_match_literally(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    assert!(names_for(&pool, Some("%"), None).await.is_empty());
    assert!(names_for(&pool, Some("_"), None).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_inputs_return_baseline(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let baseline = names_for(&pool, None, None).await;
    assert_eq!(baseline.len(), 4);
    assert_eq!(names_for(&pool, Some(""), Some("")).await, baseline);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activo_against_text_state_matches_nothing(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    assert!(names_for(&pool, None, Some("activo")).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_state_filter_matches_shift_and_state(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    assert_eq!(names_for(&pool, None, Some("Afternoon")).await.len(), 2);
    assert_eq!(
        names_for(&pool, None, Some("FULL")).await,
        vec!["Taller de Impresión 3D"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_and_state_are_conjoined(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let names = names_for(&pool, Some("taller"), Some("morning")).await;
    assert_eq!(
        names,
        vec!["Taller de Robótica Inicial", "Taller de Impresión 3D"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_name_filter_is_idempotent(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let schema = workshop_schema(&pool).await;
    let once = build_list_query(Some("taller python"), None, &schema);
    let twice = taller_core::filter::compose(
        once.clone(),
        &[&taller_core::filter::FilterByName::new(Some("taller python"))],
        &schema,
    );
    let a = WorkshopRepo::list(&pool, &once, 100, 0).await.unwrap();
    let b = WorkshopRepo::list(&pool, &twice, 100, 0).await.unwrap();
    let a: Vec<i64> = a.iter().map(|w| w.id).collect();
    let b: Vec<i64> = b.iter().map(|w| w.id).collect();
    assert_eq!(a, b);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_and_window(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let all = FilterQuery::new();
    assert_eq!(WorkshopRepo::count(&pool, &all).await.unwrap(), 4);

    let page = WorkshopRepo::list(&pool, &all, 2, 1).await.unwrap();
    let names: Vec<&str> = page.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Taller de Programación en Python", "Taller de Impresión 3D"]
    );

    let schema = workshop_schema(&pool).await;
    let filtered = build_list_query(None, Some("afternoon"), &schema);
    assert_eq!(WorkshopRepo::count(&pool, &filtered).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_in_memory_evaluation_agrees_with_sql(pool: PgPool) {
    seed_workshops(&pool).await.unwrap();
    let schema = workshop_schema(&pool).await;
    let everything = WorkshopRepo::list(&pool, &FilterQuery::new(), 100, 0)
        .await
        .unwrap();

    for (search, state) in [
        (Some("impresión"), None),
        (Some("taller digital"), Some("tarde")),
        (None, Some("available")),
        (Some("3d"), Some("full")),
    ] {
        let query = build_list_query(search, state, &schema);
        let from_sql: Vec<i64> = WorkshopRepo::list(&pool, &query, 100, 0)
            .await
            .unwrap()
            .iter()
            .map(|w| w.id)
            .collect();
        let in_memory: Vec<i64> = query.apply_to(&everything).iter().map(|w| w.id).collect();
        assert_eq!(from_sql, in_memory, "search={search:?} state={state:?}");
    }
}

// ---------------------------------------------------------------------------
// Other table shapes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_boolean_state_column_is_filtered_by_keyword(pool: PgPool) {
    sqlx::query("CREATE TABLE cursos (id BIGSERIAL PRIMARY KEY, name TEXT NOT NULL, state BOOLEAN NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO cursos (name, state) VALUES ('Algebra', true), ('Geometría', false), ('Cálculo', true)")
        .execute(&pool)
        .await
        .unwrap();

    let schema = SchemaRepo::load_entity_schema(&pool, "cursos").await.unwrap();
    assert!(schema.has_boolean("state"));
    assert!(!schema.has_attribute("estado"));

    let count = |search: Option<&'static str>, state: Option<&'static str>| {
        let rendered = render_filter(&build_list_query(search, state, &schema));
        let pool = pool.clone();
        async move {
            let sql = format!("SELECT COUNT(*)::BIGINT FROM cursos {}", rendered.where_clause);
            bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&sql), &rendered.bind_values)
                .fetch_one(&pool)
                .await
                .unwrap()
        }
    };

    assert_eq!(count(None, Some("activo")).await, 2);
    assert_eq!(count(None, Some("NO")).await, 1);
    assert_eq!(count(None, Some("quizás")).await, 3, "unknown keyword adds no predicate");
    assert_eq!(count(Some("algebra"), None).await, 1);
    assert_eq!(count(Some("algebra"), Some("inactivo")).await, 0);
}

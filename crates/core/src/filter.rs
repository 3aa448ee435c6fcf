//! Composable list filters.
//!
//! A [`FilterQuery`] is a conjunction of [`Predicate`] trees. Each
//! [`FilterStage`] either passes the query through untouched or narrows it
//! with one more predicate, consulting an [`EntitySchema`] so that it only
//! references columns the backing table actually has. [`compose`] threads a
//! base query through an ordered list of stages.
//!
//! The predicate tree is storage-agnostic: the db crate renders it to SQL,
//! and [`FilterQuery::matches`] evaluates it in memory.

use crate::schema::EntitySchema;

// ---------------------------------------------------------------------------
// Attribute names consulted by the stages
// ---------------------------------------------------------------------------

/// Generic English name column.
pub const ATTR_NAME: &str = "name";
/// Workshop name column.
pub const ATTR_NOMBRE: &str = "nombre";
/// Textual availability state column.
pub const ATTR_ESTADO: &str = "estado";
/// Shift column.
pub const ATTR_TURNO: &str = "turno";
/// Boolean active flag column.
pub const ATTR_STATE: &str = "state";

/// Columns the free-text search matches each term against, in order.
pub const TEXT_SEARCH_COLUMNS: &[&str] = &[ATTR_NAME, ATTR_NOMBRE, ATTR_ESTADO];

/// Columns the state filter matches by substring, in order.
pub const STATE_SUBSTRING_COLUMNS: &[&str] = &[ATTR_ESTADO, ATTR_TURNO];

/// Keywords that mean `true` for a boolean state column.
pub const TRUE_KEYWORDS: &[&str] = &["1", "true", "activo", "si", "sí"];

/// Keywords that mean `false` for a boolean state column.
pub const FALSE_KEYWORDS: &[&str] = &["0", "false", "inactivo", "no"];

// ---------------------------------------------------------------------------
// Predicate tree
// ---------------------------------------------------------------------------

/// A filter condition over named columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match. `needle` is already lower-cased.
    Contains { column: &'static str, needle: String },
    /// Exact boolean equality.
    Equals { column: &'static str, value: bool },
    /// At least one child holds.
    Any(Vec<Predicate>),
    /// Every child holds.
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn contains(column: &'static str, needle: &str) -> Self {
        Self::Contains {
            column,
            needle: needle.to_lowercase(),
        }
    }

    /// Disjunction of `branches`, or `None` when there is nothing to OR.
    pub fn any_of(branches: Vec<Predicate>) -> Option<Self> {
        if branches.is_empty() {
            None
        } else {
            Some(Self::Any(branches))
        }
    }

    /// Evaluate against an in-memory record.
    ///
    /// A missing or NULL column never satisfies a leaf predicate.
    pub fn matches<R: FilterRecord + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Contains { column, needle } => match record.field(column) {
                Some(FieldValue::Text(text)) => text.to_lowercase().contains(needle.as_str()),
                _ => false,
            },
            Self::Equals { column, value } => {
                matches!(record.field(column), Some(FieldValue::Bool(b)) if b == *value)
            }
            Self::Any(children) => children.iter().any(|p| p.matches(record)),
            Self::All(children) => children.iter().all(|p| p.matches(record)),
        }
    }
}

/// A column value as seen by [`Predicate::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Bool(bool),
    Null,
}

/// Column lookup for in-memory predicate evaluation.
pub trait FilterRecord {
    /// Value of `column`, or `None` if the record has no such column.
    fn field(&self, column: &str) -> Option<FieldValue<'_>>;
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A conjunction of predicates. The empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    predicates: Vec<Predicate>,
}

impl FilterQuery {
    /// The unfiltered base query.
    pub fn new() -> Self {
        Self::default()
    }

    /// AND one more predicate onto the query.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_unfiltered(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches<R: FilterRecord + ?Sized>(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Records satisfying the query, in their original order.
    pub fn apply_to<'r, R: FilterRecord>(&self, records: &'r [R]) -> Vec<&'r R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// One step of the filter pipeline.
pub trait FilterStage {
    /// Return `query` unchanged, or narrowed by one more predicate.
    fn apply(&self, query: FilterQuery, schema: &EntitySchema) -> FilterQuery;
}

/// Apply `stages` to `base` in order.
pub fn compose(base: FilterQuery, stages: &[&dyn FilterStage], schema: &EntitySchema) -> FilterQuery {
    stages
        .iter()
        .fold(base, |query, stage| stage.apply(query, schema))
}

/// Split a free-text search into lower-cased terms.
///
/// Runs of whitespace collapse and leading/trailing whitespace is dropped, so
/// `"  Foo   BAR "` yields `["foo", "bar"]` and never an empty term.
pub fn normalize_terms(search: &str) -> Vec<String> {
    search
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Map a state keyword to a boolean, if it is one.
pub fn parse_bool_keyword(value: &str) -> Option<bool> {
    if TRUE_KEYWORDS.contains(&value) {
        Some(true)
    } else if FALSE_KEYWORDS.contains(&value) {
        Some(false)
    } else {
        None
    }
}

/// Free-text search over name-like columns and the textual state.
///
/// Each term matches if any present search column contains it; the record
/// matches if any term matches.
#[derive(Debug, Clone, Default)]
pub struct FilterByName {
    search: Option<String>,
}

impl FilterByName {
    pub fn new(search: Option<&str>) -> Self {
        Self {
            search: search.map(str::to_string),
        }
    }
}

impl FilterStage for FilterByName {
    fn apply(&self, query: FilterQuery, schema: &EntitySchema) -> FilterQuery {
        let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) else {
            return query;
        };

        let per_term: Vec<Predicate> = normalize_terms(search)
            .iter()
            .filter_map(|term| {
                let branches = TEXT_SEARCH_COLUMNS
                    .iter()
                    .copied()
                    .filter(|column| schema.has_attribute(column))
                    .map(|column| Predicate::contains(column, term))
                    .collect();
                Predicate::any_of(branches)
            })
            .collect();

        match Predicate::any_of(per_term) {
            Some(group) => query.and(group),
            None => query,
        }
    }
}

/// State filter over the textual state, the shift, and a boolean flag.
#[derive(Debug, Clone, Default)]
pub struct FilterByState {
    state: Option<String>,
}

impl FilterByState {
    pub fn new(state: Option<&str>) -> Self {
        Self {
            state: state.map(str::to_string),
        }
    }
}

impl FilterStage for FilterByState {
    fn apply(&self, query: FilterQuery, schema: &EntitySchema) -> FilterQuery {
        let Some(raw) = self.state.as_deref().filter(|s| !s.is_empty()) else {
            return query;
        };
        let value = raw.trim().to_lowercase();

        let mut branches: Vec<Predicate> = STATE_SUBSTRING_COLUMNS
            .iter()
            .copied()
            .filter(|column| schema.has_attribute(column))
            .map(|column| Predicate::contains(column, &value))
            .collect();

        if schema.has_boolean(ATTR_STATE) {
            if let Some(flag) = parse_bool_keyword(&value) {
                branches.push(Predicate::Equals {
                    column: ATTR_STATE,
                    value: flag,
                });
            }
        }

        match Predicate::any_of(branches) {
            Some(group) => query.and(group),
            None => query,
        }
    }
}

/// Compose the standard list pipeline: free-text search, then state.
pub fn build_list_query(
    search: Option<&str>,
    state: Option<&str>,
    schema: &EntitySchema,
) -> FilterQuery {
    let by_name = FilterByName::new(search);
    let by_state = FilterByState::new(state);
    compose(FilterQuery::new(), &[&by_name, &by_state], schema)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

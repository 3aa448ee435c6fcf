//! Static schema capability descriptors.
//!
//! The column set of each entity table is read once at startup (see
//! `SchemaRepo` in the db crate) and frozen into an [`EntitySchema`]. Filter
//! stages ask it which attributes exist so they can skip predicates against
//! columns a table does not have.

use std::collections::HashMap;

/// Coarse column type, as far as filter construction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Boolean,
    Other,
}

impl ColumnKind {
    /// Map an `information_schema.columns.data_type` value.
    pub fn from_sql_type(data_type: &str) -> Self {
        match data_type {
            "text" | "character varying" | "character" | "USER-DEFINED" => Self::Text,
            "boolean" => Self::Boolean,
            _ => Self::Other,
        }
    }
}

/// The columns one entity type is backed by.
#[derive(Debug, Clone, Default)]
pub struct EntitySchema {
    columns: HashMap<String, ColumnKind>,
}

impl EntitySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column registration.
    pub fn with_column(mut self, name: &str, kind: ColumnKind) -> Self {
        self.columns.insert(name.to_string(), kind);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: ColumnKind) {
        self.columns.insert(name.into(), kind);
    }

    /// Whether the named attribute exists. Never fails.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Kind of the named attribute, if present.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns.get(name).copied()
    }

    /// Whether the named attribute exists and holds booleans.
    pub fn has_boolean(&self, name: &str) -> bool {
        self.kind_of(name) == Some(ColumnKind::Boolean)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ColumnKind)> for EntitySchema {
    fn from_iter<I: IntoIterator<Item = (S, ColumnKind)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(n, k)| (n.into(), k)).collect(),
        }
    }
}

/// Schema descriptors for every registered entity type.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    entities: HashMap<String, EntitySchema>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entity_type: impl Into<String>, schema: EntitySchema) {
        self.entities.insert(entity_type.into(), schema);
    }

    /// Descriptor for an entity type, if registered.
    pub fn entity(&self, entity_type: &str) -> Option<&EntitySchema> {
        self.entities.get(entity_type)
    }

    /// Whether `entity_type` has an attribute called `attribute_name`.
    ///
    /// Unknown entity types and absent columns both yield `false`.
    pub fn has_attribute(&self, entity_type: &str, attribute_name: &str) -> bool {
        self.entity(entity_type)
            .is_some_and(|schema| schema.has_attribute(attribute_name))
    }
}

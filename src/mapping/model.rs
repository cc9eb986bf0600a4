//! Unresolved entity declarations, as produced by the derive macros.

use super::shape::{TypeShape, ValueShape};

/// Implemented by structs that map to a table.
///
/// Usually derived with `#[derive(RelationalEntity)]`; a hand-written impl
/// can describe types the derive cannot see, such as generated code.
pub trait RelationalEntity: ValueShape {
    fn entity_model() -> EntityModel;
}

/// `#[column(...)]` annotation values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAnnotation {
    pub value: Option<&'static str>,
    pub key_column: Option<&'static str>,
}

/// Declared mapping of one property, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    pub name: &'static str,
    pub shape: TypeShape,
    pub is_id: bool,
    pub column: Option<ColumnAnnotation>,
    pub embedded: Option<&'static str>,
}

impl PropertyModel {
    pub fn new(name: &'static str, shape: TypeShape) -> Self {
        Self {
            name,
            shape,
            is_id: false,
            column: None,
            embedded: None,
        }
    }

    pub fn of<T: ValueShape + ?Sized>(name: &'static str) -> Self {
        Self::new(name, T::shape())
    }

    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    pub fn with_column(
        mut self,
        value: Option<&'static str>,
        key_column: Option<&'static str>,
    ) -> Self {
        self.column = Some(ColumnAnnotation { value, key_column });
        self
    }

    pub fn with_embedded(mut self, prefix: &'static str) -> Self {
        self.embedded = Some(prefix);
        self
    }
}

/// Declared mapping of one entity type, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityModel {
    pub name: &'static str,
    pub table_name: Option<&'static str>,
    pub properties: Vec<PropertyModel>,
}

impl EntityModel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            table_name: None,
            properties: Vec::new(),
        }
    }

    pub fn with_table_name(mut self, table_name: &'static str) -> Self {
        self.table_name = Some(table_name);
        self
    }

    pub fn with_property(mut self, property: PropertyModel) -> Self {
        self.properties.push(property);
        self
    }

    pub fn id_property(&self) -> Option<&PropertyModel> {
        self.properties.iter().find(|property| property.is_id)
    }
}

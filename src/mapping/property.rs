use serde::Serialize;

use crate::error::{MappingError, MappingResult};

use super::{
    column_type::{ColumnType, storage_type},
    model::PropertyModel,
    naming::NamingStrategy,
    shape::{EntityType, TypeShape},
};

// Bounds how far identifier types are followed through entity references.
const MAX_REFERENCE_DEPTH: usize = 8;

/// Mutually exclusive classification of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Scalar,
    Embedded,
    /// A non-embedded entity, stored in its own table.
    Reference,
    SimpleCollection,
    EntityCollection,
    Map,
}

/// Resolved mapping of one property. Immutable once built.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    owner: &'static str,
    name: &'static str,
    shape: TypeShape,
    kind: PropertyKind,
    is_id: bool,
    column_name: String,
    column_type: Option<ColumnType>,
    embedded_prefix: Option<&'static str>,
    reverse_column_name: String,
    key_column: Option<String>,
}

impl PropertyDescriptor {
    pub(crate) fn resolve(
        model: PropertyModel,
        owner: &'static str,
        owner_table: &str,
        naming: &dyn NamingStrategy,
    ) -> MappingResult<Self> {
        let kind = classify(&model.shape, model.embedded.is_some(), owner, model.name)?;

        let annotated_column = model
            .column
            .as_ref()
            .and_then(|column| column.value)
            .filter(|value| !value.trim().is_empty());
        let annotated_key = model
            .column
            .as_ref()
            .and_then(|column| column.key_column)
            .filter(|value| !value.trim().is_empty());

        let column_name = annotated_column
            .map(str::to_string)
            .unwrap_or_else(|| naming.column_name(model.name));
        let reverse_column_name = annotated_column
            .map(str::to_string)
            .unwrap_or_else(|| naming.reverse_column_name(owner_table));
        let key_column = is_qualified_shape(&model.shape).then(|| {
            annotated_key
                .map(str::to_string)
                .unwrap_or_else(|| naming.key_column(&reverse_column_name))
        });

        Ok(Self {
            owner,
            name: model.name,
            column_type: column_type_of(&model.shape, 0),
            shape: model.shape,
            kind,
            is_id: model.is_id,
            column_name,
            embedded_prefix: model.embedded,
            reverse_column_name,
            key_column,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the entity declaring this property.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_id(&self) -> bool {
        self.is_id
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// `None` when the property references an entity without an identifier.
    pub fn column_type(&self) -> Option<&ColumnType> {
        self.column_type.as_ref()
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded_prefix.is_some()
    }

    pub fn embedded_prefix(&self) -> Option<&str> {
        self.embedded_prefix
    }

    pub fn embedded_entity(&self) -> Option<&EntityType> {
        if self.is_embedded() {
            self.shape.as_entity()
        } else {
            None
        }
    }

    /// True when the property type, or its element/value type, is an entity.
    pub fn is_entity(&self) -> bool {
        self.shape.actual().as_entity().is_some()
    }

    pub fn is_collection_like(&self) -> bool {
        self.shape.is_sequence()
    }

    pub fn is_map(&self) -> bool {
        self.shape.is_map()
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self.shape, TypeShape::Sequence { ordered: true, .. })
    }

    /// Maps and ordered sequences need a key column.
    pub fn is_qualified(&self) -> bool {
        is_qualified_shape(&self.shape)
    }

    pub fn is_collection_of_simple_type_like(&self) -> bool {
        self.kind == PropertyKind::SimpleCollection
    }

    pub fn is_collection_of_entities_like(&self) -> bool {
        self.kind == PropertyKind::EntityCollection
    }

    pub fn reverse_column_name(&self) -> &str {
        &self.reverse_column_name
    }

    pub fn key_column(&self) -> Option<&str> {
        self.key_column.as_deref()
    }
}

fn classify(
    shape: &TypeShape,
    embedded: bool,
    entity: &'static str,
    property: &'static str,
) -> MappingResult<PropertyKind> {
    let kind = match shape {
        TypeShape::Entity(_) if embedded => PropertyKind::Embedded,
        _ if embedded => return Err(MappingError::EmbeddedNotEntity { entity, property }),
        TypeShape::Simple(_) => PropertyKind::Scalar,
        TypeShape::Entity(_) => PropertyKind::Reference,
        TypeShape::Sequence { element, .. } => match element.as_ref() {
            TypeShape::Entity(_) => PropertyKind::EntityCollection,
            // Entities stored two levels deep have no table layout.
            nested if contains_entity(nested) => {
                return Err(MappingError::NestedEntityCollection { entity, property });
            }
            _ => PropertyKind::SimpleCollection,
        },
        TypeShape::Map { .. } => PropertyKind::Map,
    };
    Ok(kind)
}

fn contains_entity(shape: &TypeShape) -> bool {
    match shape {
        TypeShape::Simple(_) => false,
        TypeShape::Entity(_) => true,
        TypeShape::Sequence { element, .. } => contains_entity(element),
        TypeShape::Map { key, value } => contains_entity(key) || contains_entity(value),
    }
}

fn is_qualified_shape(shape: &TypeShape) -> bool {
    matches!(
        shape,
        TypeShape::Map { .. } | TypeShape::Sequence { ordered: true, .. }
    )
}

fn column_type_of(shape: &TypeShape, depth: usize) -> Option<ColumnType> {
    match shape {
        TypeShape::Simple(simple) => Some(storage_type(*simple)),
        TypeShape::Entity(entity) => identifier_column_type(entity, depth),
        TypeShape::Sequence { element, .. } => match element.as_ref() {
            TypeShape::Entity(entity) => identifier_column_type(entity, depth),
            other => column_type_of(other, depth).map(ColumnType::array_of),
        },
        TypeShape::Map { value, .. } => column_type_of(value, depth),
    }
}

fn identifier_column_type(entity: &EntityType, depth: usize) -> Option<ColumnType> {
    if depth >= MAX_REFERENCE_DEPTH {
        return None;
    }
    let model = entity.model();
    let id = model.id_property()?;
    column_type_of(&id.shape, depth + 1)
}

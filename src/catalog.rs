use serde::Serialize;

use crate::{
    error::MappingResult,
    mapping::{EntityDescriptor, MappingContext, PropertyKind},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityColumnInfo {
    pub name: String,
    pub column_type: Option<String>,
    pub path: String,
}

/// A property stored outside the entity's own table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRelationInfo {
    pub property: String,
    pub kind: PropertyKind,
    pub reverse_column: String,
    pub key_column: Option<String>,
    pub column_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    pub entity: String,
    pub table: String,
    pub id_column: Option<String>,
    pub column_count: usize,
    pub columns: Vec<EntityColumnInfo>,
    pub relations: Vec<EntityRelationInfo>,
}

impl From<&EntityDescriptor> for EntityInfo {
    fn from(entity: &EntityDescriptor) -> Self {
        let columns: Vec<_> = entity
            .columns()
            .iter()
            .map(|column| EntityColumnInfo {
                name: column.name.clone(),
                column_type: column.column_type.as_ref().map(ToString::to_string),
                path: column.path.clone(),
            })
            .collect();

        let relations = entity
            .properties()
            .filter(|property| {
                !matches!(property.kind(), PropertyKind::Scalar | PropertyKind::Embedded)
            })
            .map(|property| EntityRelationInfo {
                property: property.name().to_string(),
                kind: property.kind(),
                reverse_column: property.reverse_column_name().to_string(),
                key_column: property.key_column().map(str::to_string),
                column_type: property.column_type().map(ToString::to_string),
            })
            .collect();

        Self {
            entity: entity.name().to_string(),
            table: entity.qualified_table_name().to_string(),
            id_column: entity.id_column().map(str::to_string),
            column_count: columns.len(),
            columns,
            relations,
        }
    }
}

/// Serializable snapshot of every entity a context has resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub entities: Vec<EntityInfo>,
}

impl Catalog {
    pub fn from_context(context: &MappingContext) -> Self {
        let entities = context
            .entities()
            .iter()
            .map(|entity| EntityInfo::from(entity.as_ref()))
            .collect();
        Self { entities }
    }

    pub fn entity(&self, name: &str) -> Option<&EntityInfo> {
        self.entities.iter().find(|info| info.entity == name)
    }

    pub fn to_json(&self) -> MappingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

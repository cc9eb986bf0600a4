use std::{any::TypeId, collections::HashMap, sync::Arc};

use serde::Serialize;

use crate::error::{MappingError, MappingResult};

use super::{
    column_type::ColumnType,
    model::EntityModel,
    naming::NamingStrategy,
    property::{PropertyDescriptor, PropertyKind},
    shape::EntityType,
};

/// One column of an entity's own table, after embedding is flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub column_type: Option<ColumnType>,
    /// Dotted property path, e.g. `address.street` for embedded values.
    pub path: String,
}

/// Resolved mapping of one entity type.
///
/// Built once by [`MappingContext`](super::context::MappingContext) and
/// shared behind an `Arc`; nothing in it changes afterwards.
#[derive(Debug)]
pub struct EntityDescriptor {
    name: &'static str,
    type_id: TypeId,
    table_name: String,
    qualified_table_name: String,
    properties: Vec<PropertyDescriptor>,
    index: HashMap<&'static str, usize>,
    id_index: Option<usize>,
    columns: Vec<Column>,
}

impl EntityDescriptor {
    pub(crate) fn build(
        entity: &EntityType,
        model: EntityModel,
        naming: &dyn NamingStrategy,
        mut embedded: impl FnMut(&EntityType) -> MappingResult<Arc<EntityDescriptor>>,
    ) -> MappingResult<Self> {
        let name = model.name;
        let table_name = model
            .table_name
            .filter(|table| !table.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| naming.table_name(name));
        let qualified_table_name = naming.qualified_table_name(&table_name);

        let mut properties = Vec::with_capacity(model.properties.len());
        let mut index = HashMap::with_capacity(model.properties.len());
        let mut id_index: Option<usize> = None;

        for property_model in model.properties {
            let property_name = property_model.name;
            if index.insert(property_name, properties.len()).is_some() {
                return Err(MappingError::DuplicateProperty {
                    entity: name,
                    property: property_name,
                });
            }
            if property_model.is_id {
                if let Some(first) = id_index {
                    let first: &PropertyDescriptor = &properties[first];
                    return Err(MappingError::DuplicateId {
                        entity: name,
                        first: first.name(),
                        second: property_name,
                    });
                }
                id_index = Some(properties.len());
            }

            let property =
                PropertyDescriptor::resolve(property_model, name, &table_name, naming)?;
            tracing::trace!(
                entity = name,
                property = property.name(),
                column = property.column_name(),
                kind = ?property.kind(),
                "resolved property"
            );
            properties.push(property);
        }

        let mut columns = Vec::new();
        for property in &properties {
            match property.kind() {
                PropertyKind::Scalar => columns.push(Column {
                    name: property.column_name().to_string(),
                    column_type: property.column_type().cloned(),
                    path: property.name().to_string(),
                }),
                PropertyKind::Embedded => {
                    let Some(target) = property.embedded_entity() else {
                        continue;
                    };
                    let prefix = property.embedded_prefix().unwrap_or_default();
                    let nested = embedded(target)?;
                    columns.extend(nested.columns().iter().map(|column| Column {
                        name: format!("{prefix}{}", column.name),
                        column_type: column.column_type.clone(),
                        path: format!("{}.{}", property.name(), column.path),
                    }));
                }
                PropertyKind::Reference
                | PropertyKind::SimpleCollection
                | PropertyKind::EntityCollection
                | PropertyKind::Map => {}
            }
        }

        Ok(Self {
            name,
            type_id: entity.type_id(),
            table_name,
            qualified_table_name,
            properties,
            index,
            id_index,
            columns,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn qualified_table_name(&self) -> &str {
        &self.qualified_table_name
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&idx| &self.properties[idx])
    }

    pub fn required_property(&self, name: &str) -> MappingResult<&PropertyDescriptor> {
        self.property(name)
            .ok_or_else(|| MappingError::PropertyNotFound {
                entity: self.name,
                property: name.to_string(),
            })
    }

    pub fn id_property(&self) -> Option<&PropertyDescriptor> {
        self.id_index.map(|idx| &self.properties[idx])
    }

    pub fn id_column(&self) -> Option<&str> {
        self.id_property().map(PropertyDescriptor::column_name)
    }

    /// Columns stored in this entity's own table.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

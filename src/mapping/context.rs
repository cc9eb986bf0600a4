use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    config::MappingConfig,
    error::{MappingError, MappingResult},
};

use super::{
    entity::EntityDescriptor,
    model::RelationalEntity,
    naming::{DefaultNamingStrategy, NamingStrategy},
    shape::EntityType,
};

/// Resolves entity descriptors and caches them for the context's lifetime.
pub struct MappingContext {
    naming: Arc<dyn NamingStrategy>,
    entities: RwLock<HashMap<TypeId, Arc<EntityDescriptor>>>,
}

impl MappingContext {
    pub fn new() -> Self {
        Self::with_naming_strategy(Arc::new(DefaultNamingStrategy::new()))
    }

    pub fn with_naming_strategy(naming: Arc<dyn NamingStrategy>) -> Self {
        Self {
            naming,
            entities: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &MappingConfig) -> Self {
        let mut naming =
            DefaultNamingStrategy::new().with_key_column_suffix(config.key_column_suffix.clone());
        if let Some(schema) = &config.schema {
            naming = naming.with_schema(schema.clone());
        }
        Self::with_naming_strategy(Arc::new(naming))
    }

    pub fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }

    /// Returns the descriptor for `T`, resolving it on first use.
    pub fn required_entity<T: RelationalEntity + 'static>(
        &self,
    ) -> MappingResult<Arc<EntityDescriptor>> {
        self.resolve(&EntityType::of::<T>())
    }

    pub fn resolve(&self, entity: &EntityType) -> MappingResult<Arc<EntityDescriptor>> {
        self.resolve_with_stack(entity, &mut Vec::new())
    }

    /// Looks up an already resolved entity by its type name.
    ///
    /// Fails with [`MappingError::AmbiguousEntityName`] when types from
    /// different modules share the name; use [`Self::required_entity`] then.
    pub fn entity(&self, name: &str) -> MappingResult<Arc<EntityDescriptor>> {
        let entities = self
            .entities
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut matches = entities
            .values()
            .filter(|descriptor| descriptor.name() == name);

        let found = matches
            .next()
            .cloned()
            .ok_or_else(|| MappingError::EntityNotFound(name.to_string()))?;
        let others = matches.count();
        if others > 0 {
            return Err(MappingError::AmbiguousEntityName {
                name: name.to_string(),
                count: others + 1,
            });
        }
        Ok(found)
    }

    /// All resolved entities, sorted by name.
    pub fn entities(&self) -> Vec<Arc<EntityDescriptor>> {
        let mut entities: Vec<_> = self
            .entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        entities.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.qualified_table_name().cmp(b.qualified_table_name()))
        });
        entities
    }

    fn cached(&self, type_id: TypeId) -> Option<Arc<EntityDescriptor>> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    fn resolve_with_stack(
        &self,
        entity: &EntityType,
        stack: &mut Vec<TypeId>,
    ) -> MappingResult<Arc<EntityDescriptor>> {
        if let Some(descriptor) = self.cached(entity.type_id()) {
            return Ok(descriptor);
        }
        if stack.contains(&entity.type_id()) {
            return Err(MappingError::EmbeddingCycle {
                entity: entity.name(),
            });
        }

        stack.push(entity.type_id());
        let built = EntityDescriptor::build(entity, entity.model(), self.naming.as_ref(), |target| {
            self.resolve_with_stack(target, stack)
        });
        stack.pop();
        let descriptor = Arc::new(built?);

        tracing::debug!(
            entity = descriptor.name(),
            table = descriptor.qualified_table_name(),
            properties = descriptor.properties().count(),
            "resolved entity"
        );

        // Another thread may have resolved the same type meanwhile; keep the first.
        let mut entities = self
            .entities
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            entities.entry(entity.type_id()).or_insert(descriptor),
        ))
    }
}

impl Default for MappingContext {
    fn default() -> Self {
        Self::new()
    }
}

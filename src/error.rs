use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("{entity} has no property named {property}")]
    PropertyNotFound {
        entity: &'static str,
        property: String,
    },
    #[error("no resolved entity named {0}")]
    EntityNotFound(String),
    #[error("{count} resolved entities are named {name}")]
    AmbiguousEntityName { name: String, count: usize },
    #[error("{entity} declares more than one id: {first} and {second}")]
    DuplicateId {
        entity: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("{entity} declares property {property} twice")]
    DuplicateProperty {
        entity: &'static str,
        property: &'static str,
    },
    #[error("{entity}.{property} is marked embedded but its type is not an entity")]
    EmbeddedNotEntity {
        entity: &'static str,
        property: &'static str,
    },
    #[error("{entity}.{property} nests entities inside a nested sequence")]
    NestedEntityCollection {
        entity: &'static str,
        property: &'static str,
    },
    #[error("{entity} embeds itself")]
    EmbeddingCycle { entity: &'static str },
    #[error("failed to serialize mapping catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

pub type MappingResult<T> = Result<T, MappingError>;

pub mod column_type;
pub mod context;
pub mod entity;
pub mod model;
pub mod naming;
pub mod property;
pub mod shape;

pub use column_type::ColumnType;
pub use context::MappingContext;
pub use entity::{Column, EntityDescriptor};
pub use model::{ColumnAnnotation, EntityModel, PropertyModel, RelationalEntity};
pub use naming::{DefaultNamingStrategy, NamingStrategy};
pub use property::{PropertyDescriptor, PropertyKind};
pub use shape::{EntityType, SimpleType, TemporalKind, TypeShape, ValueShape};

//! Annotation-driven entity-to-table mapping metadata.
//!
//! Derive [`RelationalEntity`] on a struct, then ask a [`MappingContext`] for
//! its [`EntityDescriptor`]:
//!
//! ```
//! use relational_mapping::{ColumnType, MappingContext, RelationalEntity};
//!
//! #[derive(RelationalEntity)]
//! struct Account {
//!     #[id]
//!     id: uuid::Uuid,
//!     #[column("display_name")]
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let context = MappingContext::new();
//! let account = context.required_entity::<Account>()?;
//! assert_eq!(account.table_name(), "account");
//! assert_eq!(account.required_property("name")?.column_name(), "display_name");
//! assert_eq!(
//!     account.required_property("tags")?.column_type(),
//!     Some(&ColumnType::array_of(ColumnType::Text))
//! );
//! # Ok::<(), relational_mapping::MappingError>(())
//! ```

// Lets the derive macros' `::relational_mapping` paths resolve inside this crate.
extern crate self as relational_mapping;

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapping;

pub use catalog::Catalog;
pub use config::{EnvConfig, MappingConfig};
pub use error::{MappingError, MappingResult};
pub use mapping::{
    Column, ColumnAnnotation, ColumnType, DefaultNamingStrategy, EntityDescriptor, EntityModel,
    EntityType, MappingContext, NamingStrategy, PropertyDescriptor, PropertyKind, PropertyModel,
    SimpleType, TemporalKind, TypeShape, ValueShape,
};
pub use mapping::model::RelationalEntity;
pub use relational_entity_derive::{RelationalEntity, RelationalEnum};

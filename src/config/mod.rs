pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::MappingConfig;
pub use envconfig::EnvConfig;

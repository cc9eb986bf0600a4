pub const DEFAULT_KEY_COLUMN_SUFFIX: &str = "_key";
pub const DEFAULT_LOG_LEVEL: &str = "info";

use anyhow::{Result, bail};

use super::MappingConfig;

pub fn validate(cfg: &MappingConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.key_column_suffix.trim().is_empty() {
        errors.push("key_column_suffix must not be empty".to_string());
    }

    if let Some(schema) = cfg.schema.as_deref() {
        if schema.trim().is_empty() {
            errors.push("schema must not be blank when set".to_string());
        } else if schema.contains(char::is_whitespace) {
            errors.push(format!("schema must not contain whitespace (got {schema:?})"));
        }
    }

    if cfg.log_level.trim().is_empty() {
        errors.push("log_level must not be empty".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid mapping config:\n- {}", errors.join("\n- "))
}

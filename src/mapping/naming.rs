use convert_case::{Boundary, Case, Converter};

use crate::config::defaults::DEFAULT_KEY_COLUMN_SUFFIX;

/// Snake-cases `name`, splitting only before uppercase letters and at
/// existing separators: `address_line1` and `Ipv4Addr` keep their digits
/// attached (`address_line1`, `ipv4_addr`).
pub fn snake_case(name: &str) -> String {
    Converter::new()
        .to_case(Case::Snake)
        .remove_boundaries(&[
            Boundary::LowerDigit,
            Boundary::UpperDigit,
            Boundary::DigitLower,
        ])
        .convert(name)
}

/// Derives table and column names when no annotation provides one.
///
/// Every method has a default; implementors override only what differs.
pub trait NamingStrategy: Send + Sync {
    fn schema(&self) -> Option<&str> {
        None
    }

    fn table_name(&self, entity_name: &str) -> String {
        snake_case(entity_name)
    }

    fn column_name(&self, property_name: &str) -> String {
        snake_case(property_name)
    }

    fn qualified_table_name(&self, table_name: &str) -> String {
        match self.schema() {
            Some(schema) => format!("{schema}.{table_name}"),
            None => table_name.to_string(),
        }
    }

    /// Column in a child table that refers back to the owning row.
    fn reverse_column_name(&self, owner_table: &str) -> String {
        owner_table.to_string()
    }

    /// Column holding the map key or list index of a qualified property.
    fn key_column(&self, reverse_column: &str) -> String {
        format!("{reverse_column}{DEFAULT_KEY_COLUMN_SUFFIX}")
    }
}

/// Snake-case naming with an optional schema and configurable key suffix.
#[derive(Debug, Clone)]
pub struct DefaultNamingStrategy {
    schema: Option<String>,
    key_column_suffix: String,
}

impl DefaultNamingStrategy {
    pub fn new() -> Self {
        Self {
            schema: None,
            key_column_suffix: DEFAULT_KEY_COLUMN_SUFFIX.to_string(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_key_column_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.key_column_suffix = suffix.into();
        self
    }
}

impl Default for DefaultNamingStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingStrategy for DefaultNamingStrategy {
    fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    fn key_column(&self, reverse_column: &str) -> String {
        format!("{reverse_column}{}", self.key_column_suffix)
    }
}

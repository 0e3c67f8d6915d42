//! JSON-backed in-memory record

use super::traits::Record;
use crate::error::{FormError, Result};
use crate::fields::DataValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Record holding plain fields and relations in insertion order
///
/// ```json
/// { "fields": { "Price": "12.50" }, "relations": { "Tags": ["1", "3"] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(default)]
    pub fields: IndexMap<String, DataValue>,
    #[serde(default)]
    pub relations: IndexMap<String, Vec<String>>,
}

impl MemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an empty relation so multi-select fields sync into it
    pub fn with_relation(mut self, name: &str) -> Self {
        self.relations.entry(name.to_string()).or_default();
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let record = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded record from {:?}", path);
        Ok(record)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Record for MemoryRecord {
    fn read_field(&self, name: &str) -> Option<DataValue> {
        self.fields.get(name).cloned()
    }

    fn write_field(&mut self, name: &str, value: DataValue) -> Result<()> {
        if self.relations.contains_key(name) {
            return Err(FormError::Record {
                field: name.to_string(),
                message: "is a relation and cannot be written as a field".to_string(),
            });
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    fn has_relation(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    fn relation_keys(&self, name: &str) -> Option<Vec<String>> {
        self.relations.get(name).cloned()
    }

    fn sync_relation(&mut self, name: &str, keys: &[String]) -> Result<()> {
        match self.relations.get_mut(name) {
            Some(linked) => {
                *linked = keys.to_vec();
                Ok(())
            }
            None => Err(FormError::Record {
                field: name.to_string(),
                message: "no such relation".to_string(),
            }),
        }
    }
}

//! Trait abstraction for the persisted record a form reads from and saves into

use crate::error::Result;
use crate::fields::DataValue;

/// Storage collaborator for field values, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
pub trait Record {
    /// Stored value of a plain field, `None` when the record has no such field
    fn read_field(&self, name: &str) -> Option<DataValue>;

    /// Store a plain field value
    fn write_field(&mut self, name: &str, value: DataValue) -> Result<()>;

    /// Whether `name` is a many-to-many relation rather than a plain field
    fn has_relation(&self, name: &str) -> bool;

    /// Keys currently linked through a relation
    fn relation_keys(&self, name: &str) -> Option<Vec<String>>;

    /// Replace the linked keys of a relation
    fn sync_relation(&mut self, name: &str, keys: &[String]) -> Result<()>;
}

//! Persisted record collaborator

mod memory;
mod traits;

pub use memory::MemoryRecord;
#[cfg(test)]
pub use traits::MockRecord;
pub use traits::Record;

use crate::error::Result;
use crate::fields::DataValue;

/// How a field writes its value into a record
#[derive(Debug, Clone, PartialEq)]
pub enum PersistInstruction {
    /// Store the value under the field name
    Write(DataValue),
    /// Replace the keys linked through the relation named like the field
    SyncRelation(Vec<String>),
}

impl PersistInstruction {
    pub fn apply(&self, name: &str, record: &mut dyn Record) -> Result<()> {
        match self {
            PersistInstruction::Write(value) => record.write_field(name, value.clone()),
            PersistInstruction::SyncRelation(keys) => record.sync_relation(name, keys),
        }
    }
}

//! Forms: ordered field collections and their JSON definitions

mod definition;
mod model;

pub use definition::{FieldDefinition, FieldType, FormDefinition};
pub use model::Form;

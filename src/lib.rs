//! Form field widgets
//!
//! Fields hold a name, a title and a value; they normalize submitted and
//! stored values, validate input into a shared [`validation::ValidationResult`],
//! expose structured render data and produce read-only variants of themselves.
//! Records and translations are collaborators behind the [`record::Record`]
//! and [`i18n::Translator`] traits.

pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod form;
pub mod html;
pub mod i18n;
pub mod options;
pub mod record;
pub mod transform;
pub mod validation;

pub use error::{FormError, Result};

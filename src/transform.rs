//! Field transformations looked up by exact `(transformation, kind)` pair
//!
//! There is no fallback through related kinds: a pair without a registered
//! function is an error.

use crate::error::{FormError, Result};
use crate::fields::{Field, FieldContext, FieldKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Named transformation applied to every field of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transformation {
    /// Display-only variant showing a formatted value instead of a control
    Readonly,
    /// Same control, rendered disabled and excluded from submission
    Disabled,
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformation::Readonly => f.write_str("readonly"),
            Transformation::Disabled => f.write_str("disabled"),
        }
    }
}

pub type TransformFn = fn(&Field, &FieldContext<'_>) -> Field;

fn to_readonly(field: &Field, ctx: &FieldContext<'_>) -> Field {
    field.to_readonly(ctx)
}

fn to_disabled(field: &Field, _ctx: &FieldContext<'_>) -> Field {
    let mut disabled = field.clone();
    disabled.base_mut().disabled = true;
    disabled
}

fn identity(field: &Field, _ctx: &FieldContext<'_>) -> Field {
    field.clone()
}

#[derive(Clone)]
pub struct TransformRegistry {
    entries: HashMap<(Transformation, FieldKind), TransformFn>,
}

impl TransformRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry with readonly and disabled entries for every field kind
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in FieldKind::ALL {
            registry.register(Transformation::Readonly, kind, to_readonly);
            let disable: TransformFn = if kind.is_display_only() {
                identity
            } else {
                to_disabled
            };
            registry.register(Transformation::Disabled, kind, disable);
        }
        registry
    }

    /// Register `func`, replacing any previous entry for the pair
    pub fn register(&mut self, transformation: Transformation, kind: FieldKind, func: TransformFn) {
        self.entries.insert((transformation, kind), func);
    }

    pub fn get(&self, transformation: Transformation, kind: FieldKind) -> Option<TransformFn> {
        self.entries.get(&(transformation, kind)).copied()
    }

    pub fn transform(
        &self,
        transformation: Transformation,
        field: &Field,
        ctx: &FieldContext<'_>,
    ) -> Result<Field> {
        let kind = field.kind();
        match self.get(transformation, kind) {
            Some(func) => Ok(func(field, ctx)),
            None => {
                tracing::warn!(
                    "No {transformation} transformation for '{}' ({kind})",
                    field.name()
                );
                Err(FormError::UnsupportedTransformation {
                    transformation,
                    kind,
                })
            }
        }
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

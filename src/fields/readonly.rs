//! Display-only fields produced by read-only transformations

use super::field::{FieldBase, FieldContext, FieldKind, ReadonlyConvertible, Renderable, Validatable, Valuable};
use super::value::{parse_keys, scalar_to_string, DataValue, FieldValue};
use super::Field;
use crate::options::OptionSet;
use crate::validation::ValidationResult;
use serde_json::Value;

/// Shows a preformatted value instead of an editable control
#[derive(Debug, Clone, PartialEq)]
pub struct ReadonlyField {
    pub base: FieldBase,
    pub value: FieldValue,
    /// Formatted text shown to the user
    pub display: String,
    data: DataValue,
}

impl ReadonlyField {
    pub fn new(base: FieldBase, value: FieldValue, display: String, data: DataValue) -> Self {
        Self {
            base: FieldBase {
                readonly: true,
                ..base
            },
            value,
            display,
            data,
        }
    }

    /// Standalone read-only text field
    pub fn text(name: &str, title: &str) -> Self {
        Self::new(
            FieldBase::new(name, title),
            FieldValue::default(),
            String::new(),
            DataValue::Absent,
        )
    }
}

impl Valuable for ReadonlyField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        self.value.clone()
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.display = scalar_to_string(raw);
        self.value = FieldValue::Text(self.display.clone());
        self.data = DataValue::from_raw(raw);
    }

    fn data_value(&self) -> DataValue {
        self.data.clone()
    }
}

impl Validatable for ReadonlyField {
    fn validate(&self, _result: &mut ValidationResult, _ctx: &FieldContext<'_>) {}
}

impl Renderable for ReadonlyField {
    fn kind(&self) -> FieldKind {
        FieldKind::Readonly
    }

    fn display_value(&self, ctx: &FieldContext<'_>) -> String {
        if self.display.is_empty() {
            ctx.none_label()
        } else {
            self.display.clone()
        }
    }
}

impl ReadonlyConvertible for ReadonlyField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        Field::Readonly(self.clone())
    }
}

/// Shows the labels of selected keys from an option set
#[derive(Debug, Clone, PartialEq)]
pub struct LookupField {
    pub base: FieldBase,
    pub source: OptionSet,
    pub keys: Vec<String>,
    data: DataValue,
}

impl LookupField {
    pub fn new(base: FieldBase, source: OptionSet, keys: Vec<String>, data: DataValue) -> Self {
        Self {
            base: FieldBase {
                readonly: true,
                ..base
            },
            source,
            keys,
            data,
        }
    }

    /// Labels of the selected keys in option order
    pub fn labels(&self) -> Vec<&str> {
        self.source.labels_for(&self.keys)
    }
}

impl Valuable for LookupField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Selection(self.keys.clone())
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.keys = parse_keys(raw);
        self.data = DataValue::from_raw(raw);
    }

    fn data_value(&self) -> DataValue {
        self.data.clone()
    }
}

impl Validatable for LookupField {
    fn validate(&self, _result: &mut ValidationResult, _ctx: &FieldContext<'_>) {}
}

impl Renderable for LookupField {
    fn kind(&self) -> FieldKind {
        FieldKind::Lookup
    }

    fn display_value(&self, ctx: &FieldContext<'_>) -> String {
        let labels = self.labels();
        if labels.is_empty() {
            ctx.none_label()
        } else {
            labels.join(", ")
        }
    }
}

impl ReadonlyConvertible for LookupField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        Field::Lookup(self.clone())
    }
}

//! Single checkbox field

use super::field::{FieldBase, FieldContext, FieldKind, ReadonlyConvertible, Renderable, Validatable, Valuable};
use super::readonly::ReadonlyField;
use super::value::{is_truthy, normalize_boolean, DataValue, FieldValue};
use super::Field;
use crate::validation::ValidationResult;
use serde_json::Value;

/// On/off checkbox persisting `1` when checked and nothing otherwise
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxField {
    pub base: FieldBase,
    pub checked: bool,
}

impl CheckboxField {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            base: FieldBase::new(name, title),
            checked: false,
        }
    }

    /// Localized "Yes" or "No" for the current state
    pub fn answer(&self, ctx: &FieldContext<'_>) -> String {
        if self.checked {
            ctx.translate("CheckboxField.YESANSWER", "Yes")
        } else {
            ctx.translate("CheckboxField.NOANSWER", "No")
        }
    }
}

impl Valuable for CheckboxField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Boolean(self.checked)
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.checked = is_truthy(raw);
    }

    fn data_value(&self) -> DataValue {
        normalize_boolean(&Value::Bool(self.checked)).persisted
    }
}

impl Validatable for CheckboxField {
    fn validate(&self, _result: &mut ValidationResult, _ctx: &FieldContext<'_>) {}
}

impl Renderable for CheckboxField {
    fn kind(&self) -> FieldKind {
        FieldKind::Checkbox
    }

    fn input_type(&self) -> Option<&'static str> {
        Some("checkbox")
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        normalize_boolean(&Value::Bool(self.checked)).display
    }

    fn extra_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![("value".to_string(), "1".to_string())];
        if self.checked {
            attrs.push(("checked".to_string(), "checked".to_string()));
        }
        attrs
    }
}

impl ReadonlyConvertible for CheckboxField {
    fn to_readonly(&self, ctx: &FieldContext<'_>) -> Field {
        Field::Readonly(ReadonlyField::new(
            self.base.to_readonly(),
            self.value(),
            self.answer(ctx),
            self.data_value(),
        ))
    }
}

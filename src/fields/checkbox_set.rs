//! Multi-select checkbox group

use super::field::{FieldBase, FieldContext, FieldKind, ReadonlyConvertible, Renderable, Validatable, Valuable};
use super::readonly::LookupField;
use super::value::{parse_keys, DataValue, FieldValue};
use super::Field;
use crate::i18n::inject;
use crate::options::{render_options, OptionNaming, OptionNode, OptionSet, OptionState};
use crate::record::{PersistInstruction, Record};
use crate::validation::ValidationResult;
use serde_json::Value;

/// Group of checkboxes selecting any number of keys from an option set
///
/// Saving writes the key list into the record, or synchronizes a
/// many-to-many relation when the record has one under the field's name.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxSetField {
    pub base: FieldBase,
    pub source: OptionSet,
    pub value: Vec<String>,
    /// Keys rendered checked even when not selected
    pub default_items: Vec<String>,
    /// Keys rendered disabled and rejected on submit
    pub disabled_items: Vec<String>,
}

impl CheckboxSetField {
    pub fn new(name: &str, title: &str, source: OptionSet) -> Self {
        Self {
            base: FieldBase::new(name, title),
            source,
            value: Vec::new(),
            default_items: Vec::new(),
            disabled_items: Vec::new(),
        }
    }

    pub fn with_default_items(mut self, keys: Vec<String>) -> Self {
        self.default_items = keys;
        self
    }

    pub fn with_disabled_items(mut self, keys: Vec<String>) -> Self {
        self.disabled_items = keys;
        self
    }

    /// Selected keys that are not enabled options, in submission order
    pub fn invalid_keys(&self) -> Vec<&str> {
        let valid: Vec<&str> = self.source.enabled_keys(&self.disabled_items).collect();
        self.value
            .iter()
            .map(String::as_str)
            .filter(|key| !valid.contains(key))
            .collect()
    }
}

impl Valuable for CheckboxSetField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Selection(self.value.clone())
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.value = parse_keys(raw);
    }

    fn data_value(&self) -> DataValue {
        DataValue::Keys(self.value.clone())
    }

    fn persist_instruction(&self, record: &dyn Record) -> PersistInstruction {
        if record.has_relation(&self.base.name) {
            PersistInstruction::SyncRelation(self.value.clone())
        } else {
            PersistInstruction::Write(self.data_value())
        }
    }

    fn load_from(&mut self, record: &dyn Record, ctx: &FieldContext<'_>) {
        if record.has_relation(&self.base.name) {
            self.value = record.relation_keys(&self.base.name).unwrap_or_default();
            return;
        }
        let raw = record
            .read_field(&self.base.name)
            .map(|v| v.to_raw())
            .unwrap_or(Value::Null);
        self.set_value(&raw, ctx);
    }
}

impl Validatable for CheckboxSetField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        let invalid = self.invalid_keys();
        if invalid.is_empty() {
            return;
        }
        let template = ctx.translate(
            "MultiSelectField.SOURCE_VALIDATION",
            "Please select values within the list provided. Invalid option(s) {value} have been submitted",
        );
        let invalid = invalid.join(",");
        result.add_error(
            &self.base.name,
            inject(&template, &[("value", invalid.as_str())]),
        );
    }
}

impl Renderable for CheckboxSetField {
    fn kind(&self) -> FieldKind {
        FieldKind::CheckboxSet
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.join(",")
    }

    fn options(&self) -> Option<Vec<OptionNode>> {
        let state = OptionState {
            selected: &self.value,
            defaults: &self.default_items,
            disabled: &self.disabled_items,
            field_disabled: self.base.disabled,
        };
        let descriptors = render_options(
            &self.base.id(),
            &self.base.name,
            &self.source,
            &state,
            OptionNaming::Multiple,
        );
        Some(descriptors.into_iter().map(OptionNode::Option).collect())
    }
}

impl ReadonlyConvertible for CheckboxSetField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        Field::Lookup(LookupField::new(
            self.base.to_readonly(),
            self.source.clone(),
            self.value.clone(),
            self.data_value(),
        ))
    }
}

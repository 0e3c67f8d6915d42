//! Selection group: a set of titled items of which at most one is selected

use super::field::{
    FieldBase, FieldContext, FieldKind, ReadonlyConvertible, Renderable, SelectionItemView,
    Validatable, Valuable,
};
use super::readonly::ReadonlyField;
use super::value::{scalar_to_string, DataValue, FieldValue};
use super::Field;
use crate::html::html_id;
use crate::validation::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One choice in a selection group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionGroupItem {
    pub value: String,
    pub title: String,
}

impl SelectionGroupItem {
    pub fn new(value: &str, title: &str) -> Self {
        Self {
            value: value.to_string(),
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionGroupField {
    pub base: FieldBase,
    pub items: Vec<SelectionGroupItem>,
    pub value: Option<String>,
}

impl SelectionGroupField {
    pub fn new(name: &str, title: &str, items: Vec<SelectionGroupItem>) -> Self {
        Self {
            base: FieldBase::new(name, title),
            items,
            value: None,
        }
    }

    /// Index of the first item whose value matches; no implicit default
    pub fn selected_index(&self) -> Option<usize> {
        let value = self.value.as_deref()?;
        self.items.iter().position(|item| item.value == value)
    }

    pub fn selected_item(&self) -> Option<&SelectionGroupItem> {
        self.selected_index().map(|i| &self.items[i])
    }
}

impl Valuable for SelectionGroupField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.value.clone().unwrap_or_default())
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        let value = scalar_to_string(raw);
        self.value = if value.is_empty() { None } else { Some(value) };
    }

    fn data_value(&self) -> DataValue {
        match &self.value {
            Some(v) => DataValue::Text(v.clone()),
            None => DataValue::Absent,
        }
    }
}

impl Validatable for SelectionGroupField {
    fn validate(&self, _result: &mut ValidationResult, _ctx: &FieldContext<'_>) {}
}

impl Renderable for SelectionGroupField {
    fn kind(&self) -> FieldKind {
        FieldKind::SelectionGroup
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.clone().unwrap_or_default()
    }

    fn items(&self) -> Option<Vec<SelectionItemView>> {
        let id = self.base.id();
        let selected = self.selected_index();
        Some(
            self.items
                .iter()
                .enumerate()
                .map(|(i, item)| SelectionItemView {
                    id: html_id(&format!("{}_{}", id, item.value)),
                    value: item.value.clone(),
                    title: item.title.clone(),
                    selected: selected == Some(i),
                })
                .collect(),
        )
    }
}

impl ReadonlyConvertible for SelectionGroupField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        let display = self
            .selected_item()
            .map(|item| item.title.clone())
            .unwrap_or_default();
        Field::Readonly(ReadonlyField::new(
            self.base.to_readonly(),
            self.value(),
            display,
            self.data_value(),
        ))
    }
}

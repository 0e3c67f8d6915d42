//! JSON description of a form, built into concrete fields

use super::Form;
use crate::error::{FormError, Result};
use crate::fields::{
    CheckboxField, CheckboxSetField, CurrencyField, DropdownField, EmailField, Field,
    GroupedDropdownField, OptionsetField, ReadonlyField, SelectionGroupField, SelectionGroupItem,
    TextField, UrlField,
};
use crate::options::{GroupedOptionSet, OptionSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The type of a field and its type-specific settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldType {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        #[serde(default)]
        multiline: bool,
    },
    Email,
    Url,
    Currency,
    Checkbox,
    Dropdown {
        source: OptionSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_string: Option<String>,
        #[serde(default)]
        disabled_items: Vec<String>,
    },
    GroupedDropdown {
        source: GroupedOptionSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_string: Option<String>,
        #[serde(default)]
        disabled_items: Vec<String>,
    },
    Optionset {
        source: OptionSet,
        #[serde(default)]
        disabled_items: Vec<String>,
    },
    CheckboxSet {
        source: OptionSet,
        #[serde(default)]
        default_items: Vec<String>,
        #[serde(default)]
        disabled_items: Vec<String>,
    },
    SelectionGroup {
        items: Vec<SelectionGroupItem>,
    },
    /// Display-only text
    Readonly,
}

/// One field of a form definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub type_: FieldType,
    /// Space-separated CSS classes added to the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_class: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub readonly: bool,
}

impl FieldDefinition {
    pub fn build(&self) -> Result<Field> {
        if self.name.trim().is_empty() {
            return Err(FormError::InvalidConfig("field name must not be empty".into()));
        }
        let name = self.name.as_str();
        let title = self.title.as_deref().unwrap_or("");

        let mut field = match &self.type_ {
            FieldType::Text {
                max_length,
                multiline,
            } => {
                let mut text = TextField::new(name, title);
                if let Some(max) = max_length {
                    text = text.with_max_length(*max);
                }
                if *multiline {
                    text = text.multiline();
                }
                Field::Text(text)
            }
            FieldType::Email => Field::Email(EmailField::new(name, title)),
            FieldType::Url => Field::Url(UrlField::new(name, title)),
            FieldType::Currency => Field::Currency(CurrencyField::new(name, title)),
            FieldType::Checkbox => Field::Checkbox(CheckboxField::new(name, title)),
            FieldType::Dropdown {
                source,
                empty_string,
                disabled_items,
            } => {
                let mut dropdown = DropdownField::new(name, title, source.clone())
                    .with_disabled_items(disabled_items.clone());
                if let Some(label) = empty_string {
                    dropdown = dropdown.with_empty_string(label);
                }
                Field::Dropdown(dropdown)
            }
            FieldType::GroupedDropdown {
                source,
                empty_string,
                disabled_items,
            } => {
                let mut dropdown = GroupedDropdownField::new(name, title, source.clone())
                    .with_disabled_items(disabled_items.clone());
                if let Some(label) = empty_string {
                    dropdown = dropdown.with_empty_string(label);
                }
                Field::GroupedDropdown(dropdown)
            }
            FieldType::Optionset {
                source,
                disabled_items,
            } => Field::Optionset(
                OptionsetField::new(name, title, source.clone())
                    .with_disabled_items(disabled_items.clone()),
            ),
            FieldType::CheckboxSet {
                source,
                default_items,
                disabled_items,
            } => Field::CheckboxSet(
                CheckboxSetField::new(name, title, source.clone())
                    .with_default_items(default_items.clone())
                    .with_disabled_items(disabled_items.clone()),
            ),
            FieldType::SelectionGroup { items } => {
                Field::SelectionGroup(SelectionGroupField::new(name, title, items.clone()))
            }
            FieldType::Readonly => Field::Readonly(ReadonlyField::text(name, title)),
        };

        let base = field.base_mut();
        if let Some(classes) = &self.extra_class {
            base.extra_classes
                .extend(classes.split_whitespace().map(str::to_string));
        }
        base.attributes.extend(self.attributes.clone());
        base.disabled = self.disabled;
        base.readonly = base.readonly || self.readonly;
        Ok(field)
    }
}

/// A whole form: a name and its fields in order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormDefinition {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl FormDefinition {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let definition: Self = serde_json::from_str(&contents)?;
        tracing::debug!(
            "Loaded form '{}' with {} fields from {:?}",
            definition.name,
            definition.fields.len(),
            path
        );
        Ok(definition)
    }

    pub fn build(&self) -> Result<Form> {
        let mut form = Form::new(&self.name);
        for definition in &self.fields {
            form.push(definition.build()?)?;
        }
        Ok(form)
    }
}

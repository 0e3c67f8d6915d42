//! Field capabilities and the tagged `Field` enum dispatching over them

use super::value::{DataValue, FieldValue};
use super::{
    CheckboxField, CheckboxSetField, CurrencyField, DropdownField, EmailField,
    GroupedDropdownField, LookupField, OptionsetField, ReadonlyField, SelectionGroupField,
    TextField, UrlField,
};
use crate::config::FormConfig;
use crate::html::{html_id, join_classes};
use crate::i18n::Translator;
use crate::options::OptionNode;
use crate::record::{PersistInstruction, Record};
use crate::validation::ValidationResult;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Declared variant tag of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Email,
    Url,
    Currency,
    Checkbox,
    Dropdown,
    GroupedDropdown,
    Optionset,
    CheckboxSet,
    SelectionGroup,
    Readonly,
    Lookup,
}

impl FieldKind {
    pub const ALL: [FieldKind; 12] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Url,
        FieldKind::Currency,
        FieldKind::Checkbox,
        FieldKind::Dropdown,
        FieldKind::GroupedDropdown,
        FieldKind::Optionset,
        FieldKind::CheckboxSet,
        FieldKind::SelectionGroup,
        FieldKind::Readonly,
        FieldKind::Lookup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Currency => "currency",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::GroupedDropdown => "grouped-dropdown",
            Self::Optionset => "optionset",
            Self::CheckboxSet => "checkbox-set",
            Self::SelectionGroup => "selection-group",
            Self::Readonly => "readonly",
            Self::Lookup => "lookup",
        }
    }

    /// Display-only kinds never accept submitted data
    pub fn is_display_only(&self) -> bool {
        matches!(self, Self::Readonly | Self::Lookup)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit configuration and localization handed to every field operation
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    pub config: &'a FormConfig,
    pub translator: &'a dyn Translator,
}

impl<'a> FieldContext<'a> {
    pub fn new(config: &'a FormConfig, translator: &'a dyn Translator) -> Self {
        Self { config, translator }
    }

    pub fn translate(&self, key: &str, default: &str) -> String {
        self.translator.translate(key, default)
    }

    pub fn currency_symbol(&self) -> &str {
        self.config.currency_symbol()
    }

    /// Localized "(none)" placeholder for empty display values
    pub fn none_label(&self) -> String {
        format!("({})", self.translate("FormField.NONE", "none"))
    }
}

/// State every field carries regardless of its kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldBase {
    pub name: String,
    pub title: String,
    pub form_name: Option<String>,
    pub extra_classes: Vec<String>,
    pub attributes: IndexMap<String, String>,
    pub disabled: bool,
    pub readonly: bool,
}

impl FieldBase {
    /// Create a base; an empty title is derived from the name
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: if title.is_empty() {
                name_to_label(name)
            } else {
                title.to_string()
            },
            ..Default::default()
        }
    }

    /// Element id, prefixed with the form name when attached to a form
    pub fn id(&self) -> String {
        match &self.form_name {
            Some(form) => html_id(&format!("{}_{}", form, self.name)),
            None => html_id(&self.name),
        }
    }

    /// Copy of this base for a display-only variant
    pub fn to_readonly(&self) -> Self {
        Self {
            readonly: true,
            ..self.clone()
        }
    }
}

/// Turn a field name like `FirstName` or `Author.EmailAddress` into a title
pub fn name_to_label(name: &str) -> String {
    thread_local! {
        static LOWER_UPPER: Regex = Regex::new(r"([a-z]+)([A-Z])")
            .expect("Failed to compile label regex");
        static UPPER_WORD: Regex = Regex::new(r"([A-Z])([A-Z][a-z])")
            .expect("Failed to compile label regex");
    }

    let label = match name.rsplit_once('.') {
        Some((head, last)) => {
            let owner = head.rsplit('.').next().unwrap_or(head);
            format!("{owner} {last}")
        }
        None => name.to_string(),
    };
    let label = LOWER_UPPER.with(|re| re.replace_all(&label, "$1 $2").into_owned());
    UPPER_WORD.with(|re| re.replace_all(&label, "$1 $2").into_owned())
}

/// Holds a value and converts between raw input and persisted data
pub trait Valuable {
    fn base(&self) -> &FieldBase;
    fn base_mut(&mut self) -> &mut FieldBase;

    /// Canonical internal value
    fn value(&self) -> FieldValue;

    /// Populate from a stored or programmatic value
    fn set_value(&mut self, raw: &Value, ctx: &FieldContext<'_>);

    /// Populate from request data; defaults to `set_value`
    fn set_submitted_value(&mut self, raw: &Value, ctx: &FieldContext<'_>) {
        self.set_value(raw, ctx);
    }

    /// Value written back into a record
    fn data_value(&self) -> DataValue;

    /// How this field writes itself into `record`
    fn persist_instruction(&self, _record: &dyn Record) -> PersistInstruction {
        PersistInstruction::Write(self.data_value())
    }

    /// Read this field's value from `record`
    fn load_from(&mut self, record: &dyn Record, ctx: &FieldContext<'_>) {
        let raw = record
            .read_field(&self.base().name)
            .map(|v| v.to_raw())
            .unwrap_or(Value::Null);
        self.set_value(&raw, ctx);
    }
}

/// Checks the current value, reporting into a shared result
pub trait Validatable {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>);
}

/// Produces structured render data for a templating collaborator
pub trait Renderable: Valuable {
    fn kind(&self) -> FieldKind;

    /// `type` attribute for input-style controls
    fn input_type(&self) -> Option<&'static str> {
        None
    }

    /// What the control shows as its value
    fn display_value(&self, ctx: &FieldContext<'_>) -> String;

    fn extra_attributes(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn options(&self) -> Option<Vec<OptionNode>> {
        None
    }

    fn items(&self) -> Option<Vec<SelectionItemView>> {
        None
    }

    fn view(&self, ctx: &FieldContext<'_>) -> FieldView {
        let base = self.base();
        let kind = self.kind();
        let id = base.id();
        let value = self.display_value(ctx);
        let class = join_classes(
            std::iter::once(kind.as_str()).chain(base.extra_classes.iter().map(String::as_str)),
        );

        let mut attributes = IndexMap::new();
        if let Some(input_type) = self.input_type() {
            attributes.insert("type".to_string(), input_type.to_string());
        }
        attributes.insert("name".to_string(), base.name.clone());
        attributes.insert("id".to_string(), id.clone());
        attributes.insert("class".to_string(), class.clone());
        if base.disabled {
            attributes.insert("disabled".to_string(), "disabled".to_string());
        }
        if base.readonly {
            attributes.insert("readonly".to_string(), "readonly".to_string());
        }
        attributes.extend(self.extra_attributes());
        for (key, val) in &base.attributes {
            attributes.insert(key.clone(), val.clone());
        }

        FieldView {
            id,
            name: base.name.clone(),
            title: base.title.clone(),
            kind,
            value,
            class,
            attributes,
            readonly: base.readonly,
            disabled: base.disabled,
            options: self.options(),
            items: self.items(),
        }
    }
}

/// Produces the display-only equivalent of a field
pub trait ReadonlyConvertible {
    fn to_readonly(&self, ctx: &FieldContext<'_>) -> Field;
}

/// Every capability a concrete field type provides
pub trait FormField: Valuable + Validatable + Renderable + ReadonlyConvertible {}

impl<T> FormField for T where T: Valuable + Validatable + Renderable + ReadonlyConvertible {}

/// Render data for one selection-group item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionItemView {
    pub id: String,
    pub value: String,
    pub title: String,
    pub selected: bool,
}

/// Structured render data for a field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub id: String,
    pub name: String,
    pub title: String,
    pub kind: FieldKind,
    pub value: String,
    pub class: String,
    pub attributes: IndexMap<String, String>,
    pub readonly: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SelectionItemView>>,
}

/// Enum representing every concrete field type
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(TextField),
    Email(EmailField),
    Url(UrlField),
    Currency(CurrencyField),
    Checkbox(CheckboxField),
    Dropdown(DropdownField),
    GroupedDropdown(GroupedDropdownField),
    Optionset(OptionsetField),
    CheckboxSet(CheckboxSetField),
    SelectionGroup(SelectionGroupField),
    Readonly(ReadonlyField),
    Lookup(LookupField),
}

impl Field {
    pub fn as_form_field(&self) -> &dyn FormField {
        match self {
            Field::Text(f) => f,
            Field::Email(f) => f,
            Field::Url(f) => f,
            Field::Currency(f) => f,
            Field::Checkbox(f) => f,
            Field::Dropdown(f) => f,
            Field::GroupedDropdown(f) => f,
            Field::Optionset(f) => f,
            Field::CheckboxSet(f) => f,
            Field::SelectionGroup(f) => f,
            Field::Readonly(f) => f,
            Field::Lookup(f) => f,
        }
    }

    pub fn as_form_field_mut(&mut self) -> &mut dyn FormField {
        match self {
            Field::Text(f) => f,
            Field::Email(f) => f,
            Field::Url(f) => f,
            Field::Currency(f) => f,
            Field::Checkbox(f) => f,
            Field::Dropdown(f) => f,
            Field::GroupedDropdown(f) => f,
            Field::Optionset(f) => f,
            Field::CheckboxSet(f) => f,
            Field::SelectionGroup(f) => f,
            Field::Readonly(f) => f,
            Field::Lookup(f) => f,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.as_form_field().kind()
    }

    pub fn base(&self) -> &FieldBase {
        self.as_form_field().base()
    }

    pub fn base_mut(&mut self) -> &mut FieldBase {
        self.as_form_field_mut().base_mut()
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn value(&self) -> FieldValue {
        self.as_form_field().value()
    }

    pub fn data_value(&self) -> DataValue {
        self.as_form_field().data_value()
    }

    pub fn set_value(&mut self, raw: &Value, ctx: &FieldContext<'_>) {
        self.as_form_field_mut().set_value(raw, ctx);
    }

    pub fn set_submitted_value(&mut self, raw: &Value, ctx: &FieldContext<'_>) {
        self.as_form_field_mut().set_submitted_value(raw, ctx);
    }

    pub fn load_from(&mut self, record: &dyn Record, ctx: &FieldContext<'_>) {
        self.as_form_field_mut().load_from(record, ctx);
    }

    pub fn persist_instruction(&self, record: &dyn Record) -> PersistInstruction {
        self.as_form_field().persist_instruction(record)
    }

    pub fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        self.as_form_field().validate(result, ctx);
    }

    pub fn display_value(&self, ctx: &FieldContext<'_>) -> String {
        self.as_form_field().display_value(ctx)
    }

    pub fn view(&self, ctx: &FieldContext<'_>) -> FieldView {
        self.as_form_field().view(ctx)
    }

    pub fn to_readonly(&self, ctx: &FieldContext<'_>) -> Field {
        self.as_form_field().to_readonly(ctx)
    }

    /// Whether submitted data for this field is accepted and saved
    pub fn is_submittable(&self) -> bool {
        let base = self.base();
        !self.kind().is_display_only() && !base.readonly && !base.disabled
    }
}

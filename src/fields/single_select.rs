//! Single-choice selection fields: dropdown, grouped dropdown and radio set

use super::field::{FieldBase, FieldContext, FieldKind, ReadonlyConvertible, Renderable, Validatable, Valuable};
use super::readonly::LookupField;
use super::value::{scalar_to_string, DataValue, FieldValue};
use super::Field;
use crate::i18n::inject;
use crate::options::{
    render_grouped_options, render_options, GroupedEntry, GroupedOptionSet, OptionNaming,
    OptionNode, OptionSet, OptionState,
};
use crate::validation::ValidationResult;
use serde_json::Value;

/// First scalar of a submission, `None` when empty
fn selected_key(raw: &Value) -> Option<String> {
    let key = match raw {
        Value::Array(items) => items.first().map(scalar_to_string).unwrap_or_default(),
        other => scalar_to_string(other),
    };
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

fn selected_slice(value: &Option<String>) -> Vec<String> {
    value.iter().cloned().collect()
}

fn single_data_value(value: &Option<String>) -> DataValue {
    match value {
        Some(key) => DataValue::Text(key.clone()),
        None => DataValue::Absent,
    }
}

/// Report a selected key that is not an enabled option
fn validate_choice(
    name: &str,
    value: &Option<String>,
    source: &OptionSet,
    disabled: &[String],
    result: &mut ValidationResult,
    ctx: &FieldContext<'_>,
) {
    let Some(key) = value else {
        return;
    };
    if source.enabled_keys(disabled).any(|k| k == key.as_str()) {
        return;
    }
    let template = ctx.translate(
        "SingleSelectField.SOURCE_VALIDATION",
        "Please select a value within the list provided. {value} is not a valid option",
    );
    result.add_error(name, inject(&template, &[("value", key.as_str())]));
}

fn lookup_for(base: &FieldBase, source: OptionSet, value: &Option<String>) -> Field {
    Field::Lookup(LookupField::new(
        base.to_readonly(),
        source,
        selected_slice(value),
        single_data_value(value),
    ))
}

/// `<select>` style field with an optional leading empty option
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownField {
    pub base: FieldBase,
    pub source: OptionSet,
    pub value: Option<String>,
    /// Label of a leading empty option, if any
    pub empty_string: Option<String>,
    pub disabled_items: Vec<String>,
}

impl DropdownField {
    pub fn new(name: &str, title: &str, source: OptionSet) -> Self {
        Self {
            base: FieldBase::new(name, title),
            source,
            value: None,
            empty_string: None,
            disabled_items: Vec::new(),
        }
    }

    pub fn with_empty_string(mut self, label: &str) -> Self {
        self.empty_string = Some(label.to_string());
        self
    }

    pub fn with_disabled_items(mut self, keys: Vec<String>) -> Self {
        self.disabled_items = keys;
        self
    }

    /// Source with the empty option prepended when configured
    fn source_with_empty(&self) -> OptionSet {
        match &self.empty_string {
            Some(label) => {
                let mut set = OptionSet::from_pairs([(String::new(), label.clone())]);
                for (key, label) in self.source.iter() {
                    set.insert(key, label);
                }
                set
            }
            None => self.source.clone(),
        }
    }
}

impl Valuable for DropdownField {
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
        self.value = selected_key(raw);
    }

    fn data_value(&self) -> DataValue {
        single_data_value(&self.value)
    }
}

impl Validatable for DropdownField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        validate_choice(
            &self.base.name,
            &self.value,
            &self.source,
            &self.disabled_items,
            result,
            ctx,
        );
    }
}

impl Renderable for DropdownField {
    fn kind(&self) -> FieldKind {
        FieldKind::Dropdown
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.clone().unwrap_or_default()
    }

    fn options(&self) -> Option<Vec<OptionNode>> {
        let selected = selected_slice(&self.value);
        let state = OptionState {
            selected: &selected,
            defaults: &[],
            disabled: &self.disabled_items,
            field_disabled: self.base.disabled,
        };
        let descriptors = render_options(
            &self.base.id(),
            &self.base.name,
            &self.source_with_empty(),
            &state,
            OptionNaming::Single,
        );
        Some(descriptors.into_iter().map(OptionNode::Option).collect())
    }
}

impl ReadonlyConvertible for DropdownField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        lookup_for(&self.base, self.source.clone(), &self.value)
    }
}

/// Dropdown whose options may be nested one level under group titles
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedDropdownField {
    pub base: FieldBase,
    pub source: GroupedOptionSet,
    pub value: Option<String>,
    pub empty_string: Option<String>,
    pub disabled_items: Vec<String>,
}

impl GroupedDropdownField {
    pub fn new(name: &str, title: &str, source: GroupedOptionSet) -> Self {
        Self {
            base: FieldBase::new(name, title),
            source,
            value: None,
            empty_string: None,
            disabled_items: Vec::new(),
        }
    }

    pub fn with_empty_string(mut self, label: &str) -> Self {
        self.empty_string = Some(label.to_string());
        self
    }

    pub fn with_disabled_items(mut self, keys: Vec<String>) -> Self {
        self.disabled_items = keys;
        self
    }
}

impl Valuable for GroupedDropdownField {
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
        self.value = selected_key(raw);
    }

    fn data_value(&self) -> DataValue {
        single_data_value(&self.value)
    }
}

impl Validatable for GroupedDropdownField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        validate_choice(
            &self.base.name,
            &self.value,
            &self.source.flatten(),
            &self.disabled_items,
            result,
            ctx,
        );
    }
}

impl Renderable for GroupedDropdownField {
    fn kind(&self) -> FieldKind {
        FieldKind::GroupedDropdown
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.clone().unwrap_or_default()
    }

    fn options(&self) -> Option<Vec<OptionNode>> {
        let selected = selected_slice(&self.value);
        let state = OptionState {
            selected: &selected,
            defaults: &[],
            disabled: &self.disabled_items,
            field_disabled: self.base.disabled,
        };
        let source = match &self.empty_string {
            Some(label) => {
                let mut with_empty = GroupedOptionSet::new();
                with_empty.insert_option("", label.clone());
                for (key, entry) in self.source.iter() {
                    match entry {
                        GroupedEntry::Label(l) => with_empty.insert_option(key, l.clone()),
                        GroupedEntry::Group(members) => with_empty.insert_group(key, members.clone()),
                    }
                }
                with_empty
            }
            None => self.source.clone(),
        };
        Some(render_grouped_options(
            &self.base.id(),
            &self.base.name,
            &source,
            &state,
            OptionNaming::Single,
        ))
    }
}

impl ReadonlyConvertible for GroupedDropdownField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        lookup_for(&self.base, self.source.flatten(), &self.value)
    }
}

/// Radio button set selecting exactly one key
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsetField {
    pub base: FieldBase,
    pub source: OptionSet,
    pub value: Option<String>,
    pub disabled_items: Vec<String>,
}

impl OptionsetField {
    pub fn new(name: &str, title: &str, source: OptionSet) -> Self {
        Self {
            base: FieldBase::new(name, title),
            source,
            value: None,
            disabled_items: Vec::new(),
        }
    }

    pub fn with_disabled_items(mut self, keys: Vec<String>) -> Self {
        self.disabled_items = keys;
        self
    }
}

impl Valuable for OptionsetField {
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
        self.value = selected_key(raw);
    }

    fn data_value(&self) -> DataValue {
        single_data_value(&self.value)
    }
}

impl Validatable for OptionsetField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        validate_choice(
            &self.base.name,
            &self.value,
            &self.source,
            &self.disabled_items,
            result,
            ctx,
        );
    }
}

impl Renderable for OptionsetField {
    fn kind(&self) -> FieldKind {
        FieldKind::Optionset
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.clone().unwrap_or_default()
    }

    fn options(&self) -> Option<Vec<OptionNode>> {
        let selected = selected_slice(&self.value);
        let state = OptionState {
            selected: &selected,
            defaults: &[],
            disabled: &self.disabled_items,
            field_disabled: self.base.disabled,
        };
        let descriptors = render_options(
            &self.base.id(),
            &self.base.name,
            &self.source,
            &state,
            OptionNaming::Single,
        );
        Some(descriptors.into_iter().map(OptionNode::Option).collect())
    }
}

impl ReadonlyConvertible for OptionsetField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        lookup_for(&self.base, self.source.clone(), &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::i18n::DefaultTranslator;
    use serde_json::json;

    fn countries() -> OptionSet {
        OptionSet::from_pairs([("nz", "New Zealand"), ("au", "Australia"), ("de", "Germany")])
    }

    fn run<F>(f: F)
    where
        F: FnOnce(&FieldContext<'_>),
    {
        let config = FormConfig::default();
        let translator = DefaultTranslator;
        let ctx = FieldContext::new(&config, &translator);
        f(&ctx);
    }

    mod dropdown {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_value_takes_scalar() {
            run(|ctx| {
                let mut field = DropdownField::new("Country", "", countries());
                field.set_value(&json!("au"), ctx);
                assert_eq!(field.data_value(), DataValue::Text("au".to_string()));

                field.set_value(&json!(""), ctx);
                assert_eq!(field.data_value(), DataValue::Absent);
            });
        }

        #[test]
        fn test_unknown_key_is_invalid() {
            run(|ctx| {
                let mut field = DropdownField::new("Country", "", countries());
                field.set_value(&json!("fr"), ctx);
                let mut result = ValidationResult::new();
                field.validate(&mut result, ctx);

                assert_eq!(result.len(), 1);
                assert_eq!(
                    result.messages()[0].message,
                    "Please select a value within the list provided. fr is not a valid option"
                );
            });
        }

        #[test]
        fn test_disabled_key_is_invalid() {
            run(|ctx| {
                let mut field = DropdownField::new("Country", "", countries())
                    .with_disabled_items(vec!["de".to_string()]);
                field.set_value(&json!("de"), ctx);
                let mut result = ValidationResult::new();
                field.validate(&mut result, ctx);
                assert_eq!(result.len(), 1);
            });
        }

        #[test]
        fn test_empty_selection_is_valid() {
            run(|ctx| {
                let field = DropdownField::new("Country", "", countries());
                let mut result = ValidationResult::new();
                field.validate(&mut result, ctx);
                assert!(result.is_valid());
            });
        }

        #[test]
        fn test_empty_string_option_comes_first() {
            run(|ctx| {
                let mut field = DropdownField::new("Country", "", countries())
                    .with_empty_string("Choose one");
                field.set_value(&json!("de"), ctx);
                let options = field.options().unwrap();

                assert_eq!(options.len(), 4);
                match (&options[0], &options[3]) {
                    (OptionNode::Option(first), OptionNode::Option(last)) => {
                        assert_eq!(first.value, "");
                        assert_eq!(first.label, "Choose one");
                        assert!(!first.is_checked);
                        assert!(last.is_checked);
                        assert_eq!(last.name, "Country");
                    }
                    other => panic!("unexpected nodes {other:?}"),
                }
            });
        }

        #[test]
        fn test_readonly_shows_label() {
            run(|ctx| {
                let mut field = DropdownField::new("Country", "", countries());
                field.set_value(&json!("nz"), ctx);
                let ro = field.to_readonly(ctx);
                assert_eq!(ro.display_value(ctx), "New Zealand");
                assert_eq!(ro.data_value(), DataValue::Text("nz".to_string()));

                field.set_value(&json!(null), ctx);
                assert_eq!(field.to_readonly(ctx).display_value(ctx), "(none)");
            });
        }
    }

    mod grouped_dropdown {
        use super::*;
        use pretty_assertions::assert_eq;

        fn grouped() -> GroupedOptionSet {
            let mut set = GroupedOptionSet::new();
            set.insert_option("any", "Anywhere");
            set.insert_group(
                "Oceania",
                OptionSet::from_pairs([("nz", "New Zealand"), ("au", "Australia")]),
            );
            set
        }

        #[test]
        fn test_group_member_is_valid_choice() {
            run(|ctx| {
                let mut field = GroupedDropdownField::new("Region", "", grouped());
                field.set_value(&json!("au"), ctx);
                let mut result = ValidationResult::new();
                field.validate(&mut result, ctx);
                assert!(result.is_valid());
            });
        }

        #[test]
        fn test_group_title_is_not_a_choice() {
            run(|ctx| {
                let mut field = GroupedDropdownField::new("Region", "", grouped());
                field.set_value(&json!("Oceania"), ctx);
                let mut result = ValidationResult::new();
                field.validate(&mut result, ctx);
                assert_eq!(result.len(), 1);
            });
        }

        #[test]
        fn test_options_nest_groups() {
            run(|ctx| {
                let mut field =
                    GroupedDropdownField::new("Region", "", grouped()).with_empty_string("-");
                field.set_value(&json!("nz"), ctx);
                let options = field.options().unwrap();

                assert_eq!(options.len(), 3);
                match &options[2] {
                    OptionNode::Group { title, options } => {
                        assert_eq!(title, "Oceania");
                        assert!(options[0].is_checked);
                    }
                    other => panic!("expected group, got {other:?}"),
                }
            });
        }

        #[test]
        fn test_readonly_finds_nested_label() {
            run(|ctx| {
                let mut field = GroupedDropdownField::new("Region", "", grouped());
                field.set_value(&json!("au"), ctx);
                assert_eq!(field.to_readonly(ctx).display_value(ctx), "Australia");
            });
        }
    }

    mod optionset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_radio_naming_and_single_check() {
            run(|ctx| {
                let mut field = OptionsetField::new("Country", "", countries());
                field.set_value(&json!(["au", "nz"]), ctx);
                assert_eq!(field.value, Some("au".to_string()));

                let checked: Vec<bool> = field
                    .options()
                    .unwrap()
                    .iter()
                    .map(|node| match node {
                        OptionNode::Option(o) => {
                            assert_eq!(o.name, "Country");
                            o.is_checked
                        }
                        OptionNode::Group { .. } => panic!("unexpected group"),
                    })
                    .collect();
                assert_eq!(checked, vec![false, true, false]);
            });
        }

        #[test]
        fn test_numeric_submission() {
            run(|ctx| {
                let mut field =
                    OptionsetField::new("Rating", "", OptionSet::from_pairs([("1", "One"), ("2", "Two")]));
                field.set_value(&json!(2), ctx);
                let mut result = ValidationResult::new();
                field.validate(&mut result, ctx);
                assert!(result.is_valid());
                assert_eq!(field.data_value(), DataValue::Text("2".to_string()));
            });
        }
    }
}

//! Ordered, name-unique collection of fields

use crate::error::{FormError, Result};
use crate::fields::{Field, FieldContext, FieldView};
use crate::record::{PersistInstruction, Record};
use crate::transform::{TransformRegistry, Transformation};
use crate::validation::ValidationResult;
use serde_json::{Map, Value};

/// A named form and its fields in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    name: String,
    fields: Vec<Field>,
}

impl Form {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a field; its id becomes prefixed with the form name
    pub fn push(&mut self, mut field: Field) -> Result<()> {
        if self.field(field.name()).is_some() {
            return Err(FormError::DuplicateField {
                name: field.name().to_string(),
            });
        }
        field.base_mut().form_name = Some(self.name.clone());
        self.fields.push(field);
        Ok(())
    }

    /// Builder form of [`Form::push`]
    pub fn with_field(mut self, field: Field) -> Result<Self> {
        self.push(field)?;
        Ok(self)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Field by name, or `FieldNotFound`
    pub fn require(&self, name: &str) -> Result<&Field> {
        self.field(name).ok_or_else(|| FormError::FieldNotFound {
            name: name.to_string(),
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn load_from_record(&mut self, record: &dyn Record, ctx: &FieldContext<'_>) {
        for field in &mut self.fields {
            field.load_from(record, ctx);
        }
        tracing::debug!("Loaded {} fields of '{}' from record", self.fields.len(), self.name);
    }

    /// Apply request data to submittable fields
    ///
    /// A missing key counts as `null`, so an unchecked checkbox clears.
    pub fn load_submission(&mut self, data: &Map<String, Value>, ctx: &FieldContext<'_>) {
        for field in self.fields.iter_mut().filter(|f| f.is_submittable()) {
            let raw = data.get(field.name()).unwrap_or(&Value::Null);
            field.set_submitted_value(raw, ctx);
        }
    }

    pub fn validate(&self, ctx: &FieldContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for field in &self.fields {
            field.validate(&mut result, ctx);
        }
        result
    }

    /// Write every submittable field into `record`
    ///
    /// All instructions are checked against the record's relations before
    /// the first write, so a plain value aimed at a relation leaves the record
    /// untouched. An error raised by the record itself during a write leaves
    /// the fields before it written.
    pub fn save_into(&self, record: &mut dyn Record) -> Result<()> {
        let instructions: Vec<(&str, PersistInstruction)> = self
            .fields
            .iter()
            .filter(|f| f.is_submittable())
            .map(|field| (field.name(), field.persist_instruction(&*record)))
            .collect();

        if let Some((name, _)) = instructions.iter().find(|(name, instruction)| {
            matches!(instruction, PersistInstruction::Write(_)) && record.has_relation(name)
        }) {
            return Err(FormError::Record {
                field: name.to_string(),
                message: "is a relation and cannot be written as a field".to_string(),
            });
        }

        for (name, instruction) in &instructions {
            tracing::debug!("Saving '{}': {:?}", name, instruction);
            instruction.apply(name, record)?;
        }
        Ok(())
    }

    /// New form with every field passed through `registry`
    pub fn transform(
        &self,
        registry: &TransformRegistry,
        transformation: Transformation,
        ctx: &FieldContext<'_>,
    ) -> Result<Form> {
        let fields = self
            .fields
            .iter()
            .map(|field| registry.transform(transformation, field, ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Form {
            name: self.name.clone(),
            fields,
        })
    }

    pub fn views(&self, ctx: &FieldContext<'_>) -> Vec<FieldView> {
        self.fields.iter().map(|f| f.view(ctx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::fields::{
        CheckboxField, CheckboxSetField, CurrencyField, DataValue, EmailField, FieldKind,
        TextField,
    };
    use crate::i18n::DefaultTranslator;
    use crate::options::OptionSet;
    use crate::record::{MemoryRecord, MockRecord, Record};
    use mockall::predicate::eq;
    use serde_json::json;

    fn order_form() -> Form {
        Form::new("Order")
            .with_field(Field::Text(TextField::new("Name", "")))
            .and_then(|f| f.with_field(Field::Email(EmailField::new("Email", ""))))
            .and_then(|f| f.with_field(Field::Currency(CurrencyField::new("Price", ""))))
            .and_then(|f| f.with_field(Field::Checkbox(CheckboxField::new("Gift", ""))))
            .and_then(|f| {
                f.with_field(Field::CheckboxSet(CheckboxSetField::new(
                    "Tags",
                    "",
                    OptionSet::from_pairs([("1", "Rust"), ("2", "Go")]),
                )))
            })
            .unwrap()
    }

    fn submission(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("submission must be an object"),
        }
    }

    mod structure {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_duplicate_names_are_rejected() {
            let mut form = Form::new("Order");
            form.push(Field::Text(TextField::new("Name", ""))).unwrap();
            let err = form
                .push(Field::Email(EmailField::new("Name", "")))
                .unwrap_err();
            assert!(matches!(err, FormError::DuplicateField { name } if name == "Name"));
            assert_eq!(form.len(), 1);
        }

        #[test]
        fn test_field_ids_are_prefixed() {
            let form = order_form();
            assert_eq!(form.require("Email").unwrap().base().id(), "Order_Email");
        }

        #[test]
        fn test_require_missing_field() {
            let form = order_form();
            assert!(matches!(
                form.require("Nope"),
                Err(FormError::FieldNotFound { .. })
            ));
        }

        #[test]
        fn test_fields_keep_declaration_order() {
            let form = order_form();
            let names: Vec<&str> = form.fields().iter().map(|f| f.name()).collect();
            assert_eq!(names, vec!["Name", "Email", "Price", "Gift", "Tags"]);
        }
    }

    mod submissions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_submission() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut form = order_form();
            form.load_submission(
                &submission(json!({
                    "Name": "Ada",
                    "Email": " ada@example.com ",
                    "Price": "$1,234.56",
                    "Gift": "1",
                    "Tags": {"1": "1"}
                })),
                &ctx,
            );

            assert!(form.validate(&ctx).is_valid());
            assert_eq!(
                form.require("Email").unwrap().data_value(),
                DataValue::Text("ada@example.com".to_string())
            );
        }

        #[test]
        fn test_errors_accumulate_per_field() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut form = order_form();
            form.load_submission(
                &submission(json!({"Email": "nope", "Price": "abc", "Tags": ["9"]})),
                &ctx,
            );

            let result = form.validate(&ctx);
            let fields: Vec<&str> = result.messages().iter().map(|m| m.field.as_str()).collect();
            assert_eq!(fields, vec!["Email", "Price", "Tags"]);
        }

        #[test]
        fn test_missing_checkbox_clears() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut form = order_form();
            form.field_mut("Gift").unwrap().set_value(&json!(1), &ctx);
            form.load_submission(&Map::new(), &ctx);

            assert_eq!(form.require("Gift").unwrap().data_value(), DataValue::Absent);
        }

        #[test]
        fn test_disabled_fields_ignore_submission() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut form = order_form();
            let name = form.field_mut("Name").unwrap();
            name.set_value(&json!("Kept"), &ctx);
            name.base_mut().disabled = true;
            form.load_submission(&submission(json!({"Name": "Changed"})), &ctx);

            assert_eq!(
                form.require("Name").unwrap().data_value(),
                DataValue::Text("Kept".to_string())
            );
        }
    }

    mod saving {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_save_syncs_relation_instead_of_writing() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut form = Form::new("Post")
                .with_field(Field::Text(TextField::new("Title", "")))
                .and_then(|f| {
                    f.with_field(Field::CheckboxSet(CheckboxSetField::new(
                        "Tags",
                        "",
                        OptionSet::from_pairs([("1", "Rust"), ("2", "Go")]),
                    )))
                })
                .unwrap();
            form.load_submission(
                &submission(json!({"Title": "Hello", "Tags": ["2"]})),
                &ctx,
            );

            let mut record = MockRecord::new();
            record
                .expect_has_relation()
                .returning(|name| name == "Tags");
            record
                .expect_write_field()
                .with(eq("Title"), eq(DataValue::Text("Hello".to_string())))
                .times(1)
                .returning(|_, _| Ok(()));
            record
                .expect_sync_relation()
                .withf(|name, keys| name == "Tags" && keys == ["2".to_string()])
                .times(1)
                .returning(|_, _| Ok(()));

            form.save_into(&mut record).unwrap();
        }

        #[test]
        fn test_round_trip_through_memory_record() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut form = order_form();
            form.load_submission(
                &submission(json!({"Name": "Ada", "Price": "$12.50", "Gift": "on", "Tags": ["1", "2"]})),
                &ctx,
            );
            let mut record = MemoryRecord::new();
            form.save_into(&mut record).unwrap();

            assert_eq!(
                record.read_field("Price"),
                Some(DataValue::Text("12.50".to_string()))
            );
            assert_eq!(record.read_field("Gift"), Some(DataValue::Integer(1)));

            let mut reloaded = order_form();
            reloaded.load_from_record(&record, &ctx);
            assert_eq!(reloaded.require("Price").unwrap().display_value(&ctx), "$12.50");
            assert_eq!(
                reloaded.require("Tags").unwrap().data_value(),
                DataValue::Keys(vec!["1".to_string(), "2".to_string()])
            );
        }

        #[test]
        fn test_record_errors_propagate() {
            let mut form = Form::new("Post");
            form.push(Field::Text(TextField::new("Title", ""))).unwrap();

            let mut record = MockRecord::new();
            record.expect_has_relation().return_const(false);
            record.expect_write_field().returning(|name, _| {
                Err(FormError::Record {
                    field: name.to_string(),
                    message: "locked".to_string(),
                })
            });

            assert!(matches!(
                form.save_into(&mut record),
                Err(FormError::Record { .. })
            ));
        }

        #[test]
        fn test_write_over_relation_leaves_record_untouched() {
            let mut form = Form::new("Post");
            form.push(Field::Text(TextField::new("Name", ""))).unwrap();
            form.push(Field::Text(TextField::new("Author", ""))).unwrap();

            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);
            form.load_submission(&submission(json!({"Name": "Ada", "Author": "Grace"})), &ctx);

            let mut record = MemoryRecord::new().with_relation("Author");
            let err = form.save_into(&mut record).unwrap_err();
            assert!(matches!(err, FormError::Record { ref field, .. } if field == "Author"));
            assert_eq!(record.read_field("Name"), None);
            assert_eq!(record.relation_keys("Author"), Some(vec![]));
        }
    }

    mod transformation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_readonly_form() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut form = order_form();
            form.field_mut("Tags").unwrap().set_value(&json!(["2"]), &ctx);
            let readonly = form
                .transform(&TransformRegistry::default(), Transformation::Readonly, &ctx)
                .unwrap();

            assert_eq!(readonly.name(), "Order");
            assert!(readonly.fields().iter().all(|f| !f.is_submittable()));
            let tags = readonly.require("Tags").unwrap();
            assert_eq!(tags.kind(), FieldKind::Lookup);
            assert_eq!(tags.display_value(&ctx), "Go");
            assert_eq!(tags.base().id(), "Order_Tags");
        }

        #[test]
        fn test_transform_fails_on_unregistered_kind() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let result = order_form().transform(
                &TransformRegistry::new(),
                Transformation::Readonly,
                &ctx,
            );
            assert!(matches!(
                result,
                Err(FormError::UnsupportedTransformation { .. })
            ));
        }

        #[test]
        fn test_views_in_order() {
            let config = FormConfig::default();
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let views = order_form().views(&ctx);
            assert_eq!(views.len(), 5);
            assert_eq!(views[0].id, "Order_Name");
            assert_eq!(views[4].kind, FieldKind::CheckboxSet);
            assert!(views[4].options.is_some());
        }
    }
}

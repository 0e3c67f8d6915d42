//! Free-text fields: plain text, email and URL

use super::field::{FieldBase, FieldContext, FieldKind, ReadonlyConvertible, Renderable, Validatable, Valuable};
use super::readonly::ReadonlyField;
use super::value::{scalar_to_string, DataValue, FieldValue};
use super::Field;
use crate::i18n::inject;
use crate::validation::ValidationResult;
use regex::Regex;
use serde_json::Value;
use url::Url;

/// Single- or multi-line text input
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub base: FieldBase,
    pub value: String,
    pub max_length: Option<usize>,
    pub is_multiline: bool,
}

impl TextField {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            base: FieldBase::new(name, title),
            value: String::new(),
            max_length: None,
            is_multiline: false,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Render as a textarea
    pub fn multiline(mut self) -> Self {
        self.is_multiline = true;
        self
    }
}

impl Valuable for TextField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.value.clone())
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.value = scalar_to_string(raw);
    }

    fn data_value(&self) -> DataValue {
        DataValue::Text(self.value.clone())
    }
}

impl Validatable for TextField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        let Some(max) = self.max_length else {
            return;
        };
        if self.value.chars().count() > max {
            let template = ctx.translate(
                "TextField.VALIDATELENGTH",
                "The value for {name} must not exceed {maxLength} characters in length",
            );
            let max = max.to_string();
            result.add_error(
                &self.base.name,
                inject(
                    &template,
                    &[("name", self.base.title.as_str()), ("maxLength", max.as_str())],
                ),
            );
        }
    }
}

impl Renderable for TextField {
    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn input_type(&self) -> Option<&'static str> {
        if self.is_multiline {
            None
        } else {
            Some("text")
        }
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.clone()
    }

    fn extra_attributes(&self) -> Vec<(String, String)> {
        self.max_length
            .map(|max| vec![("maxlength".to_string(), max.to_string())])
            .unwrap_or_default()
    }
}

impl ReadonlyConvertible for TextField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        Field::Readonly(ReadonlyField::new(
            self.base.to_readonly(),
            self.value(),
            self.value.clone(),
            self.data_value(),
        ))
    }
}

/// Text input that must hold an email address when not empty
#[derive(Debug, Clone, PartialEq)]
pub struct EmailField {
    pub base: FieldBase,
    pub value: String,
}

impl EmailField {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            base: FieldBase::new(name, title),
            value: String::new(),
        }
    }
}

/// Check an address against RFC 5322 style local-part and domain rules
pub fn is_valid_email(text: &str) -> bool {
    thread_local! {
        static EMAIL_REGEX: Regex = Regex::new(
            r#"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$"#,
        )
        .expect("Failed to compile email regex");
    }

    EMAIL_REGEX.with(|re| re.is_match(text))
}

impl Valuable for EmailField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.value.clone())
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.value = scalar_to_string(raw).trim().to_string();
    }

    fn data_value(&self) -> DataValue {
        DataValue::Text(self.value.clone())
    }
}

impl Validatable for EmailField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        if !self.value.is_empty() && !is_valid_email(&self.value) {
            result.add_error(
                &self.base.name,
                ctx.translate("EmailField.VALIDATION", "Please enter an email address"),
            );
        }
    }
}

impl Renderable for EmailField {
    fn kind(&self) -> FieldKind {
        FieldKind::Email
    }

    fn input_type(&self) -> Option<&'static str> {
        Some("email")
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.clone()
    }
}

impl ReadonlyConvertible for EmailField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        Field::Readonly(ReadonlyField::new(
            self.base.to_readonly(),
            self.value(),
            self.value.clone(),
            self.data_value(),
        ))
    }
}

/// Text input that must hold an absolute http(s) URL when not empty
#[derive(Debug, Clone, PartialEq)]
pub struct UrlField {
    pub base: FieldBase,
    pub value: String,
}

impl UrlField {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            base: FieldBase::new(name, title),
            value: String::new(),
        }
    }
}

/// Require an explicit `http://` or `https://` scheme and a host
pub fn is_valid_url(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(text) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

impl Valuable for UrlField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.value.clone())
    }

    fn set_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.value = scalar_to_string(raw).trim().to_string();
    }

    fn data_value(&self) -> DataValue {
        DataValue::Text(self.value.clone())
    }
}

impl Validatable for UrlField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        if !self.value.is_empty() && !is_valid_url(&self.value) {
            result.add_error(
                &self.base.name,
                ctx.translate("UrlField.VALIDATION", "Please enter a valid URL"),
            );
        }
    }
}

impl Renderable for UrlField {
    fn kind(&self) -> FieldKind {
        FieldKind::Url
    }

    fn input_type(&self) -> Option<&'static str> {
        Some("url")
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.value.clone()
    }
}

impl ReadonlyConvertible for UrlField {
    fn to_readonly(&self, _ctx: &FieldContext<'_>) -> Field {
        Field::Readonly(ReadonlyField::new(
            self.base.to_readonly(),
            self.value(),
            self.value.clone(),
            self.data_value(),
        ))
    }
}

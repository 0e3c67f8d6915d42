//! Currency amount field

use super::field::{FieldBase, FieldContext, FieldKind, ReadonlyConvertible, Renderable, Validatable, Valuable};
use super::readonly::ReadonlyField;
use super::value::{
    currency_data_value, format_currency, normalize_currency, parse_leading_number,
    scalar_to_string, DataValue, FieldValue,
};
use super::Field;
use crate::validation::ValidationResult;
use regex::Regex;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Amount field shown with the configured currency symbol
///
/// Values loaded from a record are reformatted (`1234.5` becomes
/// `$1,234.50`); submitted text is kept verbatim so a malformed entry is
/// validated and re-rendered as the user typed it.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyField {
    pub base: FieldBase,
    pub text: String,
}

impl CurrencyField {
    pub fn new(name: &str, title: &str) -> Self {
        Self {
            base: FieldBase::new(name, title),
            text: String::new(),
        }
    }
}

/// Pattern accepting an optional symbol and sign, grouped or plain digits
/// and an optional two-digit fraction
pub fn currency_pattern(symbol: &str) -> String {
    let symbol = format!("(?:{})", regex::escape(symbol));
    format!(r"^\s*(-?{symbol}?|{symbol}-?)?(\d{{1,3}}(,\d{{3}})*|\d+)(\.\d{{2}})?\s*$")
}

/// Check `text` against the currency format; empty text is valid
pub fn is_valid_currency(text: &str, symbol: &str) -> bool {
    if text.trim().is_empty() {
        return true;
    }
    thread_local! {
        static PATTERNS: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
    }

    PATTERNS.with(|patterns| {
        let mut patterns = patterns.borrow_mut();
        if let Some(re) = patterns.get(symbol) {
            return re.is_match(text);
        }
        match Regex::new(&currency_pattern(symbol)) {
            Ok(re) => {
                let valid = re.is_match(text);
                patterns.insert(symbol.to_string(), re);
                valid
            }
            Err(e) => {
                tracing::warn!("Unusable currency symbol '{symbol}': {e}");
                false
            }
        }
    })
}

impl Valuable for CurrencyField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn value(&self) -> FieldValue {
        FieldValue::Currency(self.text.clone())
    }

    fn set_value(&mut self, raw: &Value, ctx: &FieldContext<'_>) {
        self.text = normalize_currency(raw, ctx.currency_symbol()).display;
    }

    fn set_submitted_value(&mut self, raw: &Value, _ctx: &FieldContext<'_>) {
        self.text = scalar_to_string(raw);
    }

    fn data_value(&self) -> DataValue {
        DataValue::Text(currency_data_value(&self.text))
    }
}

impl Validatable for CurrencyField {
    fn validate(&self, result: &mut ValidationResult, ctx: &FieldContext<'_>) {
        if !is_valid_currency(&self.text, ctx.currency_symbol()) {
            result.add_error(
                &self.base.name,
                ctx.translate("Form.VALIDCURRENCY", "Please enter a valid currency"),
            );
        }
    }
}

impl Renderable for CurrencyField {
    fn kind(&self) -> FieldKind {
        FieldKind::Currency
    }

    fn input_type(&self) -> Option<&'static str> {
        Some("text")
    }

    fn display_value(&self, _ctx: &FieldContext<'_>) -> String {
        self.text.clone()
    }
}

impl ReadonlyConvertible for CurrencyField {
    fn to_readonly(&self, ctx: &FieldContext<'_>) -> Field {
        let data = currency_data_value(&self.text);
        let display = format_currency(ctx.currency_symbol(), parse_leading_number(&data));
        Field::Readonly(ReadonlyField::new(
            self.base.to_readonly(),
            FieldValue::Currency(display.clone()),
            display,
            DataValue::Text(data),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::i18n::DefaultTranslator;
    use serde_json::json;

    mod pattern {
        use super::*;

        #[test]
        fn test_valid_amounts() {
            for text in ["$1,234.56", "1234.56", "12", "-$5.00", "$-5", "  $0.99 ", "1,000"] {
                assert!(is_valid_currency(text, "$"), "{text}");
            }
        }

        #[test]
        fn test_invalid_amounts() {
            for text in ["abc", "12.5", "1,23", "$$1", "1.234", "€5"] {
                assert!(!is_valid_currency(text, "$"), "{text}");
            }
        }

        #[test]
        fn test_empty_is_valid() {
            assert!(is_valid_currency("", "$"));
            assert!(is_valid_currency("   ", "$"));
        }

        #[test]
        fn test_multi_character_symbol() {
            assert!(is_valid_currency("NZ$10.00", "NZ$"));
            assert!(!is_valid_currency("Z$10.00", "NZ$"));
        }

        #[test]
        fn test_patterns_are_kept_per_symbol() {
            for _ in 0..2 {
                assert!(is_valid_currency("$5.00", "$"));
                assert!(!is_valid_currency("$5.00", "€"));
                assert!(is_valid_currency("€5.00", "€"));
                assert!(!is_valid_currency("€5.00", "$"));
            }
        }
    }

    mod field {
        use super::*;
        use pretty_assertions::assert_eq;

        fn ctx_parts() -> (FormConfig, DefaultTranslator) {
            (FormConfig::default(), DefaultTranslator)
        }

        #[test]
        fn test_set_value_formats_with_symbol() {
            let (config, translator) = ctx_parts();
            let ctx = FieldContext::new(&config, &translator);

            let mut field = CurrencyField::new("Price", "");
            field.set_value(&json!(1234.5), &ctx);

            assert_eq!(field.display_value(&ctx), "$1,234.50");
            assert_eq!(field.data_value(), DataValue::Text("1234.50".to_string()));
        }

        #[test]
        fn test_unset_persists_zero() {
            let field = CurrencyField::new("Price", "");
            assert_eq!(field.data_value(), DataValue::Text("0.00".to_string()));
        }

        #[test]
        fn test_submitted_text_is_kept_for_validation() {
            let (config, translator) = ctx_parts();
            let ctx = FieldContext::new(&config, &translator);

            let mut field = CurrencyField::new("Price", "");
            field.set_submitted_value(&json!("abc"), &ctx);

            assert_eq!(field.display_value(&ctx), "abc");
            let mut result = ValidationResult::new();
            field.validate(&mut result, &ctx);
            assert_eq!(result.len(), 1);
            assert_eq!(result.messages()[0].code, "validation");
            assert_eq!(field.text, "abc");
        }

        #[test]
        fn test_submitted_valid_amount() {
            let (config, translator) = ctx_parts();
            let ctx = FieldContext::new(&config, &translator);

            let mut field = CurrencyField::new("Price", "");
            field.set_submitted_value(&json!("$1,234.56"), &ctx);

            let mut result = ValidationResult::new();
            field.validate(&mut result, &ctx);
            assert!(result.is_valid());
            assert_eq!(field.data_value(), DataValue::Text("1234.56".to_string()));
        }

        #[test]
        fn test_configured_symbol() {
            let config = FormConfig {
                currency_symbol: Some("€".to_string()),
                ..Default::default()
            };
            let translator = DefaultTranslator;
            let ctx = FieldContext::new(&config, &translator);

            let mut field = CurrencyField::new("Price", "");
            field.set_submitted_value(&json!("€12.00"), &ctx);
            let mut result = ValidationResult::new();
            field.validate(&mut result, &ctx);
            assert!(result.is_valid());

            field.set_submitted_value(&json!("$12.00"), &ctx);
            let mut result = ValidationResult::new();
            field.validate(&mut result, &ctx);
            assert!(!result.is_valid());
        }

        #[test]
        fn test_readonly_reformats_persisted_value() {
            let (config, translator) = ctx_parts();
            let ctx = FieldContext::new(&config, &translator);

            let mut field = CurrencyField::new("Price", "");
            field.set_submitted_value(&json!("1234.5"), &ctx);
            let ro = field.to_readonly(&ctx);

            assert_eq!(ro.display_value(&ctx), "$1,234.50");
            assert_eq!(ro.data_value(), DataValue::Text("1234.5".to_string()));
            assert!(!ro.is_submittable());
        }
    }
}

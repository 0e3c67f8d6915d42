//! Form field widgets
//!
//! Each concrete field implements the capability traits in [`field`]; the
//! [`Field`] enum dispatches over them by declared kind.

mod checkbox;
mod checkbox_set;
mod currency;
mod field;
mod readonly;
mod selection_group;
mod single_select;
mod text;
mod value;

pub use checkbox::CheckboxField;
pub use checkbox_set::CheckboxSetField;
pub use currency::{currency_pattern, is_valid_currency, CurrencyField};
pub use field::{
    name_to_label, Field, FieldBase, FieldContext, FieldKind, FieldView, FormField,
    ReadonlyConvertible, Renderable, SelectionItemView, Validatable, Valuable,
};
pub use readonly::{LookupField, ReadonlyField};
pub use selection_group::{SelectionGroupField, SelectionGroupItem};
pub use single_select::{DropdownField, GroupedDropdownField, OptionsetField};
pub use text::{is_valid_email, is_valid_url, EmailField, TextField, UrlField};
pub use value::{
    currency_data_value, format_amount, format_currency, is_truthy, normalize_boolean,
    normalize_currency, parse_keys, parse_leading_number, scalar_to_string, strip_currency,
    DataValue, FieldValue, Normalized, ZERO_AMOUNT,
};

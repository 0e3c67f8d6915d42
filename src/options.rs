//! Option sets backing selection fields and their render descriptors

use crate::html::{html_id, join_classes, sanitize_class};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from option key to label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    entries: IndexMap<String, String>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, label)` pairs, keeping their order
    pub fn from_pairs<K, L>(pairs: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, l)| (k.into(), l.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(key.into(), label.into());
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that may be submitted: every key not in `disabled`
    pub fn enabled_keys<'a>(&'a self, disabled: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        self.keys()
            .filter(move |key| !disabled.iter().any(|d| d == key))
    }

    /// Labels of `keys`, in option order, skipping unknown keys
    pub fn labels_for(&self, keys: &[String]) -> Vec<&str> {
        self.iter()
            .filter(|(key, _)| keys.iter().any(|k| k == key))
            .map(|(_, label)| label)
            .collect()
    }
}

/// One entry of a grouped option set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupedEntry {
    /// A plain option: the map key is the option key
    Label(String),
    /// A titled group: the map key is the group title
    Group(OptionSet),
}

/// Ordered option set whose entries may be one level of titled groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedOptionSet {
    entries: IndexMap<String, GroupedEntry>,
}

impl GroupedOptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_option(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.entries
            .insert(key.into(), GroupedEntry::Label(label.into()));
    }

    pub fn insert_group(&mut self, title: impl Into<String>, options: OptionSet) {
        self.entries
            .insert(title.into(), GroupedEntry::Group(options));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupedEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All selectable options in declaration order, groups flattened
    pub fn flatten(&self) -> OptionSet {
        let mut flat = OptionSet::new();
        for (key, entry) in &self.entries {
            match entry {
                GroupedEntry::Label(label) => flat.insert(key.clone(), label.clone()),
                GroupedEntry::Group(options) => {
                    for (k, l) in options.iter() {
                        flat.insert(k, l);
                    }
                }
            }
        }
        flat
    }
}

/// How option inputs are named when submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionNaming {
    /// `field[key]`, one input per selected key
    Multiple,
    /// `field`, one value for the whole set
    Single,
}

/// Selected, default and disabled keys evaluated against one option set
#[derive(Debug, Clone, Copy)]
pub struct OptionState<'a> {
    pub selected: &'a [String],
    pub defaults: &'a [String],
    pub disabled: &'a [String],
    pub field_disabled: bool,
}

/// Render data for one option input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDescriptor {
    pub id: String,
    pub css_class: String,
    pub name: String,
    pub value: String,
    pub label: String,
    pub is_checked: bool,
    pub is_disabled: bool,
}

/// A rendered option or a titled group of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionNode {
    Option(OptionDescriptor),
    Group {
        title: String,
        options: Vec<OptionDescriptor>,
    },
}

/// Builds descriptors while tracking odd/even position across groups
struct OptionRenderer<'a> {
    field_id: &'a str,
    field_name: &'a str,
    state: &'a OptionState<'a>,
    naming: OptionNaming,
    position: usize,
}

impl<'a> OptionRenderer<'a> {
    fn describe(&mut self, key: &str, label: &str) -> OptionDescriptor {
        self.position += 1;
        let parity = if self.position % 2 == 1 { "odd" } else { "even" };
        let value_class = format!("val{}", sanitize_class(key));
        let contains = |set: &[String]| set.iter().any(|k| k == key);

        OptionDescriptor {
            id: html_id(&format!("{}_{}", self.field_id, key)),
            css_class: join_classes([parity, value_class.as_str()]),
            name: match self.naming {
                OptionNaming::Multiple => format!("{}[{}]", self.field_name, key),
                OptionNaming::Single => self.field_name.to_string(),
            },
            value: key.to_string(),
            label: label.to_string(),
            is_checked: contains(self.state.selected) || contains(self.state.defaults),
            is_disabled: self.state.field_disabled || contains(self.state.disabled),
        }
    }
}

/// Describe every option of a flat set, in order
pub fn render_options(
    field_id: &str,
    field_name: &str,
    options: &OptionSet,
    state: &OptionState<'_>,
    naming: OptionNaming,
) -> Vec<OptionDescriptor> {
    let mut renderer = OptionRenderer {
        field_id,
        field_name,
        state,
        naming,
        position: 0,
    };
    options
        .iter()
        .map(|(key, label)| renderer.describe(key, label))
        .collect()
}

/// Describe a grouped set, nesting group members one level deep
pub fn render_grouped_options(
    field_id: &str,
    field_name: &str,
    options: &GroupedOptionSet,
    state: &OptionState<'_>,
    naming: OptionNaming,
) -> Vec<OptionNode> {
    let mut renderer = OptionRenderer {
        field_id,
        field_name,
        state,
        naming,
        position: 0,
    };
    options
        .iter()
        .map(|(key, entry)| match entry {
            GroupedEntry::Label(label) => OptionNode::Option(renderer.describe(key, label)),
            GroupedEntry::Group(members) => OptionNode::Group {
                title: key.to_string(),
                options: members
                    .iter()
                    .map(|(k, l)| renderer.describe(k, l))
                    .collect(),
            },
        })
        .collect()
}

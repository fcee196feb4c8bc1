//! Declarative validation schema. Each field carries an ordered rule list;
//! the first failing rule supplies that field's message.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::state::FormState;
use crate::value::FieldValue;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{10,15}$").expect("phone pattern compiles"));

#[derive(Debug, Clone)]
pub enum Rule {
    /// Something must be entered.
    Required(String),
    /// Character count lower bound.
    MinLength(usize, String),
    /// Character count upper bound.
    MaxLength(usize, String),
    Email(String),
    /// International phone shape, `+` followed by 10–15 digits.
    Phone(String),
    /// Value must be one of the listed options.
    OneOf(Vec<String>, String),
    /// Checkbox must be ticked.
    MustBeTrue(String),
}

impl Rule {
    /// `Some(message)` when `value` breaks this rule.
    fn check(&self, value: &FieldValue) -> Option<&str> {
        let passed = match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::MinLength(min, _) => value
                .as_text()
                .is_some_and(|s| s.trim().chars().count() >= *min),
            Rule::MaxLength(max, _) => value
                .as_text()
                .is_none_or(|s| s.trim().chars().count() <= *max),
            Rule::Email(_) => value.as_text().is_some_and(|s| EMAIL.is_match(s.trim())),
            Rule::Phone(_) => value.as_text().is_some_and(|s| PHONE.is_match(s)),
            Rule::OneOf(options, _) => value
                .as_text()
                .is_some_and(|s| options.iter().any(|o| o == s)),
            Rule::MustBeTrue(_) => matches!(value, FieldValue::Bool(true)),
        };
        if passed { None } else { Some(self.message()) }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::Required(m)
            | Rule::MinLength(_, m)
            | Rule::MaxLength(_, m)
            | Rule::Email(m)
            | Rule::Phone(m)
            | Rule::OneOf(_, m)
            | Rule::MustBeTrue(m) => m,
        }
    }
}

/// Rules for one named field. An optional field with an empty value skips
/// its rules entirely.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub name: String,
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            rules: Vec::new(),
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn min_len(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MinLength(min, message.into()))
    }

    pub fn max_len(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MaxLength(max, message.into()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldRules>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    pub fn knows(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Check every field. Pure function of `state`: the same input always
    /// yields the same error set.
    pub fn validate(&self, state: &FormState) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for field in &self.fields {
            let Some(value) = state.value(&field.name) else {
                errors.insert(&field.name, "Required");
                continue;
            };
            if field.optional && value.is_empty() {
                continue;
            }
            if let Some(message) = field.rules.iter().find_map(|r| r.check(value)) {
                errors.insert(&field.name, message);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Per-field validation messages from one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

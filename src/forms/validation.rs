/// Declarative form validation
///
/// A schema lists fields and their rules. Validation is synchronous and purely
/// local: it runs before any backend or mail call, and a failing submission
/// never leaves the process.

use crate::forms::upload::FormInput;
use thiserror::Error;

/// One mebibyte; file limits are expressed in these units
pub const MB: u64 = 1024 * 1024;

/// A single check and the message shown when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text must be non-blank
    Required(&'static str),
    /// A file part must be attached; a text part of the same name does not count
    RequiredFile(&'static str),
    /// Non-empty text must parse as an integer
    WholeNumber(&'static str),
    /// An attached file must not exceed the byte limit (inclusive)
    MaxBytes(u64, &'static str),
}

impl Rule {
    fn check(&self, input: &FormInput, field: &str) -> Option<&'static str> {
        match *self {
            Rule::Required(message) => input.trimmed(field).is_empty().then_some(message),
            Rule::RequiredFile(message) => input.file(field).is_none().then_some(message),
            Rule::WholeNumber(message) => {
                let value = input.trimmed(field);
                (!value.is_empty() && value.parse::<i64>().is_err()).then_some(message)
            }
            Rule::MaxBytes(limit, message) => input
                .file(field)
                .filter(|file| file.size() > limit)
                .map(|_| message),
        }
    }
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: &'static str,
    rules: Vec<Rule>,
}

/// Ordered set of field rules for one form
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldSpec {
            name,
            rules: rules.into_iter().collect(),
        });
        self
    }

    /// Check every field; each failing field reports its first failing rule
    pub fn validate(&self, input: &FormInput) -> Result<(), ValidationErrors> {
        let errors: Vec<(&'static str, &'static str)> = self
            .fields
            .iter()
            .filter_map(|spec| {
                spec.rules
                    .iter()
                    .find_map(|rule| rule.check(input, spec.name))
                    .map(|message| (spec.name, message))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Per-field error messages, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<(&'static str, &'static str)>);

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }
}

//! Validation schemas bound to a value-record type.
//!
//! A `Schema<T>` holds one rule list per field of `T`. Its key set must be
//! exactly `T::FIELDS`; `Schema::new` refuses anything else, so a schema can
//! never accept a field the form does not render or skip one it does.

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

use std::collections::BTreeMap;
use std::marker::PhantomData;

use super::fields::{FieldName, FormRecord, SignInValues, SignUpValues, field_label};

/// Per-field validation messages, keyed by field. One message per field.
pub type FieldErrors = BTreeMap<FieldName, String>;

/// A single validation rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Value must contain a non-whitespace character.
    Required,
    /// Value must look like `local@domain.tld`.
    Email,
    MinLength(usize),
    MaxLength(usize),
    /// Value must equal the value of another field.
    Matches { other: FieldName, message: &'static str },
}

impl Rule {
    fn check<T: FormRecord>(&self, field: FieldName, value: &str, record: &T) -> Result<(), String> {
        let label = field_label(field);
        match self {
            Self::Required => {
                if value.trim().is_empty() {
                    return Err(format!("{label} is required."));
                }
            }
            Self::Email => {
                if !is_email(value.trim()) {
                    return Err("Please provide a valid email address.".to_owned());
                }
            }
            Self::MinLength(min) => {
                if value.chars().count() < *min {
                    return Err(format!("{label} must be at least {min} characters long."));
                }
            }
            Self::MaxLength(max) => {
                if value.chars().count() > *max {
                    return Err(format!("{label} cannot exceed {max} characters."));
                }
            }
            Self::Matches { other, message } => {
                if record.get(*other) != Some(value) {
                    return Err((*message).to_owned());
                }
            }
        }
        Ok(())
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema has no rules for field `{0}`")]
    MissingField(FieldName),
    #[error("schema names field `{0}` which the form does not carry")]
    UnknownField(FieldName),
    #[error("schema lists field `{0}` more than once")]
    DuplicateField(FieldName),
}

/// Validation rules for the record type `T`.
#[derive(Clone, Debug)]
pub struct Schema<T> {
    rules: Vec<(FieldName, Vec<Rule>)>,
    _record: PhantomData<fn() -> T>,
}

impl<T: FormRecord> Schema<T> {
    /// Build a schema, checking that its key set is exactly `T::FIELDS`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if a field of `T` has no entry, an entry names a
    /// field `T` does not carry, or a field is listed twice.
    pub fn new(rules: Vec<(FieldName, Vec<Rule>)>) -> Result<Self, SchemaError> {
        for (i, (field, _)) in rules.iter().enumerate() {
            if !T::FIELDS.contains(field) {
                return Err(SchemaError::UnknownField(*field));
            }
            if rules[..i].iter().any(|(seen, _)| seen == field) {
                return Err(SchemaError::DuplicateField(*field));
            }
        }
        if let Some(missing) = T::FIELDS.iter().find(|f| !rules.iter().any(|(field, _)| field == *f)) {
            return Err(SchemaError::MissingField(*missing));
        }
        Ok(Self { rules, _record: PhantomData })
    }

    /// Validate every field, collecting the first failing rule's message per field.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any rule fails.
    pub fn validate(&self, record: &T) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, rules) in &self.rules {
            let value = record.get(*field).unwrap_or_default();
            if let Some(message) = rules.iter().find_map(|rule| rule.check(*field, value, record).err()) {
                errors.insert(*field, message);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Fields this schema validates, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.rules.iter().map(|(field, _)| *field)
    }
}

/// Schema for the sign-in form.
///
/// # Errors
///
/// Never in practice; the rule table matches `SignInValues::FIELDS`.
pub fn sign_in_schema() -> Result<Schema<SignInValues>, SchemaError> {
    Schema::new(vec![
        (FieldName::Email, vec![Rule::Required, Rule::Email]),
        (FieldName::Password, vec![Rule::Required, Rule::MinLength(8)]),
    ])
}

/// Schema for the sign-up form.
///
/// # Errors
///
/// Never in practice; the rule table matches `SignUpValues::FIELDS`.
pub fn sign_up_schema() -> Result<Schema<SignUpValues>, SchemaError> {
    Schema::new(vec![
        (FieldName::Name, vec![Rule::Required, Rule::MinLength(3), Rule::MaxLength(50)]),
        (FieldName::Email, vec![Rule::Required, Rule::Email]),
        (FieldName::Password, vec![Rule::Required, Rule::MinLength(8)]),
        (
            FieldName::ConfirmPassword,
            vec![
                Rule::Required,
                Rule::Matches { other: FieldName::Password, message: "Passwords do not match." },
            ],
        ),
    ])
}

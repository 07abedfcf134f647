//! Field identities and the static label / input-kind tables.
//!
//! DESIGN
//! ======
//! Forms never reflect over record keys. Every renderable field is a
//! `FieldName` variant, and each value record lists the variants it carries
//! in `FormRecord::FIELDS`. That list is the key set of the default values.

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use serde::{Deserialize, Serialize};

/// Identity of one auth-form input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl FieldName {
    /// Wire / DOM name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTML input `type` used to render a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Password,
}

impl InputKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Display label table.
#[must_use]
pub const fn field_label(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "Full name",
        FieldName::Email => "Email",
        FieldName::Password => "Password",
        FieldName::ConfirmPassword => "Confirm password",
    }
}

/// Input-kind table.
#[must_use]
pub const fn field_input_kind(field: FieldName) -> InputKind {
    match field {
        FieldName::Name | FieldName::ConfirmPassword => InputKind::Text,
        FieldName::Email => InputKind::Email,
        FieldName::Password => InputKind::Password,
    }
}

/// Input kind actually rendered for a field.
///
/// `confirmPassword` is always masked, whatever the table says.
#[must_use]
pub const fn rendered_input_kind(field: FieldName) -> InputKind {
    match field {
        FieldName::ConfirmPassword => InputKind::Password,
        other => field_input_kind(other),
    }
}

/// Read/write access to a typed field-value record.
///
/// Implementors are plain structs of `String`s; `FIELDS` is their ordered
/// key set and must name every field `get`/`set` accept.
pub trait FormRecord: Clone + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Fields carried by this record, in render order.
    const FIELDS: &'static [FieldName];

    /// Current value of `field`, or `None` if the record has no such field.
    fn get(&self, field: FieldName) -> Option<&str>;

    /// Replace the value of `field`. Returns `false` if the record has no such field.
    fn set(&mut self, field: FieldName, value: String) -> bool;
}

/// Values collected by the sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInValues {
    pub email: String,
    pub password: String,
}

impl FormRecord for SignInValues {
    const FIELDS: &'static [FieldName] = &[FieldName::Email, FieldName::Password];

    fn get(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::Email => Some(&self.email),
            FieldName::Password => Some(&self.password),
            FieldName::Name | FieldName::ConfirmPassword => None,
        }
    }

    fn set(&mut self, field: FieldName, value: String) -> bool {
        match field {
            FieldName::Email => self.email = value,
            FieldName::Password => self.password = value,
            FieldName::Name | FieldName::ConfirmPassword => return false,
        }
        true
    }
}

/// Values collected by the sign-up form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpValues {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormRecord for SignUpValues {
    const FIELDS: &'static [FieldName] =
        &[FieldName::Name, FieldName::Email, FieldName::Password, FieldName::ConfirmPassword];

    fn get(&self, field: FieldName) -> Option<&str> {
        Some(match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::ConfirmPassword => &self.confirm_password,
        })
    }

    fn set(&mut self, field: FieldName, value: String) -> bool {
        match field {
            FieldName::Name => self.name = value,
            FieldName::Email => self.email = value,
            FieldName::Password => self.password = value,
            FieldName::ConfirmPassword => self.confirm_password = value,
        }
        true
    }
}

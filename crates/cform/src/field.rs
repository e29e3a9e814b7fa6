#![forbid(unsafe_code)]

//! Field identifiers, the editable value set, and the submitted snapshot.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// FieldId
// ---------------------------------------------------------------------------

/// One of the four inputs of the contact form.
///
/// Ordering follows on-screen order, which is also the focus cycle order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    #[default]
    FirstName,
    LastName,
    Email,
    Message,
}

impl FieldId {
    /// All fields in display order.
    pub const ALL: [FieldId; 4] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Message,
    ];

    /// Stable field name, used as the key in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// Visible input label. Required fields carry a trailing `*`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name*",
            Self::LastName => "Last Name*",
            Self::Email => "Email*",
            Self::Message => "Message",
        }
    }

    /// Whether the field must be filled in for a submit to succeed.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Message)
    }

    /// Test id of the read-only element showing this field after a submit.
    #[must_use]
    pub const fn display_test_id(self) -> &'static str {
        match self {
            Self::FirstName => "firstnameDisplay",
            Self::LastName => "lastnameDisplay",
            Self::Email => "emailDisplay",
            Self::Message => "messageDisplay",
        }
    }

    /// Caption used in front of the submitted value.
    #[must_use]
    pub const fn display_caption(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    /// Position in [`FieldId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::FirstName => 0,
            Self::LastName => 1,
            Self::Email => 2,
            Self::Message => 3,
        }
    }

    /// Next field in focus order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field in focus order, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field: {:?}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for FieldId {
    type Err = UnknownField;

    /// Accepts the field name, a short alias, or the label without `*`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .trim_end_matches('*')
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "firstname" | "first" => Ok(Self::FirstName),
            "lastname" | "last" => Ok(Self::LastName),
            "email" | "mail" => Ok(Self::Email),
            "message" | "msg" => Ok(Self::Message),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldValues
// ---------------------------------------------------------------------------

/// Current contents of every input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl FieldValues {
    /// Build a value set from the three required fields, leaving the message empty.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            message: String::new(),
        }
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Email => &mut self.email,
            FieldId::Message => &mut self.message,
        }
    }

    /// Replace one field's value.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Values captured at the last successful submit.
///
/// Immutable once taken. An empty message is stored as `None` so the
/// display layer can omit it entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    first_name: String,
    last_name: String,
    email: String,
    message: Option<String>,
}

impl Snapshot {
    pub(crate) fn capture(values: &FieldValues) -> Self {
        Self {
            first_name: values.first_name.clone(),
            last_name: values.last_name.clone(),
            email: values.email.clone(),
            message: (!values.message.is_empty()).then(|| values.message.clone()),
        }
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submitted value for a field; `None` only for an omitted message.
    #[must_use]
    pub fn get(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::FirstName => Some(&self.first_name),
            FieldId::LastName => Some(&self.last_name),
            FieldId::Email => Some(&self.email),
            FieldId::Message => self.message(),
        }
    }
}

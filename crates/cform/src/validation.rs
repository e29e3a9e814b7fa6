#![forbid(unsafe_code)]

//! Field validation: composable validators and the contact form rule set.
//!
//! Validation is pure. [`validate`] maps a [`FieldValues`] to the set of
//! per-field errors and never touches any other state, so it can be called
//! as often as the caller likes and always agrees with itself.
//!
//! ```rust
//! use cform::{FieldId, FieldValues, validate};
//!
//! let errors = validate(&FieldValues::new("Justin", "", "falseemail"));
//! assert_eq!(errors.len(), 2);
//! assert_eq!(
//!     errors.message(FieldId::LastName).as_deref(),
//!     Some("lastName is a required field"),
//! );
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::field::{FieldId, FieldValues};

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error code for an empty required field.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for a value below the minimum length.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Error code for a malformed email address.
pub const ERROR_CODE_EMAIL: &str = "email";

/// Minimum trimmed length of the first name.
pub const FIRST_NAME_MIN_CHARS: usize = 5;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation failure with a stable code and a message template.
///
/// `{key}` placeholders in `message` are filled from `params` by
/// [`ValidationError::format_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
    pub params: HashMap<String, String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter for message interpolation.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Message with every `{key}` replaced by its parameter.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Tag an error with the name of the field it belongs to.
    #[must_use]
    pub fn for_field(self, field: FieldId) -> Self {
        match self {
            Self::Valid => Self::Valid,
            Self::Invalid(e) => Self::Invalid(e.with_param("field", field.name())),
        }
    }
}

// ---------------------------------------------------------------------------
// Validator trait and built-ins
// ---------------------------------------------------------------------------

/// Checks a value of type `T`.
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;

    /// Unformatted message template reported on failure.
    fn error_message(&self) -> &str;
}

/// Rejects empty and whitespace-only strings.
#[derive(Debug, Clone)]
pub struct Required {
    pub message: String,
}

impl Default for Required {
    fn default() -> Self {
        Self {
            message: "{field} is a required field".to_string(),
        }
    }
}

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.trim().is_empty() {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_REQUIRED, &self.message))
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Requires at least `min` characters.
///
/// With `trim` set, surrounding whitespace does not count.
#[derive(Debug, Clone)]
pub struct MinLength {
    pub min: usize,
    pub trim: bool,
    pub message: String,
}

impl MinLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            trim: false,
            message: "{field} must have at least {min} characters".to_string(),
        }
    }

    /// Measure the value with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }
}

impl Validator<str> for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let measured = if self.trim { value.trim() } else { value };
        let len = measured.chars().count();
        if len < self.min {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MIN_LENGTH, &self.message)
                    .with_param("min", self.min)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Accepts `local@domain.tld` shaped addresses. Empty input is rejected.
#[derive(Debug, Clone)]
pub struct Email {
    pub message: String,
}

impl Default for Email {
    fn default() -> Self {
        Self {
            message: "{field} must be a valid email address".to_string(),
        }
    }
}

impl Email {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        if is_email(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_EMAIL, &self.message))
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

const LOCAL_PART_MAX: usize = 64;
const DOMAIN_LABEL_MAX: usize = 63;

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_local_part(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= LOCAL_PART_MAX
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local.chars().all(|c| c == '.' || is_atext(c))
}

fn is_domain_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= DOMAIN_LABEL_MAX
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if !is_local_part(local) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| is_domain_label(l)) {
        return false;
    }
    // Last label is the TLD: alphabetic, at least two characters.
    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Errors keyed by field, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldId, ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn contains(&self, field: FieldId) -> bool {
        self.errors.contains_key(&field)
    }

    #[must_use]
    pub fn get(&self, field: FieldId) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Formatted message for `field`, if it has an error.
    #[must_use]
    pub fn message(&self, field: FieldId) -> Option<String> {
        self.get(field).map(ValidationError::format_message)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &ValidationError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }

    /// Keep only the errors whose field satisfies `keep`.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(FieldId) -> bool) -> Self {
        Self {
            errors: self
                .errors
                .iter()
                .filter(|(f, _)| keep(**f))
                .map(|(f, e)| (*f, e.clone()))
                .collect(),
        }
    }

    fn record(&mut self, field: FieldId, result: ValidationResult) {
        if let ValidationResult::Invalid(e) = result {
            self.errors.insert(field, e);
        }
    }
}

// ---------------------------------------------------------------------------
// Contact form rules
// ---------------------------------------------------------------------------

/// The rule set of the contact form. The message field has no rule.
#[derive(Debug, Clone)]
pub struct ContactRules {
    pub first_name: MinLength,
    pub last_name: Required,
    pub email: Email,
}

impl Default for ContactRules {
    fn default() -> Self {
        Self {
            first_name: MinLength::new(FIRST_NAME_MIN_CHARS).trimmed(),
            last_name: Required::new(),
            email: Email::new(),
        }
    }
}

impl ContactRules {
    /// Check one field in isolation.
    #[must_use]
    pub fn validate_field(&self, field: FieldId, value: &str) -> ValidationResult {
        let result = match field {
            FieldId::FirstName => self.first_name.validate(value),
            FieldId::LastName => self.last_name.validate(value),
            FieldId::Email => self.email.validate(value),
            FieldId::Message => ValidationResult::Valid,
        };
        result.for_field(field)
    }

    #[must_use]
    pub fn validate(&self, values: &FieldValues) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for field in FieldId::ALL {
            errors.record(field, self.validate_field(field, values.get(field)));
        }
        errors
    }
}

/// Validate `values` against the default contact form rules.
#[must_use]
pub fn validate(values: &FieldValues) -> ValidationErrors {
    ContactRules::default().validate(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> FieldValues {
        FieldValues::new("Justin", "McGraw", "justinmcgraw@rex.com")
    }

    // -- ValidationError --

    #[test]
    fn error_format_message_fills_params() {
        let err = ValidationError::new("test", "{field} needs {min}")
            .with_param("field", "x")
            .with_param("min", 3);
        assert_eq!(err.format_message(), "x needs 3");
        assert_eq!(format!("{err}"), "x needs 3");
    }

    #[test]
    fn error_without_params_is_verbatim() {
        let err = ValidationError::new("test", "plain {text}");
        assert_eq!(err.format_message(), "plain {text}");
    }

    // -- built-in validators --

    #[test]
    fn required_rejects_blank() {
        let v = Required::new();
        assert!(!v.validate("").is_valid());
        assert!(!v.validate(" \t ").is_valid());
        assert!(v.validate("a").is_valid());
        assert_eq!(
            v.validate("").error().map(|e| e.code),
            Some(ERROR_CODE_REQUIRED)
        );
    }

    #[test]
    fn required_custom_message() {
        let v = Required::new().with_message("fill it in");
        assert_eq!(v.error_message(), "fill it in");
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        let v = MinLength::new(5);
        assert!(v.validate("ééééé").is_valid());
        assert!(!v.validate("éééé").is_valid());
    }

    #[test]
    fn min_length_trimmed_ignores_padding() {
        let raw = MinLength::new(5);
        let trimmed = MinLength::new(5).trimmed();
        assert!(raw.validate("  abc  ").is_valid());
        assert!(!trimmed.validate("  abc  ").is_valid());
        let err = trimmed.validate("  abc  ");
        assert_eq!(
            err.error().and_then(|e| e.params.get("actual")).map(String::as_str),
            Some("3")
        );
    }

    #[test]
    fn email_accepts_common_shapes() {
        let v = Email::new();
        for ok in [
            "justinmcgraw@rex.com",
            "a@b.co",
            "first.last+tag@mail.example.org",
            "x_y-z@sub-domain.io",
        ] {
            assert!(v.validate(ok).is_valid(), "{ok} should be valid");
        }
    }

    #[test]
    fn email_rejects_malformed() {
        let v = Email::new();
        for bad in [
            "",
            "falseemail",
            "@rex.com",
            "justin@",
            "justin@rex",
            "justin@rex.c",
            "justin@rex.c0m",
            "justin@@rex.com",
            "jus tin@rex.com",
            "justin@rex..com",
            ".justin@rex.com",
            "justin.@rex.com",
            "jus..tin@rex.com",
            "justin@-rex.com",
            "justin@rex-.com",
            " justin@rex.com",
        ] {
            assert!(!v.validate(bad).is_valid(), "{bad:?} should be invalid");
        }
    }

    // -- rule set --

    #[test]
    fn valid_values_have_no_errors() {
        assert!(validate(&valid_values()).is_empty());
    }

    #[test]
    fn empty_values_have_three_errors() {
        let errors = validate(&FieldValues::default());
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![FieldId::FirstName, FieldId::LastName, FieldId::Email]
        );
    }

    #[test]
    fn messages_name_the_field() {
        let errors = validate(&FieldValues::default());
        assert_eq!(
            errors.message(FieldId::FirstName).as_deref(),
            Some("firstName must have at least 5 characters")
        );
        assert_eq!(
            errors.message(FieldId::LastName).as_deref(),
            Some("lastName is a required field")
        );
        assert_eq!(
            errors.message(FieldId::Email).as_deref(),
            Some("email must be a valid email address")
        );
    }

    #[test]
    fn first_name_boundary_is_five_trimmed_chars() {
        let mut values = valid_values();
        values.first_name = "Justi".into();
        assert!(validate(&values).is_empty());
        values.first_name = "Just".into();
        assert!(validate(&values).contains(FieldId::FirstName));
        values.first_name = "   Just   ".into();
        assert!(validate(&values).contains(FieldId::FirstName));
    }

    #[test]
    fn whitespace_last_name_is_missing() {
        let mut values = valid_values();
        values.last_name = "   ".into();
        let errors = validate(&values);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(FieldId::LastName));
    }

    #[test]
    fn message_is_never_validated() {
        let rules = ContactRules::default();
        assert!(rules.validate_field(FieldId::Message, "").is_valid());
        let values = valid_values().with_message("x");
        assert!(rules.validate(&values).is_empty());
    }

    #[test]
    fn filtered_keeps_selected_fields() {
        let errors = validate(&FieldValues::default());
        let only_email = errors.filtered(|f| f == FieldId::Email);
        assert_eq!(only_email.len(), 1);
        assert!(only_email.contains(FieldId::Email));
    }

    #[test]
    fn iter_yields_errors_in_display_order() {
        let errors = validate(&FieldValues::new("Jo", "", "nope@"));
        let codes: Vec<_> = errors.iter().map(|(f, e)| (f, e.code)).collect();
        assert_eq!(
            codes,
            vec![
                (FieldId::FirstName, ERROR_CODE_MIN_LENGTH),
                (FieldId::LastName, ERROR_CODE_REQUIRED),
                (FieldId::Email, ERROR_CODE_EMAIL),
            ]
        );
        assert_eq!(errors.iter().count(), errors.len());
    }

    #[test]
    fn validate_is_idempotent() {
        let values = FieldValues::new("Jo", "", "nope@");
        assert_eq!(validate(&values), validate(&values));
    }
}

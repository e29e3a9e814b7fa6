#![forbid(unsafe_code)]

//! Contact form widget: validation, submission state machine, and view tree.
//!
//! The form collects a first name, last name, email, and an optional
//! message. [`ContactForm`] is driven by [`Msg`] values (or the matching
//! methods), validates through the pure [`validate`] function, and exposes
//! its state as an immutable [`FormView`] that any front end can draw.
//!
//! ```rust
//! use cform::{ContactForm, FieldId, Outcome};
//!
//! let mut form = ContactForm::new();
//! form.set_field(FieldId::FirstName, "Justin");
//! form.set_field(FieldId::LastName, "McGraw");
//! form.set_field(FieldId::Email, "justinmcgraw@rex.com");
//! assert_eq!(form.submit(), Outcome::Accepted);
//!
//! let view = form.view();
//! assert!(view.by_test_id("emailDisplay").is_some());
//! assert!(view.by_test_id("messageDisplay").is_none());
//! ```

pub mod field;
pub mod form;
pub mod render;
pub mod validation;
pub mod view;

pub use field::{FieldId, FieldValues, Snapshot, UnknownField};
pub use form::{ContactForm, Msg, Outcome, Phase};
pub use render::{render_lines, render_text};
pub use validation::{
    ContactRules, Email, MinLength, Required, ValidationError, ValidationErrors,
    ValidationResult, Validator, validate,
};
pub use view::{FormView, Node, Role, SubmittedSection};

#![forbid(unsafe_code)]

//! The contact form state machine.
//!
//! [`ContactForm`] owns the field values, the touched set, focus, and the
//! last submitted [`Snapshot`]. Every change goes through a synchronous
//! transition ([`ContactForm::update`] or one of the named operations), and
//! [`ContactForm::view`] maps the result to an immutable [`FormView`].
//!
//! Errors are derived: they are recomputed from the current values whenever
//! they are asked for, and only the ones for touched fields are shown.

use unicode_segmentation::UnicodeSegmentation;

use crate::field::{FieldId, FieldValues, Snapshot};
use crate::validation::{ContactRules, ValidationErrors};
use crate::view::FormView;

/// Which view the form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting input. A snapshot from an earlier submit may still be shown.
    #[default]
    Editing,
    /// The last action was a successful submit.
    Submitted,
}

/// Result of a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Values were valid and captured as the new snapshot.
    Accepted,
    /// Values were invalid; the snapshot was left as it was.
    Rejected { errors: usize },
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Replace a field's value.
    Set { field: FieldId, value: String },
    /// Append a character to the focused field.
    Insert(char),
    /// Remove the last grapheme of the focused field.
    Backspace,
    /// Move focus to a field.
    Focus(FieldId),
    FocusNext,
    FocusPrev,
    Submit,
}

/// Contact form state.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    rules: ContactRules,
    values: FieldValues,
    touched: [bool; FieldId::ALL.len()],
    focused: FieldId,
    phase: Phase,
    snapshot: Option<Snapshot>,
}

impl ContactForm {
    /// An empty form, focused on the first name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty form checked against custom rules.
    #[must_use]
    pub fn with_rules(rules: ContactRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    #[must_use]
    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(field)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn focused(&self) -> FieldId {
        self.focused
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched[field.index()]
    }

    /// Every current error, touched or not.
    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        self.rules.validate(&self.values)
    }

    /// Errors for the fields the user has touched.
    #[must_use]
    pub fn visible_errors(&self) -> ValidationErrors {
        self.errors().filtered(|f| self.is_touched(f))
    }

    /// Whether a submit right now would be accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Apply one message. Returns the outcome for [`Msg::Submit`], `None` otherwise.
    pub fn update(&mut self, msg: Msg) -> Option<Outcome> {
        match msg {
            Msg::Set { field, value } => {
                self.set_field(field, value);
                None
            }
            Msg::Insert(c) => {
                self.insert_char(c);
                None
            }
            Msg::Backspace => {
                self.backspace();
                None
            }
            Msg::Focus(field) => {
                self.focus(field);
                None
            }
            Msg::FocusNext => {
                self.focus_next();
                None
            }
            Msg::FocusPrev => {
                self.focus_prev();
                None
            }
            Msg::Submit => Some(self.submit()),
        }
    }

    /// Replace a field's value. The snapshot is left alone.
    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.set(field, value);
        self.edited(field);
    }

    /// Append a character to the focused field.
    pub fn insert_char(&mut self, c: char) {
        let field = self.focused;
        self.values.get_mut(field).push(c);
        self.edited(field);
    }

    /// Remove the last grapheme of the focused field. No-op on an empty field.
    pub fn backspace(&mut self) {
        let field = self.focused;
        let value = self.values.get_mut(field);
        let Some((idx, _)) = value.grapheme_indices(true).next_back() else {
            return;
        };
        value.truncate(idx);
        self.edited(field);
    }

    pub fn focus(&mut self, field: FieldId) {
        self.focused = field;
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Validate and, if clean, capture the values as the new snapshot.
    ///
    /// A rejected submit marks every field touched so all errors show.
    pub fn submit(&mut self) -> Outcome {
        let errors = self.errors();
        if errors.is_empty() {
            self.snapshot = Some(Snapshot::capture(&self.values));
            self.phase = Phase::Submitted;
            tracing::debug!("contact form submit accepted");
            Outcome::Accepted
        } else {
            self.touched = [true; FieldId::ALL.len()];
            self.phase = Phase::Editing;
            tracing::debug!(
                errors = errors.len(),
                fields = ?errors.fields().map(FieldId::name).collect::<Vec<_>>(),
                "contact form submit rejected"
            );
            Outcome::Rejected {
                errors: errors.len(),
            }
        }
    }

    fn edited(&mut self, field: FieldId) {
        self.touched[field.index()] = true;
        self.phase = Phase::Editing;
        tracing::trace!(
            field = field.name(),
            len = self.values.get(field).chars().count(),
            "field edited"
        );
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Immutable view of the current state.
    #[must_use]
    pub fn view(&self) -> FormView {
        FormView::build(
            &self.values,
            &self.visible_errors(),
            self.snapshot.as_ref(),
            self.focused,
            self.phase,
        )
    }
}

#![forbid(unsafe_code)]

//! Immutable view tree produced from form state.
//!
//! A [`FormView`] is a flat list of [`Node`]s in display order. Front ends
//! draw it however they like (see [`crate::render`] for plain text), and
//! tests query it the way a user would find things on screen: by label,
//! by test id, by role, or by visible text.

use std::borrow::Cow;

use crate::field::{FieldId, FieldValues, Snapshot};
use crate::form::Phase;
use crate::validation::ValidationErrors;

/// Form title.
pub const HEADER_TEXT: &str = "Contact Form";
/// Test id carried by every error node.
pub const ERROR_TEST_ID: &str = "error";
/// Test id of the submit control.
pub const SUBMIT_TEST_ID: &str = "submitButton";
/// Shown before every error message.
pub const ERROR_PREFIX: &str = "Error: ";

/// What a node is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Heading,
    /// Editable single-line input.
    Input,
    /// Editable multi-line input.
    TextArea,
    Error,
    Button,
    /// Read-only submitted value.
    Display,
}

/// One visible element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub role: Role,
    /// Field the node belongs to, if any.
    pub field: Option<FieldId>,
    /// Accessible label (inputs) or caption (displays).
    pub label: Option<&'static str>,
    /// Visible content: input value, error message, heading text.
    pub text: String,
    pub test_id: Option<&'static str>,
    /// Input has keyboard focus.
    pub focused: bool,
}

impl Node {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            field: None,
            label: None,
            text: text.into(),
            test_id: None,
            focused: false,
        }
    }

    fn field(mut self, field: FieldId) -> Self {
        self.field = Some(field);
        self
    }

    fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn test_id(mut self, id: &'static str) -> Self {
        self.test_id = Some(id);
        self
    }

    fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Text as it appears on screen. Error messages carry [`ERROR_PREFIX`].
    #[must_use]
    pub fn visible_text(&self) -> Cow<'_, str> {
        match self.role {
            Role::Error => Cow::Owned(format!("{ERROR_PREFIX}{}", self.text)),
            _ => Cow::Borrowed(&self.text),
        }
    }

    /// Case-insensitive substring match on label or visible text.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.visible_text().to_lowercase().contains(&needle)
            || self
                .label
                .is_some_and(|l| l.to_lowercase().contains(&needle))
    }
}

/// The submitted section, tagged by how it relates to the current values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmittedSection {
    /// Nothing has been submitted yet.
    Empty,
    /// The snapshot reflects the last action.
    Fresh,
    /// Fields were edited after the snapshot was taken.
    Stale,
}

impl SubmittedSection {
    fn heading(self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Fresh => Some("You Submitted"),
            Self::Stale => Some("Last Submitted"),
        }
    }
}

/// The full visible tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    phase: Phase,
    section: SubmittedSection,
    nodes: Vec<Node>,
}

impl FormView {
    /// Map form state to a view.
    ///
    /// `errors` are the errors to display; one error node is emitted per
    /// entry, directly after its field's input.
    #[must_use]
    pub fn build(
        values: &FieldValues,
        errors: &ValidationErrors,
        snapshot: Option<&Snapshot>,
        focused: FieldId,
        phase: Phase,
    ) -> Self {
        let mut nodes = Vec::with_capacity(FieldId::ALL.len() * 2 + 8);
        nodes.push(Node::new(Role::Heading, HEADER_TEXT));

        for field in FieldId::ALL {
            let role = match field {
                FieldId::Message => Role::TextArea,
                _ => Role::Input,
            };
            nodes.push(
                Node::new(role, values.get(field))
                    .field(field)
                    .label(field.label())
                    .focused(field == focused),
            );
            if let Some(message) = errors.message(field) {
                nodes.push(
                    Node::new(Role::Error, message)
                        .field(field)
                        .test_id(ERROR_TEST_ID),
                );
            }
        }

        nodes.push(Node::new(Role::Button, "Submit").test_id(SUBMIT_TEST_ID));

        let section = match (phase, snapshot) {
            (_, None) => SubmittedSection::Empty,
            (Phase::Submitted, Some(_)) => SubmittedSection::Fresh,
            (Phase::Editing, Some(_)) => SubmittedSection::Stale,
        };
        if let (Some(heading), Some(snapshot)) = (section.heading(), snapshot) {
            nodes.push(Node::new(Role::Heading, heading));
            nodes.extend(submitted_nodes(snapshot));
        }

        Self {
            phase,
            section,
            nodes,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn section(&self) -> SubmittedSection {
        self.section
    }

    /// All nodes in display order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The form title node.
    #[must_use]
    pub fn header(&self) -> Option<&Node> {
        self.nodes.first().filter(|n| n.role == Role::Heading)
    }

    /// Input with exactly this label.
    #[must_use]
    pub fn by_label(&self, label: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| matches!(n.role, Role::Input | Role::TextArea) && n.label == Some(label))
    }

    /// First node with this test id.
    #[must_use]
    pub fn by_test_id(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.test_id == Some(id))
    }

    #[must_use]
    pub fn all_by_test_id(&self, id: &str) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.test_id == Some(id)).collect()
    }

    #[must_use]
    pub fn all_by_role(&self, role: Role) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.role == role).collect()
    }

    /// Nodes whose label or visible text contains `needle`, ignoring case.
    #[must_use]
    pub fn find_text(&self, needle: &str) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.contains_text(needle))
            .collect()
    }

    /// Displayed error nodes.
    #[must_use]
    pub fn errors(&self) -> Vec<&Node> {
        self.all_by_role(Role::Error)
    }

    /// Error node attached to `field`.
    #[must_use]
    pub fn error_for(&self, field: FieldId) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.role == Role::Error && n.field == Some(field))
    }
}

fn submitted_nodes(snapshot: &Snapshot) -> impl Iterator<Item = Node> + '_ {
    // Omitted message yields no node at all.
    FieldId::ALL.into_iter().filter_map(move |field| {
        snapshot.get(field).map(|value| {
            Node::new(Role::Display, value)
                .field(field)
                .label(field.display_caption())
                .test_id(field.display_test_id())
        })
    })
}

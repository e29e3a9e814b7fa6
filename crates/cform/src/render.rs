#![forbid(unsafe_code)]

//! Plain-text rendering of a [`FormView`].
//!
//! Lines are laid out for a fixed display width. Labels are padded to a
//! common column, measured with `unicode-width`, and long values are cut at
//! grapheme boundaries so no line exceeds the width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::view::{FormView, Node, Role};

/// Prefix of the focused input row.
const FOCUS_MARK: &str = "> ";
/// Prefix of every other input row.
const NO_FOCUS_MARK: &str = "  ";
/// Indent of error and display rows.
const INDENT: &str = "    ";
const ELLIPSIS: &str = "…";

/// Render `view` into lines no wider than `width` display columns.
#[must_use]
pub fn render_lines(view: &FormView, width: usize) -> Vec<String> {
    let label_width = label_column_width(view);
    let mut lines = Vec::with_capacity(view.nodes().len() + 4);

    for (i, node) in view.nodes().iter().enumerate() {
        match node.role {
            Role::Heading => {
                if i > 0 {
                    lines.push(String::new());
                }
                lines.push(node.text.clone());
                lines.push("=".repeat(node.text.width()));
            }
            Role::Input | Role::TextArea => {
                let mark = if node.focused {
                    FOCUS_MARK
                } else {
                    NO_FOCUS_MARK
                };
                let label = node.label.unwrap_or_default();
                let pad = label_width.saturating_sub(label.width());
                let row = format!("{mark}{label}{:pad$} : {}", "", node.text, pad = pad);
                lines.push(row.trim_end().to_string());
            }
            Role::Error => lines.push(format!("{INDENT}{}", node.visible_text())),
            Role::Button => lines.push(format!("{NO_FOCUS_MARK}[ {} ]", node.text)),
            Role::Display => lines.push(display_line(node)),
        }
    }

    lines
        .into_iter()
        .map(|line| truncate_to_width(&line, width))
        .collect()
}

/// Render `view` as a single newline-separated string.
#[must_use]
pub fn render_text(view: &FormView, width: usize) -> String {
    render_lines(view, width).join("\n")
}

fn display_line(node: &Node) -> String {
    match node.label {
        Some(caption) => format!("{INDENT}{caption}: {}", node.text),
        None => format!("{INDENT}{}", node.text),
    }
}

fn label_column_width(view: &FormView) -> usize {
    view.nodes()
        .iter()
        .filter(|n| matches!(n.role, Role::Input | Role::TextArea))
        .filter_map(|n| n.label)
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}

/// Cut `line` to at most `max` columns, ending in `…` when cut.
fn truncate_to_width(line: &str, max: usize) -> String {
    if line.width() <= max {
        return line.to_string();
    }
    let budget = max.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for g in line.graphemes(true) {
        let w = g.width();
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    if max >= ELLIPSIS.width() {
        out.push_str(ELLIPSIS);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldId;
    use crate::form::ContactForm;

    #[test]
    fn empty_form_layout() {
        let form = ContactForm::new();
        let text = render_text(&form.view(), 60);
        let expected = "\
Contact Form
============
> First Name* :
  Last Name*  :
  Email*      :
  Message     :
  [ Submit ]";
        assert_eq!(text, expected);
    }

    #[test]
    fn errors_render_under_their_field() {
        let mut form = ContactForm::new();
        form.set_field(FieldId::Email, "falseemail");
        let lines = render_lines(&form.view(), 80);
        let email_row = lines
            .iter()
            .position(|l| l.contains("Email*"))
            .expect("email row");
        assert_eq!(
            lines[email_row + 1],
            "    Error: email must be a valid email address"
        );
        assert_eq!(lines.iter().filter(|l| l.contains("Error:")).count(), 1);
    }

    #[test]
    fn submitted_section_lists_values() {
        let mut form = ContactForm::new();
        form.set_field(FieldId::FirstName, "Justin");
        form.set_field(FieldId::LastName, "McGraw");
        form.set_field(FieldId::Email, "justinmcgraw@rex.com");
        form.submit();
        let lines = render_lines(&form.view(), 80);
        let tail: Vec<&str> = lines.iter().rev().take(5).rev().map(String::as_str).collect();
        assert_eq!(
            tail,
            vec![
                "You Submitted",
                "=============",
                "    First Name: Justin",
                "    Last Name: McGraw",
                "    Email: justinmcgraw@rex.com",
            ]
        );
    }

    #[test]
    fn lines_never_exceed_width() {
        let mut form = ContactForm::new();
        form.set_field(FieldId::Message, "界".repeat(40));
        for width in [1, 10, 20, 33] {
            for line in render_lines(&form.view(), width) {
                assert!(line.width() <= width, "{line:?} wider than {width}");
            }
        }
    }

    #[test]
    fn truncate_respects_wide_graphemes() {
        assert_eq!(truncate_to_width("abc", 3), "abc");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("界界界", 4), "界…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}

#![forbid(unsafe_code)]

//! The demo session: feeds command lines to a [`ContactForm`] and prints
//! the rendered view.

use std::io::{BufRead, Write};

use cform::{ContactForm, Msg, Outcome, render_text};

use crate::command::{self, Command, CommandError};

const COMMAND_HELP: &str = "\
commands: set <field> <value> | type <text> | backspace | tab | shift-tab |
          focus <field> | submit | show | json | help | quit";

/// What a command produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    /// Text to print, if any.
    pub output: Option<String>,
    /// The session should end.
    pub quit: bool,
}

impl Reply {
    fn print(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            quit: false,
        }
    }
}

/// One interactive form session.
#[derive(Debug)]
pub struct Session {
    form: ContactForm,
    width: usize,
    quiet: bool,
}

impl Session {
    #[must_use]
    pub fn new(width: usize, quiet: bool) -> Self {
        Self {
            form: ContactForm::new(),
            width,
            quiet,
        }
    }

    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Rendered form at the session width.
    #[must_use]
    pub fn render(&self) -> String {
        render_text(&self.form.view(), self.width)
    }

    /// Run one command line. Blank lines and `#` comments do nothing.
    pub fn execute_line(&mut self, line: &str) -> Result<Reply, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Reply::default());
        }
        let cmd = command::parse(line)?;
        self.execute(cmd)
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Reply, CommandError> {
        match cmd {
            Command::Form(msg) => {
                let outcome = self.form.update(msg);
                let status = match outcome {
                    Some(Outcome::Accepted) => Some("submitted".to_string()),
                    Some(Outcome::Rejected { errors }) => {
                        Some(format!("not submitted: {errors} field(s) invalid"))
                    }
                    None => None,
                };
                Ok(self.after_change(status))
            }
            Command::Type(text) => {
                for c in text.chars() {
                    self.form.update(Msg::Insert(c));
                }
                Ok(self.after_change(None))
            }
            Command::Show => Ok(Reply::print(self.render())),
            Command::Json => {
                let json = serde_json::to_string_pretty(&self.form.snapshot())?;
                Ok(Reply::print(json))
            }
            Command::Help => Ok(Reply::print(COMMAND_HELP)),
            Command::Quit => Ok(Reply {
                output: None,
                quit: true,
            }),
        }
    }

    fn after_change(&self, status: Option<String>) -> Reply {
        let output = match (self.quiet, status) {
            (true, status) => status,
            (false, Some(status)) => Some(format!("{}\n{status}", self.render())),
            (false, None) => Some(self.render()),
        };
        Reply {
            output,
            quit: false,
        }
    }

    /// Read commands from `input` until EOF or `quit`, writing replies and
    /// command errors to `output`.
    ///
    /// Command errors, including lines that are not UTF-8, are reported and
    /// the loop continues; only read or write failures end it early.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> std::io::Result<()> {
        if !self.quiet {
            writeln!(output, "{}", self.render())?;
        }
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let result = match std::str::from_utf8(&buf) {
                Ok(line) => self.execute_line(line.trim_end_matches(['\n', '\r'])),
                Err(_) => Err(CommandError::InvalidUtf8 { line: line_no }),
            };
            match result {
                Ok(reply) => {
                    if let Some(text) = reply.output {
                        writeln!(output, "{text}")?;
                    }
                    if reply.quit {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "command failed");
                    writeln!(output, "error: {e}")?;
                }
            }
        }
        output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cform::{FieldId, Phase};

    fn run_script(script: &str, quiet: bool) -> (Session, String) {
        let mut session = Session::new(60, quiet);
        let mut out = Vec::new();
        session
            .run(script.as_bytes(), &mut out)
            .expect("in-memory io");
        (session, String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn script_fills_and_submits() {
        let script = "\
set first Justin
set last McGraw
focus email
type justinmcgraw@rex.com
submit
";
        let (session, out) = run_script(script, true);
        assert_eq!(session.form().phase(), Phase::Submitted);
        assert_eq!(
            session.form().snapshot().map(|s| s.email()),
            Some("justinmcgraw@rex.com")
        );
        assert_eq!(out.trim(), "submitted");
    }

    #[test]
    fn rejected_submit_reports_count() {
        let (_, out) = run_script("submit\n", true);
        assert_eq!(out.trim(), "not submitted: 3 field(s) invalid");
    }

    #[test]
    fn bad_commands_do_not_stop_the_session() {
        let (session, out) = run_script("bogus\nset first Justin\n", true);
        assert!(out.contains("error: unknown command: bogus"));
        assert_eq!(session.form().value(FieldId::FirstName), "Justin");
    }

    #[test]
    fn non_utf8_line_is_reported_and_skipped() {
        let mut script = b"set first Justin\nset last ".to_vec();
        script.extend_from_slice(&[0xff, 0xfe]);
        script.extend_from_slice(b"\nset email justinmcgraw@rex.com\n");

        let mut session = Session::new(60, true);
        let mut out = Vec::new();
        session
            .run(script.as_slice(), &mut out)
            .expect("bad line must not end the session");
        let out = String::from_utf8(out).expect("utf8 output");

        assert!(out.contains("error: line 2 is not valid UTF-8"));
        assert_eq!(session.form().value(FieldId::FirstName), "Justin");
        assert_eq!(session.form().value(FieldId::LastName), "");
        assert_eq!(
            session.form().value(FieldId::Email),
            "justinmcgraw@rex.com"
        );
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (session, _) = run_script("set first Justin\r\nsubmit\r\n", true);
        assert_eq!(session.form().value(FieldId::FirstName), "Justin");
    }

    #[test]
    fn quit_stops_reading() {
        let (session, _) = run_script("quit\nset first Justin\n", true);
        assert_eq!(session.form().value(FieldId::FirstName), "");
    }

    #[test]
    fn verbose_mode_renders_after_changes() {
        let (_, out) = run_script("set email falseemail\n", false);
        assert_eq!(out.matches("Contact Form").count(), 2);
        assert_eq!(out.matches("Error:").count(), 1);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let mut session = Session::new(60, true);
        assert_eq!(session.execute_line("   ").unwrap(), Reply::default());
        assert_eq!(session.execute_line("# note").unwrap(), Reply::default());
    }

    #[test]
    fn json_prints_snapshot_or_null() {
        let mut session = Session::new(60, true);
        let reply = session.execute_line("json").unwrap();
        assert_eq!(reply.output.as_deref(), Some("null"));

        for line in [
            "set first Justin",
            "set last McGraw",
            "set email justinmcgraw@rex.com",
            "set message hi there",
            "submit",
        ] {
            session.execute_line(line).unwrap();
        }
        let reply = session.execute_line("json").unwrap();
        let value: serde_json::Value =
            serde_json::from_str(reply.output.as_deref().expect("json output")).unwrap();
        assert_eq!(value["firstName"], "Justin");
        assert_eq!(value["email"], "justinmcgraw@rex.com");
        assert_eq!(value["message"], "hi there");
    }
}

#![forbid(unsafe_code)]

//! Parsing of REPL command lines.

use std::fmt;

use cform::{FieldId, Msg, UnknownField};

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward a message to the form.
    Form(Msg),
    /// Type a run of characters into the focused field.
    Type(String),
    Show,
    Json,
    Help,
    Quit,
}

/// Failure to parse or run a command.
#[derive(Debug)]
pub enum CommandError {
    UnknownCommand(String),
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    UnknownField(UnknownField),
    /// A script line was not valid UTF-8.
    InvalidUtf8 { line: usize },
    Json(serde_json::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(cmd) => write!(f, "unknown command: {cmd} (try `help`)"),
            Self::MissingArgument { command, expected } => {
                write!(f, "`{command}` needs {expected}")
            }
            Self::UnknownField(e) => write!(f, "{e}"),
            Self::InvalidUtf8 { line } => write!(f, "line {line} is not valid UTF-8"),
            Self::Json(e) => write!(f, "json encoding failed: {e}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownField(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownField> for CommandError {
    fn from(e: UnknownField) -> Self {
        Self::UnknownField(e)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Parse a non-blank command line.
///
/// The verb is case-insensitive. Values keep their inner spacing; only the
/// single separator after the verb or field name is consumed.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_start();
    let (verb, rest) = split_word(line);
    let verb = verb.to_ascii_lowercase();

    let cmd = match verb.as_str() {
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "set",
                    expected: "a field name",
                });
            }
            let field: FieldId = field.parse()?;
            Command::Form(Msg::Set {
                field,
                value: value.to_string(),
            })
        }
        "type" => Command::Type(rest.to_string()),
        "backspace" | "bs" => Command::Form(Msg::Backspace),
        "tab" | "next" => Command::Form(Msg::FocusNext),
        "shift-tab" | "backtab" | "prev" => Command::Form(Msg::FocusPrev),
        "focus" => {
            let name = rest.trim();
            if name.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "focus",
                    expected: "a field name",
                });
            }
            Command::Form(Msg::Focus(name.parse()?))
        }
        "submit" => Command::Form(Msg::Submit),
        "show" => Command::Show,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::UnknownCommand(verb)),
    };
    Ok(cmd)
}

/// Split off the first whitespace-delimited word and drop one separator.
fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => {
            let sep_len = s[i..].chars().next().map_or(0, char::len_utf8);
            (&s[..i], &s[i + sep_len..])
        }
        None => (s, ""),
    }
}

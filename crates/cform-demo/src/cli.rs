#![forbid(unsafe_code)]

//! Command-line argument parsing for the contact form demo.
//!
//! Parses args manually. Environment variables with the `CFORM_` prefix
//! supply defaults; explicit flags win.

use std::env;
use std::path::PathBuf;
use std::process;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
cform-demo: interactive contact form

USAGE:
    cform-demo [OPTIONS]

OPTIONS:
    --width=N        Render width in columns (default: 60)
    --script=PATH    Read commands from PATH instead of stdin
    --quiet          Only print on `show` and `json`
    --log=LEVEL      Log filter, e.g. 'debug' or 'cform=trace' (default: warn)
    --help, -h       Show this help message
    --version, -V    Show version

COMMANDS (one per line):
    set <field> <value>   Replace a field's value
    type <text>           Type text into the focused field
    backspace             Delete the last character of the focused field
    tab / shift-tab       Move focus forward / back
    focus <field>         Focus a field
    submit                Submit the form
    show                  Print the form
    json                  Print the submitted values as JSON
    help                  List commands
    quit                  Exit

FIELDS:
    firstName (first), lastName (last), email, message (msg)

ENVIRONMENT VARIABLES:
    CFORM_DEMO_WIDTH      Override --width
    CFORM_DEMO_SCRIPT     Override --script
    CFORM_LOG             Override --log";

/// Default render width.
pub const DEFAULT_WIDTH: usize = 60;
/// Default log filter.
pub const DEFAULT_LOG: &str = "warn";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Render width in display columns.
    pub width: usize,
    /// Command script; stdin when `None`.
    pub script: Option<PathBuf>,
    /// Suppress the automatic re-render after each command.
    pub quiet: bool,
    /// `tracing-subscriber` filter directive.
    pub log: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            script: None,
            quiet: false,
            log: DEFAULT_LOG.into(),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
    Invalid(String),
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad flag.
    pub fn parse() -> Self {
        let env_lookup = |key: &str| env::var(key).ok();
        match Self::parse_from(env::args().skip(1), env_lookup) {
            Parsed::Run(opts) => opts,
            Parsed::Help => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Parsed::Version => {
                println!("cform-demo {VERSION}");
                process::exit(0);
            }
            Parsed::Invalid(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from explicit args and an environment lookup.
    pub fn parse_from<I, S, F>(args: I, env_lookup: F) -> Parsed
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first; flags below override it.
        if let Some(val) = env_lookup("CFORM_DEMO_WIDTH")
            && let Ok(n) = val.parse::<usize>()
            && n > 0
        {
            opts.width = n;
        }
        if let Some(val) = env_lookup("CFORM_DEMO_SCRIPT")
            && !val.is_empty()
        {
            opts.script = Some(PathBuf::from(val));
        }
        if let Some(val) = env_lookup("CFORM_LOG")
            && !val.is_empty()
        {
            opts.log = val;
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Parsed::Help,
                "--version" | "-V" => return Parsed::Version,
                "--quiet" | "-q" => opts.quiet = true,
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        match val.parse() {
                            Ok(n) if n > 0 => opts.width = n,
                            _ => return Parsed::Invalid(format!("Invalid --width value: {val}")),
                        }
                    } else if let Some(val) = other.strip_prefix("--script=") {
                        opts.script = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log = val.to_string();
                    } else {
                        return Parsed::Invalid(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Parsed::Run(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.width, 60);
        assert_eq!(opts.script, None);
        assert!(!opts.quiet);
        assert_eq!(opts.log, "warn");
    }

    #[test]
    fn flags_parse() {
        let parsed = Opts::parse_from(
            ["--width=40", "--script=cmds.txt", "--quiet", "--log=debug"],
            no_env,
        );
        assert_eq!(
            parsed,
            Parsed::Run(Opts {
                width: 40,
                script: Some(PathBuf::from("cmds.txt")),
                quiet: true,
                log: "debug".into(),
            })
        );
    }

    #[test]
    fn env_supplies_defaults_and_flags_override() {
        let env = |key: &str| match key {
            "CFORM_DEMO_WIDTH" => Some("30".to_string()),
            "CFORM_LOG" => Some("trace".to_string()),
            _ => None,
        };
        let Parsed::Run(opts) = Opts::parse_from(["--width=90"], env) else {
            panic!("expected Run");
        };
        assert_eq!(opts.width, 90);
        assert_eq!(opts.log, "trace");
    }

    #[test]
    fn bad_env_width_is_ignored() {
        for bad in ["wide", "0"] {
            let env = |key: &str| (key == "CFORM_DEMO_WIDTH").then(|| bad.to_string());
            let Parsed::Run(opts) = Opts::parse_from(Vec::<String>::new(), env) else {
                panic!("expected Run");
            };
            assert_eq!(opts.width, DEFAULT_WIDTH, "CFORM_DEMO_WIDTH={bad}");
        }
    }

    #[test]
    fn invalid_flags_are_reported() {
        assert!(matches!(
            Opts::parse_from(["--width=0"], no_env),
            Parsed::Invalid(_)
        ));
        assert!(matches!(
            Opts::parse_from(["--bogus"], no_env),
            Parsed::Invalid(msg) if msg.contains("--bogus")
        ));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(Opts::parse_from(["-h", "--bogus"], no_env), Parsed::Help);
        assert_eq!(Opts::parse_from(["--version"], no_env), Parsed::Version);
    }

    #[test]
    fn help_text_lists_env_vars_and_commands() {
        assert!(HELP_TEXT.contains("CFORM_DEMO_WIDTH"));
        assert!(HELP_TEXT.contains("CFORM_LOG"));
        assert!(HELP_TEXT.contains("submit"));
        assert!(!VERSION.is_empty());
    }
}

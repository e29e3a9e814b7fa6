#![forbid(unsafe_code)]

//! cform demo binary entry point.

use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use cform_demo::app::Session;
use cform_demo::{cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(&opts.log) {
        eprintln!("Invalid log filter {:?}: {e}", opts.log);
    }
    tracing::debug!(width = opts.width, script = ?opts.script, "starting cform demo");

    let mut session = Session::new(opts.width, opts.quiet);
    let stdout = io::stdout().lock();
    let result = match &opts.script {
        Some(path) => match File::open(path) {
            Ok(file) => session.run(BufReader::new(file), stdout),
            Err(e) => {
                eprintln!("Cannot open script {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => session.run(io::stdin().lock(), stdout),
    };

    if let Err(e) = result {
        eprintln!("I/O error: {e}");
        process::exit(1);
    }
}

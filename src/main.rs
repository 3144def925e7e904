#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]

//! toastscan -- Finds notification ("toast") calls in JavaScript and TypeScript sources.

use log::info;
use std::env;
use std::error::Error;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;
use termcolor::{ColorChoice, StandardStream};

use toastscan::options::Options;
use toastscan::report::report;

fn color_choice(color: Option<bool>) -> ColorChoice {
    match color {
        Some(true) => ColorChoice::Always,
        Some(false) => ColorChoice::Never,
        None if io::stdout().is_terminal() => ColorChoice::Auto,
        None => ColorChoice::Never,
    }
}

/// Scan and print. Returns whether anything was found.
fn execute(options: &Options) -> Result<bool, Box<dyn Error>> {
    if let Some(missing) = options.paths.iter().find(|p| !Path::new(p).exists()) {
        return Err(format!("{}: No such file or directory", missing).into());
    }
    let sites = toastscan::run(options)?;
    let mut stdout = StandardStream::stdout(color_choice(options.color));
    report(&mut stdout, &options.identifier, &sites, options.format)?;
    Ok(!sites.is_empty())
}

#[cfg(not(tarpaulin_include))]
fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );
    let args: Vec<String> = env::args().collect();
    let options = Options::new(&args);
    info!("Using options: {:#?}", options);
    let status = match execute(&options) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("{}", e);
            2
        }
    };
    process::exit(status)
}

pub mod args;
pub mod config;
pub mod encode;
pub mod error;
pub mod logging;
pub mod request;
pub mod save;

use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::args::Args;
use crate::config::resolve_config;
use crate::encode::QrEncoder;
use crate::error::QrgenError;
use crate::logging::init_logger;
use crate::request::{QrRequest, generate, payload};

/// Parses `argv` (program name first), generates the image, and reports the outcome.
pub fn run<I, T>(argv: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    init_logger(args.verbose);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if matches!(e, QrgenError::MissingArgument) {
                eprintln!("\n{}", Args::command().render_usage());
                eprintln!("\nFor more information, try '--help'.");
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<(), QrgenError> {
    payload(args)?;

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = resolve_config(args.config.as_deref(), args.no_config, &cwd)?;
    let request = QrRequest::resolve(args, &config)?;

    let saved = generate(&request, &QrEncoder::new(request.style))?;

    if !(args.quiet || config.quiet.unwrap_or(false)) {
        println!("saved QR code to {}", saved.display());
    }

    Ok(())
}

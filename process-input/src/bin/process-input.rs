//! Copy an input into a fixed-size buffer and print it.
//!
//! Without an input argument, the built-in oversized input is used.
#![expect(
    // unused-crate-dependencies false positives
    unused_crate_dependencies,
)]

use std::{
    ffi::{OsStr, OsString},
    process::ExitCode,
};

use bounded_copy_buffer::OverflowPolicy;
use bounded_copy_process_input::{MALICIOUS_INPUT, ProcessError, process_input};

/// Usage text.
const USAGE: &str = "Usage: process-input [--policy <reject|truncate>] [<INPUT>]";

/// Exit code for invalid command lines.
const EXIT_USAGE: u8 = 2;

/// Exit code for failures to write the output.
const EXIT_OUTPUT: u8 = 3;

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Print usage.
    Help,

    /// Process input.
    Run {
        /// Overflow policy.
        policy: OverflowPolicy,

        /// Input, if it was passed.
        input: Option<OsString>,
    },
}

/// Parse arguments, excluding the executable name.
fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut policy = OverflowPolicy::default();
    let mut input = None;
    let mut flags_done = false;

    while let Some(arg) = args.next() {
        let flag = if flags_done { None } else { arg.to_str() };
        match flag {
            Some("-h" | "--help") => return Ok(Command::Help),
            Some("--") => {
                flags_done = true;
            }
            Some("--policy") => {
                let value = args.next().ok_or("missing value for --policy")?;
                policy = parse_policy(&value)?;
            }
            Some(s) if s.starts_with("--policy=") => {
                policy = parse_policy(OsStr::new(&s["--policy=".len()..]))?;
            }
            Some(s) if s.len() > 1 && s.starts_with('-') => {
                return Err(format!("unknown flag: {s}"));
            }
            _ => {
                if input.replace(arg).is_some() {
                    return Err("too many inputs".to_owned());
                }
            }
        }
    }

    Ok(Command::Run { policy, input })
}

/// Parse value of `--policy`.
fn parse_policy(value: &OsStr) -> Result<OverflowPolicy, String> {
    let value = value.to_str().ok_or("policy must be valid UTF-8")?;
    value.parse::<OverflowPolicy>().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();

    let (policy, input) = match parse_args(std::env::args_os().skip(1)) {
        Ok(Command::Run { policy, input }) => (policy, input),
        Ok(Command::Help) => {
            eprintln!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let input = input
        .as_deref()
        .map_or(MALICIOUS_INPUT.as_bytes(), |s| s.as_encoded_bytes());

    match process_input(input, policy, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                ProcessError::Copy(_) => ExitCode::FAILURE,
                ProcessError::Io(_) => ExitCode::from(EXIT_OUTPUT),
            }
        }
    }
}

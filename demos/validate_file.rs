//! Example: validate a policy file and print one line per statement.
//!
//! To run:
//! ```bash
//! cargo run --example validate_file -- testdata/valid_data.json
//! cargo run --example validate_file -- testdata/valid_data.json --warnings
//! RUST_LOG=debug cargo run --example validate_file -- testdata/missing_action.json
//! ```
//!
//! Outcome and advisory lines go to stdout; tracing output goes to stderr.

use std::error::Error;
use std::process::ExitCode;

use iam_policy_validator::{Advisory, ResourceOutcome, ValidationSink, Validator};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prints each result the moment the validator produces it.
struct StdoutSink;

impl ValidationSink for StdoutSink {
    fn on_outcome(&mut self, outcome: &ResourceOutcome) {
        println!("{outcome}");
    }

    fn on_advisory(&mut self, advisory: &Advisory) {
        println!("{advisory}");
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut path = None;
    let mut warnings = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--warnings" => warnings = true,
            _ => path = Some(arg),
        }
    }
    let path = path.ok_or("usage: validate_file <policy.json> [--warnings]")?;

    let validator = Validator::builder().warnings(warnings).build()?;
    validator.validate_file(&path, &mut StdoutSink)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! subgen CLI entrypoint.
//!
//! A thin wrapper over the configuration core: collect argv, run the
//! parse → coerce → validate → resolve pipeline, and either render an
//! informational report or hand the resolved configuration to the next
//! stage. Until the processing stages land here, the hand-off artifact is
//! printed to stdout as JSON.

mod data;

use std::process::ExitCode;

use subgen_core::{NAME, Outcome, registry, render, resolve_args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let schema = registry();

    match resolve_args(&tokens, schema) {
        Ok(Outcome::Report(kind)) => {
            print!("{}", render(kind, schema, &data::list_data()));
            ExitCode::SUCCESS
        }
        Ok(Outcome::Config { config, warnings }) => {
            for warning in &warnings {
                eprintln!("{NAME}: warning: {warning}");
            }
            match serde_json::to_string_pretty(&config) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("{NAME}: error: {err}");
                    ExitCode::from(2)
                }
            }
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{NAME}: error: {error}");
            }
            eprintln!("{NAME}: try '{NAME} --help' for more information");
            ExitCode::from(2)
        }
    }
}

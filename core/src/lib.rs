//! Command-line configuration surface for the subgen subtitle pipeline.
//!
//! This crate owns everything between raw argv and the resolved
//! configuration the pipeline stages consume:
//!
//! - [`SchemaRegistry`] — the immutable catalogue of option declarations
//!   (aliases, arity, value type, defaults, help text), shared via
//!   [`registry`].
//! - [`parse_tokens`] — groups raw tokens under each option per its
//!   declared arity, last occurrence winning.
//! - [`coerce`] — converts raw token groups to typed values.
//! - [`validate`] — cross-option rules (enumerated domains, numeric
//!   ranges, conditional dependencies, override advisories).
//! - [`resolve`] — fills static and derived defaults, producing a
//!   [`ResolvedConfig`] with exactly one entry per declared option.
//! - [`render`] — help, version, and listing reports that end the
//!   invocation before the pipeline runs.
//!
//! [`resolve_args`] wires the stages together. Everything is synchronous,
//! allocation-only, and free of I/O; the registry is built once and safely
//! reused across any number of parses.
//!
//! # Example
//!
//! ```
//! use subgen_core::{registry, resolve_args, Outcome};
//!
//! let tokens: Vec<String> = ["-i", "movie.mp4", "-o", "movie.ssa"]
//!     .iter().map(|s| s.to_string()).collect();
//!
//! match resolve_args(&tokens, registry()).unwrap() {
//!     Outcome::Config { config, warnings } => {
//!         assert!(warnings.is_empty());
//!         assert_eq!(config.text("format"), Some("ssa"));
//!         assert_eq!(config.text("input"), Some("movie.mp4"));
//!     }
//!     Outcome::Report(_) => unreachable!(),
//! }
//! ```

mod coerce;
mod constants;
mod error;
mod parse;
mod registry;
mod report;
mod resolve;
mod types;
mod validate;

pub use coerce::{TypedValues, coerce};
pub use constants::*;
pub use error::ConfigError;
pub use parse::{ParsedValues, parse_tokens};
pub use registry::{SchemaError, SchemaRegistry, registry};
pub use report::{ListData, ReportKind, render};
pub use resolve::{ResolvedConfig, resolve};
pub use types::{ArgGroup, Arity, ConfigValue, DefaultSpec, OptionSpec, ValueKind};
pub use validate::{ValidationReport, validate};

use tracing::debug;

/// What a successful invocation resolves to.
#[derive(Debug)]
pub enum Outcome {
    /// A fully resolved configuration, ready for the pipeline stages,
    /// plus any advisory warnings raised during validation.
    Config {
        /// The resolved configuration.
        config: ResolvedConfig,
        /// Advisories to surface on the error stream.
        warnings: Vec<String>,
    },
    /// A terminal option was present; render this report and exit
    /// successfully without running the pipeline.
    Report(ReportKind),
}

/// Runs the full parse → coerce → validate → resolve pipeline.
///
/// A terminal option (help, version, or a listing flag) short-circuits
/// right after the parse pass and overrides every pending error, so
/// `--help` works on an otherwise broken command line. All other problems
/// are aggregated and returned together.
///
/// # Errors
///
/// Returns every [`ConfigError`] found across parsing, coercion, and
/// validation.
pub fn resolve_args(
    tokens: &[String],
    schema: &SchemaRegistry,
) -> Result<Outcome, Vec<ConfigError>> {
    let (parsed, mut errors) = parse_tokens(tokens, schema);

    // Terminal options win over everything, including pending errors.
    for spec in schema.describe().filter(|spec| spec.terminal) {
        if parsed.contains(spec.name) {
            if let Some(kind) = ReportKind::from_option(spec.name) {
                debug!(option = spec.name, "terminal option selected");
                return Ok(Outcome::Report(kind));
            }
        }
    }

    let (typed, coerce_errors) = coerce(&parsed, schema);
    errors.extend(coerce_errors);

    let report = validate(&typed, schema);
    errors.extend(report.errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Outcome::Config {
        config: resolve(typed, schema),
        warnings: report.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn config_for(args: &[&str]) -> ResolvedConfig {
        match resolve_args(&tokens(args), registry()) {
            Ok(Outcome::Config { config, .. }) => config,
            other => panic!("expected a configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_resolving_twice_is_identical() {
        let args = &["-i", "movie.mp4", "-S", "en", "-D", "fr", "-of", "all"];
        assert_eq!(config_for(args), config_for(args));
    }

    #[test]
    fn test_last_wins_for_repeated_alias() {
        let config = config_for(&["-S", "en", "-S", "fr"]);
        assert_eq!(config.text("src-language"), Some("fr"));
    }

    #[test]
    fn test_help_terminates_without_input() {
        let outcome = resolve_args(&tokens(&["--help"]), registry()).unwrap();
        assert!(matches!(outcome, Outcome::Report(ReportKind::Help)));
    }

    #[test]
    fn test_version_terminates_without_input() {
        let outcome = resolve_args(&tokens(&["-V"]), registry()).unwrap();
        assert!(matches!(outcome, Outcome::Report(ReportKind::Version)));
    }

    #[test]
    fn test_terminal_option_overrides_pending_errors() {
        let outcome = resolve_args(&tokens(&["--bogus", "-sc", "many", "-h"]), registry());
        assert!(matches!(outcome, Ok(Outcome::Report(ReportKind::Help))));
    }

    #[test]
    fn test_listing_flags_are_terminal() {
        for (flag, kind) in [
            ("-lf", ReportKind::ListFormats),
            ("-lsc", ReportKind::ListSpeechCodes),
            ("-ltc", ReportKind::ListTranslationCodes),
        ] {
            match resolve_args(&tokens(&[flag]), registry()).unwrap() {
                Outcome::Report(found) => assert_eq!(found, kind),
                other => panic!("expected a report for {flag}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_errors_aggregate_across_stages() {
        // Unknown flag (parse), bad integer (coerce), bad domain (validate).
        let errors = resolve_args(
            &tokens(&["--bogus", "-sc", "many", "-of", "nope"]),
            registry(),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ConfigError::UnknownArgument(_)));
        assert!(errors.iter().any(|e| matches!(e, ConfigError::Type { .. })));
        assert!(errors.iter().any(|e| matches!(e, ConfigError::Domain { .. })));
    }

    #[test]
    fn test_format_derivation_end_to_end() {
        assert_eq!(config_for(&["-o", "out.ssa"]).text("format"), Some("ssa"));
        assert_eq!(config_for(&[]).text("format"), Some("srt"));
    }

    #[test]
    fn test_override_warning_reaches_outcome() {
        match resolve_args(&tokens(&["-er", "r.srt", "-mxcs", "0.5"]), registry()).unwrap() {
            Outcome::Config { warnings, .. } => {
                assert_eq!(warnings.len(), 1);
                assert!(warnings[0].contains("--max-continuous-silence"));
            }
            other => panic!("expected a configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_styles_name_arity_violation() {
        let errors = resolve_args(&tokens(&["-sn", "a", "b", "c"]), registry()).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Arity { option, .. } if option == "--styles-name"
        )));
    }
}

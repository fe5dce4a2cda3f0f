//! Token parsing: raw argv → per-option raw value groups.
//!
//! One generic consumption loop interprets each option's declared
//! [`Arity`](crate::Arity); no option gets its own branching. A repeated
//! alias overwrites the earlier occurrence (last wins). Problems are
//! collected across the whole pass and surfaced together, so the user sees
//! every bad token at once instead of one per run.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ConfigError;
use crate::registry::SchemaRegistry;
use crate::types::Arity;

/// Canonical-name → raw value tokens, for options present on the command
/// line. Options that did not appear have no entry.
#[derive(Debug, Clone, Default)]
pub struct ParsedValues {
    entries: BTreeMap<&'static str, Vec<String>>,
}

impl ParsedValues {
    /// Records an occurrence, replacing any earlier one (last wins).
    fn insert(&mut self, name: &'static str, raw: Vec<String>) {
        self.entries.insert(name, raw);
    }

    /// Raw tokens recorded for an option, if it appeared.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Whether an option appeared on the command line.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates present options in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.entries.iter().map(|(name, raw)| (*name, raw.as_slice()))
    }

    /// Number of options that appeared.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no option appeared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a token looks like a flag rather than a value.
fn looks_like_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Scans the raw argument sequence left to right, grouping value tokens
/// under each recognized option per its declared arity.
///
/// A single bare positional token is accepted as the `input` path; further
/// positionals and unrecognized flags become [`ConfigError::UnknownArgument`]
/// entries. Arity violations are collected the same way rather than
/// stopping the scan.
///
/// # Examples
///
/// ```
/// use subgen_core::{parse_tokens, registry};
///
/// let tokens: Vec<String> = ["-S", "en", "-S", "fr"].iter().map(|s| s.to_string()).collect();
/// let (parsed, errors) = parse_tokens(&tokens, registry());
/// assert!(errors.is_empty());
/// assert_eq!(parsed.get("src-language"), Some(&["fr".to_string()][..]));
/// ```
pub fn parse_tokens(
    tokens: &[String],
    schema: &SchemaRegistry,
) -> (ParsedValues, Vec<ConfigError>) {
    let mut values = ParsedValues::default();
    let mut errors = Vec::new();
    let mut saw_positional = false;
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        index += 1;

        let Some(spec) = schema.find_alias(token) else {
            if !looks_like_flag(token) && !saw_positional && !values.contains("input") {
                // The one accepted positional: the input path.
                values.insert("input", vec![token.clone()]);
                saw_positional = true;
            } else {
                errors.push(ConfigError::UnknownArgument(token.clone()));
            }
            continue;
        };

        match spec.arity {
            Arity::Fixed(n) => {
                let mut taken = Vec::with_capacity(n);
                // Recognized aliases end the value run; anything else,
                // including negative numbers, is consumed as a value.
                while taken.len() < n && index < tokens.len() && !schema.is_alias(&tokens[index]) {
                    taken.push(tokens[index].clone());
                    index += 1;
                }
                if taken.len() < n {
                    errors.push(ConfigError::Arity {
                        option: spec.long.to_string(),
                        expected: spec.arity.expected(),
                        found: taken.len(),
                    });
                } else {
                    values.insert(spec.name, taken);
                }
            }
            Arity::Optional { fallback } => {
                if index < tokens.len() && !looks_like_flag(&tokens[index]) {
                    values.insert(spec.name, vec![tokens[index].clone()]);
                    index += 1;
                } else {
                    values.insert(spec.name, vec![fallback.to_string()]);
                }
            }
            Arity::Variadic { min, max } => {
                // Take the whole run of non-flag tokens, then judge the
                // count, so over-supply is an arity error instead of the
                // excess leaking into positional handling.
                let mut taken = Vec::new();
                while index < tokens.len() && !looks_like_flag(&tokens[index]) {
                    taken.push(tokens[index].clone());
                    index += 1;
                }
                if taken.len() < min || taken.len() > max {
                    errors.push(ConfigError::Arity {
                        option: spec.long.to_string(),
                        expected: spec.arity.expected(),
                        found: taken.len(),
                    });
                } else {
                    values.insert(spec.name, taken);
                }
            }
        }
    }

    debug!(
        options = values.len(),
        problems = errors.len(),
        "parsed command-line tokens"
    );
    (values, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_last_occurrence_wins() {
        let (parsed, errors) = parse_tokens(&tokens(&["-S", "en", "-S", "fr"]), registry());
        assert!(errors.is_empty());
        assert_eq!(parsed.get("src-language"), Some(&["fr".to_string()][..]));
    }

    #[test]
    fn test_flag_takes_no_tokens() {
        let (parsed, errors) = parse_tokens(&tokens(&["-y"]), registry());
        assert!(errors.is_empty());
        assert_eq!(parsed.get("yes"), Some(Vec::new().as_slice()));
    }

    #[test]
    fn test_fixed_missing_value_is_arity_error() {
        let (_, errors) = parse_tokens(&tokens(&["-S", "-o", "out.srt"]), registry());
        assert_eq!(
            errors,
            vec![ConfigError::Arity {
                option: "--src-language".to_string(),
                expected: "exactly 1".to_string(),
                found: 0,
            }]
        );
    }

    #[test]
    fn test_fixed_consumes_negative_number() {
        let (parsed, errors) = parse_tokens(&tokens(&["-mnc", "-0.5"]), registry());
        assert!(errors.is_empty());
        assert_eq!(parsed.get("min-confidence"), Some(&["-0.5".to_string()][..]));
    }

    #[test]
    fn test_optional_with_value() {
        let (parsed, errors) = parse_tokens(&tokens(&["-sty", "styles.ass"]), registry());
        assert!(errors.is_empty());
        assert_eq!(parsed.get("styles"), Some(&["styles.ass".to_string()][..]));
    }

    #[test]
    fn test_optional_zero_arg_uses_fallback() {
        let (parsed, errors) = parse_tokens(&tokens(&["-sty", "-y"]), registry());
        assert!(errors.is_empty());
        assert_eq!(parsed.get("styles"), Some(&[" ".to_string()][..]));
        assert!(parsed.contains("yes"));
    }

    #[test]
    fn test_variadic_in_range() {
        let (parsed, errors) = parse_tokens(&tokens(&["-of", "src", "dst"]), registry());
        assert!(errors.is_empty());
        assert_eq!(
            parsed.get("output-files"),
            Some(&["src".to_string(), "dst".to_string()][..])
        );
    }

    #[test]
    fn test_variadic_over_supply_is_arity_error() {
        let (_, errors) = parse_tokens(&tokens(&["-sn", "a", "b", "c"]), registry());
        assert_eq!(
            errors,
            vec![ConfigError::Arity {
                option: "--styles-name".to_string(),
                expected: "1 to 2".to_string(),
                found: 3,
            }]
        );
    }

    #[test]
    fn test_variadic_under_supply_is_arity_error() {
        let (_, errors) = parse_tokens(&tokens(&["-of", "-y"]), registry());
        assert_eq!(
            errors,
            vec![ConfigError::Arity {
                option: "--output-files".to_string(),
                expected: "1 to 4".to_string(),
                found: 0,
            }]
        );
    }

    #[test]
    fn test_unknown_flags_are_aggregated() {
        let (_, errors) = parse_tokens(&tokens(&["--bogus", "-S", "en", "--wat"]), registry());
        assert_eq!(
            errors,
            vec![
                ConfigError::UnknownArgument("--bogus".to_string()),
                ConfigError::UnknownArgument("--wat".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_positional_is_input() {
        let (parsed, errors) = parse_tokens(&tokens(&["movie.mp4", "-y"]), registry());
        assert!(errors.is_empty());
        assert_eq!(parsed.get("input"), Some(&["movie.mp4".to_string()][..]));
    }

    #[test]
    fn test_second_positional_is_unknown() {
        let (_, errors) = parse_tokens(&tokens(&["movie.mp4", "extra.mp4"]), registry());
        assert_eq!(
            errors,
            vec![ConfigError::UnknownArgument("extra.mp4".to_string())]
        );
    }

    #[test]
    fn test_empty_input_parses_to_nothing() {
        let (parsed, errors) = parse_tokens(&[], registry());
        assert!(parsed.is_empty());
        assert!(errors.is_empty());
    }
}

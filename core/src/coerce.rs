//! Type coercion: raw value tokens → typed option values.
//!
//! Coercion is total and order-independent: each present option converts on
//! its own, and failures are collected rather than aborting the pass.
//! Enumerated-membership and range checks are deliberately not done here;
//! they belong to the validator so every domain violation reports through
//! one channel.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ConfigError;
use crate::parse::ParsedValues;
use crate::registry::SchemaRegistry;
use crate::types::{ConfigValue, ValueKind};

/// Canonical-name → typed value, for options present after coercion.
pub type TypedValues = BTreeMap<&'static str, ConfigValue>;

/// Converts each parsed option's raw token(s) to its declared type.
///
/// # Examples
///
/// ```
/// use subgen_core::{coerce, parse_tokens, registry, ConfigValue};
///
/// let tokens: Vec<String> = ["-mnc", "0.7", "-y"].iter().map(|s| s.to_string()).collect();
/// let (parsed, _) = parse_tokens(&tokens, registry());
/// let (typed, errors) = coerce(&parsed, registry());
/// assert!(errors.is_empty());
/// assert_eq!(typed.get("min-confidence"), Some(&ConfigValue::Float(0.7)));
/// assert_eq!(typed.get("yes"), Some(&ConfigValue::Flag(true)));
/// ```
pub fn coerce(parsed: &ParsedValues, schema: &SchemaRegistry) -> (TypedValues, Vec<ConfigError>) {
    let mut typed = TypedValues::new();
    let mut errors = Vec::new();

    for (name, raw) in parsed.iter() {
        // Parsed entries always come from the catalogue.
        let Some(spec) = schema.get(name) else {
            continue;
        };

        let value = match spec.kind {
            ValueKind::Flag => Some(ConfigValue::Flag(true)),
            ValueKind::Integer => single(raw).and_then(|token| match token.parse::<i64>() {
                Ok(parsed) => Some(ConfigValue::Int(parsed)),
                Err(_) => {
                    errors.push(ConfigError::Type {
                        option: spec.long.to_string(),
                        expected: spec.kind.label(),
                        value: token.to_string(),
                    });
                    None
                }
            }),
            ValueKind::Float => single(raw).and_then(|token| match token.parse::<f64>() {
                Ok(parsed) => Some(ConfigValue::Float(parsed)),
                Err(_) => {
                    errors.push(ConfigError::Type {
                        option: spec.long.to_string(),
                        expected: spec.kind.label(),
                        value: token.to_string(),
                    });
                    None
                }
            }),
            ValueKind::Path | ValueKind::Text => {
                single(raw).map(|token| ConfigValue::Text(token.to_string()))
            }
            ValueKind::List | ValueKind::ChoiceList(_) => Some(ConfigValue::List(raw.to_vec())),
        };

        if let Some(value) = value {
            typed.insert(spec.name, value);
        }
    }

    debug!(options = typed.len(), problems = errors.len(), "coerced option values");
    (typed, errors)
}

fn single(raw: &[String]) -> Option<&String> {
    raw.first()
}

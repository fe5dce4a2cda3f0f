//! Default resolution: typed values → the final resolved configuration.
//!
//! Every catalogue option ends up with exactly one entry: the user-supplied
//! value, a static default, or a derived default computed from another
//! resolved option. Derived defaults resolve strictly after their source,
//! which the registry guarantees is cycle-free.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::coerce::TypedValues;
use crate::constants::{DEFAULT_SUBTITLES_FORMAT, OUTPUT_FILE_KINDS_ALL};
use crate::registry::SchemaRegistry;
use crate::types::{ConfigValue, DefaultSpec, ValueKind};

/// The fully-typed, fully-defaulted option set handed to the downstream
/// pipeline stages. Read-only once built; serializes as a flat JSON object
/// keyed by canonical option name.
///
/// # Examples
///
/// ```
/// use subgen_core::{registry, resolve};
///
/// let config = resolve(Default::default(), registry());
/// assert_eq!(config.len(), registry().len());
/// assert_eq!(config.text("format"), Some("srt"));
/// assert_eq!(config.int("speech-concurrency"), Some(10));
/// assert!(!config.flag("yes"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    values: BTreeMap<&'static str, ConfigValue>,
}

impl ResolvedConfig {
    /// The value resolved for an option.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    /// Flag state; `false` for non-flag options.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ConfigValue::Flag(true)))
    }

    /// Integer value, if the option resolved to one.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ConfigValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Float value, if the option resolved to one.
    pub fn float(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ConfigValue::Float(value)) => Some(*value),
            _ => None,
        }
    }

    /// String value, if the option resolved to one. Unset options are `None`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ConfigValue::as_text)
    }

    /// List value, if the option resolved to one.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).and_then(ConfigValue::as_list)
    }

    /// Iterates all resolved entries in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConfigValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Number of resolved entries (always the full catalogue).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the configuration is empty (never, for a real catalogue).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Destination format derived from the resolved output path: the file
/// extension when there is one, otherwise the fixed default format.
pub(crate) fn derive_format_from_output(output: &ConfigValue) -> ConfigValue {
    let format = match output.as_text() {
        Some(path) => extension_of(path).unwrap_or_else(|| DEFAULT_SUBTITLES_FORMAT.to_string()),
        None => DEFAULT_SUBTITLES_FORMAT.to_string(),
    };
    ConfigValue::Text(format)
}

fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

/// The destination format an invocation will end up with, accounting for
/// the derived default. Used by validation before resolution has run.
pub(crate) fn effective_format(values: &TypedValues) -> String {
    if let Some(format) = values.get("format").and_then(ConfigValue::as_text) {
        return format.to_string();
    }
    match derive_format_from_output(values.get("output").unwrap_or(&ConfigValue::Unset)) {
        ConfigValue::Text(format) => format,
        _ => DEFAULT_SUBTITLES_FORMAT.to_string(),
    }
}

/// Fills every absent option with its static or derived default and seals
/// the result into a [`ResolvedConfig`].
///
/// `output-files` containing `all` is expanded here to the full concrete
/// set, so downstream consumers never see the shorthand.
pub fn resolve(values: TypedValues, schema: &SchemaRegistry) -> ResolvedConfig {
    let mut resolved = values;

    for spec in schema.describe() {
        if resolved.contains_key(spec.name) {
            continue;
        }
        let value = match spec.default {
            DefaultSpec::Derived { .. } => continue,
            DefaultSpec::None => match spec.kind {
                ValueKind::Flag => ConfigValue::Flag(false),
                _ => ConfigValue::Unset,
            },
            DefaultSpec::Int(value) => ConfigValue::Int(value),
            DefaultSpec::Float(value) => ConfigValue::Float(value),
            DefaultSpec::Text(value) => ConfigValue::Text(value.to_string()),
            DefaultSpec::List(items) => {
                ConfigValue::List(items.iter().map(|item| item.to_string()).collect())
            }
        };
        resolved.insert(spec.name, value);
    }

    // Derived defaults, in dependency order. The registry rejects cycles,
    // so each pass resolves at least one remaining entry.
    loop {
        let mut progressed = false;
        let mut pending = false;
        for spec in schema.describe() {
            if resolved.contains_key(spec.name) {
                continue;
            }
            let DefaultSpec::Derived { from, derive } = spec.default else {
                continue;
            };
            match resolved.get(from) {
                Some(source) => {
                    let value = derive(source);
                    resolved.insert(spec.name, value);
                    progressed = true;
                }
                None => pending = true,
            }
        }
        if !pending || !progressed {
            break;
        }
    }

    if let Some(ConfigValue::List(kinds)) = resolved.get("output-files") {
        if kinds.iter().any(|kind| kind == "all") {
            resolved.insert(
                "output-files",
                ConfigValue::List(
                    OUTPUT_FILE_KINDS_ALL
                        .iter()
                        .map(|kind| kind.to_string())
                        .collect(),
                ),
            );
        }
    }

    debug!(entries = resolved.len(), "resolved configuration");
    ResolvedConfig { values: resolved }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce;
    use crate::parse::parse_tokens;
    use crate::registry::registry;

    fn resolved(args: &[&str]) -> ResolvedConfig {
        let tokens: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let (parsed, errors) = parse_tokens(&tokens, registry());
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        let (typed, errors) = coerce(&parsed, registry());
        assert!(errors.is_empty(), "unexpected coerce errors: {errors:?}");
        resolve(typed, registry())
    }

    #[test]
    fn test_every_option_has_exactly_one_entry() {
        let config = resolved(&[]);
        assert_eq!(config.len(), registry().len());
        for spec in registry().describe() {
            assert!(config.get(spec.name).is_some(), "{} missing", spec.name);
        }
    }

    #[test]
    fn test_static_defaults_fill_absent_options() {
        let config = resolved(&[]);
        assert_eq!(config.int("speech-concurrency"), Some(10));
        assert_eq!(config.int("energy-threshold"), Some(45));
        assert_eq!(config.float("min-confidence"), Some(0.0));
        assert_eq!(config.float("max-region-size"), Some(6.0));
        assert_eq!(config.text("src-language"), Some("en"));
        assert_eq!(config.list("output-files"), Some(&["dst".to_string()][..]));
        assert_eq!(config.get("input"), Some(&ConfigValue::Unset));
        assert!(!config.flag("drop-empty-regions"));
    }

    #[test]
    fn test_format_derived_from_output_extension() {
        let config = resolved(&["-o", "episode.SSA"]);
        assert_eq!(config.text("format"), Some("ssa"));
    }

    #[test]
    fn test_format_falls_back_without_extension() {
        let config = resolved(&["-o", "episode"]);
        assert_eq!(config.text("format"), Some("srt"));
        let config = resolved(&[]);
        assert_eq!(config.text("format"), Some("srt"));
    }

    #[test]
    fn test_explicit_format_wins_over_derivation() {
        let config = resolved(&["-o", "episode.ssa", "-F", "vtt"]);
        assert_eq!(config.text("format"), Some("vtt"));
    }

    #[test]
    fn test_output_files_all_expands() {
        let config = resolved(&["-of", "all"]);
        assert_eq!(
            config.list("output-files"),
            Some(
                &[
                    "regions".to_string(),
                    "src".to_string(),
                    "dst".to_string(),
                    "bilingual".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let args = &["-i", "movie.mp4", "-o", "movie.ass", "-sc", "4"];
        assert_eq!(resolved(args), resolved(args));
    }

    #[test]
    fn test_effective_format_matches_resolution() {
        let tokens: Vec<String> = ["-o", "movie.ass"].iter().map(|s| s.to_string()).collect();
        let (parsed, _) = parse_tokens(&tokens, registry());
        let (typed, _) = coerce(&parsed, registry());
        assert_eq!(effective_format(&typed), "ass");
        assert_eq!(effective_format(&TypedValues::new()), "srt");
    }

    #[test]
    fn test_config_serializes_as_flat_object() {
        let config = resolved(&["-y"]);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["yes"], serde_json::json!(true));
        assert_eq!(json["format"], serde_json::json!("srt"));
        assert_eq!(json["input"], serde_json::Value::Null);
    }
}

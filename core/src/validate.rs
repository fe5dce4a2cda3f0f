//! Cross-option and domain validation.
//!
//! Rules are evaluated independently against the whole typed value set, and
//! every violation is reported; nothing short-circuits on first failure.
//! Terminal options (help, version, listings) never reach this stage; the
//! pipeline returns a report before validation runs.

use tracing::warn;

use crate::coerce::TypedValues;
use crate::error::ConfigError;
use crate::registry::SchemaRegistry;
use crate::resolve::effective_format;
use crate::types::{ArgGroup, ConfigValue, ValueKind};

/// Subtitle formats that carry style definitions.
const STYLED_FORMATS: &[&str] = &["ass", "ssa"];

/// Outcome of a validation pass: hard errors plus advisory warnings.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Violations that fail the invocation.
    pub errors: Vec<ConfigError>,
    /// Advisories surfaced to the user without failing the invocation.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether the value set passed every hard rule.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Evaluates every cross-option rule against the typed value set.
///
/// # Examples
///
/// ```
/// use subgen_core::{coerce, parse_tokens, registry, validate};
///
/// let tokens: Vec<String> = ["-of", "regions", "bogus"].iter().map(|s| s.to_string()).collect();
/// let (parsed, _) = parse_tokens(&tokens, registry());
/// let (typed, _) = coerce(&parsed, registry());
/// let report = validate(&typed, registry());
/// assert!(!report.is_valid());
/// assert!(report.errors[0].to_string().contains("bogus"));
/// ```
pub fn validate(values: &TypedValues, schema: &SchemaRegistry) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_choice_membership(values, schema, &mut report);
    check_numeric_ranges(values, schema, &mut report);
    check_styles_name_dependencies(values, &mut report);
    check_region_source_override(values, schema, &mut report);

    report
}

/// Every value of a choice-list option must belong to its declared domain.
fn check_choice_membership(
    values: &TypedValues,
    schema: &SchemaRegistry,
    report: &mut ValidationReport,
) {
    for spec in schema.describe() {
        let ValueKind::ChoiceList(domain) = spec.kind else {
            continue;
        };
        let Some(ConfigValue::List(items)) = values.get(spec.name) else {
            continue;
        };
        for item in items {
            if !domain.contains(&item.as_str()) {
                report.errors.push(ConfigError::Domain {
                    option: spec.long.to_string(),
                    value: item.clone(),
                    allowed: format!("{{{}}}", domain.join(", ")),
                });
            }
        }
    }
}

/// Numeric values must lie inside the range their declaration carries.
fn check_numeric_ranges(
    values: &TypedValues,
    schema: &SchemaRegistry,
    report: &mut ValidationReport,
) {
    for spec in schema.describe() {
        let Some((min, max)) = spec.range else {
            continue;
        };
        let value = match values.get(spec.name) {
            Some(ConfigValue::Float(value)) => *value,
            Some(ConfigValue::Int(value)) => *value as f64,
            _ => continue,
        };
        // Negated form so NaN fails the check too.
        if !(value >= min && value <= max) {
            report.errors.push(ConfigError::Domain {
                option: spec.long.to_string(),
                value: value.to_string(),
                allowed: format!("[{min}, {max}]"),
            });
        }
    }
}

/// `--styles-name` only means something with a styles source and an
/// "ass"/"ssa"-family destination format (explicit or derived).
fn check_styles_name_dependencies(values: &TypedValues, report: &mut ValidationReport) {
    if !values.contains_key("styles-name") {
        return;
    }
    if !values.contains_key("styles") {
        report.errors.push(ConfigError::Dependency {
            option: "--styles-name".to_string(),
            requirement: "\"-sty\"/\"--styles\"".to_string(),
        });
    }
    let format = effective_format(values);
    if !STYLED_FORMATS.contains(&format.as_str()) {
        report.errors.push(ConfigError::Dependency {
            option: "--styles-name".to_string(),
            requirement: format!(
                "an \"ass\"/\"ssa\" output format (destination format is \"{format}\")"
            ),
        });
    }
}

/// External speech regions override the energy-based segmentation; having
/// both on the command line is legal but the auditok tuning will be
/// ignored, so say so.
fn check_region_source_override(
    values: &TypedValues,
    schema: &SchemaRegistry,
    report: &mut ValidationReport,
) {
    if !values.contains_key("ext-regions") {
        return;
    }
    let overridden: Vec<&str> = schema
        .group(ArgGroup::Auditok)
        .filter(|spec| values.contains_key(spec.name))
        .map(|spec| spec.long)
        .collect();
    if overridden.is_empty() {
        return;
    }
    let warning = format!(
        "--ext-regions overrides energy-based segmentation; ignoring {}",
        overridden.join(", ")
    );
    warn!("{warning}");
    report.warnings.push(warning);
}

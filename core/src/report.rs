//! Informational reports: help, version, and the listing outputs.
//!
//! Rendering is pure string formatting over the option catalogue plus
//! externally supplied enumeration tables. Selecting a report ends the
//! invocation successfully without a resolved configuration.

use crate::constants::{DESCRIPTION, NAME, VERSION};
use crate::registry::SchemaRegistry;
use crate::types::{ArgGroup, DefaultSpec};

/// Column where help text starts in help output.
const HELP_COLUMN: usize = 26;

/// Which informational report to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Full usage/help text.
    Help,
    /// Program name and version.
    Version,
    /// Available output subtitle formats.
    ListFormats,
    /// Available speech-to-text language codes.
    ListSpeechCodes,
    /// Available translation language codes.
    ListTranslationCodes,
}

impl ReportKind {
    /// Maps a terminal option's canonical name to its report.
    pub fn from_option(name: &str) -> Option<Self> {
        match name {
            "help" => Some(ReportKind::Help),
            "version" => Some(ReportKind::Version),
            "list-formats" => Some(ReportKind::ListFormats),
            "list-speech-to-text-codes" => Some(ReportKind::ListSpeechCodes),
            "list-translation-codes" => Some(ReportKind::ListTranslationCodes),
            _ => None,
        }
    }
}

/// Enumeration tables the listing reports render. These are data owned by
/// the caller, not part of the configuration core.
#[derive(Debug, Clone, Copy)]
pub struct ListData<'a> {
    /// Output subtitle format names.
    pub formats: &'a [&'a str],
    /// `(code, language)` pairs accepted for speech-to-text.
    pub speech_codes: &'a [(&'a str, &'a str)],
    /// `(code, language)` pairs accepted for translation.
    pub translation_codes: &'a [(&'a str, &'a str)],
}

/// Renders one report as a complete output string.
///
/// # Examples
///
/// ```
/// use subgen_core::{registry, render, ListData, ReportKind};
///
/// let lists = ListData { formats: &["srt"], speech_codes: &[], translation_codes: &[] };
/// let help = render(ReportKind::Help, registry(), &lists);
/// assert!(help.contains("--input"));
/// assert!(help.contains("Auditok Options"));
/// ```
pub fn render(kind: ReportKind, schema: &SchemaRegistry, lists: &ListData<'_>) -> String {
    match kind {
        ReportKind::Help => render_help(schema),
        ReportKind::Version => format!("{NAME} {VERSION}\n"),
        ReportKind::ListFormats => {
            let mut out = String::from("Available output formats:\n");
            for format in lists.formats {
                out.push_str("  ");
                out.push_str(format);
                out.push('\n');
            }
            out
        }
        ReportKind::ListSpeechCodes => {
            render_codes("Available speech-to-text language codes:", lists.speech_codes)
        }
        ReportKind::ListTranslationCodes => {
            render_codes("Available translation language codes:", lists.translation_codes)
        }
    }
}

fn render_codes(title: &str, codes: &[(&str, &str)]) -> String {
    let mut out = String::from(title);
    out.push('\n');
    for (code, language) in codes {
        out.push_str(&format!("  {code:<12}{language}\n"));
    }
    out
}

fn render_help(schema: &SchemaRegistry) -> String {
    let mut out = format!("Usage:\n  {NAME} <input> [options]\n\n{DESCRIPTION}\n");

    for group in ArgGroup::ALL {
        out.push('\n');
        out.push_str(group.title());
        out.push_str(":\n  ");
        out.push_str(group.blurb());
        out.push_str("\n\n");

        for spec in schema.group(group) {
            let mut heading = format!("  {}, {}", spec.short, spec.long);
            if !spec.metavar.is_empty() {
                heading.push(' ');
                heading.push_str(spec.metavar);
            }

            let mut body = String::from(spec.help);
            body.push(' ');
            body.push_str(&spec.arity.tag());
            if let Some(default) = render_default(spec.default) {
                body.push_str(&format!(" (default: {default})"));
            }

            if heading.len() + 2 <= HELP_COLUMN {
                out.push_str(&format!("{heading:<HELP_COLUMN$}{body}\n"));
            } else {
                out.push_str(&heading);
                out.push('\n');
                out.push_str(&format!("{:<HELP_COLUMN$}{body}\n", ""));
            }
        }
    }

    out.push_str(
        "\nMake sure an argument with spaces is quoted. The default value is used \
         when an option is not present on the command line. \"(arg_num)\" shows \
         how many values an option takes.\n",
    );
    out
}

fn render_default(default: DefaultSpec) -> Option<String> {
    match default {
        DefaultSpec::None | DefaultSpec::Derived { .. } => None,
        DefaultSpec::Int(value) => Some(value.to_string()),
        DefaultSpec::Float(value) => Some(value.to_string()),
        DefaultSpec::Text(value) => Some(value.to_string()),
        DefaultSpec::List(items) => Some(items.join(" ")),
    }
}

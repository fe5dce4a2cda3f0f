//! Schema type definitions for the option catalogue.
//!
//! This module defines the data model used to declare command-line options:
//! which aliases they answer to, how many value tokens they consume, what
//! type those tokens coerce to, and how absent options are defaulted. The
//! declarations themselves live in [`registry`](crate::registry); everything
//! here is an immutable value type built once at process start.

use serde::{Deserialize, Serialize};

/// Logical grouping of options, used for help display and nothing else.
///
/// Groups never change parsing or validation semantics; they only decide
/// where an option appears in `--help` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgGroup {
    /// Input selection (media file, styles, external speech regions).
    Input,
    /// Speech-to-text tuning.
    Speech,
    /// Translation tuning.
    Translation,
    /// Output path and formatting.
    Output,
    /// Energy-based audio segmentation tuning.
    Auditok,
    /// Everything that fits nowhere else (help, version, API switches).
    Other,
    /// Informational listings that end the invocation early.
    List,
}

impl ArgGroup {
    /// All groups in help-display order.
    pub const ALL: [ArgGroup; 7] = [
        ArgGroup::Input,
        ArgGroup::Speech,
        ArgGroup::Translation,
        ArgGroup::Output,
        ArgGroup::Auditok,
        ArgGroup::Other,
        ArgGroup::List,
    ];

    /// Section title used in help output.
    pub fn title(self) -> &'static str {
        match self {
            ArgGroup::Input => "Input Options",
            ArgGroup::Speech => "Speech Options",
            ArgGroup::Translation => "Translation Options",
            ArgGroup::Output => "Output Options",
            ArgGroup::Auditok => "Auditok Options",
            ArgGroup::Other => "Other Options",
            ArgGroup::List => "List Options",
        }
    }

    /// One-line section description used in help output.
    pub fn blurb(self) -> &'static str {
        match self {
            ArgGroup::Input => "Args to control input.",
            ArgGroup::Speech => {
                "Args to control speech-to-text. \
                 If Speech Options not given, it will only generate the times."
            }
            ArgGroup::Translation => {
                "Args to control translation. If Translation Options not given, \
                 it will only generate the source language subtitles."
            }
            ArgGroup::Output => "Args to control output.",
            ArgGroup::Auditok => {
                "Args to control Auditok when not using external speech regions."
            }
            ArgGroup::Other => "Other options to control.",
            ArgGroup::List => "List all available values.",
        }
    }
}

/// How many value tokens an option consumes after its alias.
///
/// A single generic consumption loop in the parser interprets these; no
/// option gets ad hoc branching.
///
/// # Examples
///
/// ```
/// use subgen_core::Arity;
///
/// assert_eq!(Arity::Fixed(1).tag(), "(arg_num = 1)");
/// assert_eq!(Arity::Variadic { min: 1, max: 4 }.tag(), "(1 <= arg_num <= 4)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` following tokens. `Fixed(0)` is a bare flag.
    Fixed(usize),
    /// Zero or one token; `fallback` is stored when no token is supplied.
    Optional { fallback: &'static str },
    /// Between `min` and `max` consecutive non-flag tokens.
    Variadic { min: usize, max: usize },
}

impl Arity {
    /// The `(arg_num = ...)` tag shown in help output.
    pub fn tag(self) -> String {
        match self {
            Arity::Fixed(n) => format!("(arg_num = {n})"),
            Arity::Optional { .. } => "(arg_num = 0 or 1)".to_string(),
            Arity::Variadic { min, max } if max == min + 1 => {
                format!("(arg_num = {min} or {max})")
            }
            Arity::Variadic { min, max } => format!("({min} <= arg_num <= {max})"),
        }
    }

    /// Human description of the expected token count, used in arity errors.
    pub fn expected(self) -> String {
        match self {
            Arity::Fixed(n) => format!("exactly {n}"),
            Arity::Optional { .. } => "0 or 1".to_string(),
            Arity::Variadic { min, max } => format!("{min} to {max}"),
        }
    }
}

/// Semantic type of an option's value token(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Presence is `true`, absence is `false`; never takes a token.
    Flag,
    /// Single token parsed as a signed integer.
    Integer,
    /// Single token parsed as a float.
    Float,
    /// Single token stored verbatim as a filesystem path.
    Path,
    /// Single token stored verbatim (language codes, API keys, formats).
    Text,
    /// Ordered sequence of tokens stored verbatim.
    List,
    /// Ordered sequence of tokens, each restricted to a static domain.
    /// Membership is checked by the validator, not the coercer, so that
    /// every domain violation reports through one channel.
    ChoiceList(&'static [&'static str]),
}

impl ValueKind {
    /// Label used in type-error diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ValueKind::Flag => "flag",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Path => "path",
            ValueKind::Text => "string",
            ValueKind::List | ValueKind::ChoiceList(_) => "list",
        }
    }
}

/// What an absent option resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultSpec {
    /// No default; resolves to [`ConfigValue::Unset`] (or `false` for flags).
    None,
    /// Static integer default.
    Int(i64),
    /// Static float default.
    Float(f64),
    /// Static string default.
    Text(&'static str),
    /// Static list default.
    List(&'static [&'static str]),
    /// Default computed from another option's resolved value. `from` names
    /// the source option; `derive` maps its resolved value to this one.
    /// Derivation chains must be acyclic, which the registry checks at
    /// construction time.
    Derived {
        from: &'static str,
        derive: fn(&ConfigValue) -> ConfigValue,
    },
}

/// A fully typed option value, as stored in the resolved configuration.
///
/// Serializes untagged, so a resolved configuration renders as plain JSON
/// (`true`, `10`, `0.5`, `"en"`, `["dst"]`, `null`).
///
/// # Examples
///
/// ```
/// use subgen_core::ConfigValue;
///
/// let v = ConfigValue::Float(0.5);
/// assert_eq!(serde_json::to_string(&v).unwrap(), "0.5");
/// assert_eq!(serde_json::to_string(&ConfigValue::Unset).unwrap(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean flag state.
    Flag(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value (paths, language codes, keys, formats).
    Text(String),
    /// Ordered list of strings.
    List(Vec<String>),
    /// Declared but carrying no value (no user input, no default).
    Unset,
}

impl ConfigValue {
    /// Returns the string payload, if any. [`ConfigValue::Unset`] is `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list payload, if any.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Declaration of a single command-line option.
///
/// Built once by the registry through the constructor/builder methods and
/// never mutated afterward.
///
/// # Examples
///
/// ```
/// use subgen_core::{ArgGroup, Arity, OptionSpec, ValueKind};
///
/// let spec = OptionSpec::value("src-language", "-S", "--src-language",
///                              ArgGroup::Speech, ValueKind::Text)
///     .metavar("lang code")
///     .help("Lang code of language spoken in input file.");
///
/// assert!(spec.matches("-S"));
/// assert!(spec.matches("--src-language"));
/// assert!(!spec.matches("-D"));
/// assert_eq!(spec.arity, Arity::Fixed(1));
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Canonical name the option is known by internally (long form without
    /// the `--` prefix).
    pub name: &'static str,
    /// Short alias including its dash (e.g. `-S`).
    pub short: &'static str,
    /// Long alias including its dashes (e.g. `--src-language`).
    pub long: &'static str,
    /// Help-display group.
    pub group: ArgGroup,
    /// Token-consumption rule.
    pub arity: Arity,
    /// Semantic type of the consumed token(s).
    pub kind: ValueKind,
    /// Default applied when the option is absent.
    pub default: DefaultSpec,
    /// Inclusive numeric range the value must lie in, if any.
    pub range: Option<(f64, f64)>,
    /// Placeholder shown after the alias in help output.
    pub metavar: &'static str,
    /// Terminal options end the invocation with a report instead of a
    /// resolved configuration (help, version, listings).
    pub terminal: bool,
    /// Help text.
    pub help: &'static str,
}

impl OptionSpec {
    /// Creates a bare flag (consumes no tokens, defaults to `false`).
    pub fn flag(
        name: &'static str,
        short: &'static str,
        long: &'static str,
        group: ArgGroup,
    ) -> Self {
        Self {
            name,
            short,
            long,
            group,
            arity: Arity::Fixed(0),
            kind: ValueKind::Flag,
            default: DefaultSpec::None,
            range: None,
            metavar: "",
            terminal: false,
            help: "",
        }
    }

    /// Creates an option that consumes exactly one value token.
    pub fn value(
        name: &'static str,
        short: &'static str,
        long: &'static str,
        group: ArgGroup,
        kind: ValueKind,
    ) -> Self {
        Self {
            name,
            short,
            long,
            group,
            arity: Arity::Fixed(1),
            kind,
            default: DefaultSpec::None,
            range: None,
            metavar: "",
            terminal: false,
            help: "",
        }
    }

    /// Overrides the token-consumption rule.
    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Sets the default applied when the option is absent.
    pub fn default_to(mut self, default: DefaultSpec) -> Self {
        self.default = default;
        self
    }

    /// Declares an inclusive numeric range for the value.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Sets the help-output placeholder.
    pub fn metavar(mut self, metavar: &'static str) -> Self {
        self.metavar = metavar;
        self
    }

    /// Marks the option as terminal (report instead of configuration).
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Sets the help text.
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Checks whether a raw token is one of this option's aliases.
    pub fn matches(&self, token: &str) -> bool {
        token == self.short || token == self.long
    }

    /// Whether this option consumes at least one value token.
    pub fn takes_value(&self) -> bool {
        !matches!(self.arity, Arity::Fixed(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_constructor_consumes_nothing() {
        let spec = OptionSpec::flag("yes", "-y", "--yes", ArgGroup::Output);
        assert_eq!(spec.arity, Arity::Fixed(0));
        assert_eq!(spec.kind, ValueKind::Flag);
        assert!(!spec.takes_value());
    }

    #[test]
    fn test_value_constructor_defaults_to_one_token() {
        let spec = OptionSpec::value(
            "output",
            "-o",
            "--output",
            ArgGroup::Output,
            ValueKind::Path,
        );
        assert_eq!(spec.arity, Arity::Fixed(1));
        assert!(spec.takes_value());
    }

    #[test]
    fn test_matches_both_aliases() {
        let spec = OptionSpec::flag("yes", "-y", "--yes", ArgGroup::Output);
        assert!(spec.matches("-y"));
        assert!(spec.matches("--yes"));
        assert!(!spec.matches("--no"));
    }

    #[test]
    fn test_arity_tags() {
        assert_eq!(Arity::Fixed(0).tag(), "(arg_num = 0)");
        assert_eq!(Arity::Optional { fallback: "" }.tag(), "(arg_num = 0 or 1)");
        assert_eq!(Arity::Variadic { min: 1, max: 2 }.tag(), "(arg_num = 1 or 2)");
        assert_eq!(Arity::Variadic { min: 1, max: 4 }.tag(), "(1 <= arg_num <= 4)");
    }

    #[test]
    fn test_config_value_untagged_json() {
        let json = serde_json::to_string(&ConfigValue::List(vec!["dst".into()])).unwrap();
        assert_eq!(json, r#"["dst"]"#);
        let json = serde_json::to_string(&ConfigValue::Flag(true)).unwrap();
        assert_eq!(json, "true");
    }
}

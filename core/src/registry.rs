//! The option catalogue and its construction-time self-check.
//!
//! [`SchemaRegistry::standard`] declares every option the pipeline accepts,
//! grouped by concern. The registry is built once (see [`registry`]) and is
//! read-only afterward; alias lookup goes through a map built at
//! construction so any number of aliases can point at one option without
//! per-parse scanning.
//!
//! Construction validates structural invariants that would otherwise rot
//! silently: malformed or duplicate aliases, derived defaults pointing at
//! unknown options, and cycles among derived defaults.
//!
//! # Examples
//!
//! ```
//! use subgen_core::registry;
//!
//! let schema = registry();
//! let spec = schema.find_alias("-S").unwrap();
//! assert_eq!(spec.name, "src-language");
//! assert_eq!(schema.find_alias("--src-language").unwrap().name, spec.name);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

use crate::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_CONTINUOUS_SILENCE, DEFAULT_DST_LANGUAGE,
    DEFAULT_ENERGY_THRESHOLD, DEFAULT_LINES_PER_TRANS, DEFAULT_SLEEP_SECONDS,
    DEFAULT_SRC_LANGUAGE, EXT_REGIONS_UNSPECIFIED, MAX_REGION_SIZE, MIN_REGION_SIZE,
    OUTPUT_FILE_KINDS, STYLES_FROM_EXT_REGIONS,
};
use crate::resolve::derive_format_from_output;
use crate::types::{ArgGroup, Arity, DefaultSpec, OptionSpec, ValueKind};

/// Structural problems in an option catalogue.
///
/// These are programming errors in the catalogue itself, not user input
/// errors; the standard catalogue is checked by tests and at first use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Short alias does not look like `-x...`.
    #[error("invalid short alias format: {0}")]
    InvalidShortAlias(String),
    /// Long alias does not look like `--x...`.
    #[error("invalid long alias format: {0}")]
    InvalidLongAlias(String),
    /// Two options share an alias.
    #[error("duplicate alias: {0}")]
    DuplicateAlias(String),
    /// Two options share a canonical name.
    #[error("duplicate option name: {0}")]
    DuplicateName(String),
    /// A derived default names a source option that does not exist.
    #[error("{option}: derived default references unknown option {from}")]
    UnknownDerivedSource {
        /// Option carrying the derived default.
        option: String,
        /// The missing source.
        from: String,
    },
    /// Derived defaults form a cycle.
    #[error("derived default cycle: {0}")]
    DerivedCycle(String),
}

/// Immutable catalogue of option declarations with alias lookup.
pub struct SchemaRegistry {
    specs: Vec<OptionSpec>,
    aliases: HashMap<&'static str, usize>,
    names: HashMap<&'static str, usize>,
}

impl SchemaRegistry {
    /// Builds a registry from a list of declarations, checking structural
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found: malformed alias, duplicate
    /// alias or name, unknown derived-default source, or a derived-default
    /// cycle.
    pub fn new(specs: Vec<OptionSpec>) -> Result<Self, SchemaError> {
        let mut aliases: HashMap<&'static str, usize> = HashMap::new();
        let mut names: HashMap<&'static str, usize> = HashMap::new();

        for (index, spec) in specs.iter().enumerate() {
            if !spec.short.starts_with('-') || spec.short.starts_with("--") || spec.short.len() < 2
            {
                return Err(SchemaError::InvalidShortAlias(spec.short.to_string()));
            }
            if !spec.long.starts_with("--") || spec.long.len() < 3 {
                return Err(SchemaError::InvalidLongAlias(spec.long.to_string()));
            }
            if names.insert(spec.name, index).is_some() {
                return Err(SchemaError::DuplicateName(spec.name.to_string()));
            }
            for alias in [spec.short, spec.long] {
                if aliases.insert(alias, index).is_some() {
                    return Err(SchemaError::DuplicateAlias(alias.to_string()));
                }
            }
        }

        let registry = Self {
            specs,
            aliases,
            names,
        };
        registry.check_derived()?;
        Ok(registry)
    }

    /// Walks every derived-default chain, rejecting unknown sources and
    /// cycles. Chains are expected to stay shallow (one level today), but
    /// the walk handles arbitrary depth so the invariant holds if the
    /// catalogue grows.
    fn check_derived(&self) -> Result<(), SchemaError> {
        for spec in &self.specs {
            let DefaultSpec::Derived { from, .. } = spec.default else {
                continue;
            };
            let mut path = vec![spec.name];
            let mut current = from;
            loop {
                let Some(source) = self.get(current) else {
                    return Err(SchemaError::UnknownDerivedSource {
                        option: spec.name.to_string(),
                        from: current.to_string(),
                    });
                };
                if path.contains(&source.name) {
                    path.push(source.name);
                    return Err(SchemaError::DerivedCycle(path.join(" -> ")));
                }
                path.push(source.name);
                match source.default {
                    DefaultSpec::Derived { from: next, .. } => current = next,
                    _ => break,
                }
            }
        }
        Ok(())
    }

    /// The full option catalogue used by the subtitle pipeline.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalogue breaks its own structural
    /// invariants, which is a bug in this crate and covered by tests.
    pub fn standard() -> Self {
        match Self::new(standard_specs()) {
            Ok(registry) => registry,
            Err(err) => panic!("built-in option catalogue is invalid: {err}"),
        }
    }

    /// Iterates the catalogue in declaration order.
    pub fn describe(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Iterates the options belonging to one help-display group, in
    /// declaration order.
    pub fn group(&self, group: ArgGroup) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter().filter(move |spec| spec.group == group)
    }

    /// Looks an option up by alias token (`-S` or `--src-language`).
    pub fn find_alias(&self, token: &str) -> Option<&OptionSpec> {
        self.aliases.get(token).map(|&index| &self.specs[index])
    }

    /// Whether a raw token is a registered alias.
    pub fn is_alias(&self, token: &str) -> bool {
        self.aliases.contains_key(token)
    }

    /// Looks an option up by canonical name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.names.get(name).map(|&index| &self.specs[index])
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Shared read-only registry; safe to reuse across any number of parses.
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::standard);
    &REGISTRY
}

fn standard_specs() -> Vec<OptionSpec> {
    use ArgGroup::*;

    vec![
        // Input
        OptionSpec::value("input", "-i", "--input", Input, ValueKind::Path)
            .metavar("path")
            .help(
                "The path to the video/audio/subtitles file that needs subtitles. \
                 When it is a subtitles file, the program will only translate it.",
            ),
        OptionSpec::value("styles", "-sty", "--styles", Input, ValueKind::Path)
            .arity(Arity::Optional {
                fallback: STYLES_FROM_EXT_REGIONS,
            })
            .metavar("path")
            .help(
                "Valid when your output format is \"ass\"/\"ssa\". Path to the subtitles \
                 file which provides \"ass\"/\"ssa\" styles for your output. With no \
                 argument, styles are taken from the \"-er\"/\"--ext-regions\" file.",
            ),
        OptionSpec::value("styles-name", "-sn", "--styles-name", Input, ValueKind::List)
            .arity(Arity::Variadic { min: 1, max: 2 })
            .metavar("style-name")
            .help(
                "Valid when your output format is \"ass\"/\"ssa\" and \"-sty\"/\"--styles\" \
                 is given. With one name, all events use that style. With two, src \
                 language events use the first and dst language events the second.",
            ),
        OptionSpec::value("ext-regions", "-er", "--ext-regions", Input, ValueKind::Path)
            .arity(Arity::Optional {
                fallback: EXT_REGIONS_UNSPECIFIED,
            })
            .metavar("path")
            .help(
                "Path to the subtitles file which provides external speech regions, \
                 overriding the auditok method of finding speech regions.",
            ),
        // Speech
        OptionSpec::value("gspeechv2", "-gsv2", "--gspeechv2", Speech, ValueKind::Text)
            .metavar("key")
            .help(
                "The Google Speech V2 API key to be used. If not provided, the free \
                 API key is used instead.",
            ),
        OptionSpec::value("src-language", "-S", "--src-language", Speech, ValueKind::Text)
            .default_to(DefaultSpec::Text(DEFAULT_SRC_LANGUAGE))
            .metavar("lang code")
            .help("Lang code of the language spoken in the input file."),
        OptionSpec::value(
            "min-confidence",
            "-mnc",
            "--min-confidence",
            Speech,
            ValueKind::Float,
        )
        .default_to(DefaultSpec::Float(0.0))
        .range(0.0, 1.0)
        .metavar("float")
        .help(
            "Speech-to-text response confidence floor, between 0 and 1. Results \
             scoring below it are dropped.",
        ),
        OptionSpec::value(
            "speech-concurrency",
            "-sc",
            "--speech-concurrency",
            Speech,
            ValueKind::Integer,
        )
        .default_to(DefaultSpec::Int(DEFAULT_CONCURRENCY))
        .metavar("integer")
        .help("Number of concurrent speech-to-text requests to make."),
        // Translation
        OptionSpec::value(
            "dst-language",
            "-D",
            "--dst-language",
            Translation,
            ValueKind::Text,
        )
        .default_to(DefaultSpec::Text(DEFAULT_DST_LANGUAGE))
        .metavar("lang code")
        .help("Lang code of the desired language for the subtitles."),
        OptionSpec::value("gtransv2", "-gtv2", "--gtransv2", Translation, ValueKind::Text)
            .metavar("key")
            .help(
                "The Google Translate V2 API key to be used. If not provided, the \
                 free API is used instead.",
            ),
        OptionSpec::value(
            "lines-per-trans",
            "-lpt",
            "--lines-per-trans",
            Translation,
            ValueKind::Integer,
        )
        .default_to(DefaultSpec::Int(DEFAULT_LINES_PER_TRANS))
        .metavar("integer")
        .help("Number of lines per translation request."),
        OptionSpec::value(
            "sleep-seconds",
            "-slp",
            "--sleep-seconds",
            Translation,
            ValueKind::Integer,
        )
        .default_to(DefaultSpec::Int(DEFAULT_SLEEP_SECONDS))
        .metavar("second")
        .help("Seconds to sleep between two translation requests."),
        OptionSpec::value(
            "trans-concurrency",
            "-tc",
            "--trans-concurrency",
            Translation,
            ValueKind::Integer,
        )
        .default_to(DefaultSpec::Int(DEFAULT_CONCURRENCY))
        .metavar("integer")
        .help("Number of concurrent translation requests to make."),
        // Output
        OptionSpec::value("output", "-o", "--output", Output, ValueKind::Path)
            .metavar("path")
            .help(
                "The output path for the subtitles file. Defaults to the input path \
                 combined with the proper name tails.",
            ),
        OptionSpec::flag("yes", "-y", "--yes", Output).help(
            "Avoid any pause and overwrite files. Stop the program when the args \
             are wrong.",
        ),
        OptionSpec::value(
            "output-files",
            "-of",
            "--output-files",
            Output,
            ValueKind::ChoiceList(OUTPUT_FILE_KINDS),
        )
        .arity(Arity::Variadic { min: 1, max: 4 })
        .default_to(DefaultSpec::List(&["dst"]))
        .metavar("type")
        .help("Output more files. Available types: regions, src, dst, bilingual, all."),
        OptionSpec::value("format", "-F", "--format", Output, ValueKind::Text)
            .default_to(DefaultSpec::Derived {
                from: "output",
                derive: derive_format_from_output,
            })
            .metavar("format")
            .help(
                "Destination subtitles format. If not provided, uses the extension \
                 of the \"-o\"/\"--output\" arg, or \"srt\" when there is none.",
            ),
        OptionSpec::value("sub-fps", "-fps", "--sub-fps", Output, ValueKind::Float)
            .metavar("float")
            .help(
                "Valid when your output format is \"sub\". Overrides the fps check \
                 on the input file.",
            ),
        OptionSpec::flag(
            "drop-empty-regions",
            "-der",
            "--drop-empty-regions",
            Output,
        )
        .help("Drop any regions without text."),
        // Auditok
        OptionSpec::value(
            "energy-threshold",
            "-et",
            "--energy-threshold",
            Auditok,
            ValueKind::Integer,
        )
        .default_to(DefaultSpec::Int(DEFAULT_ENERGY_THRESHOLD))
        .metavar("energy")
        .help("The energy level which determines the region to be detected."),
        OptionSpec::value(
            "min-region-size",
            "-mnrs",
            "--min-region-size",
            Auditok,
            ValueKind::Float,
        )
        .default_to(DefaultSpec::Float(MIN_REGION_SIZE))
        .metavar("second")
        .help("Minimum region size."),
        OptionSpec::value(
            "max-region-size",
            "-mxrs",
            "--max-region-size",
            Auditok,
            ValueKind::Float,
        )
        .default_to(DefaultSpec::Float(MAX_REGION_SIZE))
        .metavar("second")
        .help("Maximum region size."),
        OptionSpec::value(
            "max-continuous-silence",
            "-mxcs",
            "--max-continuous-silence",
            Auditok,
            ValueKind::Float,
        )
        .default_to(DefaultSpec::Float(DEFAULT_CONTINUOUS_SILENCE))
        .metavar("second")
        .help("Maximum length of a tolerated silence within a valid audio activity."),
        OptionSpec::flag("strict-min-length", "-sml", "--strict-min-length", Auditok)
            .help("Reject regions shorter than the minimum region size outright."),
        OptionSpec::flag(
            "drop-trailing-silence",
            "-dts",
            "--drop-trailing-silence",
            Auditok,
        )
        .help("Drop trailing silence from detected regions."),
        // Other
        OptionSpec::flag(
            "http-speech-to-text-api",
            "-htp",
            "--http-speech-to-text-api",
            Other,
        )
        .help("Change the Google Speech V2 API url into the http one."),
        OptionSpec::flag("help", "-h", "--help", Other)
            .terminal()
            .help("Show this help message and exit."),
        OptionSpec::flag("version", "-V", "--version", Other)
            .terminal()
            .help("Show program version and exit."),
        // List
        OptionSpec::flag("list-formats", "-lf", "--list-formats", List)
            .terminal()
            .help(
                "List all available output subtitles formats. If your format is not \
                 supported, you can use ffmpeg or SubtitleEdit to convert.",
            ),
        OptionSpec::flag(
            "list-speech-to-text-codes",
            "-lsc",
            "--list-speech-to-text-codes",
            List,
        )
        .terminal()
        .help("List all available source language codes for speech-to-text."),
        OptionSpec::flag(
            "list-translation-codes",
            "-ltc",
            "--list-translation-codes",
            List,
        )
        .terminal()
        .help("List all available destination language codes for translation."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfigValue;

    #[test]
    fn test_standard_catalogue_is_valid() {
        let registry = SchemaRegistry::new(standard_specs());
        assert!(registry.is_ok());
    }

    #[test]
    fn test_standard_catalogue_size() {
        assert_eq!(registry().len(), 31);
        assert!(!registry().is_empty());
    }

    #[test]
    fn test_alias_lookup_both_forms() {
        let schema = registry();
        for spec in schema.describe() {
            assert_eq!(schema.find_alias(spec.short).map(|s| s.name), Some(spec.name));
            assert_eq!(schema.find_alias(spec.long).map(|s| s.name), Some(spec.name));
        }
    }

    #[test]
    fn test_rejects_duplicate_alias() {
        let specs = vec![
            OptionSpec::flag("yes", "-y", "--yes", ArgGroup::Output),
            OptionSpec::flag("yell", "-y", "--yell", ArgGroup::Output),
        ];
        assert_eq!(
            SchemaRegistry::new(specs).err(),
            Some(SchemaError::DuplicateAlias("-y".to_string()))
        );
    }

    #[test]
    fn test_rejects_malformed_aliases() {
        let specs = vec![OptionSpec::flag("yes", "y", "--yes", ArgGroup::Output)];
        assert_eq!(
            SchemaRegistry::new(specs).err(),
            Some(SchemaError::InvalidShortAlias("y".to_string()))
        );

        let specs = vec![OptionSpec::flag("yes", "-y", "-yes", ArgGroup::Output)];
        assert_eq!(
            SchemaRegistry::new(specs).err(),
            Some(SchemaError::InvalidLongAlias("-yes".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_derived_source() {
        fn passthrough(value: &ConfigValue) -> ConfigValue {
            value.clone()
        }
        let specs = vec![
            OptionSpec::value("format", "-F", "--format", ArgGroup::Output, ValueKind::Text)
                .default_to(DefaultSpec::Derived {
                    from: "nonexistent",
                    derive: passthrough,
                }),
        ];
        assert!(matches!(
            SchemaRegistry::new(specs).err(),
            Some(SchemaError::UnknownDerivedSource { .. })
        ));
    }

    #[test]
    fn test_rejects_derived_cycle() {
        fn passthrough(value: &ConfigValue) -> ConfigValue {
            value.clone()
        }
        let specs = vec![
            OptionSpec::value("a", "-a", "--a-opt", ArgGroup::Output, ValueKind::Text)
                .default_to(DefaultSpec::Derived {
                    from: "b",
                    derive: passthrough,
                }),
            OptionSpec::value("b", "-b", "--b-opt", ArgGroup::Output, ValueKind::Text)
                .default_to(DefaultSpec::Derived {
                    from: "a",
                    derive: passthrough,
                }),
        ];
        assert!(matches!(
            SchemaRegistry::new(specs).err(),
            Some(SchemaError::DerivedCycle(_))
        ));
    }

    #[test]
    fn test_terminal_options_are_flags() {
        for spec in registry().describe().filter(|s| s.terminal) {
            assert!(!spec.takes_value(), "{} must not take a value", spec.name);
        }
    }

    #[test]
    fn test_output_files_domain() {
        let spec = registry().get("output-files").unwrap();
        match spec.kind {
            ValueKind::ChoiceList(domain) => {
                assert_eq!(domain, &["regions", "src", "dst", "bilingual", "all"]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}

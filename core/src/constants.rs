//! Program metadata and the fixed defaults baked into the option catalogue.

/// Program name used in usage lines and diagnostics.
pub const NAME: &str = "subgen";

/// Program version (from the crate manifest).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line program description shown at the top of help output.
pub const DESCRIPTION: &str =
    "Generate subtitles from video/audio, with optional speech-to-text and translation.";

/// Default number of concurrent speech or translation requests.
pub const DEFAULT_CONCURRENCY: i64 = 10;

/// Default number of subtitle lines per translation request.
pub const DEFAULT_LINES_PER_TRANS: i64 = 15;

/// Default seconds slept between two translation requests.
pub const DEFAULT_SLEEP_SECONDS: i64 = 1;

/// Destination subtitle format used when neither `--format` nor an output
/// extension decides it.
pub const DEFAULT_SUBTITLES_FORMAT: &str = "srt";

/// Default energy level above which an audio region is detected.
pub const DEFAULT_ENERGY_THRESHOLD: i64 = 45;

/// Default minimum detected region size, in seconds.
pub const MIN_REGION_SIZE: f64 = 0.5;

/// Default maximum detected region size, in seconds.
pub const MAX_REGION_SIZE: f64 = 6.0;

/// Default maximum tolerated silence inside a region, in seconds.
pub const DEFAULT_CONTINUOUS_SILENCE: f64 = 0.3;

/// Default source (speech) language code.
pub const DEFAULT_SRC_LANGUAGE: &str = "en";

/// Default destination (translation) language code.
pub const DEFAULT_DST_LANGUAGE: &str = "en";

/// Sentinel stored when `--styles` is supplied without a path: take styles
/// from the external speech-regions file instead.
pub const STYLES_FROM_EXT_REGIONS: &str = " ";

/// Sentinel stored when `--ext-regions` is supplied without a path.
pub const EXT_REGIONS_UNSPECIFIED: &str = "";

/// Values accepted by `--output-files`. `all` expands to every concrete
/// kind during default resolution.
pub const OUTPUT_FILE_KINDS: &[&str] = &["regions", "src", "dst", "bilingual", "all"];

/// The concrete output-file kinds `all` expands to.
pub const OUTPUT_FILE_KINDS_ALL: &[&str] = &["regions", "src", "dst", "bilingual"];

//! Enumeration tables rendered by the listing reports.
//!
//! These are data, not logic: the configuration core validates structure
//! and hands these through untouched. Format names follow what the
//! subtitle serializer supports; language tables pair an IETF-style code
//! with a display name.

use subgen_core::ListData;

/// Output subtitle formats the pipeline can serialize.
pub const OUTPUT_FORMATS: &[&str] = &[
    "ass", "json", "microdvd", "mpl2", "srt", "ssa", "sub", "tmp", "vtt",
];

/// Language codes accepted for speech-to-text.
pub const SPEECH_CODES: &[(&str, &str)] = &[
    ("af-ZA", "Afrikaans (South Africa)"),
    ("ar-EG", "Arabic (Egypt)"),
    ("bg-BG", "Bulgarian (Bulgaria)"),
    ("ca-ES", "Catalan (Spain)"),
    ("cs-CZ", "Czech (Czech Republic)"),
    ("da-DK", "Danish (Denmark)"),
    ("de-DE", "German (Germany)"),
    ("el-GR", "Greek (Greece)"),
    ("en-AU", "English (Australia)"),
    ("en-GB", "English (United Kingdom)"),
    ("en-US", "English (United States)"),
    ("es-ES", "Spanish (Spain)"),
    ("es-MX", "Spanish (Mexico)"),
    ("fi-FI", "Finnish (Finland)"),
    ("fr-FR", "French (France)"),
    ("he-IL", "Hebrew (Israel)"),
    ("hi-IN", "Hindi (India)"),
    ("hu-HU", "Hungarian (Hungary)"),
    ("id-ID", "Indonesian (Indonesia)"),
    ("it-IT", "Italian (Italy)"),
    ("ja-JP", "Japanese (Japan)"),
    ("ko-KR", "Korean (South Korea)"),
    ("nb-NO", "Norwegian Bokmal (Norway)"),
    ("nl-NL", "Dutch (Netherlands)"),
    ("pl-PL", "Polish (Poland)"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro-RO", "Romanian (Romania)"),
    ("ru-RU", "Russian (Russia)"),
    ("sk-SK", "Slovak (Slovakia)"),
    ("sv-SE", "Swedish (Sweden)"),
    ("th-TH", "Thai (Thailand)"),
    ("tr-TR", "Turkish (Turkey)"),
    ("uk-UA", "Ukrainian (Ukraine)"),
    ("vi-VN", "Vietnamese (Vietnam)"),
    ("zh-CN", "Chinese, Mandarin (Simplified)"),
    ("zh-TW", "Chinese, Mandarin (Traditional)"),
];

/// Language codes accepted for translation. These differ from the
/// speech-to-text codes: translation uses bare primary subtags.
pub const TRANSLATION_CODES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// The tables bundled for report rendering.
pub fn list_data() -> ListData<'static> {
    ListData {
        formats: OUTPUT_FORMATS,
        speech_codes: SPEECH_CODES,
        translation_codes: TRANSLATION_CODES,
    }
}

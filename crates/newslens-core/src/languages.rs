//! Translation language table: ISO 639-1 codes to NLLB-200 codes.

use crate::error::{Error, Result};

/// ISO 639-1 codes accepted for translation, with their NLLB-200 codes.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "eng_Latn"),
    ("fr", "fra_Latn"),
    ("es", "spa_Latn"),
    ("de", "deu_Latn"),
    ("it", "ita_Latn"),
    ("pt", "por_Latn"),
    ("ru", "rus_Cyrl"),
    ("zh", "zho_Hans"),
    ("ja", "jpn_Jpan"),
    ("ko", "kor_Hang"),
    ("hi", "hin_Deva"),
    ("ar", "ara_Arab"),
    ("bn", "ben_Beng"),
    ("ta", "tam_Taml"),
    ("te", "tel_Telu"),
    ("ml", "mal_Mlym"),
];

pub fn language_code(iso: &str) -> Result<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(code, _)| *code == iso)
        .map(|(_, nllb)| *nllb)
        .ok_or_else(|| Error::Input(format!("Unsupported language: {iso}")))
}

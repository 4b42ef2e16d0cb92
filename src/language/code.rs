//! Display labels for input-locale identifiers

use std::fmt;

/// Known language ids and their two-letter labels
const KNOWN_LANGUAGES: &[(u16, &str)] = &[
    (0x0409, "EN"),
    (0x0422, "UK"),
    (0x0419, "RU"),
    (0x0415, "PL"),
    (0x0407, "DE"),
    (0x040C, "FR"),
];

/// Short label for the active input language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCode {
    /// Language present in the lookup table
    Known(&'static str),
    /// Language missing from the table, shown by the low byte of its id
    Other(u8),
    /// No foreground window or the locale query failed
    Unknown,
}

impl LanguageCode {
    /// Look up a 16-bit language id
    pub fn from_lang_id(lang_id: u16) -> Self {
        KNOWN_LANGUAGES
            .iter()
            .find(|(id, _)| *id == lang_id)
            .map(|&(_, label)| LanguageCode::Known(label))
            .unwrap_or(LanguageCode::Other((lang_id & 0xFF) as u8))
    }

    /// Look up an input-locale identifier; the language id is its low word
    pub fn from_locale(locale: usize) -> Self {
        Self::from_lang_id((locale & 0xFFFF) as u16)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageCode::Known(label) => f.write_str(label),
            LanguageCode::Other(low) => write!(f, "{:02X}", low),
            LanguageCode::Unknown => f.write_str("??"),
        }
    }
}

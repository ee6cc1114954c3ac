//! services/api/src/web/i18n.rs
//!
//! The caller-side localization store: positional labels and language
//! display names for the supported locales. The core never resolves these
//! itself; this module supplies them when a reading is requested.

use tarot_core::domain::{Locale, SpreadLabels};

/// The locale used when a request does not name one.
pub const DEFAULT_LOCALE: Locale = Locale::Th;

/// Resolves the four positional display labels for a locale.
pub fn spread_labels(locale: Locale) -> SpreadLabels {
    match locale {
        Locale::En => SpreadLabels {
            past: "Past".to_string(),
            present: "Present".to_string(),
            future: "Future".to_string(),
            conclusion: "Conclusion".to_string(),
        },
        Locale::Th => SpreadLabels {
            past: "อดีต".to_string(),
            present: "ปัจจุบัน".to_string(),
            future: "อนาคต".to_string(),
            conclusion: "บทสรุป".to_string(),
        },
    }
}

/// The human-readable name of the language the generation service should
/// answer in.
pub fn language_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "English",
        Locale::Th => "ไทย",
    }
}

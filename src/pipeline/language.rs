//! Language-specific template strings.
//!
//! The table is closed and compiled in: every bundle is a `&'static` value,
//! nothing is read from disk or mutated at runtime, and `resolve` is total —
//! any code it does not recognise (including the empty string) yields the
//! English default, so downstream stages never see a missing bundle.

/// Locale-specific strings used by the renderer and the validator.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageBundle {
    /// Babel locale identifier for the preamble.
    pub locale_id: &'static str,
    /// Heading of the main body section.
    pub heading_body: &'static str,
    /// Heading of the auxiliary/recommendations section.
    pub heading_extra: &'static str,
    /// Fallback item text when a request carries no usable extra content.
    pub empty_extra_text: &'static str,
}

const SPANISH: LanguageBundle = LanguageBundle {
    locale_id: "spanish",
    heading_body: "Contenido",
    heading_extra: "Páginas recomendadas",
    empty_extra_text: "No se encontraron sugerencias relevantes.",
};

const ENGLISH: LanguageBundle = LanguageBundle {
    locale_id: "english",
    heading_body: "Content",
    heading_extra: "Recommended Pages",
    empty_extra_text: "No relevant suggestions found.",
};

/// Map a two-letter language code onto its bundle.
///
/// Pure and total; unknown codes resolve to English.
pub fn resolve(code: &str) -> &'static LanguageBundle {
    match code {
        "es" => &SPANISH,
        "en" => &ENGLISH,
        _ => &ENGLISH,
    }
}

//! # Description Templates
//!
//! The fixed French texts and the pure half of description synthesis.
//! Translation itself lives in `fiche-pipeline`; everything here is
//! deterministic.
//!
//! ## Decision Order
//! ```text
//! found = false ──────────────────────────► NOT_FOUND_DESCRIPTION
//!       │
//!       ▼
//! source description translated? ── yes ──► finish_sentence(translation)
//!       │ no / failed
//!       ▼
//! generic_description(name, category)
//!   "<name> est un produit de la catégorie <category>."
//! ```

/// Description stored for identifiers no provider knows.
pub const NOT_FOUND_DESCRIPTION: &str =
    "Produit non trouvé : aucune information n'est disponible pour ce code.";

/// Stands in for a missing name. Capitalized since it opens the sentence.
pub const NAME_PLACEHOLDER: &str = "Ce produit";

/// Stands in for a missing category.
pub const CATEGORY_PLACEHOLDER: &str = "général";

/// Builds the templated sentence from name and category.
///
/// Missing or blank values are replaced with neutral placeholders so the
/// sentence is always well-formed.
///
/// ## Example
/// ```rust
/// use fiche_core::description::generic_description;
///
/// assert_eq!(
///     generic_description(Some("Widget"), Some("Tools")),
///     "Widget est un produit de la catégorie Tools."
/// );
/// assert_eq!(
///     generic_description(None, None),
///     "Ce produit est un produit de la catégorie général."
/// );
/// ```
pub fn generic_description(name: Option<&str>, category: Option<&str>) -> String {
    let name = non_blank(name).unwrap_or(NAME_PLACEHOLDER);
    let category = non_blank(category).unwrap_or(CATEGORY_PLACEHOLDER);
    format!("{} est un produit de la catégorie {}.", name, category)
}

/// Trims a translated text and makes sure it ends with sentence punctuation.
///
/// Returns `None` when nothing usable is left, which the synthesizer treats
/// as a failed translation.
pub fn finish_sentence(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut sentence = text.to_string();
    if !sentence.ends_with(['.', '!', '?', '…']) {
        sentence.push('.');
    }
    Some(sentence)
}

/// True when a language code already designates French (`fr`, `fr-FR`, `FR`).
pub fn is_french(language: &str) -> bool {
    let language = language.trim().to_ascii_lowercase();
    language == "fr" || language.starts_with("fr-") || language.starts_with("fr_")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

//! Text normalization helpers
//!
//! Class identity is decided on canonical names, so every path that mints or
//! looks up a class goes through [`canonical_name`].

/// Canonicalize a class name: first character uppercased, the rest lowercased.
///
/// Surrounding whitespace is trimmed.
///
/// ```
/// use umlweave::core::canonical_name;
///
/// assert_eq!(canonical_name("car"), "Car");
/// assert_eq!(canonical_name("WHEELS"), "Wheels");
/// ```
pub fn canonical_name(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Lowercase a phrase and collapse internal whitespace to single spaces
pub fn normalize_phrase(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lookup key for a localized name.
pub fn key(name: &str) -> String {
    name.to_lowercase()
}

/// Key used when deduplicating a dictionary by its English name.
pub fn dedupe_key(en: &str) -> String {
    en.trim().to_lowercase()
}

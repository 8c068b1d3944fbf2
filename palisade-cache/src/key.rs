//! Cache key derivation.

const KEY_PREFIX: &str = "palisade:translation:";

/// Normalize request text for keying: trimmed, lowercased, internal
/// whitespace collapsed. Two requests differing only in spacing or
/// case hit the same entry.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Derive the cache key for a request. A pure function of content:
/// normalized text, provider, model, and schema version — never the
/// caller's identity.
pub fn derive_key(
    text: &str,
    provider: Option<&str>,
    model: Option<&str>,
    schema_id: &str,
) -> String {
    let material = format!(
        "{}\x1f{}\x1f{}\x1f{}",
        normalize(text),
        provider.unwrap_or(""),
        model.unwrap_or(""),
        schema_id
    );
    format!("{KEY_PREFIX}{}", blake3::hash(material.as_bytes()).to_hex())
}

//! Slug derivation for project names.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static INVALID_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9_\s-]").expect("valid regex")
});
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// Converts a human readable name into a slug usable in paths.
///
/// The text is decomposed with NFKD and reduced to its ASCII characters, so
/// accents and compatibility forms fold to their base letters. Characters
/// other than alphanumerics, underscores, hyphens and whitespace are removed,
/// the result is trimmed and lowercased, and runs of hyphens and whitespace
/// become a single hyphen.
pub fn slugify(text: &str) -> String {
    let folded: String = text.nfkd().filter(char::is_ascii).collect();
    let stripped = INVALID_CHARS.replace_all(&folded, "");
    let lowered = stripped.trim().to_lowercase();
    SEPARATORS.replace_all(&lowered, "-").into_owned()
}

//! Display-language resolution.

use pokedex_sdk::Language;

/// Language used when the request names none or an unsupported one.
pub const DEFAULT_LANGUAGE: Language = Language::English;

/// Resolve a requested language code, falling back to [`DEFAULT_LANGUAGE`].
///
/// Matching is exact: `"English"` is not a supported code.
#[must_use]
pub fn resolve(code: Option<&str>) -> Language {
    code.and_then(Language::from_code)
        .unwrap_or(DEFAULT_LANGUAGE)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn supported_codes_resolve_to_themselves() {
        for lang in Language::ALL {
            assert_eq!(resolve(Some(lang.code())), lang);
        }
    }

    #[test]
    fn anything_else_falls_back_to_english() {
        for code in ["", "German", "ENGLISH", "fr", " french", "japanese "] {
            assert_eq!(resolve(Some(code)), Language::English, "code {code:?}");
        }
        assert_eq!(resolve(None), Language::English);
    }
}

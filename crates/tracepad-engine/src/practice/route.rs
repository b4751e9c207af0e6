//! Hash routes for shareable practice links.
//!
//! ```text
//! #/                                  category select
//! #/words                             word input
//! #/words/<word>                      word tracing (percent-encoded)
//! #/letters | #/numbers               mode select
//! #/<category>/<mode>[/<case>]        tracing (case only for letters)
//! ```

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::sequence::{Category, Mode};
use crate::api::content::CaseMode;

/// Navigation state encoded in the URL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Route {
    CategorySelect,
    WordInput,
    ModeSelect { category: Category },
    Tracing { category: Category, mode: Mode, case: CaseMode },
    WordTracing { word: String },
}

impl Route {
    /// Decode a fragment (with or without the leading `#`). Anything
    /// unrecognised falls back to the nearest valid screen.
    pub fn parse(hash: &str) -> Self {
        let parts: Vec<&str> = hash
            .trim_start_matches('#')
            .split('/')
            .filter(|p| !p.is_empty())
            .collect();

        let Some(&first) = parts.first() else {
            return Self::CategorySelect;
        };

        if first == "words" {
            return match parts.get(1) {
                None => Self::WordInput,
                Some(raw) => Self::WordTracing {
                    word: percent_decode(raw).unwrap_or_else(|| raw.to_string()),
                },
            };
        }

        let category = match first.parse::<Category>() {
            Ok(c @ (Category::Letters | Category::Numbers)) => c,
            _ => return Self::CategorySelect,
        };

        let Some(mode) = parts.get(1).and_then(|m| m.parse::<Mode>().ok()) else {
            return Self::ModeSelect { category };
        };

        let case = match category {
            Category::Letters => parts
                .get(2)
                .and_then(|c| c.parse::<CaseMode>().ok())
                .unwrap_or_default(),
            _ => CaseMode::Uppercase,
        };

        Self::Tracing { category, mode, case }
    }

    /// Encode as a fragment, including the leading `#`.
    pub fn to_hash(&self) -> String {
        match self {
            Self::CategorySelect => "#/".to_string(),
            Self::WordInput
            | Self::ModeSelect { category: Category::Words }
            | Self::Tracing { category: Category::Words, .. } => "#/words".to_string(),
            Self::ModeSelect { category } => format!("#/{category}"),
            Self::Tracing { category: Category::Letters, mode, case } => {
                format!("#/letters/{mode}/{case}")
            }
            Self::Tracing { category, mode, .. } => format!("#/{category}/{mode}"),
            Self::WordTracing { word } if word.is_empty() => "#/words".to_string(),
            Self::WordTracing { word } => format!("#/words/{}", percent_encode(word)),
        }
    }

    /// The same route with a different case. Only letter tracing routes carry a case.
    pub fn with_case(&self, case: CaseMode) -> Self {
        match self {
            Self::Tracing { category: Category::Letters, mode, .. } => Self::Tracing {
                category: Category::Letters,
                mode: *mode,
                case,
            },
            other => other.clone(),
        }
    }
}

/// Everything `encodeURIComponent` escapes: all but ASCII alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a word for the URL fragment.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Decode `%XX` escapes. `None` when an escape is not two hex digits or the
/// bytes are not UTF-8, matching `decodeURIComponent`.
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }
    percent_decode_str(input)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracing(category: Category, mode: Mode, case: CaseMode) -> Route {
        Route::Tracing { category, mode, case }
    }

    #[test]
    fn parse_screens() {
        assert_eq!(Route::parse(""), Route::CategorySelect);
        assert_eq!(Route::parse("#/"), Route::CategorySelect);
        assert_eq!(Route::parse("#/words"), Route::WordInput);
        assert_eq!(Route::parse("#/numbers"), Route::ModeSelect { category: Category::Numbers });
        assert_eq!(
            Route::parse("#/letters/random/both"),
            tracing(Category::Letters, Mode::Random, CaseMode::Both)
        );
    }

    #[test]
    fn parse_fallbacks() {
        assert_eq!(Route::parse("#/shapes/sequence"), Route::CategorySelect);
        assert_eq!(
            Route::parse("#/letters/shuffle"),
            Route::ModeSelect { category: Category::Letters }
        );
        assert_eq!(
            Route::parse("#/letters/sequence/italic"),
            tracing(Category::Letters, Mode::Sequence, CaseMode::Uppercase)
        );
        // numbers never carry a case
        assert_eq!(
            Route::parse("#/numbers/sequence/lowercase"),
            tracing(Category::Numbers, Mode::Sequence, CaseMode::Uppercase)
        );
    }

    #[test]
    fn build_hashes() {
        assert_eq!(Route::CategorySelect.to_hash(), "#/");
        assert_eq!(Route::WordInput.to_hash(), "#/words");
        assert_eq!(Route::ModeSelect { category: Category::Letters }.to_hash(), "#/letters");
        assert_eq!(
            tracing(Category::Numbers, Mode::Random, CaseMode::Lowercase).to_hash(),
            "#/numbers/random"
        );
        assert_eq!(
            tracing(Category::Letters, Mode::Sequence, CaseMode::Lowercase).to_hash(),
            "#/letters/sequence/lowercase"
        );
    }

    #[test]
    fn word_routes_are_percent_encoded() {
        let route = Route::WordTracing { word: "PÃO DOCE".to_string() };
        let hash = route.to_hash();
        assert_eq!(hash, "#/words/P%C3%83O%20DOCE");
        assert_eq!(Route::parse(&hash), route);
    }

    #[test]
    fn malformed_escape_keeps_raw_word() {
        assert_eq!(Route::parse("#/words/AB%2"), Route::WordTracing { word: "AB%2".to_string() });
        assert_eq!(percent_decode("%zz"), None);
    }

    #[test]
    fn signed_escape_keeps_raw_word() {
        assert_eq!(percent_decode("A%+1B"), None);
        assert_eq!(
            Route::parse("#/words/A%+1B"),
            Route::WordTracing { word: "A%+1B".to_string() }
        );
    }

    #[test]
    fn invalid_utf8_keeps_raw_word() {
        assert_eq!(percent_decode("%C3"), None);
        assert_eq!(Route::parse("#/words/%C3"), Route::WordTracing { word: "%C3".to_string() });
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(percent_encode("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(percent_encode("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn every_screen_survives_encoding() {
        let routes = [
            Route::CategorySelect,
            Route::WordInput,
            Route::ModeSelect { category: Category::Numbers },
            tracing(Category::Letters, Mode::Random, CaseMode::Both),
            tracing(Category::Numbers, Mode::Sequence, CaseMode::Uppercase),
            Route::WordTracing { word: "SOL".to_string() },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_hash()), route);
        }
    }

    #[test]
    fn case_update_only_touches_letters() {
        let letters = tracing(Category::Letters, Mode::Sequence, CaseMode::Uppercase);
        assert_eq!(letters.with_case(CaseMode::Both).to_hash(), "#/letters/sequence/both");
        assert_eq!(Route::WordInput.with_case(CaseMode::Both), Route::WordInput);
    }

    #[test]
    fn json_shape() {
        let route = Route::ModeSelect { category: Category::Letters };
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(json, r#"{"screen":"mode_select","category":"letters"}"#);
    }
}

//! Case folding into the codec's working alphabet.
//!
//! Uppercase letters are written as the escape marker followed by the
//! lowercase letter, so `"My name is Ted"` becomes `"!my name is !ted"`.
//! A literal marker is written twice; on the way back the marker uppercases
//! whatever follows it, and the uppercase of the marker is the marker itself.
//!
//! Characters whose case mapping is not a one-to-one single-character round
//! trip (e.g. `'İ'`) pass through untouched.

use crate::config::CodecConfig;
use crate::error::{NormalizeError, Result};

/// Fold uppercase letters into marker + lowercase.
pub fn normalize(text: &str, config: &CodecConfig) -> String {
    let marker = config.escape_marker;
    let mut out = String::with_capacity(text.len() + text.len() / 8);

    for ch in text.chars() {
        if ch == marker {
            out.push(marker);
            out.push(marker);
        } else if let Some(lower) = fold(ch) {
            out.push(marker);
            out.push(lower);
        } else {
            out.push(ch);
        }
    }

    out
}

/// Undo [`normalize`].
///
/// # Errors
/// `NormalizeError::DanglingEscape` if the text ends with a lone marker.
pub fn denormalize(text: &str, config: &CodecConfig) -> Result<String> {
    let marker = config.escape_marker;
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().enumerate();

    while let Some((position, ch)) = chars.next() {
        if ch != marker {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some((_, next)) => out.extend(next.to_uppercase()),
            None => return Err(NormalizeError::DanglingEscape { marker, position }.into()),
        }
    }

    Ok(out)
}

/// Number of escape markers [`normalize`] would insert for `text`.
pub fn escape_count(text: &str, config: &CodecConfig) -> usize {
    text.chars()
        .filter(|&ch| ch == config.escape_marker || fold(ch).is_some())
        .count()
}

/// Lowercase form of `ch` if it is an uppercase letter that folds to a single
/// character and uppercases back to itself.
fn fold(ch: char) -> Option<char> {
    if !ch.is_uppercase() {
        return None;
    }

    let mut lower = ch.to_lowercase();
    let l = lower.next()?;
    if lower.next().is_some() {
        return None;
    }

    let mut upper = l.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u == ch => Some(l),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn cfg() -> CodecConfig {
        CodecConfig::default()
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("My name is Ted", &cfg()), "!my name is !ted");
    }

    #[test]
    fn test_lowercase_untouched() {
        assert_eq!(normalize("hello, world 42.", &cfg()), "hello, world 42.");
    }

    #[test]
    fn test_marker_doubled() {
        assert_eq!(normalize("Hi!", &cfg()), "!hi!!");
        assert_eq!(denormalize("!hi!!", &cfg()).unwrap(), "Hi!");
    }

    #[test]
    fn test_round_trip() {
        for text in ["", "ABC", "a!b!!c", "Ted said: \"NO!\"", "Ünïcode Σ"] {
            let normalized = normalize(text, &cfg());
            assert_eq!(denormalize(&normalized, &cfg()).unwrap(), text);
        }
    }

    #[test]
    fn test_irregular_case_passes_through() {
        // Dotted capital I lowercases to two chars
        assert_eq!(normalize("İ", &cfg()), "İ");
        assert_eq!(denormalize("İ", &cfg()).unwrap(), "İ");
    }

    #[test]
    fn test_dangling_escape() {
        let err = denormalize("!my name is !", &cfg()).unwrap_err();
        assert!(matches!(
            err,
            Error::Normalize(NormalizeError::DanglingEscape { marker: '!', position: 12 })
        ));
    }

    #[test]
    fn test_custom_marker() {
        let config = cfg().with_escape_marker('^');
        assert_eq!(normalize("Go! Go^", &config), "^go! ^go^^");
        assert_eq!(denormalize("^go! ^go^^", &config).unwrap(), "Go! Go^");
    }

    #[test]
    fn test_escape_count() {
        assert_eq!(escape_count("My name is Ted!", &cfg()), 3);
        assert_eq!(escape_count("plain", &cfg()), 0);
    }
}

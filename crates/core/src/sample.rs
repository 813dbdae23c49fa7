//! Seeded sample text for exercising the codec.
//!
//! Generated text mixes the cases the codec cares about:
//! - Lowercase words (no escapes, skewed letter frequencies)
//! - Capitalized words and shouted runs (many escapes)
//! - Digits and punctuation, including the default escape marker
//! - A sprinkling of non-ASCII letters
//!
//! The same seed always yields the same text.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// English-like letter pool, frequent letters repeated.
const LETTERS: &[u8] = b"eeeeeeeeeeeettttttttaaaaaaaoooooooiiiiiinnnnnnsssssshhhhhrrrrrddddllllccuummwwffggyyppbbvkjxqz";

const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '-', '\'', '"', '(', ')'];

const EXTRA: &[char] = &['é', 'Ü', 'ß', 'Σ', 'ñ', 'Ø'];

/// Generate roughly `chars` characters of mixed text.
///
/// The result is truncated to exactly `chars` characters.
pub fn generate_sample_text(seed: u64, chars: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = String::with_capacity(chars + 16);
    let mut produced = 0;

    while produced < chars {
        let piece = match rng.gen_range(0..20) {
            // Plain word
            0..=9 => word(&mut rng),
            // Capitalized word
            10..=13 => capitalize(&word(&mut rng)),
            // Shouted word
            14 => word(&mut rng).to_uppercase(),
            // Number
            15..=16 => rng.gen_range(0..100_000u32).to_string(),
            // Punctuation
            17..=18 => PUNCTUATION[rng.gen_range(0..PUNCTUATION.len())].to_string(),
            // Non-ASCII letter
            _ => EXTRA[rng.gen_range(0..EXTRA.len())].to_string(),
        };

        for ch in piece.chars().chain(std::iter::once(' ')) {
            if produced == chars {
                break;
            }
            out.push(ch);
            produced += 1;
        }
    }

    out
}

fn word(rng: &mut ChaCha8Rng) -> String {
    let len = rng.gen_range(1..=9);
    (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

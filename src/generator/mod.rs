//! Deterministic message generation.
//!
//! `(date, sign, style)` fully determines the output: the three components
//! form a seed string, an explicit FNV-1a hash of the seed picks a template
//! index, and the sign's trait tuple fills the placeholders. No randomness,
//! no I/O. The hash must stay FNV-1a: a platform default string hash is
//! typically randomized per process and would produce different messages
//! on every launch.

pub mod templates;

pub use templates::{templates_for, traits_for, SignTraits};

use crate::models::{Style, ZodiacSign};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over a string's UTF-8 bytes. Stable across processes and
/// platforms.
pub(crate) fn fnv1a64(input: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Generate the message for a `(date, sign, style)` tuple.
pub fn generate_message(date: &str, sign: ZodiacSign, style: Style) -> String {
    let templates = templates_for(style);

    // The seed is a distinct derivation from the storage key: single
    // underscores, no slot component.
    let seed = format!("{}_{}_{}", date, sign.as_str(), style.as_str());
    let index = (fnv1a64(&seed) % templates.len() as u64) as usize;

    fill_template(templates[index], traits_for(sign))
}

/// Cosmetic 1-5 rating derived from message text; 3 for an empty message.
pub fn energy_rating(message: &str) -> u8 {
    if message.is_empty() {
        return 3;
    }
    (fnv1a64(message) % 5 + 1) as u8
}

fn fill_template(template: &str, traits: &SignTraits) -> String {
    template
        .replace("{primary}", traits.primary)
        .replace("{secondary}", traits.secondary)
        .replace("{action}", traits.action)
        .replace("{strength}", traits.strength)
        .replace("{element}", traits.element)
}

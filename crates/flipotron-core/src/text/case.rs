//! Case helpers for the two mapped scripts.
//!
//! Latin is handled with the ASCII helpers and Cyrillic with explicit code point
//! arithmetic, so the outcome never depends on locale capitalization tables.
//! Other scripts fall back to the one-to-one subset of the Unicode case maps.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CharCase {
    Upper,
    Lower,
    Caseless,
}

// А..Я <-> а..я
const CYR_BASIC_UPPER_FIRST: u32 = 0x0410;
const CYR_BASIC_UPPER_LAST: u32 = 0x042F;
const CYR_BASIC_LOWER_FIRST: u32 = 0x0430;
const CYR_BASIC_LOWER_LAST: u32 = 0x044F;
const CYR_BASIC_OFFSET: u32 = 0x20;

// Ѐ..Џ <-> ѐ..џ (Ё/ё live here)
const CYR_EXT_UPPER_FIRST: u32 = 0x0400;
const CYR_EXT_UPPER_LAST: u32 = 0x040F;
const CYR_EXT_LOWER_FIRST: u32 = 0x0450;
const CYR_EXT_LOWER_LAST: u32 = 0x045F;
const CYR_EXT_OFFSET: u32 = 0x50;

fn cyrillic_upper_to_lower(ch: char) -> Option<char> {
    let cp = u32::from(ch);
    let lower = match cp {
        CYR_BASIC_UPPER_FIRST..=CYR_BASIC_UPPER_LAST => cp + CYR_BASIC_OFFSET,
        CYR_EXT_UPPER_FIRST..=CYR_EXT_UPPER_LAST => cp + CYR_EXT_OFFSET,
        _ => return None,
    };
    char::from_u32(lower)
}

fn cyrillic_lower_to_upper(ch: char) -> Option<char> {
    let cp = u32::from(ch);
    let upper = match cp {
        CYR_BASIC_LOWER_FIRST..=CYR_BASIC_LOWER_LAST => cp - CYR_BASIC_OFFSET,
        CYR_EXT_LOWER_FIRST..=CYR_EXT_LOWER_LAST => cp - CYR_EXT_OFFSET,
        _ => return None,
    };
    char::from_u32(upper)
}

/// Returns the only element of `it`, or `None` for empty and multi-char mappings.
fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    it.next().is_none().then_some(first)
}

#[must_use]
pub fn case_of(ch: char) -> CharCase {
    if ch.is_ascii() {
        return if ch.is_ascii_uppercase() {
            CharCase::Upper
        } else if ch.is_ascii_lowercase() {
            CharCase::Lower
        } else {
            CharCase::Caseless
        };
    }

    if cyrillic_upper_to_lower(ch).is_some() {
        return CharCase::Upper;
    }
    if cyrillic_lower_to_upper(ch).is_some() {
        return CharCase::Lower;
    }

    if ch.is_uppercase() {
        CharCase::Upper
    } else if ch.is_lowercase() {
        CharCase::Lower
    } else {
        CharCase::Caseless
    }
}

#[must_use]
pub fn to_lower(ch: char) -> char {
    if ch.is_ascii() {
        return ch.to_ascii_lowercase();
    }
    cyrillic_upper_to_lower(ch)
        .or_else(|| single(ch.to_lowercase()))
        .unwrap_or(ch)
}

#[must_use]
pub fn to_upper(ch: char) -> char {
    if ch.is_ascii() {
        return ch.to_ascii_uppercase();
    }
    cyrillic_lower_to_upper(ch)
        .or_else(|| single(ch.to_uppercase()))
        .unwrap_or(ch)
}

/// Swaps the case of every cased character; digits and symbols pass through.
#[must_use]
pub fn toggle_case(text: &str) -> String {
    text.chars()
        .map(|ch| match case_of(ch) {
            CharCase::Upper => to_lower(ch),
            CharCase::Lower => to_upper(ch),
            CharCase::Caseless => ch,
        })
        .collect()
}

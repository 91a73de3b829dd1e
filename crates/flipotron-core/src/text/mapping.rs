use std::collections::HashMap;

use super::case::{CharCase, case_of, to_lower, to_upper};

/// Direction of a conversion between the primary (forward keys) and the secondary
/// (backward keys) script.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Physical key inversion between US QWERTY and Russian ЙЦУКЕН, lowercase only.
///
/// Case is re-applied by the engine, so shifted symbols are not listed.
#[rustfmt::skip]
pub const DEFAULT_PAIRS: &[(char, char)] = &[
    ('q', 'й'), ('w', 'ц'), ('e', 'у'), ('r', 'к'), ('t', 'е'), ('y', 'н'), ('u', 'г'), ('i', 'ш'), ('o', 'щ'), ('p', 'з'),
    ('[', 'х'), (']', 'ъ'),
    ('a', 'ф'), ('s', 'ы'), ('d', 'в'), ('f', 'а'), ('g', 'п'), ('h', 'р'), ('j', 'о'), ('k', 'л'), ('l', 'д'),
    (';', 'ж'), ('\'', 'э'),
    ('z', 'я'), ('x', 'ч'), ('c', 'с'), ('v', 'м'), ('b', 'и'), ('n', 'т'), ('m', 'ь'),
    (',', 'б'), ('.', 'ю'),
    ('`', 'ё'),
];

/// Result of a conversion: the text and the direction that was picked for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conversion {
    pub text: String,
    pub direction: Direction,
}

/// Pair of lowercase maps built together from one list of pairs.
///
/// `backward` is the inverse of `forward`. When two sources share a target the
/// later pair owns the inverse entry, so the table is only a bijection when the
/// configured targets are unique.
#[derive(Clone, Debug)]
pub struct MappingTable {
    forward: HashMap<char, char>,
    backward: HashMap<char, char>,
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_PAIRS.iter().copied())
    }
}

impl MappingTable {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut forward = HashMap::new();
        let mut backward = HashMap::new();
        for (from, to) in pairs {
            forward.insert(from, to);
            backward.insert(to, from);
        }
        Self { forward, backward }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    #[must_use]
    pub fn forward(&self, ch: char) -> Option<char> {
        self.forward.get(&ch).copied()
    }

    #[must_use]
    pub fn backward(&self, ch: char) -> Option<char> {
        self.backward.get(&ch).copied()
    }

    /// Source characters whose target resolves back to a different source.
    pub fn collisions(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.forward
            .iter()
            .filter(|(from, to)| self.backward.get(to) != Some(from))
            .map(|(&from, &to)| (from, to))
    }

    #[must_use]
    pub fn is_bijective(&self) -> bool {
        self.collisions().next().is_none()
    }

    fn lookup(&self, lower: char, direction: Direction) -> Option<char> {
        match direction {
            Direction::Forward => self.forward(lower),
            Direction::Backward => self.backward(lower),
        }
    }

    /// Picks the direction from the first character that has any mapping.
    ///
    /// Forward keys win over backward keys; text without mapped characters
    /// defaults to `Forward`.
    #[must_use]
    pub fn direction_for(&self, text: &str) -> Direction {
        text.chars()
            .map(to_lower)
            .find_map(|lower| {
                if self.forward.contains_key(&lower) {
                    Some(Direction::Forward)
                } else if self.backward.contains_key(&lower) {
                    Some(Direction::Backward)
                } else {
                    None
                }
            })
            .unwrap_or(Direction::Forward)
    }

    /// Maps one character, keeping its case. `None` when the lowered form is not
    /// in the chosen map.
    #[must_use]
    pub fn case_aware_lookup(&self, ch: char, direction: Direction) -> Option<char> {
        let case = case_of(ch);
        let mapped = self.lookup(to_lower(ch), direction)?;
        Some(match case {
            CharCase::Upper => to_upper(mapped),
            CharCase::Lower | CharCase::Caseless => mapped,
        })
    }

    #[must_use]
    pub fn convert_with_direction(&self, text: &str, direction: Direction) -> String {
        let mut out = String::with_capacity(text.len().saturating_mul(2));
        out.extend(
            text.chars()
                .map(|ch| self.case_aware_lookup(ch, direction).unwrap_or(ch)),
        );
        out
    }

    /// Converts `text` in the direction picked once for the whole string.
    #[must_use]
    pub fn convert(&self, text: &str) -> Conversion {
        let direction = self.direction_for(text);
        Conversion {
            text: self.convert_with_direction(text, direction),
            direction,
        }
    }
}

//! Character sets, and the tables mapping one-letter class IDs onto them.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const UPPER_CONSONANTS: &str = "BCDFGHJKLMNPQRSTVWXYZ";
const LOWER_CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";
const UPPER_VOWELS: &str = "AEIOU";
const LOWER_VOWELS: &str = "aeiou";
const PUNCTUATION: &str = ",.;:";
const BRACKETS: &str = "[]{}()<>";
const PRINTABLE_ASCII_SPECIAL: &str = "!\"#$%&'()*+,-./:;<=>?[\\]^_{|}~";
const UPPER_HEX: &str = "0123456789ABCDEF";
const LOWER_HEX: &str = "0123456789abcdef";

/// The "high ANSI" block, as code points. Turned into a string the first time the `x` class is
/// looked up.
static HIGH_ANSI_CODE_POINTS: [u32; 121] = [
    0x007E, 0x20AC, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, //
    0x0160, 0x2039, 0x0152, 0x017D, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, //
    0x2014, 0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x017E, 0x0178, 0x00A1, 0x00A2, //
    0x00A3, 0x00A4, 0x00A5, 0x00A6, 0x00A7, 0x00A8, 0x00A9, 0x00AA, 0x00AB, 0x00AC, //
    0x00AE, 0x00AF, 0x00B0, 0x00B1, 0x00B2, 0x00B3, 0x00B4, 0x00B5, 0x00B6, 0x00B7, //
    0x00B8, 0x00B9, 0x00BA, 0x00BB, 0x00BC, 0x00BD, 0x00BE, 0x00BF, 0x00C0, 0x00C1, //
    0x00C2, 0x00C3, 0x00C4, 0x00C5, 0x00C6, 0x00C7, 0x00C8, 0x00C9, 0x00CA, 0x00CB, //
    0x00CC, 0x00CD, 0x00CE, 0x00CF, 0x00D0, 0x00D1, 0x00D2, 0x00D3, 0x00D4, 0x00D5, //
    0x00D6, 0x00D7, 0x00D8, 0x00D9, 0x00DA, 0x00DB, 0x00DC, 0x00DD, 0x00DE, 0x00DF, //
    0x00E0, 0x00E1, 0x00E2, 0x00E3, 0x00E4, 0x00E5, 0x00E6, 0x00E7, 0x00E8, 0x00E9, //
    0x00EA, 0x00EB, 0x00EC, 0x00ED, 0x00EE, 0x00EF, 0x00F0, 0x00F1, 0x00F2, 0x00F3, //
    0x00F4, 0x00F5, 0x00F6, 0x00F7, 0x00F8, 0x00F9, 0x00FA, 0x00FB, 0x00FC, 0x00FD, //
    0x00FE,
];

fn high_ansi_expansion() -> &'static [&'static str] {
    static HIGH_ANSI: OnceLock<String> = OnceLock::new();
    static EXPANSION: OnceLock<[&'static str; 1]> = OnceLock::new();
    EXPANSION.get_or_init(|| {
        [HIGH_ANSI
            .get_or_init(|| {
                HIGH_ANSI_CODE_POINTS
                    .iter()
                    .filter_map(|&cp| char::from_u32(cp))
                    .collect()
            })
            .as_str()]
    })
}

/// Which table of character classes a pattern is resolved against.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharClassTable {
    /// Every class, including `x` (the high-ANSI block).
    #[default]
    Default,
    /// Every class except `x`, so generated passwords stay within ASCII.
    Ascii,
}

impl CharClassTable {
    /// The strings a class ID expands to, or `None` if this table has no such class.
    pub fn expansion(self, id: char) -> Option<&'static [&'static str]> {
        let strings: &'static [&'static str] = match id {
            'a' => &[LOWERCASE, DIGITS],
            'A' => &[LOWERCASE, UPPERCASE, DIGITS],
            'U' => &[UPPERCASE, DIGITS],
            'c' => &[LOWER_CONSONANTS],
            'C' => &[LOWER_CONSONANTS, UPPER_CONSONANTS],
            'z' => &[UPPER_CONSONANTS],
            'd' => &[DIGITS],
            'h' => &[LOWER_HEX],
            'H' => &[UPPER_HEX],
            'l' => &[LOWERCASE],
            'L' => &[LOWERCASE, UPPERCASE],
            'u' => &[UPPERCASE],
            'p' => &[PUNCTUATION],
            'b' => &[BRACKETS],
            's' => &[PRINTABLE_ASCII_SPECIAL],
            'S' => &[UPPERCASE, LOWERCASE, DIGITS, PRINTABLE_ASCII_SPECIAL],
            'v' => &[LOWER_VOWELS],
            'V' => &[LOWER_VOWELS, UPPER_VOWELS],
            'Z' => &[UPPER_VOWELS],
            'x' => match self {
                CharClassTable::Default => high_ansi_expansion(),
                CharClassTable::Ascii => return None,
            },
            _ => return None,
        };
        Some(strings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no such character class ID {0:?}")]
pub struct InvalidCharClassId(pub char);

/// An unordered set of unique characters.
///
/// Iteration is in ascending code point order, so two equal sets always list their members the
/// same way.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CharSet(BTreeSet<char>);

impl CharSet {
    pub fn new() -> CharSet {
        CharSet(BTreeSet::new())
    }

    pub fn add(&mut self, ch: char) -> &mut Self {
        self.0.insert(ch);
        self
    }

    /// Adds every character of the class `id`, as found in `table`.
    pub fn add_from_class_id(
        &mut self,
        table: CharClassTable,
        id: char,
    ) -> Result<&mut Self, InvalidCharClassId> {
        let strings = table.expansion(id).ok_or(InvalidCharClassId(id))?;
        Ok(self.add_from_strings(strings))
    }

    /// Adds each character from each of `strings`, verbatim.
    pub fn add_from_strings(&mut self, strings: &[&str]) -> &mut Self {
        for s in strings {
            self.0.extend(s.chars());
        }
        self
    }

    /// Removes every character of `other` from this set.
    pub fn subtract(&mut self, other: &CharSet) -> &mut Self {
        if !other.is_empty() {
            self.0.retain(|ch| !other.contains(*ch));
        }
        self
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// The members, sorted.
    pub fn to_vec(&self) -> Vec<char> {
        self.iter().collect()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> CharSet {
        CharSet(iter.into_iter().collect())
    }
}

impl Extend<char> for CharSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> CharSet {
        s.chars().collect()
    }
}

//! Compiling a password pattern into the character sets to draw from.
//!
//! A pattern is read left to right, and each token yields one character set:
//!
//! * `\X` is the literal character `X`.
//! * `[...]` is a custom group: class IDs and `\X` literals are added to it, and `^X` removes
//!   the literal `X` from it. Removals always win, wherever they appear in the group.
//! * `^X` outside of a group is shorthand for `[^X]`, and so is always empty.
//! * Any other character is a class ID (see [`CharClassTable`]).
//!
//! A token may be followed by `{n}`, which asks for `n` characters drawn from its set. A pattern
//! asks for at most [`MAX_LENGTH`] characters in total.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::char_set::{CharClassTable, CharSet};
use crate::{PatternError, SyntaxErrorKind};

/// The most characters a pattern may ask for, across all of its tokens.
pub const MAX_LENGTH: usize = 4096;

/// Turns patterns into character sets, one per character of the password.
#[derive(Clone, Debug, Default)]
pub struct PatternCompiler {
    table: CharClassTable,
    excluded: CharSet,
}

impl PatternCompiler {
    pub fn new(table: CharClassTable) -> PatternCompiler {
        PatternCompiler {
            table,
            excluded: CharSet::new(),
        }
    }

    /// Removes `chars` from every token's set, before the set is checked for emptiness.
    pub fn excluding(mut self, chars: &CharSet) -> PatternCompiler {
        self.excluded.extend(chars.iter());
        self
    }

    pub fn table(&self) -> CharClassTable {
        self.table
    }

    /// Compile `pattern`.
    ///
    /// Every token is parsed before any is checked for emptiness, so a malformed pattern or an
    /// unknown class ID is reported ahead of a set emptied by exclusions. Nothing is returned
    /// unless every token resolves to a non-empty set, so a caller never starts sampling for a
    /// pattern that can't be satisfied.
    pub fn compile(&self, pattern: &str) -> Result<Vec<CharSet>, PatternError> {
        let mut cursor = Cursor::new(pattern);
        let mut tokens = Vec::new();
        let mut length = 0usize;

        while let Some((offset, ch)) = cursor.next() {
            let char_set = match ch {
                '\\' => {
                    let literal = cursor.escaped(offset)?;
                    let mut set = CharSet::new();
                    set.add(literal);
                    set
                }
                '[' => self.group(&mut cursor, offset)?,
                '^' => {
                    // Outside a group there is nothing to remove the character from.
                    cursor.excluded(offset)?;
                    CharSet::new()
                }
                '{' => {
                    return Err(PatternError::Syntax {
                        offset,
                        kind: SyntaxErrorKind::RepeatWithoutToken,
                    })
                }
                id => self.class(id, offset)?,
            };
            let repeat = cursor.repeat_count()?;
            length = length
                .checked_add(repeat)
                .filter(|&length| length <= MAX_LENGTH)
                .ok_or(PatternError::TooLong {
                    offset,
                    max: MAX_LENGTH,
                })?;
            tokens.push((offset, char_set, repeat));
        }

        let token_count = tokens.len();
        let mut char_sets = Vec::with_capacity(length);
        for (offset, mut char_set, repeat) in tokens {
            char_set.subtract(&self.excluded);
            if char_set.is_empty() {
                return Err(PatternError::InvalidPattern { offset });
            }
            tracing::trace!(offset, size = char_set.len(), repeat, "resolved pattern token");
            char_sets.extend(std::iter::repeat(char_set).take(repeat));
        }

        tracing::debug!(
            tokens = token_count,
            characters = char_sets.len(),
            table = ?self.table,
            "compiled password pattern"
        );
        Ok(char_sets)
    }

    fn class(&self, id: char, offset: usize) -> Result<CharSet, PatternError> {
        let mut set = CharSet::new();
        set.add_from_class_id(self.table, id)
            .map_err(|source| PatternError::InvalidCharClassId { offset, source })?;
        Ok(set)
    }

    /// Reads the rest of a `[...]` group, whose `[` was at `open`.
    fn group(&self, cursor: &mut Cursor<'_>, open: usize) -> Result<CharSet, PatternError> {
        let mut included = CharSet::new();
        let mut excluded = CharSet::new();
        loop {
            let (offset, ch) = cursor.next().ok_or(PatternError::Syntax {
                offset: open,
                kind: SyntaxErrorKind::UnterminatedGroup,
            })?;
            match ch {
                ']' => break,
                '\\' => {
                    included.add(cursor.escaped(offset)?);
                }
                '^' => {
                    excluded.add(cursor.excluded(offset)?);
                }
                id => {
                    included
                        .add_from_class_id(self.table, id)
                        .map_err(|source| PatternError::InvalidCharClassId { offset, source })?;
                }
            }
        }
        included.subtract(&excluded);
        Ok(included)
    }
}

/// Walks a pattern, keeping track of byte offsets for error reporting.
struct Cursor<'a> {
    pattern: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(pattern: &'a str) -> Cursor<'a> {
        Cursor {
            pattern,
            chars: pattern.char_indices().peekable(),
        }
    }

    fn next(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    /// The character after a `\` at `offset`.
    fn escaped(&mut self, offset: usize) -> Result<char, PatternError> {
        match self.chars.next() {
            Some((_, ch)) => Ok(ch),
            None => Err(PatternError::Syntax {
                offset,
                kind: SyntaxErrorKind::TrailingEscape,
            }),
        }
    }

    /// The character named by a `^` at `offset`: either `^X` or `^\X`.
    fn excluded(&mut self, offset: usize) -> Result<char, PatternError> {
        match self.chars.next() {
            Some((escape, '\\')) => self.escaped(escape),
            Some((_, ']')) | None => Err(PatternError::Syntax {
                offset,
                kind: SyntaxErrorKind::DanglingExclusion,
            }),
            Some((_, ch)) => Ok(ch),
        }
    }

    /// Reads an optional `{n}`. Without one, a token stands for a single character.
    fn repeat_count(&mut self) -> Result<usize, PatternError> {
        let open = match self.chars.next_if(|&(_, ch)| ch == '{') {
            Some((open, _)) => open,
            None => return Ok(1),
        };
        let close = loop {
            match self.chars.next() {
                Some((close, '}')) => break close,
                Some(_) => (),
                None => {
                    return Err(PatternError::Syntax {
                        offset: open,
                        kind: SyntaxErrorKind::UnterminatedRepeat,
                    })
                }
            }
        };
        let invalid_count = PatternError::Syntax {
            offset: open,
            kind: SyntaxErrorKind::InvalidRepeatCount,
        };
        // `parse` alone would also accept a leading `+`.
        let digits = &self.pattern[open + 1..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_count);
        }
        digits.parse().map_err(|_| invalid_count)
    }
}

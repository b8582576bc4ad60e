//! Generating passwords from KeePass-style patterns.
//!
//! ```
//! use pwpattern::{GeneratorOptions, PasswordGenerator, RngSource};
//!
//! // A MAC address.
//! let options = GeneratorOptions {
//!     permute: false,
//!     ..GeneratorOptions::default()
//! };
//! let generator = PasswordGenerator::new(r"HH\-HH\-HH\-HH\-HH\-HH", &options)?;
//! let mac = generator.generate(&mut RngSource::thread_local());
//! assert_eq!(mac.as_str().chars().count(), 17);
//! # Ok::<(), pwpattern::PatternError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod char_set;
mod options;
pub mod password_generation;
pub mod pattern;
pub mod random;

pub use char_set::{CharClassTable, CharSet};
pub use options::GeneratorOptions;
pub use password_generation::PasswordGenerator;
pub use pattern::{PatternCompiler, MAX_LENGTH};
pub use random::{RandomSource, RngSource};

/// Generate a single password from `pattern`, using the thread-local cryptographic generator.
pub fn generate(pattern: &str, options: &GeneratorOptions) -> Result<Secret, PatternError> {
    let generator = PasswordGenerator::new(pattern, options)?;
    Ok(generator.generate(&mut RngSource::thread_local()))
}

/// Why a pattern was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid character class at offset {offset}: {source}")]
    InvalidCharClassId {
        offset: usize,
        #[source]
        source: char_set::InvalidCharClassId,
    },
    /// The token at `offset` has no characters to choose from, whether because its exclusions
    /// removed everything, or because lookalike removal did.
    #[error("the pattern token at offset {offset} can never produce a character")]
    InvalidPattern { offset: usize },
    /// The token at `offset` takes the pattern past `max` characters.
    #[error("the pattern token at offset {offset} asks for more than {max} characters in total")]
    TooLong { offset: usize, max: usize },
    #[error("malformed pattern at offset {offset}: {kind}")]
    Syntax { offset: usize, kind: SyntaxErrorKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("`\\` is not followed by a character")]
    TrailingEscape,
    #[error("`[` is never closed by a `]`")]
    UnterminatedGroup,
    #[error("`^` is not followed by a character to exclude")]
    DanglingExclusion,
    #[error("`{{` does not follow anything that could be repeated")]
    RepeatWithoutToken,
    #[error("`{{` is never closed by a `}}`")]
    UnterminatedRepeat,
    #[error("the repeat count is not a non-negative integer")]
    InvalidRepeatCount,
}

/// A generated password.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

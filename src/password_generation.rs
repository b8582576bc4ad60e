//! Utilities for generating passwords.

use crate::char_set::CharSet;
use crate::options::GeneratorOptions;
use crate::pattern::PatternCompiler;
use crate::random::RandomSource;
use crate::{PatternError, Secret};

/// Characters that are easily mistaken for one another.
pub const LOOKALIKES: &str = "O0l1I|";

/// Generates passwords matching a pattern.
///
/// The pattern is compiled (and rejected, if it can't be satisfied) when the generator is built;
/// after that, generating a password can't fail.
#[derive(Clone, Debug)]
pub struct PasswordGenerator {
    /// One sorted list per character, as handed to `RandomSource::sample`.
    candidates: Vec<Vec<char>>,
    permute: bool,
}

impl PasswordGenerator {
    pub fn new(
        pattern: &str,
        options: &GeneratorOptions,
    ) -> Result<PasswordGenerator, PatternError> {
        let mut compiler = PatternCompiler::new(options.char_classes);
        if options.remove_lookalikes {
            compiler = compiler.excluding(&CharSet::from(LOOKALIKES));
        }
        let candidates = compiler
            .compile(pattern)?
            .iter()
            .map(CharSet::to_vec)
            .collect();
        Ok(PasswordGenerator {
            candidates,
            permute: options.permute,
        })
    }

    /// The set each character of the password is drawn from, in pattern order.
    pub fn char_sets(&self) -> Vec<CharSet> {
        self.candidates
            .iter()
            .map(|candidates| candidates.iter().copied().collect())
            .collect()
    }

    /// The length, in characters, of every password this generates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Draw one character from each set, in order, then shuffle them if permuting.
    pub fn generate<R>(&self, rng: &mut R) -> Secret
    where
        R: RandomSource + ?Sized,
    {
        let mut drawn = self
            .candidates
            .iter()
            .map(|candidates| rng.sample(candidates))
            .collect::<Vec<_>>();
        if self.permute {
            drawn = rng.shuffle(drawn);
        }
        tracing::debug!(
            length = drawn.len(),
            permuted = self.permute,
            "generated password"
        );
        Secret(drawn.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::char_set::CharClassTable;

    /// Always picks the smallest candidate, and sorts on shuffle.
    #[derive(Default)]
    struct Lowest {
        samples: usize,
        shuffles: usize,
    }

    impl RandomSource for Lowest {
        fn sample(&mut self, items: &[char]) -> char {
            self.samples += 1;
            items[0]
        }

        fn shuffle(&mut self, mut items: Vec<char>) -> Vec<char> {
            self.shuffles += 1;
            items.sort_unstable();
            items
        }
    }

    #[test]
    fn draws_once_per_character() {
        let generator = PasswordGenerator::new("uullA{6}", &GeneratorOptions::default()).unwrap();
        assert_eq!(generator.len(), 10);

        let mut rng = Lowest::default();
        assert_eq!(generator.generate(&mut rng).as_str(), "000000AAaa");
        assert_eq!(rng.samples, 10);
        assert_eq!(rng.shuffles, 1);
    }

    #[test]
    fn without_permuting_order_is_kept() {
        let options = GeneratorOptions {
            permute: false,
            ..GeneratorOptions::default()
        };
        let generator = PasswordGenerator::new("uullA{6}", &options).unwrap();

        let mut rng = Lowest::default();
        assert_eq!(generator.generate(&mut rng).as_str(), "AAaa000000");
        assert_eq!(rng.samples, 10);
        assert_eq!(rng.shuffles, 0);
    }

    #[test]
    fn lookalikes_are_removed() {
        let options = GeneratorOptions {
            remove_lookalikes: true,
            ..GeneratorOptions::default()
        };
        let generator = PasswordGenerator::new("dL", &options).unwrap();
        let char_sets = generator.char_sets();
        assert_eq!(char_sets[0], CharSet::from("23456789"));
        assert!(!char_sets[1].contains('I'));
        assert!(!char_sets[1].contains('l'));
        assert!(!char_sets[1].contains('O'));
        assert_eq!(char_sets[1].len(), 52 - 3);
    }

    #[test]
    fn char_sets_match_what_is_sampled() {
        let generator = PasswordGenerator::new(r"h\-{2}", &GeneratorOptions::default()).unwrap();
        let compiled = PatternCompiler::new(CharClassTable::Default)
            .compile(r"h\-{2}")
            .unwrap();
        assert_eq!(generator.char_sets(), compiled);
        assert_eq!(generator.len(), 3);
    }

    #[test]
    fn empty_pattern_generates_nothing() {
        let generator = PasswordGenerator::new("", &GeneratorOptions::default()).unwrap();
        assert!(generator.is_empty());
        let mut rng = Lowest::default();
        assert_eq!(generator.generate(&mut rng).as_str(), "");
        assert_eq!(rng.samples, 0);
    }
}

//! Where password generation gets its randomness from.

use std::fmt;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

/// A source of random choices.
///
/// The generator makes exactly one `sample` call per character of the password, in pattern
/// order, and at most one `shuffle` call afterwards.
pub trait RandomSource {
    /// Pick one of `items` uniformly. `items` is never empty, and is sorted.
    fn sample(&mut self, items: &[char]) -> char;

    /// Return a uniformly chosen permutation of `items`.
    fn shuffle(&mut self, items: Vec<char>) -> Vec<char>;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn sample(&mut self, items: &[char]) -> char {
        (**self).sample(items)
    }

    fn shuffle(&mut self, items: Vec<char>) -> Vec<char> {
        (**self).shuffle(items)
    }
}

/// A [`RandomSource`] backed by a cryptographically secure `rand` generator.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
pub struct RngSource<R>(R);

impl<R> RngSource<R>
where
    R: Rng + CryptoRng,
{
    pub fn new(rng: R) -> RngSource<R> {
        RngSource(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl RngSource<ThreadRng> {
    /// Uses the thread-local generator, seeded from the OS.
    pub fn thread_local() -> RngSource<ThreadRng> {
        RngSource(rand::thread_rng())
    }
}

impl<R> RandomSource for RngSource<R>
where
    R: Rng + CryptoRng,
{
    /// # Panics
    ///
    /// If `items` is empty.
    fn sample(&mut self, items: &[char]) -> char {
        items[self.0.gen_range(0..items.len())]
    }

    fn shuffle(&mut self, mut items: Vec<char>) -> Vec<char> {
        items.shuffle(&mut self.0);
        items
    }
}

impl<R> fmt::Debug for RngSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RngSource { ... }")
    }
}

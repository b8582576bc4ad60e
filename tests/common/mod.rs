#![allow(dead_code)]

use pwpattern::{CharClassTable, CharSet, RandomSource};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn char_set(ids: &str) -> CharSet {
    let mut set = CharSet::new();
    for id in ids.chars() {
        set.add_from_class_id(CharClassTable::Default, id).unwrap();
    }
    set
}

/// A `RandomSource` which answers every `sample` with a caller-supplied function, sorts on
/// `shuffle`, and records every call it receives.
pub struct Scripted<F> {
    pick: F,
    pub samples: Vec<Vec<char>>,
    pub shuffles: Vec<Vec<char>>,
}

impl<F> Scripted<F>
where
    F: FnMut(&[char]) -> char,
{
    pub fn new(pick: F) -> Scripted<F> {
        Scripted {
            pick,
            samples: Vec::new(),
            shuffles: Vec::new(),
        }
    }
}

/// Picks the smallest candidate every time.
pub fn lowest() -> Scripted<impl FnMut(&[char]) -> char> {
    Scripted::new(|items: &[char]| items[0])
}

impl<F> RandomSource for Scripted<F>
where
    F: FnMut(&[char]) -> char,
{
    fn sample(&mut self, items: &[char]) -> char {
        self.samples.push(items.to_vec());
        (self.pick)(items)
    }

    fn shuffle(&mut self, mut items: Vec<char>) -> Vec<char> {
        self.shuffles.push(items.clone());
        items.sort_unstable();
        items
    }
}

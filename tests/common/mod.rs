use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A generated dictionary of unique words, each mapped to the sum of its
/// character codes. Short words over a small alphabet make prefixes shared
/// between entries common.
pub static DICTIONARY: Lazy<Vec<(String, u32)>> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let alphabet: Vec<char> = "abcdefghijklmnoé日".chars().collect();

    let mut seen = HashSet::new();
    let mut words = Vec::new();
    while words.len() < 20_000 {
        let len = rng.gen_range(1..=10);
        let word: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        if seen.insert(word.clone()) {
            let value = word.chars().map(|c| c as u32).sum();
            words.push((word, value));
        }
    }
    words
});

/// Shuffles the dictionary and splits off a tenth of it that is never inserted.
pub fn split_dictionary(seed: u64) -> (Vec<(String, u32)>, Vec<(String, u32)>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut entries = DICTIONARY.clone();
    entries.shuffle(&mut rng);

    let held_out = entries.split_off(entries.len() - entries.len() / 10);
    (entries, held_out)
}

pub fn sorted<I: IntoIterator<Item = (String, u32)>>(entries: I) -> Vec<(String, u32)> {
    let mut entries: Vec<_> = entries.into_iter().collect();
    entries.sort();
    entries
}

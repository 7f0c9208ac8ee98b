use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fst::Set;
use tracing::debug;

use crate::error::KataResult;

pub fn load_json<T: DeserializeOwned, TPath: AsRef<Path>>(path: TPath) -> KataResult<T> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Reads one word per line, uppercased, skipping anything shorter than `min_length`.
/// The result is sorted and free of duplicates.
pub fn read_word_file<P: AsRef<Path>>(path: P, min_length: usize) -> KataResult<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_uppercase();
        if word.is_empty() || word.chars().count() < min_length {
            continue;
        }
        words.push(word);
    }

    words.sort_unstable();
    words.dedup();
    debug!("read {} words from {:?}", words.len(), path.as_ref());
    Ok(words)
}

/// Builds an FST set out of a sorted, duplicate free word list
pub fn build_dictionary(words: &[String]) -> KataResult<Set<Vec<u8>>> {
    Ok(Set::from_iter(words.iter())?)
}

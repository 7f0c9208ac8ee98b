use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::FusedIterator;

use tracing::debug;

use crate::error::{KataError, KataResult};

/// Lazy enumeration of every ordering of a set of distinct symbols.
///
/// Works like the recursive "pick one of the remaining symbols, recurse, put it back"
/// backtracking, with the recursion unrolled into `cursors`: `cursors[d]` is the index
/// in `remaining` that the symbol at `prefix[d]` was taken from. Putting a symbol back
/// at that index restores `remaining` exactly, so the next candidate is simply `index + 1`.
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    /// Symbols already placed
    prefix: Vec<T>,
    /// Symbols not yet placed, in their original relative order
    remaining: Vec<T>,
    /// Index each prefix symbol was taken from
    cursors: Vec<usize>,
    /// Total number of symbols
    n: usize,
    started: bool,
    exhausted: bool,
}

impl<T: Clone + Eq + Hash + Debug> Permutations<T> {
    /// Fails if any symbol appears more than once
    pub fn new(symbols: Vec<T>) -> KataResult<Self> {
        let mut seen = HashSet::with_capacity(symbols.len());
        if let Some(dup) = symbols.iter().find(|s| !seen.insert(*s)) {
            debug!("rejecting permutation input, {:?} repeats", dup);
            return Err(KataError::InvalidInput {
                symbol: format!("{:?}", dup),
            });
        }
        debug!("enumerating permutations of {} symbols", symbols.len());
        Ok(Self::unchecked(symbols))
    }
}

impl<T: Clone> Permutations<T> {
    fn unchecked(symbols: Vec<T>) -> Self {
        Self {
            prefix: Vec::with_capacity(symbols.len()),
            n: symbols.len(),
            cursors: Vec::with_capacity(symbols.len()),
            remaining: symbols,
            started: false,
            exhausted: false,
        }
    }

    /// Places the first remaining symbol until nothing remains
    fn descend(&mut self) {
        while !self.remaining.is_empty() {
            let sym = self.remaining.remove(0);
            self.prefix.push(sym);
            self.cursors.push(0);
        }
    }

    /// Undoes placements from the deepest level up until some level has an untried
    /// candidate, then places it. Returns false once every level is exhausted.
    fn advance(&mut self) -> bool {
        while let Some(i) = self.cursors.pop() {
            let sym = match self.prefix.pop() {
                Some(sym) => sym,
                None => return false,
            };
            self.remaining.insert(i, sym);

            let next = i + 1;
            if next < self.remaining.len() {
                let sym = self.remaining.remove(next);
                self.prefix.push(sym);
                self.cursors.push(next);
                return true;
            }
        }
        false
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.started && !self.advance() {
            self.exhausted = true;
            return None;
        }
        self.started = true;
        self.descend();
        debug_assert_eq!(self.prefix.len() + self.remaining.len(), self.n);
        Some(self.prefix.clone())
    }
}

impl<T: Clone> FusedIterator for Permutations<T> {}

/// All orderings of the characters of `chars`. Characters must be distinct.
pub fn permutations(chars: &str) -> KataResult<impl Iterator<Item = String>> {
    let perms = Permutations::new(chars.chars().collect::<Vec<char>>())?;
    Ok(perms.map(|p| p.into_iter().collect::<String>()))
}

/// n! or None when it does not fit in a u128
pub fn factorial(n: usize) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

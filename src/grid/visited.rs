use std::ops::{Deref, DerefMut};

use super::util::Position;

/// Cells on the in-progress path. A cell is only ever marked through a [`Claim`],
/// so it stays marked exactly as long as the recursion that placed it is live.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    // bit is one if the cell is on the path
    bits: Vec<u64>,
    cols: usize,
    path: Vec<Position>,
}

impl VisitedSet {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: vec![0; (rows * cols + 63) / 64],
            cols,
            path: Vec::new(),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        let i = pos.as_index(self.cols);
        (self.bits[i / 64] & (1u64 << (i % 64))) != 0
    }

    /// The claimed cells, in the order they were claimed
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Marks `pos` as used until the returned guard is dropped
    pub fn claim(&mut self, pos: Position) -> Claim<'_> {
        debug_assert!(!self.contains(pos), "cell {:?} claimed twice", pos);
        let i = pos.as_index(self.cols);
        self.bits[i / 64] |= 1u64 << (i % 64);
        self.path.push(pos);
        Claim { set: self, pos }
    }

    fn release(&mut self, pos: Position) {
        let i = pos.as_index(self.cols);
        self.bits[i / 64] &= !(1u64 << (i % 64));
        let popped = self.path.pop();
        debug_assert_eq!(popped, Some(pos), "claims released out of order");
    }
}

/// Guard over one claimed cell. Derefs to the set so the search can keep
/// claiming deeper cells through it.
pub struct Claim<'a> {
    set: &'a mut VisitedSet,
    pos: Position,
}

impl<'a> Deref for Claim<'a> {
    type Target = VisitedSet;

    fn deref(&self) -> &Self::Target {
        &*self.set
    }
}

impl<'a> DerefMut for Claim<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.set
    }
}

impl<'a> Drop for Claim<'a> {
    fn drop(&mut self) {
        self.set.release(self.pos);
    }
}

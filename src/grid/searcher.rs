use std::rc::Rc;

use fst::Automaton;

use super::util::Position;
use super::Grid;

/*
    Automaton used to walk a dictionary FST and the grid at the same time. Every byte the
    FST offers is matched against the neighbours of all the snakes that are still alive,
    so whole branches of the dictionary are skipped as soon as no snake can spell them.
*/

/// Persistent path through the grid. Snakes that share a prefix share its cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Trail {
    Start,
    Step {
        pos: Position,
        len: usize,
        prev: Rc<Trail>,
    },
}

impl Trail {
    pub fn len(&self) -> usize {
        match self {
            Trail::Start => 0,
            Trail::Step { len, .. } => *len,
        }
    }

    /// Checks if the cell is already part of this trail
    pub fn contains(&self, target: Position) -> bool {
        let mut node = self;
        while let Trail::Step { pos, prev, .. } = node {
            if *pos == target {
                return true;
            }
            node = &**prev;
        }
        false
    }

    /// Cells of the trail from the first letter to the last
    pub fn positions(&self) -> Vec<Position> {
        let mut result = Vec::with_capacity(self.len());
        let mut node = self;
        while let Trail::Step { pos, prev, .. } = node {
            result.push(*pos);
            node = &**prev;
        }
        result.reverse();
        result
    }
}

#[derive(Debug, Clone)]
pub struct SnakeSearcher<'a> {
    /// The grid the words must be traced on
    pub grid: &'a Grid,
    /// Minimum length for anything to be considered a word
    pub min_length: usize,
}

impl<'a> SnakeSearcher<'a> {
    fn cell_matches(&self, pos: Position, byte: u8) -> bool {
        let cell = self.grid[pos];
        cell.is_ascii() && cell as u32 == byte as u32
    }

    /// All the ways of growing `trail` by one cell holding `byte`
    fn extensions(&self, trail: &Rc<Trail>, byte: u8) -> Vec<Rc<Trail>> {
        let grow = |pos: Position| {
            Rc::new(Trail::Step {
                pos,
                len: trail.len() + 1,
                prev: trail.clone(),
            })
        };
        match &**trail {
            Trail::Start => self
                .grid
                .positions()
                .filter(|&p| self.cell_matches(p, byte))
                .map(grow)
                .collect(),
            &Trail::Step { pos, .. } => pos
                .adjacent(self.grid.rows(), self.grid.cols())
                .filter(|&n| self.cell_matches(n, byte) && !trail.contains(n))
                .map(grow)
                .collect(),
        }
    }
}

impl<'a> Automaton for SnakeSearcher<'a> {
    /// Every live snake spelling the bytes read so far. None once no snake survives.
    type State = Option<Vec<Rc<Trail>>>;

    fn start(&self) -> Self::State {
        Some(vec![Rc::new(Trail::Start)])
    }

    fn is_match(&self, state: &Self::State) -> bool {
        match state {
            // All snakes in a state have the same length
            Some(trails) => trails
                .first()
                .map(|t| t.len() >= self.min_length.max(1))
                .unwrap_or(false),
            None => false,
        }
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        state.as_ref().and_then(|trails| {
            let next = trails
                .iter()
                .flat_map(|t| self.extensions(t, byte))
                .collect::<Vec<_>>();
            if next.is_empty() {
                None
            } else {
                Some(next)
            }
        })
    }

    fn can_match(&self, state: &Self::State) -> bool {
        state.is_some()
    }
}

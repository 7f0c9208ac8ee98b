mod searcher;
pub mod util;
mod visited;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use fst::{IntoStreamer, Set, Streamer};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{KataError, KataResult};
use crate::utils::loading;

pub use self::searcher::{SnakeSearcher, Trail};
use self::util::Position;
use self::visited::VisitedSet;

/// Snaking puzzle used by the interactive prompt
pub const DEMO_PUZZLE: [&str; 5] = ["ANGULAR", "REDNCAE", "RFIDTCL", "AGNEGSA", "YTIRTSP"];

/// Shortest word reported by a dictionary scan unless the caller asks otherwise
pub const MIN_WORD_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Letters of the puzzle, row major
    cells: Array2<char>,
}

impl Grid {
    /// Builds a grid from rows of text. Every row must hold the same, non-zero
    /// number of characters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> KataResult<Self> {
        let first = rows
            .first()
            .ok_or_else(|| invalid_grid("grid has no rows".to_string()))?;
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(invalid_grid("grid rows are empty".to_string()));
        }
        for (i, row) in rows.iter().enumerate() {
            let width = row.as_ref().chars().count();
            if width != cols {
                return Err(invalid_grid(format!(
                    "row {} has {} cells, expected {}",
                    i, width, cols
                )));
            }
        }

        let letters = rows
            .iter()
            .flat_map(|r| r.as_ref().chars())
            .collect::<Vec<_>>();
        let cells = Array2::from_shape_vec((rows.len(), cols), letters)
            .map_err(|e| invalid_grid(e.to_string()))?;
        Ok(Self { cells })
    }

    /// Loads a grid stored as a json array of row strings
    pub fn from_file<P: AsRef<Path>>(path: P) -> KataResult<Self> {
        let rows: Vec<String> = loading::load_json(path)?;
        Self::from_rows(&rows)
    }

    /// Fills a grid with uniformly drawn uppercase ASCII letters
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> KataResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(invalid_grid(format!("cannot build a {}x{} grid", rows, cols)));
        }
        let letters: Array2<u8> =
            Array2::random_using((rows, cols), Uniform::new_inclusive(b'A', b'Z'), rng);
        Ok(Self {
            cells: letters.mapv(char::from),
        })
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Every position of the grid in row major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Checks if the word can be traced through horizontally/vertically adjacent
    /// cells without using any cell twice. The empty word is always found.
    pub fn contains_word(&self, word: &str) -> bool {
        self.find_path(word).is_some()
    }

    /// Finds the first path spelling `word`, trying start cells in row major order
    /// and neighbours in Up/Down/Left/Right order
    pub fn find_path(&self, word: &str) -> Option<Vec<Position>> {
        let word = word.chars().collect::<Vec<_>>();
        let first = match word.first() {
            Some(&c) => c,
            None => return Some(Vec::new()),
        };
        // A path can never be longer than the number of cells
        if word.len() > self.cells.len() {
            return None;
        }

        debug!(
            "searching {}x{} grid for {:?}",
            self.rows(),
            self.cols(),
            word.iter().collect::<String>()
        );
        let mut visited = VisitedSet::new(self.rows(), self.cols());
        let path = self
            .positions()
            .filter(|&p| self[p] == first)
            .find_map(|p| self.extend(p, &word[1..], &mut visited));
        debug_assert!(visited.is_empty());
        path
    }

    /// Claims `pos` (already matched) and tries to match `rest` from its neighbours.
    /// The claim is released on every return, so a failed branch leaves no trace.
    fn extend(&self, pos: Position, rest: &[char], visited: &mut VisitedSet) -> Option<Vec<Position>> {
        let mut claim = visited.claim(pos);
        let (&next, tail) = match rest.split_first() {
            Some(split) => split,
            None => return Some(claim.path().to_vec()),
        };

        trace!("at {:?}, looking for {:?}", pos, next);
        pos.adjacent(self.rows(), self.cols())
            .filter(|&n| self[n] == next)
            .find_map(|n| {
                if claim.contains(n) {
                    None
                } else {
                    self.extend(n, tail, &mut claim)
                }
            })
    }

    /// Runs an independent search for every word in parallel
    pub fn contains_words<S: AsRef<str> + Sync>(&self, words: &[S]) -> Vec<bool> {
        words
            .par_iter()
            .map(|w| self.contains_word(w.as_ref()))
            .collect()
    }

    /// Finds every dictionary word of at least `min_length` letters that snakes through the grid.
    /// Words come back in dictionary order.
    pub fn words_in<D: AsRef<[u8]>>(&self, dict: &Set<D>, min_length: usize) -> Vec<String> {
        let searcher = SnakeSearcher {
            grid: self,
            min_length,
        };
        let mut matches = dict.search_with_state(searcher).into_stream();
        let mut words = Vec::new();
        while let Some((word, _)) = matches.next() {
            words.push(String::from_utf8_lossy(word).into_owned());
        }
        debug!("dictionary scan found {} words", words.len());
        words
    }

    /// Checks that `path` is a legal snake spelling `word`: same length, no repeated cell,
    /// consecutive cells adjacent and every cell inside the grid
    pub fn spells(&self, path: &[Position], word: &str) -> bool {
        let word = word.chars().collect::<Vec<_>>();
        if path.len() != word.len() {
            return false;
        }
        let mut seen = HashSet::new();
        for (i, (pos, &c)) in path.iter().zip(word.iter()).enumerate() {
            if pos.row >= self.rows() || pos.col >= self.cols() {
                return false;
            }
            if self[*pos] != c || !seen.insert(*pos) {
                return false;
            }
            if i > 0 && !path[i - 1].is_adjacent(pos) {
                return false;
            }
        }
        true
    }
}

fn invalid_grid(reason: String) -> KataError {
    debug!("rejecting grid: {}", reason);
    KataError::InvalidGrid { reason }
}

/// Validates the rows and checks whether `word` snakes through them
pub fn word_exists_on_grid<S: AsRef<str>>(rows: &[S], word: &str) -> KataResult<bool> {
    let grid = Grid::from_rows(rows)?;
    Ok(grid.contains_word(word))
}

impl std::ops::Index<Position> for Grid {
    type Output = char;

    fn index(&self, index: Position) -> &Self::Output {
        &self.cells[[index.row, index.col]]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.rows() {
            for c in row.iter() {
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn puzzle() -> Grid {
        Grid::from_rows(&DEMO_PUZZLE).unwrap()
    }

    #[test]
    fn test_rejects_bad_grids() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            Grid::from_rows(&empty),
            Err(KataError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::from_rows(&["", ""]),
            Err(KataError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::from_rows(&["AB", "C"]),
            Err(KataError::InvalidGrid { .. })
        ));
        assert!(matches!(
            word_exists_on_grid(&["AB", "CDE"], "AB"),
            Err(KataError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_empty_word_always_found() {
        assert!(puzzle().contains_word(""));
        assert!(word_exists_on_grid(&["Z"], "").unwrap());
        assert_eq!(puzzle().find_path(""), Some(vec![]));
    }

    #[test]
    fn test_single_cell_cannot_be_reused() {
        assert!(word_exists_on_grid(&["A"], "A").unwrap());
        assert!(!word_exists_on_grid(&["A"], "AA").unwrap());
    }

    #[test]
    fn test_two_by_two() {
        // B and C are diagonal, so ABCD cannot be traced
        assert!(!word_exists_on_grid(&["AB", "CD"], "ABCD").unwrap());
        assert!(word_exists_on_grid(&["AB", "CD"], "ABDC").unwrap());
        assert!(word_exists_on_grid(&["AB", "CD"], "CABD").unwrap());
    }

    #[test]
    fn test_demo_puzzle() {
        let grid = puzzle();
        for word in ["ANGULAR", "REACT", "UNDEFINED", "RED", "STRING", "CLASS", "ARRAY"] {
            assert!(grid.contains_word(word), "{} should be found", word);
        }
        for word in ["FUNCTION", "NULL"] {
            assert!(!grid.contains_word(word), "{} should not be found", word);
        }
    }

    #[test]
    fn test_found_paths_are_legal_snakes() {
        let grid = puzzle();
        for word in ["ANGULAR", "REACT", "UNDEFINED", "STRING", "CLASS", "ARRAY"] {
            let path = grid.find_path(word).unwrap();
            assert!(grid.spells(&path, word), "bad path {:?} for {}", path, word);
        }
    }

    #[test]
    fn test_backtracking_releases_cells() {
        // The first branch (A, down to B, C) dead ends at C. The second branch (A, right
        // to B) needs that same C, so it must have been released.
        let grid = Grid::from_rows(&["AB", "BC", "EX"]).unwrap();
        let path = grid.find_path("ABCBE").unwrap();
        assert_eq!(
            path,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 0),
                Position::new(2, 0),
            ]
        );
        // Would need the top-left A twice
        assert!(!grid.contains_word("ABCBA"));
    }

    #[test]
    fn test_word_longer_than_grid() {
        let grid = Grid::from_rows(&["AA", "AA"]).unwrap();
        assert!(grid.contains_word("AAAA"));
        assert!(!grid.contains_word("AAAAA"));
    }

    #[test]
    fn test_contains_words_matches_single_searches() {
        let grid = puzzle();
        let words = ["ANGULAR", "FUNCTION", "RED", "NULL", "", "YTIRTSP"];
        let expected = words.iter().map(|w| grid.contains_word(w)).collect::<Vec<_>>();
        assert_eq!(grid.contains_words(&words), expected);
        assert_eq!(expected, vec![true, false, true, false, true, true]);
    }

    #[test]
    fn test_random_walks_are_found() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let grid = Grid::random(4, 5, &mut rng).unwrap();
            // Random self-avoiding walk from a random cell
            let mut pos = Position::new(rng.gen_range(0..4), rng.gen_range(0..5));
            let mut walk = vec![pos];
            let len = rng.gen_range(1..8);
            while walk.len() < len {
                let options = pos
                    .adjacent(4, 5)
                    .filter(|p| !walk.contains(p))
                    .collect::<Vec<_>>();
                if options.is_empty() {
                    break;
                }
                pos = options[rng.gen_range(0..options.len())];
                walk.push(pos);
            }
            let word = walk.iter().map(|&p| grid[p]).collect::<String>();
            let path = grid.find_path(&word).unwrap();
            assert!(grid.spells(&path, &word));
        }
    }

    #[test]
    fn test_from_file_loads_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.json");
        std::fs::write(&path, r#"["AB", "CD"]"#).unwrap();
        let grid = Grid::from_file(&path).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert!(grid.contains_word("ABDC"));
        assert!(!grid.contains_word("ABCD"));
    }

    #[test]
    fn test_from_file_rejects_ragged_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ragged.json");
        std::fs::write(&path, r#"["ABC", "D"]"#).unwrap();
        assert!(matches!(
            Grid::from_file(&path),
            Err(KataError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_random_grid_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::random(3, 6, &mut rng).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 6));
        assert!(grid.positions().all(|p| grid[p].is_ascii_uppercase()));
        assert!(Grid::random(0, 6, &mut rng).is_err());
    }

    #[test]
    fn test_display_round_trips_rows() {
        let grid = puzzle();
        let text = grid.to_string();
        let rows = text.lines().collect::<Vec<_>>();
        assert_eq!(Grid::from_rows(&rows).unwrap(), grid);
    }

    #[test]
    fn test_dictionary_scan() {
        let grid = puzzle();
        let mut words = vec![
            "ANGULAR", "ARRAY", "CLASS", "FUNCTION", "NULL", "RED", "REACT", "STRING", "UNDEFINED",
            "A", "AN",
        ];
        words.sort_unstable();
        let dict = Set::from_iter(words.iter()).unwrap();

        let found = grid.words_in(&dict, MIN_WORD_LENGTH);
        let expected = words
            .iter()
            .filter(|w| w.len() >= MIN_WORD_LENGTH && grid.contains_word(w))
            .map(|w| w.to_string())
            .collect::<Vec<_>>();
        assert_eq!(found, expected);
        assert!(found.contains(&"REACT".to_string()));
        assert!(!found.contains(&"NULL".to_string()));
        assert!(!found.contains(&"A".to_string()));

        let with_single = grid.words_in(&dict, 0);
        assert!(with_single.contains(&"A".to_string()));
    }
}

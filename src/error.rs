use thiserror::Error;

pub type KataResult<T> = Result<T, KataError>;

#[derive(Error, Debug)]
pub enum KataError {
    /// Grid has no rows, an empty row, or rows of different widths
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// Permutation input repeats a symbol
    #[error("invalid input: symbol {symbol} appears more than once")]
    InvalidInput { symbol: String },

    /// Unbalanced braces in an alternation expression
    #[error("malformed brace expression at byte {position}: {reason}")]
    MalformedBrace { position: usize, reason: &'static str },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not decode json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not build dictionary: {0}")]
    Fst(#[from] fst::Error),
}

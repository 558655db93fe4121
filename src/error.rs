use thiserror::Error;

/// Fatal build failures. Every variant aborts the whole run; there is no
/// partial-success mode.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("{file}: required column '{column}' is missing from the header")]
    Schema { file: String, column: String },

    #[error("{file} line {line}: {message}")]
    Validation {
        file: String,
        line: usize,
        message: String,
    },

    #[error("{file}: malformed CSV")]
    Parse {
        file: String,
        #[source]
        source: csv::Error,
    },
}

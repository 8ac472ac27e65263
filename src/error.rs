use std::path::PathBuf;

/// Errors from the file-facing parts of the crate.
///
/// Training, construction and scoring never fail; only reading and writing
/// sample tables does.
#[derive(Debug, thiserror::Error)]
pub enum ForestError {
    /// Returned when a file cannot be opened or created.
    #[error("cannot access {path}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV layer fails to read or write a record.
    #[error("CSV error in {path}")]
    Csv {
        /// Path of the file.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the header row is missing or has no feature columns.
    #[error("no feature columns in header of {path}")]
    EmptyHeader {
        /// Path of the file.
        path: PathBuf,
    },

    /// Returned when a configuration file has a header but no data row.
    #[error("no configuration row in {path}")]
    MissingConfig {
        /// Path of the file.
        path: PathBuf,
    },

    /// Returned when a feature cell is not an unsigned 64-bit integer.
    #[error("invalid value \"{value}\" at row {row}, column \"{column}\"")]
    InvalidValue {
        /// Zero-based data row index.
        row: usize,
        /// Header name of the offending column.
        column: String,
        /// Raw cell contents.
        value: String,
    },
}

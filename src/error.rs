use thiserror::Error;

/// Failures of the load → aggregate pipeline.
///
/// None of these are retryable: parsing the same file again yields the same result.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required column is absent after header normalization.
    #[error("missing required column `{column}`")]
    MissingColumn { column: String },

    /// A column the loader reads appears more than once after lower-casing.
    #[error("duplicate column `{column}`")]
    DuplicateColumn { column: String },

    /// A cell in a strictly numeric column could not be parsed.
    /// `row` is 1-based and counts data rows only (the header is not row 1).
    #[error("malformed value {value:?} in column `{column}` at row {row}")]
    MalformedInput {
        column: String,
        row: usize,
        value: String,
    },

    /// The table has a header but no data rows, so averages are undefined.
    #[error("input table has no data rows")]
    EmptyTable,

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Could not find the history table in the page markup")]
    TableNotFound,

    #[error("Found {count} tables in the page markup but none of them is the history table")]
    AmbiguousTable { count: usize },

    #[error("History table has no header row")]
    MissingHeader,

    #[error("Required column '{0}' not found in the history table header")]
    MissingColumn(String),

    #[error("None of the {rows} rows of the history table could be read")]
    MalformedRows { rows: usize },

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

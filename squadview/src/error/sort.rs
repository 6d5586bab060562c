//! Table sorting errors

/// Errors raised while sorting a table by one of its headers.
///
/// None of these ever reach the end user: the click handler reports them
/// through [`Diagnostics`](crate::diagnostics::Diagnostics) and leaves the
/// table untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// No element with this id exists in the document.
    #[error("element '{0}' not found")]
    ElementNotFound(String),

    /// The header has no enclosing table.
    #[error("header '{0}' is not inside a table")]
    NoTable(String),

    /// The table has no body to reorder.
    #[error("table '{0}' has no tbody")]
    NoBody(String),

    /// A row has fewer cells than the sorted column needs.
    #[error("row '{row}' has no cell at column {column}")]
    MissingCell {
        /// Id of the offending row.
        row: String,
        /// Zero-based column index that was requested.
        column: usize,
    },
}

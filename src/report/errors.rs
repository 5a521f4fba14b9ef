use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Report boundary not found: expected a 'total' line followed by a 'total: $' line")]
    BoundaryNotFound,
    #[error("Row extraction failed: {0}")]
    Row(#[from] csv::Error)
}

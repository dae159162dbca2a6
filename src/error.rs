use thiserror::Error;

/// Failure kinds of the numeric engine. Every operation is a pure function,
/// so an error is always immediate and total for that call; nothing is
/// retried and no partial state survives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Modular inverse of zero, or a degenerate slope in a curve formula.
    #[error("division by zero in the field")]
    DivisionByZero,

    /// A point failed the curve-equation check. Only raised on validation
    /// paths, never inside the group arithmetic itself.
    #[error("point ({x}, {y}) is not on the curve")]
    InvalidPoint { x: String, y: String },

    /// A scalar or direction selector does not fit the fixed bit width.
    /// Truncating instead would silently desynchronize the witness values
    /// from the constraint side.
    #[error("value of {bits} bits exceeds the fixed width of {width} bits")]
    BitWidthOverflow { bits: usize, width: usize },

    /// A witness assignment could not be decoded or validated.
    #[error("invalid witness assignment: {0}")]
    InvalidAssignment(String),
}

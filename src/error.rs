use thiserror::Error;

/// Everything that can go wrong while building, combining, walking or
/// decomposing permutation pairs.
///
/// All failures are deterministic: the same input reproduces the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DessinError {
    /// Two permutations (or two halves of a flat sequence) of unequal length were combined.
    #[error("Shape mismatch: left has {left} edges, right has {right}")]
    ShapeMismatch { left: usize, right: usize },

    /// An operand of a product or repacking is malformed.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// An old index outside `0..max` was handed to a relabelling.
    #[error("Index {index} outside the relabelling domain (max size = {max})")]
    Domain { index: usize, max: usize },

    /// A canonical label that has not been assigned yet was looked up.
    #[error("Index i = {index} out of bounds (current size = {size})")]
    Range { index: usize, size: usize },

    /// A stateful API was called out of order.
    #[error("Protocol misuse: expected {expected} state, found {found}")]
    State {
        expected: &'static str,
        found: &'static str,
    },

    /// Internal bookkeeping no longer adds up, usually because a non-permutation slipped in.
    #[error("State inconsistency: {0}")]
    StateInconsistency(String),

    #[error("Not a permutation: {0:?}")]
    NotAPermutation(Vec<usize>),

    #[error("Cannot decode {input:?} at position {position}")]
    Decode { input: String, position: usize },
}

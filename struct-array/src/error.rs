use thiserror::Error;

/// An index outside `0..length` was used to access a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("index out of range: the length is {length} but the index is {index}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub length: usize,
}

impl IndexOutOfRange {
    pub const fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }
}

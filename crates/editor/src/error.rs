use std::fmt;

use foundation::ids::ObjectId;

/// Misuse of the placement model API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownObject(ObjectId),
    DuplicateObject(ObjectId),
    /// Sizes that are not positive finite numbers.
    InvalidDimensions,
    /// A reorder that does not name every current object exactly once.
    NotAPermutation { expected: usize, found: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownObject(id) => write!(f, "Unknown object: {id}"),
            ModelError::DuplicateObject(id) => write!(f, "Duplicate object id: {id}"),
            ModelError::InvalidDimensions => write!(f, "Sizes must be positive numbers"),
            ModelError::NotAPermutation { expected, found } => write!(
                f,
                "Reorder must list each of the {expected} objects exactly once (got {found} ids)"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

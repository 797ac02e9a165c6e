//! Error types shared by the sortscope containers.
//!
//! The containers report two failure kinds of their own (capacity and index
//! bounds). `InvalidInput` is raised by the outer layers that turn user text
//! into typed values; the containers never parse strings themselves.

use thiserror::Error;

/// Failures reported by container operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("array is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("invalid index: {index} (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ContainerError {
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, ContainerError::CapacityExceeded { .. })
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, ContainerError::IndexOutOfRange { .. })
    }
}

/// Result type alias for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_names_capacity() {
        let err = ContainerError::CapacityExceeded { capacity: 3 };
        assert_eq!(err.to_string(), "array is full (capacity 3)");
        assert!(err.is_capacity_exceeded());
        assert!(!err.is_index_out_of_range());
    }

    #[test]
    fn index_message_names_index_and_len() {
        let err = ContainerError::IndexOutOfRange { index: 7, len: 2 };
        assert_eq!(err.to_string(), "invalid index: 7 (len 2)");
        assert!(err.is_index_out_of_range());
    }

    #[test]
    fn invalid_input_carries_text() {
        let err = ContainerError::InvalidInput("abc".into());
        assert_eq!(err.to_string(), "invalid input: abc");
    }
}

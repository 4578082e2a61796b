//! Error types for segmented-list.

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors that can occur when querying or mutating an adapter.
///
/// Every variant is a caller-contract violation. Idempotent misuse (removing a
/// slot that is not registered, stopping load-more twice, appending an empty
/// batch) is absorbed silently and never produces an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// A content index was outside the content sequence.
    #[error("content index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// A flat position was outside `[0, total)`.
    #[error("position {position} out of range for {total} flat positions")]
    PositionOutOfRange { position: usize, total: usize },

    /// A slot view type does not belong to any registered header or footer.
    #[error("no header or footer registered for view type {0:#x}")]
    UnknownViewType(u64),

    /// Invalid adapter configuration.
    #[error("invalid adapter configuration: {0}")]
    Config(String),
}

impl AdapterError {
    /// Create a content index error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a flat position error.
    pub fn position_out_of_range(position: usize, total: usize) -> Self {
        Self::PositionOutOfRange { position, total }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AdapterError::index_out_of_range(5, 3);
        assert_eq!(err.to_string(), "content index 5 out of range for 3 items");

        let err = AdapterError::position_out_of_range(9, 4);
        assert_eq!(err.to_string(), "position 9 out of range for 4 flat positions");

        let err = AdapterError::UnknownViewType(0x1_0000_0002);
        assert_eq!(
            err.to_string(),
            "no header or footer registered for view type 0x100000002"
        );
    }
}

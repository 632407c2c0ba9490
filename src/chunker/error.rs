use thiserror::Error;

/// Rejected chunker configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chunk_size must be positive")]
    ZeroChunkSize,

    #[error("chunk_overlap ({overlap}) is larger than chunk_size ({size})")]
    OverlapExceedsChunkSize { overlap: usize, size: usize },

    #[error("primary separator must not be empty")]
    EmptyPrimarySeparator,

    #[error("fallback separator at position {position} is empty")]
    EmptyFallbackSeparator { position: usize },
}

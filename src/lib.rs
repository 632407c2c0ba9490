// Public API exports
pub mod chunker;
pub mod document;
pub mod input;

// Re-export main types for convenience
pub use chunker::{
    BoundaryClass, Chunker, ChunkerBuilder, ChunkerConfig, ConfigError, SeparatorPolicy,
    DEFAULT_BOUNDARY_CHARS, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_PRIMARY_SEPARATOR,
};

pub use document::{Document, Metadata};

pub use input::{collect_documents, content_hash, read_stdin, SOURCE_KEY, STDIN_PATH};

mod builder;
mod coalesce;
mod config;
mod error;
mod oversize;
mod overlap;
mod primary;


pub use builder::ChunkerBuilder;
pub use config::{
    BoundaryClass, ChunkerConfig, SeparatorPolicy, DEFAULT_BOUNDARY_CHARS, DEFAULT_CHUNK_OVERLAP,
    DEFAULT_CHUNK_SIZE, DEFAULT_PRIMARY_SEPARATOR,
};
pub use error::ConfigError;

use rayon::prelude::*;
use tracing::debug;

use crate::document::{Document, Metadata};
use coalesce::coalesce;
use overlap::{trim_chunks, OverlapWindow};
use oversize::resolve_oversize;
use primary::split_primary;

/// Splits text into ordered, size-bounded chunks with boundary-aware overlap.
///
/// A `Chunker` holds only its validated configuration, so one instance can be
/// shared across threads and reused for any number of documents.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Validate `config` and build a chunker from it
    pub fn new(config: ChunkerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builder() -> ChunkerBuilder {
        ChunkerBuilder::new()
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split `text` into chunks.
    ///
    /// Pipeline:
    /// - split on the primary separator
    /// - re-split pieces over `chunk_size` on the fallback separators, then
    ///   fixed-width windows
    /// - greedily re-merge the sub-pieces of each oversized piece
    /// - attach neighbor context, trim, and drop empty chunks
    ///
    /// Never fails; the empty string gives an empty list.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces = split_primary(text, &self.config.primary_separator);
        let primary_count = pieces.len();

        let pieces = self.resolve_oversized(pieces);
        let resolved_count = pieces.len();

        let chunks = if self.config.chunk_overlap > 0 {
            self.overlap_window().inject(&pieces)
        } else {
            pieces
        };
        let chunks = trim_chunks(chunks);

        debug!(
            chars = text.chars().count(),
            primary = primary_count,
            resolved = resolved_count,
            chunks = chunks.len(),
            "split text"
        );

        chunks
    }

    /// Split each document, copying its metadata onto every chunk.
    ///
    /// Documents are processed in parallel; the output keeps document order,
    /// then chunk order within each document.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Document> {
        let chunks: Vec<Document> = documents
            .par_iter()
            .flat_map_iter(|document| {
                self.split_text(&document.content)
                    .into_iter()
                    .map(move |content| Document {
                        content,
                        metadata: document.metadata.clone(),
                    })
            })
            .collect();

        debug!(
            documents = documents.len(),
            chunks = chunks.len(),
            "split documents"
        );

        chunks
    }

    /// Pair each text with the metadata at the same position (empty when
    /// `metadatas` is shorter) and split the resulting documents.
    pub fn create_documents<I, S>(&self, texts: I, metadatas: &[Metadata]) -> Vec<Document>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<Document> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Document {
                content: text.into(),
                metadata: metadatas.get(i).cloned().unwrap_or_default(),
            })
            .collect();

        self.split_documents(&documents)
    }

    /// Replace every piece over `chunk_size` with its re-split, re-merged
    /// sub-pieces. Sub-pieces of different primary pieces are never merged.
    fn resolve_oversized(&self, pieces: Vec<String>) -> Vec<String> {
        let size = self.config.chunk_size;

        pieces
            .into_iter()
            .flat_map(|piece| {
                if piece.chars().count() > size {
                    let split = resolve_oversize(
                        &piece,
                        &self.config.fallback_separators,
                        size,
                        self.config.separator_policy,
                    );
                    coalesce(split, size)
                } else {
                    vec![piece]
                }
            })
            .collect()
    }

    fn overlap_window(&self) -> OverlapWindow<'_> {
        OverlapWindow {
            overlap: self.config.chunk_overlap,
            growth: self.config.effective_growth(),
            separator: &self.config.overlap_separator,
            boundaries: &self.config.boundaries,
        }
    }
}

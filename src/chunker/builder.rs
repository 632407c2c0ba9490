use super::config::{BoundaryClass, ChunkerConfig, SeparatorPolicy};
use super::error::ConfigError;
use super::Chunker;

/// Chained construction of a [`Chunker`], validated on `build`
#[derive(Debug, Clone, Default)]
pub struct ChunkerBuilder {
    config: ChunkerConfig,
}

impl ChunkerBuilder {
    /// Start from the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config, e.g. one loaded from TOML
    pub fn from_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the base overlap; 0 disables overlap injection
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    pub fn primary_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.primary_separator = separator.into();
        self
    }

    /// Replace the fallback separator list (tried in order)
    pub fn fallback_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.fallback_separators = separators.into_iter().map(Into::into).collect();
        self
    }

    pub fn overlap_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.overlap_separator = separator.into();
        self
    }

    pub fn overlap_growth(mut self, growth: usize) -> Self {
        self.config.overlap_growth = Some(growth);
        self
    }

    pub fn boundaries(mut self, boundaries: BoundaryClass) -> Self {
        self.config.boundaries = boundaries;
        self
    }

    /// Shorthand for an explicit boundary character list
    pub fn boundary_chars(self, chars: impl IntoIterator<Item = char>) -> Self {
        self.boundaries(BoundaryClass::Chars(chars.into_iter().collect()))
    }

    pub fn separator_policy(mut self, policy: SeparatorPolicy) -> Self {
        self.config.separator_policy = policy;
        self
    }

    /// Validate the settings and build the chunker
    pub fn build(self) -> Result<Chunker, ConfigError> {
        Chunker::new(self.config)
    }
}

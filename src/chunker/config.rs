use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Default target chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Default number of characters shared between neighboring chunks
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Default first-pass separator (paragraph break)
pub const DEFAULT_PRIMARY_SEPARATOR: &str = "\n\n";

/// Characters an overlap window may stop on by default
pub const DEFAULT_BOUNDARY_CHARS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Which characters end an overlap window while it grows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryClass {
    /// An explicit character list
    Chars(Vec<char>),
    /// Anything `char::is_whitespace` accepts
    Whitespace,
}

impl BoundaryClass {
    pub fn contains(&self, c: char) -> bool {
        match self {
            Self::Chars(chars) => chars.contains(&c),
            Self::Whitespace => c.is_whitespace(),
        }
    }
}

impl Default for BoundaryClass {
    fn default() -> Self {
        Self::Chars(DEFAULT_BOUNDARY_CHARS.to_vec())
    }
}

/// How the recursive oversize pass re-attaches separators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorPolicy {
    /// Every sub-piece carries its separator exactly once
    #[default]
    AppendOnce,
    /// Size checks and recursion see `sub_piece + separator`, so recursed
    /// pieces end up carrying the separator twice. Matches chunks produced by
    /// earlier ingestion runs byte for byte.
    Reappend,
}

/// Chunker settings. Every field has a default, so a TOML file only needs the
/// keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Target maximum chunk length in characters
    pub chunk_size: usize,
    /// Base number of characters carried between adjacent chunks (0 disables overlap)
    pub chunk_overlap: usize,
    /// Separator for the first split pass
    pub primary_separator: String,
    /// Progressively finer separators for pieces still over `chunk_size`
    pub fallback_separators: Vec<String>,
    /// Inserted around injected overlap text
    pub overlap_separator: String,
    /// Extra characters an overlap window may grow while seeking a boundary.
    /// `None` means the same as `chunk_overlap`.
    pub overlap_growth: Option<usize>,
    /// Valid stopping points for a growing overlap window
    pub boundaries: BoundaryClass,
    pub separator_policy: SeparatorPolicy,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            primary_separator: DEFAULT_PRIMARY_SEPARATOR.to_string(),
            fallback_separators: vec!["\n".to_string()],
            overlap_separator: String::new(),
            overlap_growth: None,
            boundaries: BoundaryClass::default(),
            separator_policy: SeparatorPolicy::default(),
        }
    }
}

impl ChunkerConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ChunkerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check the settings, reporting the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.chunk_overlap > self.chunk_size {
            return Err(ConfigError::OverlapExceedsChunkSize {
                overlap: self.chunk_overlap,
                size: self.chunk_size,
            });
        }
        if self.primary_separator.is_empty() {
            return Err(ConfigError::EmptyPrimarySeparator);
        }
        if let Some(position) = self.fallback_separators.iter().position(|s| s.is_empty()) {
            return Err(ConfigError::EmptyFallbackSeparator { position });
        }
        Ok(())
    }

    /// Growth budget with the "same as overlap" default resolved
    pub fn effective_growth(&self) -> usize {
        self.overlap_growth.unwrap_or(self.chunk_overlap)
    }
}

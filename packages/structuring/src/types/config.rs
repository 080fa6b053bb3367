//! Configuration for the structuring pipeline.

use serde::{Deserialize, Serialize};

/// Limits applied while turning raw captures into structured documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuringConfig {
    /// Minimum raw-text length (in chars) accepted for processing.
    ///
    /// Shorter captures are rejected before any enrichment stage runs.
    pub min_input_chars: usize,

    /// Maximum title length surfaced downstream.
    pub title_max_chars: usize,

    /// Length of the raw-text excerpt used as the fallback summary.
    pub summary_excerpt_chars: usize,

    /// Length of the raw-text excerpt retained on the heuristic path.
    pub raw_excerpt_chars: usize,
}

impl Default for StructuringConfig {
    fn default() -> Self {
        Self {
            min_input_chars: 20,
            title_max_chars: 100,
            summary_excerpt_chars: 300,
            raw_excerpt_chars: 1000,
        }
    }
}

impl StructuringConfig {
    /// Create a new config with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum accepted input length.
    pub fn with_min_input_chars(mut self, min: usize) -> Self {
        self.min_input_chars = min;
        self
    }

    /// Set the maximum title length.
    pub fn with_title_max_chars(mut self, max: usize) -> Self {
        self.title_max_chars = max;
        self
    }
}

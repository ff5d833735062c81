//! Tunables for chunking and pacing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chunk size used when splitting page text, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Overlap between consecutive chunks, in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 500;

/// Configuration for the text splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum characters per chunk. Default: 10,000.
    pub chunk_size: usize,

    /// Characters shared with the previous chunk. Default: 500.
    pub chunk_overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }
}

/// Fixed pauses around external calls.
///
/// Every pause can be zero, which is what tests use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Settle time after the page body appears, for client-side rendering.
    pub render_wait: Duration,

    /// Minimum spacing between model calls.
    pub model_call_interval: Duration,

    /// Politeness delay between targets.
    pub target_interval: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            render_wait: Duration::from_secs(5),
            model_call_interval: Duration::from_secs(5),
            target_interval: Duration::from_secs(3),
        }
    }
}

impl Pacing {
    /// No pauses at all.
    pub fn none() -> Self {
        Self {
            render_wait: Duration::ZERO,
            model_call_interval: Duration::ZERO,
            target_interval: Duration::ZERO,
        }
    }

    pub fn with_render_wait(mut self, wait: Duration) -> Self {
        self.render_wait = wait;
        self
    }

    pub fn with_model_call_interval(mut self, interval: Duration) -> Self {
        self.model_call_interval = interval;
        self
    }

    pub fn with_target_interval(mut self, interval: Duration) -> Self {
        self.target_interval = interval;
        self
    }
}

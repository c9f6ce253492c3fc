//! # Configuration Module
//!
//! This module holds the settings a priority ring buffer is built from.
//!
//! ## Plain English Explanation
//!
//! Every buffer is built once from a `Config` and the settings never
//! change afterwards:
//! - How many slots it has
//! - How far a new element may "bubble" toward the front
//! - Whether a full buffer may throw away an important element
//! - Whether the buffer locks itself for use across threads

use crate::error::BufferError;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// Construction settings for a priority ring buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    // ----------------------------------------
    // STORAGE SETTINGS
    // "How much to remember"
    // ----------------------------------------
    /// Total number of slots
    ///
    /// ## Limits
    /// Must be at least 1.
    pub capacity: usize,

    /// Maximum number of swaps a new element may make toward the head
    ///
    /// ## Plain English
    /// 0 means plain arrival order. Larger windows give a better local
    /// priority order, at O(window) cost per insert.
    ///
    /// ## Limits
    /// At most `capacity - 1`.
    pub bubble_window: usize,

    // ----------------------------------------
    // OVERFLOW SETTINGS
    // "What to do when full"
    // ----------------------------------------
    /// Refuse to evict a head element whose priority is at least the
    /// incoming element's priority
    pub overwrite_guard: bool,

    // ----------------------------------------
    // CONCURRENCY SETTINGS
    // ----------------------------------------
    /// Wrap the buffer in an internal reader/writer lock
    pub thread_safe: bool,
}

impl Config {
    /// Creates a configuration with the given capacity, no reordering,
    /// no overwrite guard and no internal locking
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bubble_window: 0,
            overwrite_guard: false,
            thread_safe: false,
        }
    }

    /// Sets the bubble window
    pub fn with_bubble_window(mut self, bubble_window: usize) -> Self {
        self.bubble_window = bubble_window;
        self
    }

    /// Enables or disables the overwrite guard
    pub fn with_overwrite_guard(mut self, overwrite_guard: bool) -> Self {
        self.overwrite_guard = overwrite_guard;
        self
    }

    /// Enables or disables internal locking
    pub fn with_thread_safe(mut self, thread_safe: bool) -> Self {
        self.thread_safe = thread_safe;
        self
    }

    /// Validates the configuration and returns errors if invalid
    ///
    /// ## Plain English
    /// Returns a list of problems, or empty if all is well. The window
    /// is only checked against a usable capacity.
    pub fn validate(&self) -> Vec<BufferError> {
        let mut errors = Vec::new();

        if self.capacity == 0 {
            errors.push(BufferError::InvalidCapacity);
        } else if self.bubble_window > self.capacity - 1 {
            errors.push(BufferError::InvalidWindow {
                window: self.bubble_window,
                capacity: self.capacity,
            });
        }

        errors
    }

    /// Validates the configuration, failing with the first problem found
    pub fn check(&self) -> Result<(), BufferError> {
        match self.validate().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1024,
            bubble_window: 8,
            overwrite_guard: false,
            thread_safe: false,
        }
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.capacity, 1024);
        assert_eq!(config.bubble_window, 8);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_builders() {
        let config = Config::new(16)
            .with_bubble_window(15)
            .with_overwrite_guard(true)
            .with_thread_safe(true);

        assert_eq!(config.capacity, 16);
        assert_eq!(config.bubble_window, 15);
        assert!(config.overwrite_guard);
        assert!(config.thread_safe);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::new(0);
        assert_eq!(config.validate(), vec![BufferError::InvalidCapacity]);

        config.capacity = 4;
        config.bubble_window = 4;
        assert_eq!(
            config.check(),
            Err(BufferError::InvalidWindow {
                window: 4,
                capacity: 4
            })
        );

        config.bubble_window = 3;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_single_slot_only_allows_zero_window() {
        assert!(Config::new(1).check().is_ok());
        assert!(Config::new(1).with_bubble_window(1).check().is_err());
    }
}

//! # Error Types Module
//!
//! This module defines the error kinds surfaced by the priority ring buffer.
//!
//! ## Plain English Explanation
//!
//! There are two families of problems:
//!
//! - "You built it wrong": the capacity or bubble window is invalid.
//!   These are programmer errors. Fix the configuration.
//! - "Not right now": the buffer is empty, or it is full and refused to
//!   throw away something important. These are normal outcomes that the
//!   caller is expected to branch on (back off, drop, escalate priority).

use thiserror::Error;

// ============================================
// MAIN BUFFER ERROR
// ============================================

/// Everything that can go wrong when building or using a buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Capacity must be at least one slot
    #[error("capacity must be positive")]
    InvalidCapacity,

    /// Bubble window must be smaller than the capacity
    ///
    /// ## What This Means
    /// An element may walk at most `capacity - 1` slots toward the head,
    /// otherwise it would lap itself.
    #[error("bubble window {window} must be less than capacity {capacity}")]
    InvalidWindow {
        /// The rejected window
        window: usize,
        /// The configured capacity
        capacity: usize,
    },

    /// Nothing to dequeue or peek at
    #[error("buffer is empty")]
    BufferEmpty,

    /// Buffer is full and the overwrite guard protected the head element
    ///
    /// ## What This Means
    /// The oldest element is at least as important as the one you tried
    /// to add, so it was kept and your element was refused.
    #[error(
        "buffer is full, refused to overwrite priority {victim_priority} with priority {priority}"
    )]
    BufferFull {
        /// Priority of the rejected element
        priority: i64,
        /// Priority of the head element that was protected
        victim_priority: i64,
    },
}

impl BufferError {
    /// Returns true for runtime conditions the caller should branch on,
    /// false for configuration mistakes.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BufferEmpty | Self::BufferFull { .. })
    }
}

// ============================================
// RESULT TYPE ALIAS
// ============================================

/// A Result type that uses BufferError
///
/// ## Plain English
///
/// Instead of writing `Result<Element<T>, BufferError>` everywhere,
/// we can write `BufferResult<Element<T>>`.
pub type BufferResult<T> = Result<T, BufferError>;

// ============================================
// TESTS
// ============================================

//! # Priority Ring
//!
//! A fixed-capacity circular buffer that keeps elements in approximate
//! priority order rather than strict arrival order.
//!
//! ## Architecture Overview
//!
//! The crate is structured into small modules:
//!
//! - `buffer`: the ring buffer itself, plus its locked variant
//! - `search`: predicates for finding elements
//! - `config`: construction settings
//! - `error`: error types
//!
//! ## Plain English
//!
//! New elements are appended at the back and may overtake up to
//! `bubble_window` less important neighbours. When full, the oldest element
//! is dropped, unless the overwrite guard protects it. Nothing ever blocks:
//! a full or empty buffer is reported as an error right away.

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod buffer;
pub mod config;
pub mod error;
pub mod search;

// ============================================
// RE-EXPORTS
// ============================================

pub use buffer::{Element, PriorityRingBuffer, SharedPriorityBuffer};
pub use config::Config;
pub use error::{BufferError, BufferResult};
pub use search::SearchFilter;

// ============================================
// IMPORTS
// ============================================

use std::sync::Arc;

// ============================================
// BUFFER STRATEGY
// ============================================

/// A priority ring buffer whose locking strategy is picked once, from
/// [`Config::thread_safe`], at construction.
///
/// ## Plain English
///
/// - `Unsynchronized`: no lock at all. Mutation needs `&mut`, so the
///   compiler makes sure only one caller changes it at a time.
/// - `Synchronized`: an internally locked buffer behind an `Arc`. Call
///   [`shared`](Self::shared) to hand a handle to other threads.
pub enum PriorityBuffer<T> {
    /// Single owner, no internal locking
    Unsynchronized(PriorityRingBuffer<T>),

    /// Reader/writer locked, shareable across threads
    Synchronized(Arc<SharedPriorityBuffer<T>>),
}

impl<T> PriorityBuffer<T> {
    /// Validates `config` and builds the matching variant.
    pub fn new(config: Config) -> BufferResult<Self> {
        if config.thread_safe {
            Ok(Self::Synchronized(Arc::new(SharedPriorityBuffer::new(config)?)))
        } else {
            Ok(Self::Unsynchronized(PriorityRingBuffer::new(config)?))
        }
    }

    /// Returns true if the buffer locks itself.
    pub fn is_thread_safe(&self) -> bool {
        matches!(self, Self::Synchronized(_))
    }

    /// Returns a shareable handle, if this buffer was built thread safe.
    pub fn shared(&self) -> Option<Arc<SharedPriorityBuffer<T>>> {
        match self {
            Self::Unsynchronized(_) => None,
            Self::Synchronized(buffer) => Some(Arc::clone(buffer)),
        }
    }

    /// Adds an element. See [`PriorityRingBuffer::insert`].
    pub fn insert(&mut self, value: T, priority: i64) -> BufferResult<()> {
        match self {
            Self::Unsynchronized(buffer) => buffer.insert(value, priority),
            Self::Synchronized(buffer) => buffer.insert(value, priority),
        }
    }

    /// Removes and returns the head element.
    pub fn dequeue(&mut self) -> BufferResult<Element<T>> {
        match self {
            Self::Unsynchronized(buffer) => buffer.dequeue(),
            Self::Synchronized(buffer) => buffer.dequeue(),
        }
    }

    /// Returns logical offsets of elements matching every filter.
    pub fn search(&self, filters: &[SearchFilter<'_, T>]) -> Vec<usize> {
        match self {
            Self::Unsynchronized(buffer) => buffer.search(filters),
            Self::Synchronized(buffer) => buffer.search(filters),
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        match self {
            Self::Unsynchronized(buffer) => buffer.clear(),
            Self::Synchronized(buffer) => buffer.clear(),
        }
    }

    /// Returns the number of live elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Unsynchronized(buffer) => buffer.len(),
            Self::Synchronized(buffer) => buffer.len(),
        }
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the next insert would evict the head.
    pub fn is_full(&self) -> bool {
        match self {
            Self::Unsynchronized(buffer) => buffer.is_full(),
            Self::Synchronized(buffer) => buffer.is_full(),
        }
    }

    /// Returns the fixed slot count. Never locks.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Unsynchronized(buffer) => buffer.capacity(),
            Self::Synchronized(buffer) => buffer.capacity(),
        }
    }
}

impl<T: Clone> PriorityBuffer<T> {
    /// Returns a copy of the head element.
    pub fn peek(&self) -> BufferResult<Element<T>> {
        match self {
            Self::Unsynchronized(buffer) => buffer.peek().cloned(),
            Self::Synchronized(buffer) => buffer.peek(),
        }
    }

    /// Returns a copy of the most important element.
    pub fn peek_max_priority(&self) -> BufferResult<Element<T>> {
        match self {
            Self::Unsynchronized(buffer) => buffer.peek_max_priority().cloned(),
            Self::Synchronized(buffer) => buffer.peek_max_priority(),
        }
    }

    /// Returns copies of all live elements, head first.
    pub fn snapshot(&self) -> Vec<Element<T>> {
        match self {
            Self::Unsynchronized(buffer) => buffer.snapshot(),
            Self::Synchronized(buffer) => buffer.snapshot(),
        }
    }
}

// ============================================
// LOGGING
// ============================================

/// Initialize logging for binaries and demos.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_follows_config() {
        init_logging();
        let local = PriorityBuffer::<u32>::new(Config::new(4)).unwrap();
        assert!(!local.is_thread_safe());
        assert!(local.shared().is_none());

        let shared = PriorityBuffer::<u32>::new(Config::new(4).with_thread_safe(true)).unwrap();
        assert!(shared.is_thread_safe());
        assert!(shared.shared().is_some());
    }

    #[test]
    fn test_construction_errors() {
        for thread_safe in [false, true] {
            let config = Config::new(0).with_thread_safe(thread_safe);
            assert!(matches!(
                PriorityBuffer::<u32>::new(config),
                Err(BufferError::InvalidCapacity)
            ));
        }
    }

    #[test]
    fn test_both_variants_behave_alike() {
        for thread_safe in [false, true] {
            let config = Config::new(3)
                .with_bubble_window(2)
                .with_overwrite_guard(true)
                .with_thread_safe(thread_safe);
            let mut buffer = PriorityBuffer::new(config).unwrap();

            buffer.insert("a", 1).unwrap();
            buffer.insert("b", 3).unwrap();
            assert!(!buffer.is_full());
            buffer.insert("c", 2).unwrap();
            assert_eq!(buffer.len(), 3);
            assert!(buffer.is_full());
            assert_eq!(buffer.peek().unwrap().value, "b");
            assert_eq!(buffer.peek_max_priority().unwrap().value, "b");

            // Head "b" (3) is protected against a priority 3 newcomer.
            assert!(matches!(
                buffer.insert("d", 3),
                Err(BufferError::BufferFull { .. })
            ));
            assert_eq!(buffer.search(&[SearchFilter::min_priority(2)]), vec![0, 1]);

            let values: Vec<_> = buffer.snapshot().into_iter().map(|e| e.value).collect();
            assert_eq!(values, vec!["b", "c", "a"]);

            assert_eq!(buffer.dequeue().unwrap().value, "b");
            buffer.clear();
            assert!(buffer.is_empty());
            assert_eq!(buffer.capacity(), 3);
        }
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let mut buffer = PriorityBuffer::new(Config::new(8).with_thread_safe(true)).unwrap();
        let handle = buffer.shared().unwrap();

        buffer.insert(7u8, 1).unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.dequeue().unwrap().value, 7);
        assert!(buffer.is_empty());
    }
}

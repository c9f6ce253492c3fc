//! # Priority Buffer Module
//!
//! This module provides the circular (ring) buffer that keeps elements in
//! approximate priority order.
//!
//! ## Plain English Explanation
//!
//! Imagine a circular conveyor belt with a fixed number of spots.
//! Every time a new item arrives:
//! 1. It goes on the belt at the next spot
//! 2. If it is more important than its neighbours, it may skip ahead a
//!    few spots (but only a few, so inserting stays cheap)
//! 3. If the belt is full, the oldest item falls off, unless the guard
//!    says it is too important to drop
//!
//! Two flavours are offered: [`PriorityRingBuffer`] for a single owner,
//! and [`SharedPriorityBuffer`] which locks itself for use across threads.

mod element;
mod ring_buffer;

pub use element::Element;
pub use ring_buffer::PriorityRingBuffer;

use crate::config::Config;
use crate::error::BufferResult;
use crate::search::SearchFilter;
use parking_lot::RwLock;

// ============================================
// SHARED PRIORITY BUFFER
// Thread-safe wrapper for our ring buffer
// ============================================

/// A thread-safe priority buffer that can be shared across threads
///
/// ## Plain English Explanation
///
/// Producers WRITE new elements, consumers REMOVE them, and monitors READ
/// the contents. This wrapper uses a read-write lock so only one part
/// changes the buffer at a time, but many can look at it together.
pub struct SharedPriorityBuffer<T> {
    /// The actual ring buffer, protected by a read-write lock
    /// - `insert`, `dequeue` and `clear` hold the write lock
    /// - everything else holds the read lock
    inner: RwLock<PriorityRingBuffer<T>>,

    /// Fixed at construction, readable without the lock
    capacity: usize,
}

impl<T> SharedPriorityBuffer<T> {
    /// Creates a new shared buffer
    pub fn new(config: Config) -> BufferResult<Self> {
        let capacity = config.capacity;
        let buffer = PriorityRingBuffer::new(config)?;

        log::info!("Creating shared priority buffer: {} slot capacity", capacity);

        Ok(Self {
            inner: RwLock::new(buffer),
            capacity,
        })
    }

    /// Adds an element under the write lock
    pub fn insert(&self, value: T, priority: i64) -> BufferResult<()> {
        let mut buffer = self.inner.write();
        buffer.insert(value, priority)
    }

    /// Removes and returns the head element under the write lock
    pub fn dequeue(&self) -> BufferResult<Element<T>> {
        let mut buffer = self.inner.write();
        buffer.dequeue()
    }

    /// Returns the positions of all elements matching every filter
    ///
    /// The offsets are a snapshot: another thread may move things as soon
    /// as the read lock is released.
    pub fn search(&self, filters: &[SearchFilter<'_, T>]) -> Vec<usize> {
        self.inner.read().search(filters)
    }

    /// Runs `f` against the buffer under a single read lock
    ///
    /// Useful when `T` is not `Clone`, or when several reads must agree.
    pub fn read_with<R>(&self, f: impl FnOnce(&PriorityRingBuffer<T>) -> R) -> R {
        let buffer = self.inner.read();
        f(&buffer)
    }

    /// Returns the number of elements currently stored
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the next insert would evict the head
    pub fn is_full(&self) -> bool {
        self.inner.read().is_full()
    }

    /// Returns the maximum number of elements we can store
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns how full the buffer is (0.0 = empty, 1.0 = full)
    pub fn fill_ratio(&self) -> f32 {
        self.len() as f32 / self.capacity as f32
    }

    /// Returns the insertion order the next insert will consume
    pub fn next_insertion_order(&self) -> u64 {
        self.inner.read().next_insertion_order()
    }

    /// Drops every element
    pub fn clear(&self) {
        let mut buffer = self.inner.write();
        buffer.clear();
    }
}

impl<T: Clone> SharedPriorityBuffer<T> {
    /// Returns a copy of the head element
    pub fn peek(&self) -> BufferResult<Element<T>> {
        self.inner.read().peek().cloned()
    }

    /// Returns a copy of the most important element
    pub fn peek_max_priority(&self) -> BufferResult<Element<T>> {
        self.inner.read().peek_max_priority().cloned()
    }

    /// Takes a snapshot of all current elements
    ///
    /// ## What Happens (Plain English)
    ///
    /// 1. We get a "read lock" (we can look but not modify)
    /// 2. Copy all elements out of the buffer, head first
    ///
    /// The original buffer is NOT modified.
    pub fn snapshot(&self) -> Vec<Element<T>> {
        self.inner.read().snapshot()
    }
}

// ============================================
// TESTS
// ============================================

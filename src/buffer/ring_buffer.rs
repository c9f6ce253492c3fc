//! # Priority Ring Buffer Implementation
//!
//! A fixed-size circular buffer that keeps elements in approximate
//! priority order.
//!
//! ## Plain English
//!
//! Picture a circular track with numbered parking spots. New cars park at
//! the back. An important car may overtake a few cars in front of it (the
//! "bubble window"), but never more than that. When every spot is taken,
//! the car at the front is towed away, unless the guard says it is too
//! important to tow.

use std::fmt;

use crate::buffer::Element;
use crate::config::Config;
use crate::error::{BufferError, BufferResult};
use crate::search::{matches_all, SearchFilter};

/// A fixed-capacity ring buffer with bounded local priority ordering.
///
/// ## Properties
/// - Fixed capacity (doesn't grow)
/// - O(bubble_window) insert
/// - Evicts the head when full, subject to the overwrite guard
/// - Not internally synchronized: mutation takes `&mut self`. See
///   [`SharedPriorityBuffer`](crate::SharedPriorityBuffer) for the locked
///   variant.
pub struct PriorityRingBuffer<T> {
    /// Slot storage; exactly the `len` slots from `head` are `Some`
    slots: Vec<Option<Element<T>>>,

    /// Slot of the oldest logical element
    head: usize,

    /// Slot the next insert writes into
    tail: usize,

    /// Number of live elements
    len: usize,

    /// Max swaps toward the head per insert
    bubble_window: usize,

    /// Refuse to evict an at-least-as-important head
    overwrite_guard: bool,

    /// Insertion order handed to the next insert attempt
    next_order: u64,
}

impl<T> PriorityRingBuffer<T> {
    /// Creates a buffer from a validated configuration.
    ///
    /// The `thread_safe` flag is ignored here; it is honoured by
    /// [`PriorityBuffer::new`](crate::PriorityBuffer::new).
    ///
    /// ## Example
    /// ```
    /// # use priority_ring::{Config, PriorityRingBuffer};
    /// let buffer: PriorityRingBuffer<i32> =
    ///     PriorityRingBuffer::new(Config::new(100).with_bubble_window(4)).unwrap();
    /// assert_eq!(buffer.capacity(), 100);
    /// ```
    pub fn new(config: Config) -> BufferResult<Self> {
        config.check()?;

        log::debug!(
            "Creating priority ring buffer: capacity={} bubble_window={} overwrite_guard={}",
            config.capacity,
            config.bubble_window,
            config.overwrite_guard
        );

        let mut slots = Vec::with_capacity(config.capacity);
        slots.resize_with(config.capacity, || None);

        Ok(Self {
            slots,
            head: 0,
            tail: 0,
            len: 0,
            bubble_window: config.bubble_window,
            overwrite_guard: config.overwrite_guard,
            next_order: 0,
        })
    }

    /// Adds an element with the given priority.
    ///
    /// ## What Happens
    ///
    /// 1. The element takes the next insertion order (even if rejected below)
    /// 2. If full and guarded, a head with priority >= `priority` wins and
    ///    we fail with `BufferFull`
    /// 3. The element is written at the tail and bubbles toward the head
    /// 4. The tail advances; on overflow the old head is dropped
    pub fn insert(&mut self, value: T, priority: i64) -> BufferResult<()> {
        let insertion_order = self.next_order;
        self.next_order += 1;

        let overwriting = self.is_full();

        if overwriting && self.overwrite_guard {
            if let Some(victim) = self.slots[self.head].as_ref() {
                if victim.priority >= priority {
                    log::debug!(
                        "Rejected insert #{}: head priority {} >= {}",
                        insertion_order,
                        victim.priority,
                        priority
                    );
                    return Err(BufferError::BufferFull {
                        priority,
                        victim_priority: victim.priority,
                    });
                }
            }
        }

        let insert_index = self.tail;
        let element = Element::new(value, priority, insertion_order);
        let evicted = self.slots[insert_index].replace(element);

        self.bubble(insert_index);

        self.tail = self.next_index(self.tail);
        if overwriting {
            self.head = self.tail;
            if let Some(evicted) = evicted {
                log::debug!(
                    "Evicted insert #{} (priority {}) to make room",
                    evicted.insertion_order,
                    evicted.priority
                );
            }
        } else {
            self.len += 1;
        }

        Ok(())
    }

    /// Walks the element at `index` toward the head, one swap at a time.
    ///
    /// Stops on the first predecessor it does not outrank, after
    /// `bubble_window` swaps, or when it runs out of live predecessors.
    fn bubble(&mut self, index: usize) {
        // Predecessors are the `len` live slots behind the insert index.
        let steps = self.bubble_window.min(self.len);
        let full = self.is_full();
        let mut current = index;

        for _ in 0..steps {
            let previous = self.prev_index(current);
            if full && previous == self.head {
                break;
            }

            let swap = match (&self.slots[current], &self.slots[previous]) {
                (Some(element), Some(predecessor)) => element.outranks(predecessor),
                _ => false,
            };
            if !swap {
                break;
            }

            self.slots.swap(current, previous);
            current = previous;
        }
    }

    /// Removes and returns the head element.
    pub fn dequeue(&mut self) -> BufferResult<Element<T>> {
        if self.len == 0 {
            return Err(BufferError::BufferEmpty);
        }

        let element = self.slots[self.head]
            .take()
            .ok_or(BufferError::BufferEmpty)?;
        self.head = self.next_index(self.head);
        self.len -= 1;

        Ok(element)
    }

    /// Returns the head element without removing it.
    pub fn peek(&self) -> BufferResult<&Element<T>> {
        if self.len == 0 {
            return Err(BufferError::BufferEmpty);
        }
        self.slots[self.head]
            .as_ref()
            .ok_or(BufferError::BufferEmpty)
    }

    /// Returns the most important live element.
    ///
    /// The bubble window only orders elements locally, so the true maximum
    /// may sit anywhere. This scans every live slot.
    pub fn peek_max_priority(&self) -> BufferResult<&Element<T>> {
        let mut elements = self.iter();
        let first = elements.next().ok_or(BufferError::BufferEmpty)?;

        Ok(elements.fold(first, |best, candidate| {
            if candidate.outranks(best) {
                candidate
            } else {
                best
            }
        }))
    }

    /// Returns the logical offsets (distance from the head) of every element
    /// that satisfies all `filters`, in head-to-tail order.
    ///
    /// Offsets are only meaningful until the next mutation.
    pub fn search(&self, filters: &[SearchFilter<'_, T>]) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, element)| matches_all(filters, element))
            .map(|(offset, _)| offset)
            .collect()
    }

    /// Returns an iterator over live elements, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Element<T>> + '_ {
        let capacity = self.capacity();
        (0..self.len)
            .filter_map(move |offset| self.slots[(self.head + offset) % capacity].as_ref())
    }

    /// Drops every live element.
    ///
    /// Insertion orders are never reused, so the counter keeps running.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    /// Returns the number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next insert would evict the head.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the fixed slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the configured bubble window.
    pub fn bubble_window(&self) -> usize {
        self.bubble_window
    }

    /// Returns whether the overwrite guard is on.
    pub fn overwrite_guard(&self) -> bool {
        self.overwrite_guard
    }

    /// Returns the insertion order the next `insert` call will consume.
    pub fn next_insertion_order(&self) -> u64 {
        self.next_order
    }

    /// Returns how full the buffer is (0.0 = empty, 1.0 = full)
    pub fn fill_ratio(&self) -> f32 {
        self.len as f32 / self.capacity() as f32
    }

    #[inline]
    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    #[inline]
    fn prev_index(&self, index: usize) -> usize {
        (index + self.capacity() - 1) % self.capacity()
    }
}

impl<T: Clone> PriorityRingBuffer<T> {
    /// Returns cloned copies of all live elements (head first).
    pub fn snapshot(&self) -> Vec<Element<T>> {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityRingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityRingBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("bubble_window", &self.bubble_window)
            .field("overwrite_guard", &self.overwrite_guard)
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================
// TESTS
// ============================================

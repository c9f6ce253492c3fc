//! # Buffer Element
//!
//! One stored item: the payload, its priority and the insertion order
//! that breaks ties.

/// An element stored in the ring buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element<T> {
    /// The payload
    pub value: T,

    /// Higher is more important
    pub priority: i64,

    /// Assigned at insert time, unique, never reused
    pub insertion_order: u64,
}

impl<T> Element<T> {
    /// Creates an element
    pub fn new(value: T, priority: i64, insertion_order: u64) -> Self {
        Self {
            value,
            priority,
            insertion_order,
        }
    }

    /// Returns true if `self` should sit ahead of `other`.
    ///
    /// Higher priority wins; on equal priority the older insertion wins.
    /// Both the bubble step and the max-priority scan use this rule.
    #[inline]
    pub fn outranks(&self, other: &Element<T>) -> bool {
        self.priority > other.priority
            || (self.priority == other.priority && self.insertion_order < other.insertion_order)
    }
}

// ============================================
// TESTS
// ============================================

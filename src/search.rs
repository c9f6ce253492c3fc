//! # Search Filters
//!
//! Predicates for [`search`](crate::PriorityRingBuffer::search).
//!
//! ## Plain English
//!
//! A filter is a yes/no question about one element ("is the priority at
//! least 10?"). A search returns the positions of every element that
//! answers yes to all the questions you asked.

use std::fmt;

use crate::buffer::Element;

/// A predicate over a buffer element.
///
/// Filters run on the caller's thread, so they may borrow local state and
/// the payload needs no thread-safety bounds.
pub struct SearchFilter<'a, T> {
    predicate: Box<dyn Fn(&Element<T>) -> bool + 'a>,
}

impl<'a, T: 'a> SearchFilter<'a, T> {
    /// Wraps an arbitrary predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Element<T>) -> bool + 'a,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    /// Matches elements whose priority equals `priority`.
    pub fn priority(priority: i64) -> Self {
        Self::new(move |element| element.priority == priority)
    }

    /// Matches elements whose priority is at least `min_priority`.
    pub fn min_priority(min_priority: i64) -> Self {
        Self::new(move |element| element.priority >= min_priority)
    }
}

impl<'a, T: PartialEq + 'a> SearchFilter<'a, T> {
    /// Matches elements whose payload equals `value`.
    pub fn value(value: T) -> Self {
        Self::new(move |element| element.value == value)
    }
}

impl<T> SearchFilter<'_, T> {
    /// Runs the predicate.
    #[inline]
    pub fn matches(&self, element: &Element<T>) -> bool {
        (self.predicate)(element)
    }
}

impl<T> fmt::Debug for SearchFilter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchFilter").finish_non_exhaustive()
    }
}

/// True when `element` satisfies every filter. An empty set matches.
pub fn matches_all<T>(filters: &[SearchFilter<'_, T>], element: &Element<T>) -> bool {
    filters.iter().all(|filter| filter.matches(element))
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_filters() {
        let element = Element::new("disk", 12, 0);

        assert!(SearchFilter::value("disk").matches(&element));
        assert!(!SearchFilter::value("net").matches(&element));
        assert!(SearchFilter::<&str>::priority(12).matches(&element));
        assert!(SearchFilter::<&str>::min_priority(10).matches(&element));
        assert!(!SearchFilter::<&str>::min_priority(13).matches(&element));
    }

    #[test]
    fn test_custom_filter() {
        let even = SearchFilter::new(|element: &Element<u32>| element.value % 2 == 0);

        assert!(even.matches(&Element::new(4, 0, 0)));
        assert!(!even.matches(&Element::new(5, 0, 1)));
    }

    #[test]
    fn test_filters_borrow_local_state() {
        let owned = String::from("disk");
        let wanted = String::from("disk");
        let element = Element::new(owned.as_str(), 12, 0);

        let by_value = SearchFilter::value(wanted.as_str());
        let by_length =
            SearchFilter::new(|element: &Element<&str>| element.value.len() == wanted.len());

        assert!(by_value.matches(&element));
        assert!(by_length.matches(&element));
        assert!(SearchFilter::min_priority(10).matches(&element));
    }

    #[test]
    fn test_matches_all() {
        let element = Element::new(7u32, 3, 0);
        let none: Vec<SearchFilter<u32>> = Vec::new();
        assert!(matches_all(&none, &element));

        let filters = vec![SearchFilter::value(7), SearchFilter::min_priority(3)];
        assert!(matches_all(&filters, &element));

        let filters = vec![SearchFilter::value(7), SearchFilter::priority(4)];
        assert!(!matches_all(&filters, &element));
    }
}

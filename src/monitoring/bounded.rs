//! Bounded collection utilities

use std::collections::VecDeque;

/// Helper trait for bounded VecDeque operations
pub(super) trait BoundedPush<T> {
    fn push_bounded(&mut self, value: T, max_size: usize);
    fn trim_to(&mut self, max_size: usize);
}

impl<T> BoundedPush<T> for VecDeque<T> {
    /// Push a value while maintaining a maximum size (O(1) amortized)
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) {
        while self.len() >= max_size {
            self.pop_front();
        }
        self.push_back(value);
    }

    /// Drop oldest entries until at most `max_size` remain
    fn trim_to(&mut self, max_size: usize) {
        while self.len() > max_size {
            self.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_bounded_evicts_oldest() {
        let mut deque = VecDeque::new();
        for i in 0..5 {
            deque.push_bounded(i, 3);
        }
        assert_eq!(deque, VecDeque::from(vec![2, 3, 4]));
    }

    #[test]
    fn test_trim_to() {
        let mut deque: VecDeque<u32> = (0..10).collect();
        deque.trim_to(4);
        assert_eq!(deque, VecDeque::from(vec![6, 7, 8, 9]));
    }
}

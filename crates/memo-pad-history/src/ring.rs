/// Fixed-capacity circular buffer backing the bounded undo history.
use std::num::NonZeroUsize;

/// Index-addressed ring with head/tail counters.
///
/// `head` points at the oldest value and `tail` at the next slot to write.
/// One slot always stays free so that `head == tail` means empty, which
/// means a ring of `capacity` slots holds at most `capacity - 1` values.
/// Pushing onto a full ring evicts the value at `head`.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring with `capacity` slots.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let slots = std::iter::repeat_with(|| None)
            .take(capacity.get())
            .collect();
        Self {
            slots,
            head: 0,
            tail: 0,
        }
    }

    /// Number of slots in the ring.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of values the ring can hold at once.
    pub fn max_len(&self) -> usize {
        self.capacity() - 1
    }

    pub fn len(&self) -> usize {
        (self.tail + self.capacity() - self.head) % self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.max_len()
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    fn retreat(&self, index: usize) -> usize {
        (index + self.capacity() - 1) % self.capacity()
    }

    /// Pushes a value onto the back of the ring.
    ///
    /// Returns the value that had to make room: the oldest one when the ring
    /// was full, or `value` itself for a single-slot ring that can hold nothing.
    pub fn push_back(&mut self, value: T) -> Option<T> {
        if self.max_len() == 0 {
            return Some(value);
        }
        let evicted = if self.is_full() {
            self.pop_front()
        } else {
            None
        };
        self.slots[self.tail] = Some(value);
        self.tail = self.advance(self.tail);
        evicted
    }

    /// Removes the most recently pushed value.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.tail = self.retreat(self.tail);
        self.slots[self.tail].take()
    }

    /// Removes the oldest value.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = self.advance(self.head);
        value
    }

    /// The most recently pushed value.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.retreat(self.tail)].as_ref()
    }

    /// The oldest retained value.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
    }

    /// Iterates from the oldest value to the most recent one.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        (0..self.len()).filter_map(move |i| self.slots[(self.head + i) % capacity].as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(capacity: usize) -> RingBuffer<u32> {
        RingBuffer::new(NonZeroUsize::new(capacity).expect("non-zero"))
    }

    #[test]
    fn test_new_ring_is_empty() {
        let r = ring(4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.capacity(), 4);
        assert_eq!(r.max_len(), 3);
        assert!(r.back().is_none());
        assert!(r.front().is_none());
    }

    #[test]
    fn test_push_until_full() {
        let mut r = ring(4);
        assert!(r.push_back(1).is_none());
        assert!(r.push_back(2).is_none());
        assert!(r.push_back(3).is_none());
        assert!(r.is_full());
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_push_on_full_evicts_oldest() {
        let mut r = ring(3);
        r.push_back(1);
        r.push_back(2);
        assert_eq!(r.push_back(3), Some(1));
        assert_eq!(r.push_back(4), Some(2));
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_pop_back_is_lifo() {
        let mut r = ring(4);
        r.push_back(1);
        r.push_back(2);
        r.push_back(3);
        assert_eq!(r.pop_back(), Some(3));
        assert_eq!(r.pop_back(), Some(2));
        assert_eq!(r.pop_back(), Some(1));
        assert_eq!(r.pop_back(), None);
    }

    #[test]
    fn test_pop_back_after_wraparound() {
        let mut r = ring(3);
        for i in 0..10 {
            r.push_back(i);
        }
        // Only the two most recent survive, in order.
        assert_eq!(r.front(), Some(&8));
        assert_eq!(r.back(), Some(&9));
        assert_eq!(r.pop_back(), Some(9));
        assert_eq!(r.pop_back(), Some(8));
        assert!(r.is_empty());
    }

    #[test]
    fn test_interleaved_push_and_pop_wraps_correctly() {
        let mut r = ring(4);
        r.push_back(1);
        r.push_back(2);
        r.pop_back();
        r.push_back(3);
        r.push_back(4);
        r.push_back(5); // evicts 1
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(r.pop_front(), Some(3));
        r.push_back(6);
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn test_single_slot_ring_holds_nothing() {
        let mut r = ring(1);
        assert_eq!(r.max_len(), 0);
        assert_eq!(r.push_back(7), Some(7));
        assert!(r.is_empty());
        assert_eq!(r.pop_back(), None);
    }

    #[test]
    fn test_two_slot_ring_keeps_latest() {
        let mut r = ring(2);
        assert!(r.push_back(1).is_none());
        assert_eq!(r.push_back(2), Some(1));
        assert_eq!(r.len(), 1);
        assert_eq!(r.back(), Some(&2));
    }

    #[test]
    fn test_clear_resets() {
        let mut r = ring(3);
        r.push_back(1);
        r.push_back(2);
        r.push_back(3);
        r.clear();
        assert!(r.is_empty());
        assert_eq!(r.iter().count(), 0);
        r.push_back(4);
        assert_eq!(r.back(), Some(&4));
    }
}

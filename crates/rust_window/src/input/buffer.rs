//! Per-category event buffers
//!
//! A buffer stores every event delivered for one category during the current
//! polling interval. The stored count (high-water mark) is the number of valid
//! entries; capacity may exceed it. Clearing drops the entries and shrinks the
//! storage back to [`INPUT_BUFFER_INITIAL_CAPACITY`].
//!
//! FIXME: shrinking on every clear throws away growth gained during a heavy
//! input frame, so the next spike pays for reallocation again.

/// Capacity allocated when a category is armed and after every clear
pub const INPUT_BUFFER_INITIAL_CAPACITY: usize = 50;

/// Growable storage for one input category
#[derive(Debug, Clone)]
pub struct EventBuffer<E> {
    events: Vec<E>,
    armed: bool,
}

impl<E: Clone> EventBuffer<E> {
    /// Create an unarmed, unallocated buffer
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            armed: false,
        }
    }

    /// Allocate at the default capacity and forget any stored events
    pub fn arm(&mut self) {
        self.events = Vec::with_capacity(INPUT_BUFFER_INITIAL_CAPACITY);
        self.armed = true;
    }

    /// Release storage and stop accepting events
    pub fn disarm(&mut self) {
        self.events = Vec::new();
        self.armed = false;
    }

    /// Whether the buffer accepts events
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Append an event, growing when the buffer is full
    ///
    /// Returns `false` (and stores nothing) for an unarmed buffer.
    pub fn record(&mut self, event: E) -> bool {
        if !self.armed {
            return false;
        }

        if self.events.len() == self.events.capacity() {
            let grown = (self.events.capacity() * 2).max(INPUT_BUFFER_INITIAL_CAPACITY);
            self.events.reserve_exact(grown - self.events.len());
            log::trace!("Input buffer grown to {} entries", self.events.capacity());
        }

        self.events.push(event);
        true
    }

    /// Copy of exactly the stored events, in delivery order
    ///
    /// Does not reset the stored count.
    pub fn drain(&self) -> Vec<E> {
        self.events.clone()
    }

    /// Borrow the stored events without copying
    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    /// Number of valid entries (the high-water mark)
    pub fn stored_count(&self) -> usize {
        self.events.len()
    }

    /// Allocated capacity
    pub fn capacity(&self) -> usize {
        self.events.capacity()
    }

    /// Reset the stored count and restore the default capacity
    ///
    /// Unarmed buffers stay unallocated.
    pub fn clear(&mut self) {
        if self.armed {
            self.events.clear();
            self.events.shrink_to(INPUT_BUFFER_INITIAL_CAPACITY);
        }
    }
}

impl<E: Clone> Default for EventBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_buffer_is_empty_and_rejects_events() {
        let mut buffer = EventBuffer::<u32>::new();

        assert!(buffer.drain().is_empty());
        assert!(!buffer.record(7));
        assert_eq!(buffer.stored_count(), 0);
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_arm_allocates_default_capacity() {
        let mut buffer = EventBuffer::<u32>::new();
        buffer.arm();

        assert!(buffer.is_armed());
        assert!(buffer.capacity() >= INPUT_BUFFER_INITIAL_CAPACITY);
        assert_eq!(buffer.stored_count(), 0);
    }

    #[test]
    fn test_growth_keeps_every_event_in_order() {
        let mut buffer = EventBuffer::new();
        buffer.arm();

        let count = INPUT_BUFFER_INITIAL_CAPACITY * 3 + 1;
        for value in 0..count {
            assert!(buffer.record(value));
        }

        let drained = buffer.drain();
        assert_eq!(drained.len(), count);
        assert_eq!(drained.first(), Some(&0));
        assert!(drained.iter().enumerate().all(|(index, value)| index == *value));
        assert!(buffer.capacity() >= count);
    }

    #[test]
    fn test_drain_does_not_reset() {
        let mut buffer = EventBuffer::new();
        buffer.arm();
        buffer.record('a');
        buffer.record('b');

        assert_eq!(buffer.drain(), vec!['a', 'b']);
        assert_eq!(buffer.drain(), vec!['a', 'b']);
        assert_eq!(buffer.as_slice(), &['a', 'b']);
    }

    #[test]
    fn test_clear_shrinks_back_to_default_capacity() {
        let mut buffer = EventBuffer::new();
        buffer.arm();
        for value in 0..INPUT_BUFFER_INITIAL_CAPACITY * 4 {
            buffer.record(value);
        }
        let grown = buffer.capacity();

        buffer.clear();

        assert_eq!(buffer.stored_count(), 0);
        assert!(buffer.drain().is_empty());
        assert!(buffer.capacity() >= INPUT_BUFFER_INITIAL_CAPACITY);
        assert!(buffer.capacity() < grown);
        assert!(buffer.is_armed());
    }

    #[test]
    fn test_clear_keeps_default_storage() {
        let mut buffer = EventBuffer::new();
        buffer.arm();
        buffer.record(1);
        buffer.record(2);
        buffer.record(3);
        let capacity = buffer.capacity();

        buffer.clear();

        assert_eq!(buffer.stored_count(), 0);
        assert_eq!(buffer.capacity(), capacity);
        assert!(capacity >= INPUT_BUFFER_INITIAL_CAPACITY);
    }

    #[test]
    fn test_rearm_forgets_buffered_events() {
        let mut buffer = EventBuffer::new();
        buffer.arm();
        buffer.record(1);
        buffer.arm();

        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn test_disarm_releases_storage() {
        let mut buffer = EventBuffer::new();
        buffer.arm();
        buffer.record(1);
        buffer.disarm();

        assert!(!buffer.is_armed());
        assert_eq!(buffer.capacity(), 0);
        assert!(!buffer.record(2));
    }
}

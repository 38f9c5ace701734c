use std::fmt;

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::error::AddError;
use crate::queue::Queue;
use crate::FifoQueue;

/// Thread-safe queue that treats `T::default()` as "no item".
///
/// [`add`](Self::add) panics when handed the default value, and
/// [`try_add`](Self::try_add) returns it back as an error instead. This means
/// legitimate zero-valued payloads (`0`, `""`, `false`, ...) cannot be queued
/// one at a time; wrap them in a newtype or use [`Queue`] when they can occur.
/// [`add_list`](Self::add_list) does not check its items.
pub struct GenericQueue<T, const N: usize = DEFAULT_CHUNK_SIZE> {
    queue: Queue<T, N>,
}

impl<T, const N: usize> GenericQueue<T, N>
where
    T: Default + PartialEq,
{
    pub fn new() -> Self {
        Self {
            queue: Queue::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Appends `item`.
    ///
    /// # Panics
    /// If `item == T::default()`.
    pub fn add(&self, item: T) {
        if self.try_add(item).is_err() {
            panic!("can not add zero value item to fifo queue");
        }
    }

    pub fn try_add(&self, item: T) -> Result<(), AddError<T>> {
        if item == T::default() {
            return Err(AddError::ZeroValue(item));
        }
        self.queue.add(item);
        Ok(())
    }

    pub fn add_list<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.queue.add_list(items);
    }

    pub fn next(&self) -> Option<T> {
        self.queue.next()
    }

    pub fn next_n(&self, n: usize) -> Vec<T> {
        self.queue.next_n(n)
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.queue.peek()
    }

    pub fn peek_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.queue.peek_with(f)
    }
}

impl<T, const N: usize> Default for GenericQueue<T, N>
where
    T: Default + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for GenericQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericQueue")
            .field("queue", &self.queue)
            .finish()
    }
}

impl<T, const N: usize> FifoQueue<T> for GenericQueue<T, N>
where
    T: Send + Default + PartialEq,
{
    fn len(&self) -> usize {
        GenericQueue::len(self)
    }

    fn add(&self, item: T) {
        GenericQueue::add(self, item)
    }

    fn add_list<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        GenericQueue::add_list(self, items)
    }

    fn next(&self) -> Option<T> {
        GenericQueue::next(self)
    }

    fn next_n(&self, n: usize) -> Vec<T> {
        GenericQueue::next_n(self, n)
    }

    fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        GenericQueue::peek(self)
    }
}

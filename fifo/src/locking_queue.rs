use std::fmt;

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::queue::Queue;
use crate::sync::Mutex;
use crate::FifoQueue;

/// A [`Queue`] wrapped in a second, outer lock.
///
/// Behaves exactly like [`Queue`]; every call takes the outer lock and then
/// the queue's own lock, always in that order.
pub struct LockingQueue<T, const N: usize = DEFAULT_CHUNK_SIZE> {
    lock: Mutex<()>,
    queue: Queue<T, N>,
}

impl<T, const N: usize> LockingQueue<T, N> {
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            queue: Queue::new(),
        }
    }

    pub fn len(&self) -> usize {
        let _guard = self.lock.lock();
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        let _guard = self.lock.lock();
        self.queue.is_empty()
    }

    pub fn add(&self, item: T) {
        let _guard = self.lock.lock();
        self.queue.add(item);
    }

    pub fn add_list<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        // Collected outside both locks, as in `Queue::add_list`.
        let items: Vec<T> = items.into_iter().collect();
        let _guard = self.lock.lock();
        self.queue.add_list(items);
    }

    pub fn next(&self) -> Option<T> {
        let _guard = self.lock.lock();
        self.queue.next()
    }

    pub fn next_n(&self, n: usize) -> Vec<T> {
        let _guard = self.lock.lock();
        self.queue.next_n(n)
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        let _guard = self.lock.lock();
        self.queue.peek()
    }

    pub fn peek_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        let _guard = self.lock.lock();
        self.queue.peek_with(f)
    }
}

impl<T, const N: usize> Default for LockingQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for LockingQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let _guard = self.lock.lock();
        f.debug_struct("LockingQueue")
            .field("queue", &self.queue)
            .finish()
    }
}

impl<T: Send, const N: usize> FifoQueue<T> for LockingQueue<T, N> {
    fn len(&self) -> usize {
        LockingQueue::len(self)
    }

    fn add(&self, item: T) {
        LockingQueue::add(self, item)
    }

    fn add_list<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        LockingQueue::add_list(self, items)
    }

    fn next(&self) -> Option<T> {
        LockingQueue::next(self)
    }

    fn next_n(&self, n: usize) -> Vec<T> {
        LockingQueue::next_n(self, n)
    }

    fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        LockingQueue::peek(self)
    }
}

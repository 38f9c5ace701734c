use std::any::Any;
use std::fmt;

use crossbeam_utils::CachePadded;

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::sync::{Mutex, MutexGuard};
use crate::unsafe_queue::UnsafeQueue;
use crate::FifoQueue;

/// Thread-safe FIFO queue: an [`UnsafeQueue`] behind a mutex.
///
/// Each method takes the lock for exactly one engine operation, including
/// every chunk a batch [`add_list`](Self::add_list) or
/// [`next_n`](Self::next_n) crosses, so operations are linearizable at call
/// granularity. Nothing ever waits for the queue to be non-empty: `next` on
/// an empty queue returns `None` straight away.
pub struct Queue<T, const N: usize = DEFAULT_CHUNK_SIZE> {
    inner: CachePadded<Mutex<UnsafeQueue<T, N>>>,
}

/// Queue of heterogeneous, type-erased items.
pub type AnyQueue = Queue<Box<dyn Any + Send>>;

impl<T, const N: usize> Queue<T, N> {
    pub fn new() -> Self {
        Self::from(UnsafeQueue::new())
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, UnsafeQueue<T, N>> {
        self.inner.lock()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn add(&self, item: T) {
        self.lock().add(item);
    }

    /// Appends all of `items` in one critical section.
    ///
    /// The input is collected before the lock is taken, so the iterator may
    /// itself read from this queue.
    pub fn add_list<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return;
        }
        self.lock().add_list(items);
    }

    pub fn next(&self) -> Option<T> {
        self.lock().next()
    }

    pub fn next_n(&self, n: usize) -> Vec<T> {
        self.lock().next_n(n)
    }

    /// Clone of the front item.
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().peek().cloned()
    }

    /// Runs `f` on the front item without removing or cloning it.
    ///
    /// `f` runs with the lock held and must not call back into this queue.
    pub fn peek_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.lock().peek().map(f)
    }

    /// Consumes the wrapper and returns the engine.
    pub fn into_inner(self) -> UnsafeQueue<T, N> {
        CachePadded::into_inner(self.inner).into_inner()
    }
}

impl<T, const N: usize> From<UnsafeQueue<T, N>> for Queue<T, N> {
    fn from(queue: UnsafeQueue<T, N>) -> Self {
        Self {
            inner: CachePadded::new(Mutex::new(queue)),
        }
    }
}

impl<T, const N: usize> Default for Queue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for Queue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("queue", &*self.lock())
            .finish()
    }
}

impl<T: Send, const N: usize> FifoQueue<T> for Queue<T, N> {
    fn len(&self) -> usize {
        Queue::len(self)
    }

    fn add(&self, item: T) {
        Queue::add(self, item)
    }

    fn add_list<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        Queue::add_list(self, items)
    }

    fn next(&self) -> Option<T> {
        Queue::next(self)
    }

    fn next_n(&self, n: usize) -> Vec<T> {
        Queue::next_n(self, n)
    }

    fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        Queue::peek(self)
    }
}

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::trace;

use crate::chunk::{Chunk, DEFAULT_CHUNK_SIZE};

/// Unsynchronized FIFO queue stored as a singly linked chain of fixed-size
/// chunks.
///
/// Items are written at the tail chunk and read from the head chunk. A new
/// chunk is allocated only when the tail is full, and a chunk is freed as
/// soon as the head has been read past it, so `add` and `next` are O(1)
/// amortized regardless of how many items are queued. The queue always owns
/// at least one chunk: once drained, the last chunk is reset and reused.
///
/// Every operation takes `&mut self`, so sharing across threads goes through
/// [`Queue`](crate::Queue), which puts the engine behind a lock.
pub struct UnsafeQueue<T, const N: usize = DEFAULT_CHUNK_SIZE> {
    head: NonNull<Chunk<T, N>>,
    tail: NonNull<Chunk<T, N>>,
    count: usize,
    _owns: PhantomData<Box<Chunk<T, N>>>,
}

unsafe impl<T: Send, const N: usize> Send for UnsafeQueue<T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for UnsafeQueue<T, N> {}

impl<T, const N: usize> UnsafeQueue<T, N> {
    /// Creates an empty queue holding a single empty chunk.
    pub fn new() -> Self {
        let chunk = unsafe { NonNull::new_unchecked(Chunk::alloc()) };
        Self {
            head: chunk,
            tail: chunk,
            count: 0,
            _owns: PhantomData,
        }
    }

    /// Number of items currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Item slots per chunk.
    #[inline]
    pub const fn chunk_size(&self) -> usize {
        N
    }

    /// Appends `item` at the back of the queue.
    pub fn add(&mut self, item: T) {
        let tail = self.writable_tail();
        tail.push(item);
        self.count += 1;
    }

    /// Appends every item of `items` in order, as if each had been passed to
    /// [`add`](Self::add), filling the tail chunk one run at a time.
    ///
    /// An empty input leaves the queue untouched and allocates nothing.
    pub fn add_list<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter().peekable();
        while items.peek().is_some() {
            let room = self.writable_tail().room();
            for item in items.by_ref().take(room) {
                unsafe { self.tail.as_mut() }.push(item);
                self.count += 1;
            }
        }
    }

    /// Removes and returns the front item, or `None` if the queue is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let head = unsafe { self.head.as_mut() };
        let item = head.pop();
        self.count -= 1;

        if head.is_exhausted() {
            self.retire_head();
        }
        Some(item)
    }

    /// Removes up to `n` items from the front and returns them in order.
    ///
    /// Asking for more than [`len`](Self::len) returns what is there; an
    /// empty queue yields an empty vector.
    pub fn next_n(&mut self, n: usize) -> Vec<T> {
        let n = n.min(self.count);
        let mut out = Vec::with_capacity(n);

        while out.len() < n {
            let head = unsafe { self.head.as_mut() };
            let run = head.len().min(n - out.len());
            for _ in 0..run {
                out.push(head.pop());
            }
            self.count -= run;

            if head.is_exhausted() {
                self.retire_head();
            }
        }
        out
    }

    /// Returns the front item without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        unsafe { self.head.as_ref() }.front()
    }

    /// Drops every queued item and shrinks the chain back to one empty chunk.
    ///
    /// The old chain is detached before any item is dropped, so a panicking
    /// destructor leaves this queue empty and usable. The remaining items are
    /// still dropped while that panic unwinds.
    pub fn clear(&mut self) {
        let detached = std::mem::take(self);
        drop(detached);
    }

    // Tail chunk with at least one free slot, growing the chain if needed.
    fn writable_tail(&mut self) -> &mut Chunk<T, N> {
        if unsafe { self.tail.as_ref() }.is_full() {
            let fresh = unsafe { NonNull::new_unchecked(Chunk::alloc()) };
            unsafe { self.tail.as_mut() }.next = fresh.as_ptr();
            self.tail = fresh;
            trace!("fifo: allocated chunk of {} slots, {} items queued", N, self.count);
        }
        unsafe { self.tail.as_mut() }
    }

    // Called once the head chunk has no live items left: either rewinds the
    // lone chunk for reuse or unlinks and frees it.
    fn retire_head(&mut self) {
        if self.head == self.tail {
            unsafe { self.head.as_mut() }.reset();
            trace!("fifo: reset sole chunk");
            return;
        }

        let old = self.head;
        unsafe {
            self.head = NonNull::new_unchecked(old.as_ref().next);
            Chunk::free(old.as_ptr());
        }
        trace!("fifo: retired head chunk, {} items queued", self.count);
    }

    pub(crate) fn chunk_count(&self) -> usize {
        let mut chunks = 1;
        let mut cursor = self.head;
        while cursor != self.tail {
            cursor = unsafe { NonNull::new_unchecked(cursor.as_ref().next) };
            chunks += 1;
        }
        chunks
    }
}

impl<T, const N: usize> Default for UnsafeQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// Owns a detached run of chunks. If an item destructor unwinds out of
// `release`, the guard's own drop resumes from the chunk it stopped at.
struct Chain<T, const N: usize>(*mut Chunk<T, N>);

impl<T, const N: usize> Chain<T, N> {
    fn release(&mut self) {
        while let Some(chunk) = NonNull::new(self.0) {
            unsafe {
                (*chunk.as_ptr()).drop_items();
                self.0 = (*chunk.as_ptr()).next;
                Chunk::free(chunk.as_ptr());
            }
        }
    }
}

impl<T, const N: usize> Drop for Chain<T, N> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T, const N: usize> Drop for UnsafeQueue<T, N> {
    fn drop(&mut self) {
        let mut chain = Chain(self.head.as_ptr());
        chain.release();
    }
}

impl<T, const N: usize> Iterator for UnsafeQueue<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        UnsafeQueue::next(self)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<T, const N: usize> ExactSizeIterator for UnsafeQueue<T, N> {}

impl<T, const N: usize> FusedIterator for UnsafeQueue<T, N> {}

impl<T, const N: usize> Extend<T> for UnsafeQueue<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_list(iter);
    }
}

impl<T, const N: usize> FromIterator<T> for UnsafeQueue<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.add_list(iter);
        queue
    }
}

impl<T, const N: usize> fmt::Debug for UnsafeQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsafeQueue")
            .field("len", &self.count)
            .field("chunk_size", &N)
            .field("chunks", &self.chunk_count())
            .finish()
    }
}

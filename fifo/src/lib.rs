//! Chunked FIFO queues.
//!
//! [`UnsafeQueue`] is the single-threaded engine: a linked chain of
//! fixed-size chunks giving O(1) amortized `add`/`next` without ever
//! reallocating queued items. [`Queue`] puts the engine behind a mutex and is
//! the type to share between threads. [`LockingQueue`] layers a second lock on
//! top of a [`Queue`], and [`GenericQueue`] rejects `T::default()` on `add`.

mod chunk;
pub mod error;
pub mod generic_queue;
pub mod locking_queue;
pub mod queue;
mod sync;
pub mod unsafe_queue;

pub use chunk::DEFAULT_CHUNK_SIZE;
pub use error::AddError;
pub use generic_queue::GenericQueue;
pub use locking_queue::LockingQueue;
pub use queue::{AnyQueue, Queue};
pub use unsafe_queue::UnsafeQueue;

// Common interface for the thread-safe queues.
pub trait FifoQueue<T: Send>: Send + Sync {
    fn len(&self) -> usize;
    fn add(&self, item: T);
    fn add_list<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>;
    fn next(&self) -> Option<T>;
    fn next_n(&self, n: usize) -> Vec<T>;
    fn peek(&self) -> Option<T>
    where
        T: Clone;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

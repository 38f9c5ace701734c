use std::mem::MaybeUninit;
use std::ptr;

/// Number of item slots per chunk unless a queue type says otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

// Fixed block of the chain. Slots in `first..last` are initialized, every
// other slot is not.
pub(crate) struct Chunk<T, const N: usize> {
    items: [MaybeUninit<T>; N],
    pub(crate) first: usize,
    pub(crate) last: usize,
    pub(crate) next: *mut Chunk<T, N>,
}

impl<T, const N: usize> Chunk<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "chunk size must be greater than zero");

    // Heap-allocates an empty chunk; ownership passes to the caller, who
    // must eventually hand it to `free`.
    pub(crate) fn alloc() -> *mut Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        Box::into_raw(Box::new(Self {
            items: std::array::from_fn(|_| MaybeUninit::uninit()),
            first: 0,
            last: 0,
            next: ptr::null_mut(),
        }))
    }

    /// # Safety
    /// `chunk` must come from `alloc`, must not be freed twice, and its live
    /// items must already have been moved out or dropped.
    pub(crate) unsafe fn free(chunk: *mut Self) {
        drop(Box::from_raw(chunk));
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.last - self.first
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.last >= N
    }

    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.first >= self.last
    }

    #[inline]
    pub(crate) fn room(&self) -> usize {
        N - self.last
    }

    // Caller guarantees `!self.is_full()`.
    #[inline]
    pub(crate) fn push(&mut self, item: T) {
        debug_assert!(!self.is_full());
        self.items[self.last].write(item);
        self.last += 1;
    }

    // Caller guarantees `!self.is_exhausted()`.
    #[inline]
    pub(crate) fn pop(&mut self) -> T {
        debug_assert!(!self.is_exhausted());
        let item = unsafe { self.items[self.first].assume_init_read() };
        self.first += 1;
        item
    }

    #[inline]
    pub(crate) fn front(&self) -> Option<&T> {
        if self.is_exhausted() {
            return None;
        }
        Some(unsafe { self.items[self.first].assume_init_ref() })
    }

    pub(crate) fn reset(&mut self) {
        debug_assert!(self.is_exhausted());
        self.first = 0;
        self.last = 0;
        self.next = ptr::null_mut();
    }

    // Drops the live items in place and leaves the chunk exhausted.
    pub(crate) fn drop_items(&mut self) {
        while !self.is_exhausted() {
            let slot = self.first;
            // Slot leaves the live range before its destructor runs.
            self.first += 1;
            unsafe { self.items[slot].assume_init_drop() };
        }
    }
}

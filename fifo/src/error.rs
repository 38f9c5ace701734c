use std::fmt;

use thiserror::Error;

/// Rejection returned by [`GenericQueue::try_add`](crate::GenericQueue::try_add).
///
/// The rejected item is handed back so the caller keeps ownership of it.
#[derive(Error, PartialEq, Eq)]
pub enum AddError<T> {
    #[error("can not add zero value item to fifo queue")]
    ZeroValue(T),
}

impl<T> AddError<T> {
    pub fn into_inner(self) -> T {
        match self {
            AddError::ZeroValue(item) => item,
        }
    }
}

// Manual impl so `T` need not be `Debug`.
impl<T> fmt::Debug for AddError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddError::ZeroValue(_) => f.write_str("ZeroValue(..)"),
        }
    }
}

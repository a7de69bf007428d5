//! Type alias for operations that support partial success.
//! Some parts of such an operation may fail while the rest completes; the
//! failures are collected rather than aborting the whole operation.

/// Represents a successful operation where some parts failed but didn't prevent overall success.
/// The `Vec<E>` contains errors from the failed parts that were handled gracefully.
pub type PartialSuccess<T, E> = ( T, Vec<E> );

//! Lazy cursors over externally owned ranges
//!
//! A [`Cursor`] walks a logical sequence without tying the caller to a
//! concrete container. [`IteratorAdapter`] is the stock implementation,
//! bound to a `[begin, end)` range it does not own.

use crate::error::{Result, StackError};

/// Produces a lazy, single-pass sequence of `T`
pub trait Cursor<T> {
    /// True while there is a current element to read
    fn is_valid(&self) -> bool;

    /// Advance by one position. Does nothing once exhausted.
    fn next(&mut self);

    /// Get the current element
    ///
    /// # Errors
    /// Returns `StackError::CursorExhausted` when `is_valid()` is false.
    fn get(&self) -> Result<T>;
}

/// Cursor over the positions between a begin and an end marker
///
/// The adapter holds the current element and the remaining markers only.
/// For borrowed ranges (`&[T]`, `slice.iter()`) elements are references, so
/// nothing is copied and the adapter cannot outlive the range.
pub struct IteratorAdapter<I: Iterator> {
    current: Option<I::Item>,
    rest: I,
}

impl<I: Iterator> IteratorAdapter<I> {
    /// Create a cursor positioned at the first element of `range`
    pub fn new<R>(range: R) -> Self
    where
        R: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        let mut rest = range.into_iter();
        let current = rest.next();
        Self { current, rest }
    }
}

impl<I> Clone for IteratorAdapter<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            rest: self.rest.clone(),
        }
    }
}

impl<I> Cursor<I::Item> for IteratorAdapter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    fn next(&mut self) {
        // The underlying iterator is never polled again after it ran dry.
        if self.current.is_some() {
            self.current = self.rest.next();
        }
    }

    fn get(&self) -> Result<I::Item> {
        self.current.clone().ok_or(StackError::CursorExhausted)
    }
}

/// Build a cursor over `range`
///
/// ```
/// use layer_stack::utilities::{make_iterator, Cursor};
///
/// let data = [1, 2, 3, 4];
/// let mut cursor = make_iterator(&data[1..3]);
/// assert_eq!(*cursor.get().unwrap(), 2);
/// cursor.next();
/// assert_eq!(*cursor.get().unwrap(), 3);
/// cursor.next();
/// assert!(!cursor.is_valid());
/// ```
pub fn make_iterator<R: IntoIterator>(range: R) -> IteratorAdapter<R::IntoIter> {
    IteratorAdapter::new(range)
}

//! General-purpose utilities shared by layers and their callers.

pub mod iterator;

pub use iterator::{make_iterator, Cursor, IteratorAdapter};

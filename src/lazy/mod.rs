//! Deferred, memoizing single-value holders.
//!
//! Every internal piece of a [`Store`](crate::Store) is built through a
//! [`Lazy`] so nothing is constructed before a public entry point needs it.

mod lazy;

pub use lazy::Lazy;

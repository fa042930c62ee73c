//! Unidirectional stores.
//!
//! A [`Store`] wires one data flow:
//!
//! ```text
//! action creator -> Dispatcher -> action Subject -> reducer -> state
//!                -> getter -> view property -> view observers
//! ```
//!
//! The concrete behavior comes from a [`StoreProvider`], whose hooks are
//! called lazily and at most once each.

mod provider;
mod store;

pub use provider::{ActionCreator, Dispatcher, Getter, Reducer, StateReader, StoreProvider};
pub use store::Store;

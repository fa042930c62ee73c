//! # Lazyflux
//!
//! Unidirectional, Redux-style state management with lazily built stores.
//!
//! Lazyflux is layered from small single-threaded primitives:
//!
//! ## Primitives
//!
//! - `Lazy<T>` - Deferred value created on first access and cached
//! - `Subject<T>` - Multicast channel keyed by `SubscriptionId`
//! - `ObservableVariable<T>` - Current value plus change notifications, with
//!   replay on subscribe
//!
//! ## Store
//!
//! - `StoreProvider` - The action creator, reducer, getter and initial state
//!   hooks a concrete store supplies
//! - `Store<P>` - Wires dispatch -> reducer -> state -> getter -> view property,
//!   calling each provider hook only when first needed
//!
//! Everything runs synchronously on the calling thread. Errors raised by
//! user code unwind to the call that triggered it.

pub mod error;
pub mod lazy;
pub mod store;
pub mod subject;
pub mod variable;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use lazy::Lazy;
pub use store::{ActionCreator, Dispatcher, Getter, Reducer, StateReader, Store, StoreProvider};
pub use subject::{Observable, Subject, SubscriptionId};
pub use variable::{ImmutableVariable, ObservableVariable};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let variable = ObservableVariable::new(0);
        assert_eq!(variable.value(), 0);
        variable.set(42);
        assert_eq!(variable.value(), 42);
    }
}

//! Observable single-value cells.
//!
//! An [`ObservableVariable`] keeps its current value in sync through an
//! internal subscription on its own [`Subject`](crate::Subject), registered
//! before any external subscriber, so `value()` already reflects a write when
//! external callbacks run.

mod variable;

pub use variable::{ImmutableVariable, ObservableVariable};

//! Multicast publish/subscribe channels.
//!
//! A [`Subject`] maps [`SubscriptionId`]s to callbacks and invokes every
//! registered callback synchronously on [`Subject::publish`].

mod subject;

pub use subject::{Observable, Subject, SubscriptionId};

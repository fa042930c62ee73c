use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Identifier returned by `subscribe`, used to unsubscribe later.
///
/// Ids are positive and strictly increasing per channel. A freed id is never
/// handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// The raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something callbacks can be attached to and detached from.
pub trait Observable<T> {
    /// Register `callback` and return the id to remove it with.
    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static;

    /// Remove the callback registered under `id`.
    ///
    /// Returns `false` without doing anything if `id` is unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

struct SubjectInner<T> {
    callbacks: BTreeMap<SubscriptionId, Callback<T>>,
    last_id: u64,
}

/// A single-threaded multicast channel.
///
/// Cloning a `Subject` yields another handle to the **same** channel.
///
/// # Delivery
///
/// `publish` snapshots the registered callbacks, releases the channel, then
/// calls each snapshot entry in ascending id order (registration order).
/// A callback unsubscribed during a publish still receives that value; a
/// callback subscribed during a publish does not. If a callback panics, the
/// panic propagates and the remaining callbacks of that pass are skipped.
///
/// # Examples
///
/// ```
/// use lazyflux::{Observable, Subject};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let subject = Subject::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let id = subject.subscribe({
///     let seen = seen.clone();
///     move |value: &i32| seen.borrow_mut().push(*value)
/// });
///
/// subject.publish(1);
/// subject.unsubscribe(id);
/// subject.publish(2);
///
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Subject<T> {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                callbacks: BTreeMap::new(),
                last_id: 0,
            })),
        }
    }

    /// Call every registered callback with `value`.
    pub fn publish(&self, value: T) {
        let snapshot: Vec<Callback<T>> = self.inner.borrow().callbacks.values().cloned().collect();
        trace!(subscribers = snapshot.len(), "publishing");
        for callback in snapshot {
            callback(&value);
        }
    }

    /// Number of currently registered callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    /// The highest id issued so far, if any.
    pub fn last_id(&self) -> Option<SubscriptionId> {
        match self.inner.borrow().last_id {
            0 => None,
            id => Some(SubscriptionId(id)),
        }
    }
}

impl<T> Observable<T> for Subject<T> {
    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.last_id += 1;
        let id = SubscriptionId(inner.last_id);
        inner.callbacks.insert(id, Rc::new(callback));
        trace!(%id, "subscribed");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.borrow_mut().callbacks.remove(&id).is_some();
        trace!(%id, removed, "unsubscribed");
        removed
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("subscribers", &inner.callbacks.len())
            .field("last_id", &inner.last_id)
            .finish()
    }
}

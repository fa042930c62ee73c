use crate::subject::{Observable, Subject, SubscriptionId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Read-only access to a current value.
pub trait ImmutableVariable<T> {
    /// A clone of the current value.
    fn value(&self) -> T;
}

/// A single value whose writes are published to subscribers.
///
/// Cloning an `ObservableVariable` creates a new handle to the **same** value
/// and channel.
///
/// # Invariants
///
/// 1. After `set(x)` returns, `value()` reads `x` (unless a subscriber wrote
///    again during the publish).
/// 2. The internal sync subscriber runs before every external subscriber, so
///    external callbacks already observe the new value through `value()`.
/// 3. `subscribe` replays the current value to the new callback before
///    registering it.
///
/// # Examples
///
/// ```
/// use lazyflux::{Observable, ObservableVariable};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let variable = ObservableVariable::new(1);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// variable.subscribe({
///     let seen = seen.clone();
///     move |value: &i32| seen.borrow_mut().push(*value)
/// });
/// variable.set(2);
///
/// assert_eq!(variable.value(), 2);
/// assert_eq!(*seen.borrow(), vec![1, 2]);
/// ```
pub struct ObservableVariable<T> {
    current: Rc<RefCell<T>>,
    subject: Subject<T>,
    sync_id: SubscriptionId,
}

impl<T: Clone + 'static> ObservableVariable<T> {
    /// Create a variable holding `initial`. No subscriber is invoked.
    pub fn new(initial: T) -> Self {
        let current = Rc::new(RefCell::new(initial));
        let subject = Subject::new();
        let sync_id = subject.subscribe({
            let current = Rc::clone(&current);
            move |value: &T| *current.borrow_mut() = value.clone()
        });

        Self {
            current,
            subject,
            sync_id,
        }
    }

    /// Get a clone of the current value.
    pub fn value(&self) -> T {
        self.current.borrow().clone()
    }

    /// Read the value with a function without cloning.
    ///
    /// The value stays borrowed while `f` runs, so `f` must not write to this
    /// variable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let current = self.current.borrow();
        f(&*current)
    }

    /// Publish a new value.
    pub fn set(&self, value: T) {
        self.subject.publish(value);
    }

    /// Publish a value computed from the current one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = self.with(f);
        self.set(next);
    }

    /// Number of external subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count().saturating_sub(1)
    }
}

impl<T: Clone + 'static> ImmutableVariable<T> for ObservableVariable<T> {
    fn value(&self) -> T {
        ObservableVariable::value(self)
    }
}

impl<T: Clone + 'static> Observable<T> for ObservableVariable<T> {
    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let current = self.value();
        callback(&current);
        self.subject.subscribe(callback)
    }

    /// Remove an external subscriber. The internal sync subscriber cannot be
    /// removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if id == self.sync_id {
            return false;
        }
        self.subject.unsubscribe(id)
    }
}

impl<T> Clone for ObservableVariable<T> {
    fn clone(&self) -> Self {
        Self {
            current: Rc::clone(&self.current),
            subject: self.subject.clone(),
            sync_id: self.sync_id,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableVariable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableVariable")
            .field("value", &*self.current.borrow())
            .field("subject", &self.subject)
            .finish()
    }
}

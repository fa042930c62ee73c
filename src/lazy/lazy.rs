use crate::error::{Error, Result};
use std::cell::{Cell, OnceCell};
use std::fmt;
use tracing::debug;

/// A value computed on first access and cached for the life of the holder.
///
/// The creator runs at most once per successful initialization. If it panics,
/// nothing is cached and the next access runs it again.
///
/// # Examples
///
/// ```
/// use lazyflux::Lazy;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let calls = Rc::new(Cell::new(0));
/// let lazy = Lazy::new({
///     let calls = calls.clone();
///     move || {
///         calls.set(calls.get() + 1);
///         42
///     }
/// });
///
/// assert_eq!(calls.get(), 0);
/// assert_eq!(*lazy.get(), 42);
/// assert_eq!(*lazy.get(), 42);
/// assert_eq!(calls.get(), 1);
/// ```
pub struct Lazy<T> {
    name: &'static str,
    value: OnceCell<T>,
    creator: Box<dyn Fn() -> T>,
    creating: Cell<bool>,
}

/// Clears the in-progress flag even when the creator unwinds.
struct CreatingGuard<'a>(&'a Cell<bool>);

impl Drop for CreatingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<T> Lazy<T> {
    /// Create a holder that will call `creator` on first access.
    pub fn new<F>(creator: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self::named("value", creator)
    }

    /// Create a holder with a name used in log events and errors.
    pub fn named<F>(name: &'static str, creator: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self {
            name,
            value: OnceCell::new(),
            creator: Box::new(creator),
            creating: Cell::new(false),
        }
    }

    /// Get the value, creating it on first access.
    ///
    /// # Panics
    ///
    /// Panics if called from inside this holder's own creator, and
    /// propagates any panic raised by the creator.
    pub fn get(&self) -> &T {
        match self.try_get() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Get the value, creating it on first access.
    ///
    /// Returns [`Error::ReentrantInit`] instead of recursing when the creator
    /// reads its own holder.
    pub fn try_get(&self) -> Result<&T> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        if self.creating.replace(true) {
            return Err(Error::ReentrantInit { name: self.name });
        }

        let guard = CreatingGuard(&self.creating);
        debug!(name = self.name, "creating lazy value");
        let value = (self.creator)();
        drop(guard);

        Ok(self.value.get_or_init(|| value))
    }

    /// The value if it has already been created. Never runs the creator.
    pub fn get_if_initialized(&self) -> Option<&T> {
        self.value.get()
    }

    /// Whether the creator has completed successfully.
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// The name given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("name", &self.name)
            .field("value", &self.value.get())
            .finish()
    }
}

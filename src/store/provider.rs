use crate::lazy::Lazy;
use crate::subject::Subject;
use crate::variable::{ImmutableVariable, ObservableVariable};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Pure function computing the next state from an action and the prior state.
pub type Reducer<A, S> = Box<dyn Fn(&A, &S) -> S>;

/// Pure function deriving the view property from state.
pub type Getter<S, VP> = Box<dyn Fn(&S) -> VP>;

/// The hooks a concrete store supplies.
///
/// None of these is called before a [`Store`](crate::Store) entry point
/// needs its result, and each is called at most once per store.
///
/// # Examples
///
/// ```
/// use lazyflux::{ActionCreator, Dispatcher, Getter, Reducer, StateReader, StoreProvider};
///
/// struct Counter;
///
/// struct CounterActions {
///     dispatch: Dispatcher<i32>,
///     state: StateReader<i32>,
/// }
///
/// impl CounterActions {
///     fn add(&self, n: i32) {
///         self.dispatch.dispatch(n);
///     }
/// }
///
/// impl ActionCreator<i32, i32> for CounterActions {
///     fn dispatcher(&self) -> &Dispatcher<i32> {
///         &self.dispatch
///     }
///
///     fn state(&self) -> &StateReader<i32> {
///         &self.state
///     }
/// }
///
/// impl StoreProvider for Counter {
///     type Action = i32;
///     type State = i32;
///     type ViewProperty = String;
///     type ActionCreator = CounterActions;
///
///     fn provide_action_creator(
///         &self,
///         dispatch: Dispatcher<i32>,
///         state: StateReader<i32>,
///     ) -> CounterActions {
///         CounterActions { dispatch, state }
///     }
///
///     fn provide_reducer(&self) -> Reducer<i32, i32> {
///         Box::new(|action: &i32, state: &i32| state + action)
///     }
///
///     fn provide_getter(&self) -> Getter<i32, String> {
///         Box::new(|state: &i32| format!("total: {state}"))
///     }
///
///     fn provide_initial_state(&self) -> i32 {
///         0
///     }
/// }
/// ```
pub trait StoreProvider: 'static {
    /// Value describing an intended state change.
    type Action: 'static;
    /// The state held by the store.
    type State: Clone + 'static;
    /// Projection of the state handed to view observers.
    type ViewProperty: Clone + 'static;
    /// Domain API application code calls to dispatch actions.
    type ActionCreator: ActionCreator<Self::Action, Self::State> + 'static;

    /// Build the action creator from the dispatcher and a read-only state handle.
    fn provide_action_creator(
        &self,
        dispatch: Dispatcher<Self::Action>,
        state: StateReader<Self::State>,
    ) -> Self::ActionCreator;

    /// Build the reducer.
    fn provide_reducer(&self) -> Reducer<Self::Action, Self::State>;

    /// Build the getter.
    fn provide_getter(&self) -> Getter<Self::State, Self::ViewProperty>;

    /// The starting state.
    fn provide_initial_state(&self) -> Self::State;
}

/// The object application code uses to trigger actions.
///
/// Built from the store's dispatcher and a read-only state handle; concrete
/// types add domain methods on top of these two.
pub trait ActionCreator<A, S> {
    /// The dispatcher this action creator was built with.
    fn dispatcher(&self) -> &Dispatcher<A>;

    /// Read-only state this action creator was built with.
    fn state(&self) -> &StateReader<S>;
}

/// Handle that publishes actions into a store.
///
/// Available from store construction onward; dispatching runs the reducer
/// synchronously before returning.
pub struct Dispatcher<A> {
    action: Subject<A>,
}

impl<A> Dispatcher<A> {
    pub(crate) fn new(action: Subject<A>) -> Self {
        Self { action }
    }

    /// Send `action` through the reducer.
    pub fn dispatch(&self, action: A) {
        trace!("dispatching action");
        self.action.publish(action);
    }
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
        }
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

/// Read-only view of a store's state.
///
/// Holding a `StateReader` does not build the state; the first read does.
pub struct StateReader<S> {
    state: Rc<Lazy<ObservableVariable<S>>>,
}

impl<S: Clone + 'static> StateReader<S> {
    pub(crate) fn new(state: Rc<Lazy<ObservableVariable<S>>>) -> Self {
        Self { state }
    }

    /// Get a clone of the current state.
    pub fn value(&self) -> S {
        self.state.get().value()
    }

    /// Read the state with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.state.get().with(f)
    }
}

impl<S: Clone + 'static> ImmutableVariable<S> for StateReader<S> {
    fn value(&self) -> S {
        StateReader::value(self)
    }
}

impl<S> Clone for StateReader<S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for StateReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateReader")
            .field("state", &self.state)
            .finish()
    }
}

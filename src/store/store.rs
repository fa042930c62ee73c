use super::provider::{Dispatcher, Getter, Reducer, StateReader, StoreProvider};
use crate::error::Result;
use crate::lazy::Lazy;
use crate::subject::{Observable, Subject, SubscriptionId};
use crate::variable::ObservableVariable;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A unidirectional state container driven by a [`StoreProvider`].
///
/// Nothing but the action channel and its reducer subscription exists after
/// [`Store::new`]. The provider hooks, the state and view-property variables,
/// the state to view-property bridge and the action creator are each built
/// on first use and never rebuilt.
///
/// Dispatching before anyone observes the view property still runs the
/// reducer; the view property catches up when the first observer subscribes.
///
/// # Examples
///
/// ```
/// use lazyflux::{
///     ActionCreator, Dispatcher, Getter, Reducer, StateReader, Store, StoreProvider,
/// };
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// struct Counter;
///
/// struct CounterActions {
///     dispatch: Dispatcher<i32>,
///     state: StateReader<i32>,
/// }
///
/// impl ActionCreator<i32, i32> for CounterActions {
///     fn dispatcher(&self) -> &Dispatcher<i32> {
///         &self.dispatch
///     }
///     fn state(&self) -> &StateReader<i32> {
///         &self.state
///     }
/// }
///
/// impl StoreProvider for Counter {
///     type Action = i32;
///     type State = i32;
///     type ViewProperty = i32;
///     type ActionCreator = CounterActions;
///
///     fn provide_action_creator(
///         &self,
///         dispatch: Dispatcher<i32>,
///         state: StateReader<i32>,
///     ) -> CounterActions {
///         CounterActions { dispatch, state }
///     }
///     fn provide_reducer(&self) -> Reducer<i32, i32> {
///         Box::new(|action: &i32, state: &i32| state + action)
///     }
///     fn provide_getter(&self) -> Getter<i32, i32> {
///         Box::new(|state: &i32| *state)
///     }
///     fn provide_initial_state(&self) -> i32 {
///         0
///     }
/// }
///
/// let store = Store::new(Counter);
/// store.action_creator().dispatcher().dispatch(2);
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// store.subscribe_view_property({
///     let seen = seen.clone();
///     move |value: &i32| seen.borrow_mut().push(*value)
/// });
/// store.action_creator().dispatcher().dispatch(3);
///
/// assert_eq!(*seen.borrow(), vec![2, 5]);
/// assert_eq!(store.action_creator().state().value(), 5);
/// ```
pub struct Store<P: StoreProvider> {
    provider: Rc<P>,
    state: Rc<Lazy<ObservableVariable<P::State>>>,
    view_property: Rc<Lazy<ObservableVariable<P::ViewProperty>>>,
    state_bridge: Lazy<SubscriptionId>,
    action_creator: Lazy<P::ActionCreator>,
    action: Subject<P::Action>,
    action_subscription: SubscriptionId,
}

impl<P: StoreProvider> Store<P> {
    /// Create a store around `provider`. No provider hook runs here.
    pub fn new(provider: P) -> Self {
        let provider = Rc::new(provider);
        let action = Subject::new();
        let dispatcher = Dispatcher::new(action.clone());

        let initial_state = Rc::new(Lazy::named("initial state", {
            let provider = Rc::clone(&provider);
            move || provider.provide_initial_state()
        }));
        let reducer: Rc<Lazy<Reducer<P::Action, P::State>>> =
            Rc::new(Lazy::named("reducer", {
                let provider = Rc::clone(&provider);
                move || provider.provide_reducer()
            }));
        let getter: Rc<Lazy<Getter<P::State, P::ViewProperty>>> =
            Rc::new(Lazy::named("getter", {
                let provider = Rc::clone(&provider);
                move || provider.provide_getter()
            }));

        let state = Rc::new(Lazy::named("state", {
            let initial_state = Rc::clone(&initial_state);
            move || ObservableVariable::new(initial_state.get().clone())
        }));

        let view_property = Rc::new(Lazy::named("view property", {
            let getter = Rc::clone(&getter);
            let state = Rc::clone(&state);
            move || {
                let getter = getter.get();
                ObservableVariable::new(state.get().with(|s| getter(s)))
            }
        }));

        let state_bridge = Lazy::named("state bridge", {
            let getter = Rc::clone(&getter);
            let state = Rc::clone(&state);
            let view_property = Rc::clone(&view_property);
            move || {
                trace!("bridging state to view property");
                state.get().subscribe({
                    let getter = Rc::clone(&getter);
                    let view_property = Rc::clone(&view_property);
                    move |s: &P::State| {
                        let next = (getter.get())(s);
                        view_property.get().set(next);
                    }
                })
            }
        });

        let action_creator = Lazy::named("action creator", {
            let provider = Rc::clone(&provider);
            let reader = StateReader::new(Rc::clone(&state));
            move || provider.provide_action_creator(dispatcher.clone(), reader.clone())
        });

        let action_subscription = action.subscribe({
            let reducer = Rc::clone(&reducer);
            let state = Rc::clone(&state);
            move |a: &P::Action| {
                let reducer = reducer.get();
                let state = state.get();
                let next = reducer(a, &state.value());
                state.set(next);
            }
        });

        Self {
            provider,
            state,
            view_property,
            state_bridge,
            action_creator,
            action,
            action_subscription,
        }
    }

    /// The action creator, built on first access.
    ///
    /// Building it does not build the state; the action creator's
    /// [`StateReader`] does that on its first read.
    pub fn action_creator(&self) -> &P::ActionCreator {
        self.action_creator.get()
    }

    /// Like [`action_creator`](Self::action_creator), but reports reentrant
    /// construction instead of panicking.
    pub fn try_action_creator(&self) -> Result<&P::ActionCreator> {
        self.action_creator.try_get()
    }

    /// Observe the view property.
    ///
    /// `callback` receives the current view property immediately, then every
    /// later update. The first call establishes the state to view-property
    /// bridge, building the state, the getter and the view-property variable
    /// as needed.
    pub fn subscribe_view_property<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&P::ViewProperty) + 'static,
    {
        self.state_bridge.get();
        self.view_property.get().subscribe(callback)
    }

    /// Stop delivering view-property updates to `id`.
    ///
    /// Unknown ids are ignored. Never builds anything.
    pub fn unsubscribe_view_property(&self, id: SubscriptionId) -> bool {
        self.view_property
            .get_if_initialized()
            .is_some_and(|view_property| view_property.unsubscribe(id))
    }

    /// The provider this store was built from.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: StoreProvider> Drop for Store<P> {
    fn drop(&mut self) {
        // Dispatchers held outside the store keep the channel alive.
        self.action.unsubscribe(self.action_subscription);
    }
}

impl<P: StoreProvider> fmt::Debug for Store<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.is_initialized())
            .field("view_property", &self.view_property.is_initialized())
            .field("state_bridge", &self.state_bridge.is_initialized())
            .field("action_creator", &self.action_creator.is_initialized())
            .finish()
    }
}

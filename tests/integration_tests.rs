//! Integration tests for Lazyflux

use lazyflux::{
    ActionCreator, Dispatcher, Getter, ImmutableVariable, Lazy, Observable, ObservableVariable,
    Reducer, StateReader, Store, StoreProvider, Subject,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct State {
    count: i32,
}

struct Actions {
    dispatch: Dispatcher<&'static str>,
    state: StateReader<State>,
}

impl Actions {
    fn send(&self, action: &'static str) {
        self.dispatch.dispatch(action);
    }

    fn count(&self) -> i32 {
        self.state.value().count
    }
}

impl ActionCreator<&'static str, State> for Actions {
    fn dispatcher(&self) -> &Dispatcher<&'static str> {
        &self.dispatch
    }

    fn state(&self) -> &StateReader<State> {
        &self.state
    }
}

#[derive(Default)]
struct Counter {
    provided: Rc<RefCell<Vec<&'static str>>>,
}

impl StoreProvider for Counter {
    type Action = &'static str;
    type State = State;
    type ViewProperty = i32;
    type ActionCreator = Actions;

    fn provide_action_creator(
        &self,
        dispatch: Dispatcher<&'static str>,
        state: StateReader<State>,
    ) -> Actions {
        self.provided.borrow_mut().push("action creator");
        Actions { dispatch, state }
    }

    fn provide_reducer(&self) -> Reducer<&'static str, State> {
        self.provided.borrow_mut().push("reducer");
        Box::new(|action: &&'static str, state: &State| match *action {
            "INC" => State {
                count: state.count + 1,
            },
            _ => state.clone(),
        })
    }

    fn provide_getter(&self) -> Getter<State, i32> {
        self.provided.borrow_mut().push("getter");
        Box::new(|state: &State| state.count)
    }

    fn provide_initial_state(&self) -> State {
        self.provided.borrow_mut().push("initial state");
        State { count: 0 }
    }
}

fn recorder(log: &Rc<RefCell<Vec<i32>>>) -> impl Fn(&i32) + 'static {
    let log = Rc::clone(log);
    move |value: &i32| log.borrow_mut().push(*value)
}

#[test]
fn channel_ids_strictly_increase() {
    let subject: Subject<()> = Subject::new();
    let mut last = None;

    for i in 0..20 {
        let id = subject.subscribe(|_| {});
        if let Some(previous) = last {
            assert!(id > previous);
        }
        if i % 3 != 0 {
            subject.unsubscribe(id);
        }
        last = Some(id);
    }
}

#[test]
fn variable_round_trip_and_replay() {
    let variable = ObservableVariable::new(String::from("a"));
    let notified = Rc::new(Cell::new(0));
    assert_eq!(variable.value(), "a");
    assert_eq!(notified.get(), 0);

    variable.subscribe({
        let notified = Rc::clone(&notified);
        move |_: &String| notified.set(notified.get() + 1)
    });
    assert_eq!(notified.get(), 1);

    variable.set(String::from("b"));
    assert_eq!(ImmutableVariable::value(&variable), "b");
    assert_eq!(notified.get(), 2);
}

#[test]
fn lazy_runs_creator_once() {
    let calls = Rc::new(Cell::new(0));
    let lazy = Lazy::new({
        let calls = Rc::clone(&calls);
        move || {
            calls.set(calls.get() + 1);
            vec![1, 2, 3]
        }
    });

    for _ in 0..5 {
        assert_eq!(lazy.get().len(), 3);
    }
    assert_eq!(calls.get(), 1);
}

#[test]
fn providers_are_not_called_before_first_use() {
    let provider = Counter::default();
    let provided = Rc::clone(&provider.provided);
    let store = Store::new(provider);
    assert!(provided.borrow().is_empty());

    store.action_creator();
    assert_eq!(*provided.borrow(), vec!["action creator"]);

    store.action_creator().send("INC");
    assert_eq!(
        *provided.borrow(),
        vec!["action creator", "reducer", "initial state"]
    );

    store.subscribe_view_property(|_| {});
    assert_eq!(
        *provided.borrow(),
        vec!["action creator", "reducer", "initial state", "getter"]
    );
}

#[test]
fn dispatch_twice_then_subscribe() {
    let store = Store::new(Counter::default());
    store.action_creator().send("INC");
    store.action_creator().send("INC");

    let log = Rc::new(RefCell::new(Vec::new()));
    store.subscribe_view_property(recorder(&log));
    assert_eq!(*log.borrow(), vec![2]);

    store.action_creator().send("INC");
    assert_eq!(*log.borrow(), vec![2, 3]);
    assert_eq!(store.action_creator().count(), 3);
}

#[test]
fn two_observers_each_receive_once() {
    let store = Store::new(Counter::default());
    let a = Rc::new(RefCell::new(Vec::new()));
    let b = Rc::new(RefCell::new(Vec::new()));

    store.subscribe_view_property(recorder(&a));
    store.subscribe_view_property(recorder(&b));
    store.action_creator().send("INC");

    assert_eq!(*a.borrow(), vec![0, 1]);
    assert_eq!(*b.borrow(), vec![0, 1]);
}

#[test]
fn unsubscribed_observer_is_skipped() {
    let store = Store::new(Counter::default());
    let a = Rc::new(RefCell::new(Vec::new()));
    let b = Rc::new(RefCell::new(Vec::new()));

    let a_id = store.subscribe_view_property(recorder(&a));
    store.subscribe_view_property(recorder(&b));
    store.unsubscribe_view_property(a_id);
    store.action_creator().send("INC");

    assert_eq!(*a.borrow(), vec![0]);
    assert_eq!(*b.borrow(), vec![0, 1]);
}

#[test]
fn unknown_actions_leave_state_unchanged() {
    let store = Store::new(Counter::default());
    let log = Rc::new(RefCell::new(Vec::new()));
    store.subscribe_view_property(recorder(&log));

    store.action_creator().dispatcher().dispatch("NOOP");

    // The state is republished even when the reducer returns it unchanged.
    assert_eq!(*log.borrow(), vec![0, 0]);
    assert_eq!(store.action_creator().state().value(), State { count: 0 });
}

//! Complete counter application built on a lazily constructed store

use lazyflux::{ActionCreator, Dispatcher, Getter, Reducer, StateReader, Store, StoreProvider};

#[derive(Clone, Debug)]
struct CounterState {
    count: i32,
    step: i32,
    history: Vec<i32>,
}

impl CounterState {
    fn new() -> Self {
        Self {
            count: 0,
            step: 1,
            history: vec![0],
        }
    }
}

enum CounterAction {
    Increment,
    Decrement,
    SetStep(i32),
    Reset,
}

#[derive(Clone, Debug, PartialEq)]
struct CounterView {
    label: String,
    is_positive: bool,
    is_even: bool,
    changes: usize,
}

struct CounterActions {
    dispatch: Dispatcher<CounterAction>,
    state: StateReader<CounterState>,
}

impl CounterActions {
    fn increment(&self) {
        self.dispatch.dispatch(CounterAction::Increment);
    }

    fn decrement(&self) {
        self.dispatch.dispatch(CounterAction::Decrement);
    }

    fn set_step(&self, step: i32) {
        self.dispatch.dispatch(CounterAction::SetStep(step));
    }

    fn reset(&self) {
        self.dispatch.dispatch(CounterAction::Reset);
    }

    fn history(&self) -> Vec<i32> {
        self.state.with(|state| state.history.clone())
    }
}

impl ActionCreator<CounterAction, CounterState> for CounterActions {
    fn dispatcher(&self) -> &Dispatcher<CounterAction> {
        &self.dispatch
    }

    fn state(&self) -> &StateReader<CounterState> {
        &self.state
    }
}

struct Counter;

impl StoreProvider for Counter {
    type Action = CounterAction;
    type State = CounterState;
    type ViewProperty = CounterView;
    type ActionCreator = CounterActions;

    fn provide_action_creator(
        &self,
        dispatch: Dispatcher<CounterAction>,
        state: StateReader<CounterState>,
    ) -> CounterActions {
        println!("   [Store] building action creator");
        CounterActions { dispatch, state }
    }

    fn provide_reducer(&self) -> Reducer<CounterAction, CounterState> {
        println!("   [Store] building reducer");
        Box::new(|action: &CounterAction, state: &CounterState| {
            let mut next = state.clone();
            match action {
                CounterAction::Increment => next.count += next.step,
                CounterAction::Decrement => next.count -= next.step,
                CounterAction::SetStep(step) => {
                    next.step = *step;
                    return next;
                }
                CounterAction::Reset => next.count = 0,
            }
            next.history.push(next.count);
            next
        })
    }

    fn provide_getter(&self) -> Getter<CounterState, CounterView> {
        println!("   [Store] building getter");
        Box::new(|state: &CounterState| CounterView {
            label: format!("Count: {} (step {})", state.count, state.step),
            is_positive: state.count > 0,
            is_even: state.count % 2 == 0,
            changes: state.history.len() - 1,
        })
    }

    fn provide_initial_state(&self) -> CounterState {
        println!("   [Store] building initial state");
        CounterState::new()
    }
}

fn main() {
    println!("=== Complete Counter Application ===\n");

    println!("1. Creating the store (nothing is built yet)");
    let store = Store::new(Counter);
    println!("   {:?}", store);

    println!("\n2. Dispatching before anyone observes");
    let actions = store.action_creator();
    actions.increment();
    actions.increment();

    println!("\n3. Subscribing a view observer");
    let id = store.subscribe_view_property(|view: &CounterView| {
        println!(
            "   [View] {} | positive: {} | even: {} | changes: {}",
            view.label, view.is_positive, view.is_even, view.changes
        );
    });

    println!("\n4. Changing step and counting down");
    actions.set_step(5);
    actions.decrement();
    actions.decrement();

    println!("\n5. Resetting");
    actions.reset();
    println!("   count is now {}", actions.state().with(|state| state.count));

    println!("\n6. Unsubscribing and incrementing silently");
    store.unsubscribe_view_property(id);
    actions.increment();

    println!("\n7. Final history: {:?}", actions.history());
    println!("   {:?}", store);

    println!("\n✓ Example complete!");
}

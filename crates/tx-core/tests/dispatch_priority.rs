//! Precedencia del dispatcher: valor de fallo > step > fallback, éxito con y
//! sin handler, y el caso descartado con su evento.

use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

use tx_core::{dispatch, dispatch_recorded, Dispatched, EventStore, HandlerTable,
              InMemoryEventStore, Outcome, State, StepFailure, TxEventKind};
use uuid::Uuid;

fn failed(step: &str, error: serde_json::Value) -> Outcome<State, StepFailure> {
    Outcome::Failure(StepFailure { step: step.to_string(), error })
}

#[test]
fn failure_value_handler_beats_step_handler() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let by_value = hits.clone();
    let by_step = hits.clone();

    let handlers =
        HandlerTable::new().on_step("load_user", move |_| by_step.borrow_mut().push("step"))
                           .on_failure_value(json!("invalid_user_token"),
                                             move |_| by_value.borrow_mut().push("value"));

    let outcome = failed("load_user", json!("invalid_user_token"));
    assert_eq!(dispatch(&outcome, &handlers), Dispatched::MatchedFailureValue);
    assert_eq!(*hits.borrow(), vec!["value"],
               "value handler wins even when registered after the step handler");
}

#[test]
fn step_handler_beats_fallback() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let by_step = hits.clone();
    let fb = hits.clone();

    let handlers = HandlerTable::new().otherwise(move |_| fb.borrow_mut().push("fallback"))
                                      .on_step("charge_card",
                                               move |_| by_step.borrow_mut().push("step"));

    let outcome = failed("charge_card", json!({"kind": "gateway_timeout"}));
    assert_eq!(dispatch(&outcome, &handlers), Dispatched::MatchedStep);
    assert_eq!(*hits.borrow(), vec!["step"]);
}

#[test]
fn fallback_receives_the_tagged_failure() {
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let handlers =
        HandlerTable::new().otherwise(move |f: &StepFailure| *sink.borrow_mut() = Some(f.clone()));

    let outcome = failed("price_order", json!("overflow"));
    assert_eq!(dispatch(&outcome, &handlers), Dispatched::Fallback);
    let captured = seen.borrow().clone().expect("fallback ran");
    assert_eq!(captured.step, "price_order");
    assert_eq!(captured.error, json!("overflow"));
}

#[test]
fn first_matching_entry_wins_within_a_tier() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let first = hits.clone();
    let second = hits.clone();

    let handlers = HandlerTable::new().on_step("s", move |_| first.borrow_mut().push("first"))
                                      .on_step("s", move |_| second.borrow_mut().push("second"));

    dispatch(&failed("s", json!(0)), &handlers);
    assert_eq!(*hits.borrow(), vec!["first"]);
}

#[test]
fn success_with_no_handler_is_a_noop() {
    let handlers = HandlerTable::new().on_step("anything", |_| panic!("must not run"));
    let outcome = Outcome::Success(State::new());
    assert_eq!(dispatch(&outcome, &handlers), Dispatched::SuccessUnhandled);
}

#[test]
fn unmatched_failure_is_reported_dropped_and_recorded() {
    let mut store = InMemoryEventStore::default();
    let tx_id = Uuid::new_v4();
    let outcome = failed("load_user", json!("unexpected"));

    let handlers = HandlerTable::new().on_failure_value(json!("some_other_value"), |_| {});
    assert_eq!(dispatch_recorded(&outcome, &handlers, tx_id, &mut store),
               Dispatched::Dropped);

    let events = store.list(tx_id);
    assert!(events.iter().any(|e| matches!(&e.kind,
                    TxEventKind::FailureDropped { step_name, .. } if step_name == "load_user")),
            "the dropped failure must leave a trace");
}

#[test]
fn matched_failure_is_not_recorded_as_dropped() {
    let mut store = InMemoryEventStore::default();
    let tx_id = Uuid::new_v4();
    let outcome = failed("load_user", json!("known"));

    let handlers = HandlerTable::new().otherwise(|_| {});
    assert_eq!(dispatch_recorded(&outcome, &handlers, tx_id, &mut store),
               Dispatched::Fallback);
    assert!(store.list(tx_id).is_empty());
}

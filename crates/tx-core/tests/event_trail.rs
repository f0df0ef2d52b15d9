//! Traza de eventos de `run_recorded`: secuencia, contenido y compactación.

use serde_json::json;

use tx_core::{pipeline, AdapterKind, EventStore, InMemoryEventStore, Outcome, State,
              StepException, TxEventKind};

fn demo_pipeline() -> tx_core::Pipeline {
    let assembled = pipeline! {
        step "validate" => |s: &State| match s.get("input") {
            Some(input) => Outcome::Success(s.with("params", input.clone())),
            None => Outcome::Failure(json!("missing_input")),
        },
        map "price" => |s: &State| s.with("total", json!(120)),
        tee "notify" => |_s: &State| {},
    };
    assembled.expect("builds")
}

#[test]
fn successful_run_leaves_a_complete_trail() {
    let mut store = InMemoryEventStore::default();
    let pipe = demo_pipeline();

    let (tx_id, outcome) =
        pipe.run_recorded(State::new().with("input", json!({"order": 1})), &mut store);
    assert!(outcome.is_success());

    // P, luego S/F por cada step, y C al cierre
    assert_eq!(store.variants(tx_id), vec!["P", "S", "F", "S", "F", "S", "F", "C"]);

    let events = store.list(tx_id);
    match &events[0].kind {
        TxEventKind::PipelineStarted { definition_hash, step_count } => {
            assert_eq!(definition_hash, pipe.definition_hash());
            assert_eq!(*step_count, 3);
        }
        other => panic!("first event must be PipelineStarted, got {other:?}"),
    }

    // El StepStarted de "price" anuncia su adapter
    assert!(events.iter().any(|e| matches!(&e.kind,
                    TxEventKind::StepStarted { step_name, adapter: AdapterKind::Map, .. }
                        if step_name == "price")));

    // "validate" añade "params"; "notify" (tee) no añade nada
    assert!(events.iter().any(|e| matches!(&e.kind,
                    TxEventKind::StepFinished { step_name, keys_added, .. }
                        if step_name == "validate" && keys_added == &vec!["params".to_string()])));
    assert!(events.iter().any(|e| matches!(&e.kind,
                    TxEventKind::StepFinished { step_name, keys_added, .. }
                        if step_name == "notify" && keys_added.is_empty())));

    match &events[events.len() - 1].kind {
        TxEventKind::PipelineCompleted { final_keys } => {
            assert!(final_keys.contains(&"input".to_string()));
            assert!(final_keys.contains(&"params".to_string()));
            assert!(final_keys.contains(&"total".to_string()));
        }
        other => panic!("last event must be PipelineCompleted, got {other:?}"),
    }
}

#[test]
fn failed_run_stops_the_trail_at_the_failing_step() {
    let mut store = InMemoryEventStore::default();
    let pipe = demo_pipeline();

    // Sin "input", "validate" falla: no hay eventos para "price"/"notify"
    let (tx_id, outcome) = pipe.run_recorded(State::new(), &mut store);
    assert!(outcome.is_failure());
    assert_eq!(store.variants(tx_id), vec!["P", "S", "X"]);

    let events = store.list(tx_id);
    assert!(events.iter().any(|e| matches!(&e.kind,
                    TxEventKind::StepFailed { step_index: 0, step_name, error }
                        if step_name == "validate" && error == &json!("missing_input"))));
}

#[test]
fn declared_try_failure_is_recorded_with_its_converted_value() {
    let mut store = InMemoryEventStore::default();
    let pipe = pipeline! {
        try "charge" ["gateway_timeout"] => |_s: &State| {
            Err(StepException::new("gateway_timeout", json!({"after_ms": 3000})))
        },
    }.expect("builds");

    let (tx_id, outcome) = pipe.run_recorded(State::new(), &mut store);
    let failure = outcome.error().expect("declared failure");
    assert_eq!(failure.error, json!({"kind": "gateway_timeout", "detail": {"after_ms": 3000}}));

    assert!(store.list(tx_id).iter().any(|e| matches!(&e.kind,
                    TxEventKind::StepFailed { error, .. } if error == &failure.error)));
}

#[test]
fn each_recorded_run_gets_its_own_tx_id_and_trail() {
    let mut store = InMemoryEventStore::default();
    let pipe = demo_pipeline();
    let initial = State::new().with("input", json!({}));

    let (id_a, _) = pipe.run_recorded(initial.clone(), &mut store);
    let (id_b, _) = pipe.run_recorded(initial, &mut store);
    assert_ne!(id_a, id_b);
    assert_eq!(store.list(id_a).len(), store.list(id_b).len());
    assert!(store.list(id_a).iter().zip(store.list(id_b).iter()).all(|(a, b)| a.seq == b.seq));
}

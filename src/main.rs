//! main-tx: demo del motor de transacciones sobre el flujo de checkout.
//!
//! Corre dos escenarios contra el mismo pipeline (ambos carriles del
//! railway): uno exitoso que termina en el handler de éxito y uno que corta
//! en `load_customer` y se enruta por nombre de step. Imprime la traza de
//! eventos de cada run si la configuración lo pide.

mod config;

use std::sync::Arc;

use serde_json::json;
use tx_adapters::{checkout_pipeline, AuditLog, CustomerDirectory, FakePaymentGateway,
                  PaymentGateway};
use tx_core::{dispatch_recorded, Dispatched, EventStore, HandlerTable, InMemoryEventStore,
              Pipeline, State};

use crate::config::CONFIG;

/// Armado de la demo: un cliente conocido y una pasarela que aprueba.
fn build_demo() -> (Pipeline, Arc<AuditLog>) {
    let directory = Arc::new(CustomerDirectory::new().with_customer("good-token",
                                                                    json!({ "id": 42,
                                                                            "name": "Ada" })));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(FakePaymentGateway::approving());
    let audit = Arc::new(AuditLog::new());
    let pipeline = checkout_pipeline(directory, gateway, audit.clone())
        .expect("demo checkout pipeline builds");
    (pipeline, audit)
}

fn demo_input(token: &str) -> State {
    State::new().with("input",
                      json!({
                          "token": token,
                          "items": [
                              { "sku": "SKU-1", "qty": 2, "unit_cents": 1500 },
                              { "sku": "SKU-2", "qty": 1, "unit_cents": 700 },
                          ],
                      }))
}

/// Corre un escenario y lo despacha con la tabla de handlers de la demo.
fn run_scenario(label: &str, pipeline: &Pipeline, initial: State, store: &mut InMemoryEventStore) {
    println!("== escenario: {label} ==");
    let (tx_id, outcome) = pipeline.run_recorded(initial, store);

    let handlers =
        HandlerTable::new().on_success(|s: &State| {
                               let receipt = s.get("payment")
                                              .and_then(|p| p.get("receipt_id"))
                                              .cloned()
                                              .unwrap_or(json!(null));
                               println!("  OK: cobro realizado, recibo = {receipt}");
                           })
                           .on_failure_value(json!("invalid_customer_token"), |err| {
                               println!("  rechazado: token inválido ({err})");
                           })
                           .on_step("charge_card", |err| {
                               println!("  pago fallido en la pasarela: {err}");
                           })
                           .otherwise(|failure| {
                               println!("  fallo no anticipado en '{}': {}",
                                        failure.step, failure.error);
                           });

    let dispatched = dispatch_recorded(&outcome, &handlers, tx_id, store);
    if dispatched == Dispatched::Dropped {
        // Nunca debería verse: la tabla de arriba registra fallback
        println!("  [!] fallo descartado sin handler");
    }

    if CONFIG.demo.print_events {
        println!("  traza {}:", tx_id);
        for ev in store.list(tx_id) {
            println!("    [{}] {:?}", ev.seq, ev.kind);
        }
    }
}

fn main() {
    let (pipeline, audit) = build_demo();
    let mut store = InMemoryEventStore::default();

    run_scenario("checkout exitoso", &pipeline, demo_input("good-token"), &mut store);
    run_scenario("token desconocido",
                 &pipeline,
                 demo_input(&CONFIG.demo.failing_token),
                 &mut store);

    println!("== auditoría ==");
    for line in audit.entries() {
        println!("  {line}");
    }
}

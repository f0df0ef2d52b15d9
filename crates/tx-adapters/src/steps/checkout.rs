//! Flujo de checkout: validate_order → load_customer → price_order →
//! charge_card → record_audit.
//!
//! Claves acumuladas en el `State` a lo largo de un run exitoso:
//! `input` (inicial) → `+params` → `+customer` → `+line_items`,`+total_cents`
//! → `+payment`. `record_audit` no añade claves (tee).
//!
//! Cada step es una función que devuelve el closure a registrar; las
//! dependencias (directorio, pasarela, audit log) se capturan por `Arc` para
//! que el pipeline resultante siga siendo compartible entre hilos.

use std::sync::Arc;

use serde_json::{json, Value};
use tx_core::{pipeline, CoreTxError, FailureValue, Outcome, Pipeline, State, StepException};

use crate::collaborators::{AuditLog, CustomerDirectory, PaymentGateway, CARD_DECLINED,
                           GATEWAY_TIMEOUT};

/// Valida la forma del pedido en `input`. Falla con una colección de errores
/// de validación (el valor de fallo es la colección, estilo "errores del
/// formulario"), nunca con excepciones.
pub fn validate_order() -> impl Fn(&State) -> Outcome<State, FailureValue> + Send + Sync {
    |s: &State| {
        let input = match s.get("input") {
            Some(Value::Object(input)) => input.clone(),
            _ => return Outcome::Failure(json!({ "validation": ["input must be an object"] })),
        };

        let mut problems: Vec<&str> = Vec::new();
        if !matches!(input.get("token"), Some(Value::String(_))) {
            problems.push("token is required");
        }
        match input.get("items") {
            Some(Value::Array(items)) if !items.is_empty() => {}
            _ => problems.push("items must be a non-empty array"),
        }

        if problems.is_empty() {
            Outcome::Success(s.with("params", Value::Object(input)))
        } else {
            Outcome::Failure(json!({ "validation": problems }))
        }
    }
}

/// Resuelve el token contra el directorio. El motivo simbólico
/// `"invalid_customer_token"` es el valor de fallo sobre el que los callers
/// registran handlers por valor.
pub fn load_customer(directory: Arc<CustomerDirectory>)
                     -> impl Fn(&State) -> Outcome<State, FailureValue> + Send + Sync {
    move |s: &State| {
        let token = s.get("params")
                     .and_then(|p| p.get("token"))
                     .and_then(|t| t.as_str())
                     .expect("params.token present after validate_order");
        match directory.lookup(token) {
            Some(customer) => Outcome::Success(s.with("customer", customer)),
            None => Outcome::Failure(json!("invalid_customer_token")),
        }
    }
}

/// Transformación pura: expande los items a líneas con subtotal y acumula el
/// total en céntimos. Infalible por contrato (`map`): si `params` no está,
/// es un defecto de armado del pipeline y el panic resultante es correcto.
pub fn price_order() -> impl Fn(&State) -> State + Send + Sync {
    |s: &State| {
        let items = s.get("params")
                     .and_then(|p| p.get("items"))
                     .and_then(|i| i.as_array())
                     .expect("params.items present after validate_order")
                     .clone();

        let mut total_cents: u64 = 0;
        let mut line_items = Vec::with_capacity(items.len());
        for item in items {
            let qty = item.get("qty").and_then(|q| q.as_u64()).unwrap_or(1);
            let unit = item.get("unit_cents").and_then(|u| u.as_u64()).unwrap_or(0);
            let subtotal = qty * unit;
            total_cents += subtotal;
            line_items.push(json!({
                "sku": item.get("sku").cloned().unwrap_or(Value::Null),
                "qty": qty,
                "subtotal_cents": subtotal,
            }));
        }

        s.with("line_items", Value::Array(line_items)).with("total_cents", json!(total_cents))
    }
}

/// Cobra el total contra la pasarela. Las dos clases declaradas
/// (`gateway_timeout`, `card_declined`) se recuperan como `Failure`;
/// cualquier otra clase que la pasarela devuelva es defecto y aborta el run.
pub fn charge_card(gateway: Arc<dyn PaymentGateway>)
                   -> impl Fn(&State) -> Result<State, StepException> + Send + Sync {
    move |s: &State| {
        let customer = s.get("customer").expect("customer present after load_customer");
        let amount = s.get("total_cents")
                      .and_then(|t| t.as_u64())
                      .expect("total_cents present after price_order");
        let receipt = gateway.charge(customer, amount)?;
        Ok(s.with("payment", receipt))
    }
}

/// Efecto puro de auditoría: una línea por transacción cobrada. No toca el
/// estado (tee).
pub fn record_audit(audit: Arc<AuditLog>) -> impl Fn(&State) + Send + Sync {
    move |s: &State| {
        let customer_id = s.get("customer")
                           .and_then(|c| c.get("id"))
                           .cloned()
                           .unwrap_or(Value::Null);
        let total = s.get("total_cents").and_then(|t| t.as_u64()).unwrap_or(0);
        audit.record(format!("charged customer={customer_id} total_cents={total}"));
    }
}

/// Pipeline de checkout completo, en el orden del flujo de negocio.
pub fn checkout_pipeline(directory: Arc<CustomerDirectory>,
                         gateway: Arc<dyn PaymentGateway>,
                         audit: Arc<AuditLog>)
                         -> Result<Pipeline, CoreTxError> {
    let assembled = pipeline! {
        step "validate_order" => validate_order(),
        step "load_customer" => load_customer(directory),
        map "price_order" => price_order(),
        try "charge_card" [GATEWAY_TIMEOUT, CARD_DECLINED] => charge_card(gateway),
        tee "record_audit" => record_audit(audit),
    };
    assembled
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_with_input(input: Value) -> State {
        State::new().with("input", input)
    }

    #[test]
    fn validate_order_collects_every_problem_at_once() {
        let outcome = validate_order()(&state_with_input(json!({})));
        assert_eq!(outcome.error().expect("must fail"),
                   &json!({ "validation": ["token is required",
                                           "items must be a non-empty array"] }));
    }

    #[test]
    fn validate_order_passes_the_input_through_as_params() {
        let input = json!({ "token": "t-1", "items": [{ "sku": "A", "qty": 2, "unit_cents": 50 }] });
        let outcome = validate_order()(&state_with_input(input.clone()));
        let state = outcome.state().expect("valid input");
        assert_eq!(state.get("params"), Some(&input));
    }

    #[test]
    fn price_order_accumulates_quantities() {
        let state = state_with_input(json!(null)).with("params",
                                                       json!({ "items": [
                                                           { "sku": "A", "qty": 2, "unit_cents": 50 },
                                                           { "sku": "B", "qty": 1, "unit_cents": 30 },
                                                       ] }));
        let priced = price_order()(&state);
        assert_eq!(priced.get("total_cents"), Some(&json!(130)));
        assert_eq!(priced.get("line_items").and_then(|l| l.as_array()).map(|l| l.len()),
                   Some(2));
    }

    #[test]
    fn load_customer_rejects_unknown_tokens() {
        let directory = Arc::new(CustomerDirectory::new());
        let state = State::new().with("params", json!({ "token": "ghost" }));
        let outcome = load_customer(directory)(&state);
        assert_eq!(outcome.error().expect("unknown token"), &json!("invalid_customer_token"));
    }
}

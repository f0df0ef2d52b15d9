//! tx-adapters: Capa de adaptación Dominio ↔ Core (checkout)
//!
//! Este crate provee:
//! - Colaboradores externos falsos (`CustomerDirectory`, `PaymentGateway`,
//!   `AuditLog`): deterministas y en memoria, sin IO real.
//! - Los steps del flujo de checkout, uno por cada tipo de adapter:
//!   `validate_order` / `load_customer` (continue), `price_order` (map),
//!   `charge_card` (try) y `record_audit` (tee).
//! - `checkout_pipeline`: el armado completo listo para `run`.
//!
//! Nota: el core sólo conoce `State` con payload JSON neutro; la semántica
//! de `params`, `customer`, `line_items`, `payment` vive únicamente aquí.

pub mod collaborators;
pub mod steps;

pub use collaborators::{AuditLog, ChargeBehavior, CustomerDirectory, FakePaymentGateway,
                        PaymentGateway, CARD_DECLINED, GATEWAY_TIMEOUT};
pub use steps::checkout::{charge_card, checkout_pipeline, load_customer, price_order,
                          record_audit, validate_order};

//! Steps del dominio checkout, uno por cada tipo de adapter del core.

pub mod checkout;

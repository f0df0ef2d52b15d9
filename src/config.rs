//! Configuración central de la demo.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`). Sólo parámetros de la demo: el token con el que se corre el
//! escenario y si se imprime la traza de eventos.

use once_cell::sync::Lazy;
use std::env;

/// Configuración global de la demo (extensible para más secciones).
pub struct AppConfig {
    pub demo: DemoConfig,
}

/// Parámetros del escenario de checkout de `main-tx`.
pub struct DemoConfig {
    /// Token usado en el run "de fallo". Por defecto un token desconocido,
    /// para que la demo muestre ambos carriles.
    pub failing_token: String,
    /// Si se imprime la traza de eventos de cada run.
    pub print_events: bool,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    let failing_token = env::var("TX_DEMO_FAILING_TOKEN").unwrap_or_else(|_| "bad-token".into());
    let print_events = env::var("TX_DEMO_PRINT_EVENTS").ok()
        .and_then(|v| v.parse().ok()).unwrap_or(true);
    AppConfig {
        demo: DemoConfig { failing_token, print_events },
    }
});

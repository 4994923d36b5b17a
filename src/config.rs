//! Configuración central del trazado.
//! Carga variables de entorno (.env) una sola vez y expone una estructura
//! inmutable (`CONFIG`) con la que construir sesiones `Provenance`.
//!
//! Variables reconocidas:
//! - `FLOWPROV_ID_SCHEME`: `port_aware` (defecto) | `reference`.
//! - `FLOWPROV_CAPTURE_VALUES`: `true` (defecto) | `false`.
use std::env;

use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use prov_core::{IdScheme, Provenance, TraceConfig};

use crate::errors::AppError;

pub const ID_SCHEME_VAR: &str = "FLOWPROV_ID_SCHEME";
pub const CAPTURE_VALUES_VAR: &str = "FLOWPROV_CAPTURE_VALUES";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub trace: TraceConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de una función arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let mut trace = TraceConfig::default();
        if let Some(raw) = lookup(ID_SCHEME_VAR) {
            trace.id_scheme = raw.parse::<IdScheme>().map_err(AppError::Config)?;
        }
        if let Some(raw) = lookup(CAPTURE_VALUES_VAR) {
            trace.capture_parameter_values = parse_bool(&raw).ok_or_else(|| {
                                                                 AppError::Config(format!("{CAPTURE_VALUES_VAR}: expected true/false, got '{raw}'"))
                                                             })?;
        }
        Ok(Self { trace })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Instancia global perezosa de configuración; valores inválidos caen a los
/// defaults con un warning.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("invalid provenance configuration, using defaults: {e}");
                             AppConfig::default()
                         })
});

/// Sesión `Provenance` configurada según `CONFIG`.
pub fn provenance_from_env() -> Provenance {
    Provenance::with_config(CONFIG.trace.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[(ID_SCHEME_VAR, "reference"), (CAPTURE_VALUES_VAR, "off")])).unwrap();
        assert_eq!(cfg.trace.id_scheme, IdScheme::Reference);
        assert!(!cfg.trace.capture_parameter_values);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let err = AppConfig::from_lookup(lookup(&[(ID_SCHEME_VAR, "md5")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        let err = AppConfig::from_lookup(lookup(&[(CAPTURE_VALUES_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(CAPTURE_VALUES_VAR));
    }
}

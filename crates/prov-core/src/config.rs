//! Configuración del trazado.
//!
//! El core no lee variables de entorno; recibe un `TraceConfig` ya resuelto
//! (ver `flowprov::config` para la carga desde `.env`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Esquema de generación de ids de datos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// Incluye la identidad del puerto en los ids de outputs y parámetros.
    #[default]
    PortAware,
    /// Misma estructura de ids que las trazas legadas: todos los outputs de
    /// una tarea comparten id y los parámetros de un mismo nodo pueden
    /// colapsar. La lista de inputs se hashea como JSON canónico, así que los
    /// ids no coinciden byte a byte con los legados.
    Reference,
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "port_aware" | "port-aware" => Ok(IdScheme::PortAware),
            "reference" | "legacy" => Ok(IdScheme::Reference),
            other => Err(format!("unknown id scheme '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    pub id_scheme: IdScheme,
    /// Captura el valor vivo de los parámetros raíz en su `DataArtifact`.
    pub capture_parameter_values: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { id_scheme: IdScheme::default(),
               capture_parameter_values: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_scheme_parses_known_names() {
        assert_eq!("port_aware".parse::<IdScheme>(), Ok(IdScheme::PortAware));
        assert_eq!(" Reference ".parse::<IdScheme>(), Ok(IdScheme::Reference));
        assert_eq!("legacy".parse::<IdScheme>(), Ok(IdScheme::Reference));
        assert!("sha1".parse::<IdScheme>().is_err());
    }

    #[test]
    fn default_config_is_port_aware_and_captures_values() {
        let cfg = TraceConfig::default();
        assert_eq!(cfg.id_scheme, IdScheme::PortAware);
        assert!(cfg.capture_parameter_values);
    }
}

//! flowprov
//!
//! Este crate actúa como la fachada de la librería:
//! - Re-exporta el núcleo de procedencia (`prov-core`) y los adaptadores
//!   en memoria (`prov-adapters`).
//! - Expone `config` para construir sesiones `Provenance` desde el entorno
//!   (`.env`).
//! - Expone `errors` para los fallos de configuración.

pub mod config;
pub mod errors;

pub use config::{provenance_from_env, AppConfig, CONFIG};
pub use errors::AppError;
pub use prov_adapters::{AdapterError, MemoryDataflow, SequentialRunner};
pub use prov_core::*;

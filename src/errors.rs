use prov_core::ProvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error(transparent)]
    Prov(#[from] ProvError),
}

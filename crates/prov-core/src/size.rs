//! Estimación de tamaño de valores.

use serde_json::Value;

use crate::hashing::to_canonical_json;

/// Estimador externo del tamaño en bytes de un valor observado.
pub trait SizeEstimator: Send + Sync {
    fn size_of(&self, value: &Value) -> usize;
}

/// Estimador por defecto: longitud en bytes del JSON canónico del valor.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSizeEstimator;

impl SizeEstimator for JsonSizeEstimator {
    fn size_of(&self, value: &Value) -> usize {
        to_canonical_json(value).len()
    }
}

impl<F> SizeEstimator for F where F: Fn(&Value) -> usize + Send + Sync
{
    fn size_of(&self, value: &Value) -> usize {
        self(value)
    }
}

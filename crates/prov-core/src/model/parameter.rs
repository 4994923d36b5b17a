use serde::{Deserialize, Serialize};

/// Vínculo de un puerto de entrada raíz (no conectado) con el artifact
/// suministrado directamente por el caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Índice local del nodo.
    pub node: usize,
    pub port: String,
    pub data: String,
}

//! Registro de una evaluación completada de un nodo.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ProvError;

/// Descriptor (puerto, id de dato, tamaño) de un input resuelto o un output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortData {
    pub port: String,
    pub data: String,
    pub size: usize,
}

/// Estado de un nodo dentro de la sesión.
///
/// Transiciones válidas: `NotStarted -> Pending -> Completed` y
/// `Completed -> Pending` cuando el nodo se reevalúa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    NotStarted,
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Índice local del nodo.
    pub node: usize,
    pub task_id: String,
    pub cpu_time: Duration,
    pub inputs: Vec<PortData>,
    pub outputs: Vec<PortData>,
}

impl Execution {
    pub fn n_input(&self) -> usize {
        self.inputs.len()
    }

    pub fn n_output(&self) -> usize {
        self.outputs.len()
    }

    /// Id del dato producido por el puerto `port` en esta ejecución.
    pub fn output_did(&self, port: &str) -> Result<&str, ProvError> {
        self.outputs
            .iter()
            .find(|o| o.port == port)
            .map(|o| o.data.as_str())
            .ok_or_else(|| ProvError::SchemaInconsistency { node: self.node, port: port.to_string() })
    }
}

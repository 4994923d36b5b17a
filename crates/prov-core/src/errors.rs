//! Errores del núcleo de procedencia.
//!
//! Todos son fallos visibles para el caller: se reportan de forma síncrona en
//! el hook que los provoca y nunca se reintentan. La traza queda en el estado
//! parcial que tuviera.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataflow::VertexId;

/// Tipo de violación del protocolo before/after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolFault {
    /// `before_eval` llamado de nuevo sin el `after_eval` correspondiente.
    AlreadyPending,
    /// `after_eval` sin `before_eval` previo (o ya consumido).
    NotPending,
}

impl std::fmt::Display for ProtocolFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolFault::AlreadyPending => write!(f, "before_eval called twice without after_eval"),
            ProtocolFault::NotPending => write!(f, "after_eval called without a pending before_eval"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ProvError {
    #[error("input port {port} of vertex {vertex} has more than one incoming connection")]
    PortFanIn { vertex: VertexId, port: usize },
    #[error("no execution recorded for upstream vertex {upstream} feeding vertex {vertex} (evaluation order violated)")]
    OrderingViolation { vertex: VertexId, upstream: VertexId },
    #[error("protocol violation on vertex {vertex}: {fault}")]
    ProtocolViolation { vertex: VertexId, fault: ProtocolFault },
    #[error("output port '{port}' not found in execution of node {node}")]
    SchemaInconsistency { node: usize, port: String },
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("vertex {0} is a reserved boundary vertex")]
    BoundaryVertex(VertexId),
    #[error("provenance session is not active")]
    SessionNotActive,
    #[error("internal: {0}")]
    Internal(String),
}

impl ProvError {
    /// `true` para las violaciones del protocolo before/after.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, ProvError::ProtocolViolation { .. })
    }
}

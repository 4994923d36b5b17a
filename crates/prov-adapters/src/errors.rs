use prov_core::{ProvError, VertexId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AdapterError {
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("vertex {vertex} has no port named '{port}'")]
    UnknownPort { vertex: VertexId, port: String },
    #[error("no kernel registered for vertex {0}")]
    MissingKernel(VertexId),
    #[error("vertex {vertex} declares {expected} output(s) but produced {found}")]
    ArityMismatch { vertex: VertexId, expected: usize, found: usize },
    #[error(transparent)]
    Prov(#[from] ProvError),
}

//! prov-core: registro de procedencia de evaluaciones de dataflow.
//!
//! Un motor externo evalúa el grafo nodo a nodo y llama los hooks
//! `before_eval`/`after_eval` de una sesión `Provenance`. El core arma una
//! traza append-only de artifacts, parámetros raíz y ejecuciones, todos
//! identificados por contenido (SHA-224), y la expone como `TraceSnapshot`.
//!
//! No decide el orden de evaluación, no cachea ni reejecuta, no persiste.
pub mod config;
pub mod constants;
pub mod dataflow;
pub mod engine;
pub mod errors;
pub mod hashing;
pub mod index;
pub mod model;
pub mod pending;
pub mod size;
pub mod snapshot;
pub mod trace;

pub use config::{IdScheme, TraceConfig};
pub use dataflow::{Dataflow, Edge, NodeFactory, PortRef, PortSchema, VertexId};
pub use engine::{EvalScope, Provenance, ProvenanceBuilder, SessionState};
pub use errors::{ProtocolFault, ProvError};
pub use index::NodeIndex;
pub use model::{ArtifactValue, DataArtifact, Execution, NodeState, Parameter, PortData};
pub use size::{JsonSizeEstimator, SizeEstimator};
pub use snapshot::{DataSnapshot, ExecutionSnapshot, TraceSnapshot};
pub use trace::ExecutionTrace;

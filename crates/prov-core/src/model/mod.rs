//! Registros de la traza (DataArtifact, Parameter, Execution).

pub mod artifact;
pub mod execution;
pub mod parameter;

pub use artifact::{ArtifactValue, DataArtifact};
pub use execution::{Execution, NodeState, PortData};
pub use parameter::Parameter;

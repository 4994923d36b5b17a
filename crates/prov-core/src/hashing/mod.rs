//! Direccionamiento por contenido: JSON canónico, digest y generación de ids.

pub mod canonical_json;
pub mod hash;
pub mod ids;

pub use canonical_json::to_canonical_json;
pub use hash::hash_str;
pub use ids::{output_data_id, parameter_data_id, task_fingerprint_input, task_id};

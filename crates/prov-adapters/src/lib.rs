//! prov-adapters: implementaciones concretas de la superficie `Dataflow`.
//!
//! Este crate provee:
//! - `MemoryDataflow`: grafo en memoria con vértices de frontera 0/1
//!   reservados, puertos declarados por factory y valores actuales.
//! - `SequentialRunner`: evalúa kernels registrados en un orden dado,
//!   propaga outputs por las aristas y llama los hooks de `Provenance`.
//!
//! El core no conoce estos tipos; sólo consume el trait `Dataflow`.

pub mod errors;
pub mod memory;
pub mod runner;

pub use errors::AdapterError;
pub use memory::MemoryDataflow;
pub use runner::{Kernel, SequentialRunner};

//! Buffer transitorio de inputs resueltos entre `before_eval` y `after_eval`.
//!
//! Invariante: como mucho una entrada pendiente por vértice. Es seguro para
//! acceso concurrente siempre que cada nodo use su propia clave.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::dataflow::VertexId;
use crate::errors::{ProtocolFault, ProvError};
use crate::model::PortData;

#[derive(Debug, Default)]
pub struct PendingInputs {
    inner: DashMap<VertexId, Vec<PortData>>,
}

impl PendingInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.inner.contains_key(&vertex)
    }

    /// Registra los inputs de `vertex`; falla si ya había una entrada pendiente.
    pub fn stage(&self, vertex: VertexId, inputs: Vec<PortData>) -> Result<(), ProvError> {
        match self.inner.entry(vertex) {
            Entry::Occupied(_) => Err(ProvError::ProtocolViolation { vertex,
                                                                     fault: ProtocolFault::AlreadyPending }),
            Entry::Vacant(slot) => {
                slot.insert(inputs);
                Ok(())
            }
        }
    }

    /// Extrae y elimina la entrada de `vertex`.
    pub fn take(&self, vertex: VertexId) -> Result<Vec<PortData>, ProvError> {
        self.inner
            .remove(&vertex)
            .map(|(_, inputs)| inputs)
            .ok_or(ProvError::ProtocolViolation { vertex, fault: ProtocolFault::NotPending })
    }

    /// Descarta la entrada si existe (evaluación abandonada).
    pub fn discard(&self, vertex: VertexId) -> bool {
        self.inner.remove(&vertex).is_some()
    }

    /// Vértices con before_eval sin after_eval, ordenados.
    pub fn dangling(&self) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = self.inner.iter().map(|e| *e.key()).collect();
        out.sort_unstable();
        out
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}

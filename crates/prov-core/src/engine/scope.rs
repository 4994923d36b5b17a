//! Guardia de evaluación con alcance.
//!
//! `EvalScope` se crea tras un `before_eval` exitoso y mide el tiempo de la
//! computación externa. `finish` ejecuta el `after_eval`; si la guardia se
//! descarta sin `finish` (error o panic de la computación) la entrada
//! pendiente se elimina para no dejarla colgada.

use std::time::{Duration, Instant};

use log::warn;

use crate::dataflow::{Dataflow, VertexId};
use crate::engine::Provenance;
use crate::errors::ProvError;
use crate::model::Execution;

pub struct EvalScope<'a> {
    prov: &'a Provenance,
    vertex: VertexId,
    started: Instant,
    done: bool,
}

impl<'a> EvalScope<'a> {
    pub(crate) fn new(prov: &'a Provenance, vertex: VertexId) -> Self {
        Self { prov,
               vertex,
               started: Instant::now(),
               done: false }
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Cierra la evaluación con el tiempo medido desde `begin`.
    pub fn finish<D: Dataflow + ?Sized>(mut self, dataflow: &D) -> Result<Option<Execution>, ProvError> {
        self.done = true;
        self.prov.after_eval(dataflow, self.vertex, self.started.elapsed())
    }
}

impl Drop for EvalScope<'_> {
    fn drop(&mut self) {
        if !self.done && self.prov.abandon(self.vertex) {
            warn!("evaluation of vertex {} dropped without completion; pending inputs discarded",
                  self.vertex);
        }
    }
}

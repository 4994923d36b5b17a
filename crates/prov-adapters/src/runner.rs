//! Evaluador secuencial de referencia.
//!
//! No decide el orden: recibe la secuencia de vértices del caller (o usa el
//! orden de inserción). Cada evaluación queda envuelta en un `EvalScope`, así
//! un kernel que falla no deja entradas pendientes colgadas.

use std::collections::HashMap;

use log::debug;
use prov_core::{Dataflow, Execution, Provenance, VertexId};
use serde_json::Value;

use crate::errors::AdapterError;
use crate::memory::MemoryDataflow;

/// Computación de un nodo: valores de entrada -> valores de salida.
pub type Kernel = Box<dyn Fn(&[Value]) -> Vec<Value> + Send + Sync>;

#[derive(Default)]
pub struct SequentialRunner {
    kernels: HashMap<VertexId, Kernel>,
}

impl SequentialRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, vertex: VertexId, kernel: F) -> &mut Self
        where F: Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static
    {
        self.kernels.insert(vertex, Box::new(kernel));
        self
    }

    /// Evalúa un vértice entre los hooks y propaga sus outputs.
    pub fn evaluate(&self, dataflow: &mut MemoryDataflow, prov: &Provenance, vertex: VertexId) -> Result<Option<Execution>, AdapterError> {
        if dataflow.is_boundary(vertex) {
            prov.before_eval(&*dataflow, vertex)?;
            return Ok(prov.after_eval(&*dataflow, vertex, Default::default())?);
        }
        let kernel = self.kernels.get(&vertex).ok_or(AdapterError::MissingKernel(vertex))?;
        let scope = prov.begin(&*dataflow, vertex)?;
        let outputs = kernel(dataflow.inputs_of(vertex)?);
        dataflow.set_outputs(vertex, outputs)?;
        let execution = scope.finish(&*dataflow)?;
        dataflow.propagate(vertex)?;
        debug!("vertex {} evaluated", vertex);
        Ok(execution)
    }

    pub fn run(&self, dataflow: &mut MemoryDataflow, prov: &Provenance, order: &[VertexId]) -> Result<Vec<Execution>, AdapterError> {
        let mut executions = Vec::with_capacity(order.len());
        for &vertex in order {
            if let Some(exec) = self.evaluate(dataflow, prov, vertex)? {
                executions.push(exec);
            }
        }
        Ok(executions)
    }

    /// Evalúa todos los nodos en orden de inserción.
    pub fn run_all(&self, dataflow: &mut MemoryDataflow, prov: &Provenance) -> Result<Vec<Execution>, AdapterError> {
        let order = dataflow.insertion_order();
        self.run(dataflow, prov, &order)
    }
}

//! Traza append-only: artifacts, parámetros y ejecuciones en orden de llegada.
//!
//! El log de ejecuciones es la fuente de verdad para "última ejecución del
//! nodo N". Se mantiene además un índice nodo -> posición en el log,
//! actualizado en cada append, para no recorrer el log hacia atrás.

use std::collections::HashMap;

use crate::model::{DataArtifact, Execution, Parameter};

#[derive(Debug, Clone, Default)]
pub struct ExecutionTrace {
    data: Vec<DataArtifact>,
    parameters: Vec<Parameter>,
    executions: Vec<Execution>,
    last_by_node: HashMap<usize, usize>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_data(&mut self, artifact: DataArtifact) {
        self.data.push(artifact);
    }

    pub fn record_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Agrega una ejecución y devuelve su posición en el log.
    pub fn append_execution(&mut self, execution: Execution) -> usize {
        let pos = self.executions.len();
        self.last_by_node.insert(execution.node, pos);
        self.executions.push(execution);
        pos
    }

    /// Ejecución más reciente del nodo local `node`, si la hay.
    pub fn last_execution(&self, node: usize) -> Option<&Execution> {
        self.last_by_node.get(&node).and_then(|&pos| self.executions.get(pos))
    }

    /// Todas las ejecuciones de un nodo en orden de finalización.
    pub fn executions_of(&self, node: usize) -> impl Iterator<Item = &Execution> {
        self.executions.iter().filter(move |e| e.node == node)
    }

    pub fn data(&self) -> &[DataArtifact] {
        &self.data
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.parameters.is_empty() && self.executions.is_empty()
    }
}

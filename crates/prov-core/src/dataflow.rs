//! Superficie de consulta sobre el motor de dataflow externo.
//!
//! El core nunca modifica el grafo ni decide el orden de evaluación: sólo
//! lee vértices, esquemas de puertos, aristas y valores actuales a través del
//! trait `Dataflow`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{BOUNDARY_VERTICES, UNTYPED_INTERFACE};

/// Identificador de vértice en el espacio del motor externo.
pub type VertexId = usize;

/// Esquema declarado de un puerto (entrada o salida).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSchema {
    pub name: String,
    /// Descriptor de interfaz/tipo; `None` si el puerto no declara ninguno.
    pub interface: Option<String>,
}

impl PortSchema {
    pub fn new(name: impl Into<String>, interface: Option<&str>) -> Self {
        Self { name: name.into(),
               interface: interface.map(str::to_string) }
    }

    /// Puerto sin interfaz declarada.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self { name: name.into(), interface: None }
    }

    /// Forma textual del tipo declarado, tal como se exporta en `data[].type`.
    pub fn declared_type(&self) -> String {
        self.interface.clone().unwrap_or_else(|| UNTYPED_INTERFACE.to_string())
    }
}

/// Definición (factory) de un nodo: nombre y puertos en orden de declaración.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeFactory {
    pub name: String,
    pub inputs: Vec<PortSchema>,
    pub outputs: Vec<PortSchema>,
}

impl NodeFactory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_input(mut self, port: PortSchema) -> Self {
        self.inputs.push(port);
        self
    }

    pub fn with_output(mut self, port: PortSchema) -> Self {
        self.outputs.push(port);
        self
    }

    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|p| p.name == name)
    }

    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|p| p.name == name)
    }
}

/// Referencia a un puerto: vértice dueño + índice local en su lista de puertos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub vertex: VertexId,
    pub index: usize,
}

/// Arista dirigida de un puerto de salida a un puerto de entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: PortRef,
    pub target: PortRef,
}

/// Consultas de sólo lectura que el trazado necesita del motor.
pub trait Dataflow {
    /// Identificador del workflow trazado (uid de su factory), si existe.
    fn workflow_id(&self) -> Option<String>;

    /// Todos los vértices del grafo, incluidos los de frontera.
    fn vertices(&self) -> Vec<VertexId>;

    /// Los dos vértices reservados que representan los puertos globales.
    fn boundary_vertices(&self) -> [VertexId; 2] {
        BOUNDARY_VERTICES
    }

    fn factory(&self, vertex: VertexId) -> Option<&NodeFactory>;

    /// Token de identidad opaco y estable del nodo.
    fn node_identity(&self, vertex: VertexId) -> Option<String>;

    fn in_edges(&self, vertex: VertexId) -> Vec<Edge>;

    fn input_value(&self, vertex: VertexId, index: usize) -> Option<Value>;

    fn output_value(&self, vertex: VertexId, index: usize) -> Option<Value>;

    /// Lista completa de valores de entrada actuales del nodo (ausentes como `null`).
    fn input_values(&self, vertex: VertexId) -> Vec<Value> {
        let arity = self.factory(vertex).map(|f| f.inputs.len()).unwrap_or(0);
        (0..arity).map(|i| self.input_value(vertex, i).unwrap_or(Value::Null)).collect()
    }

    fn is_boundary(&self, vertex: VertexId) -> bool {
        self.boundary_vertices().contains(&vertex)
    }
}

//! Grafo de dataflow en memoria.
//!
//! Los vértices 0 (`__in__`) y 1 (`__out__`) representan los puertos
//! globales del grafo; los nodos reales se numeran desde 2 en orden de
//! inserción. El token de identidad por defecto es `"<factory>#<vertex>"`,
//! así dos grafos construidos igual producen los mismos ids.

use indexmap::IndexMap;
use prov_core::constants::BOUNDARY_VERTICES;
use prov_core::{Dataflow, Edge, NodeFactory, PortRef, VertexId};
use serde_json::Value;

use crate::errors::AdapterError;

#[derive(Debug, Clone)]
struct MemoryNode {
    factory: NodeFactory,
    identity: String,
    inputs: Vec<Value>,
    outputs: Vec<Value>,
}

impl MemoryNode {
    fn new(factory: NodeFactory, identity: String) -> Self {
        let inputs = vec![Value::Null; factory.inputs.len()];
        let outputs = vec![Value::Null; factory.outputs.len()];
        Self { factory,
               identity,
               inputs,
               outputs }
    }
}

#[derive(Debug, Clone)]
pub struct MemoryDataflow {
    uid: Option<String>,
    nodes: IndexMap<VertexId, MemoryNode>,
    edges: Vec<Edge>,
    next_vertex: VertexId,
}

impl MemoryDataflow {
    pub fn new(uid: impl Into<String>) -> Self {
        let mut df = Self::anonymous();
        df.uid = Some(uid.into());
        df
    }

    /// Grafo sin identificador de workflow.
    pub fn anonymous() -> Self {
        let mut nodes = IndexMap::new();
        for (vid, name) in BOUNDARY_VERTICES.iter().zip(["__in__", "__out__"]) {
            nodes.insert(*vid, MemoryNode::new(NodeFactory::new(name), name.to_string()));
        }
        Self { uid: None,
               nodes,
               edges: Vec::new(),
               next_vertex: BOUNDARY_VERTICES.len() }
    }

    pub fn add_node(&mut self, factory: NodeFactory) -> VertexId {
        let identity = format!("{}#{}", factory.name, self.next_vertex);
        self.add_node_with_identity(factory, identity)
    }

    pub fn add_node_with_identity(&mut self, factory: NodeFactory, identity: impl Into<String>) -> VertexId {
        let vid = self.next_vertex;
        self.next_vertex += 1;
        self.nodes.insert(vid, MemoryNode::new(factory, identity.into()));
        vid
    }

    fn node(&self, vertex: VertexId) -> Result<&MemoryNode, AdapterError> {
        self.nodes.get(&vertex).ok_or(AdapterError::UnknownVertex(vertex))
    }

    fn node_mut(&mut self, vertex: VertexId) -> Result<&mut MemoryNode, AdapterError> {
        self.nodes.get_mut(&vertex).ok_or(AdapterError::UnknownVertex(vertex))
    }

    fn port_error(vertex: VertexId, port: &str) -> AdapterError {
        AdapterError::UnknownPort { vertex,
                                    port: port.to_string() }
    }

    /// Conecta la salida `out_port` de `source` con la entrada `in_port` de
    /// `target`. No rechaza múltiples conexiones al mismo puerto: detectarlas
    /// es trabajo del trazado.
    pub fn connect(&mut self, source: VertexId, out_port: &str, target: VertexId, in_port: &str) -> Result<(), AdapterError> {
        let out_index = self.node(source)?
                            .factory
                            .output_index(out_port)
                            .ok_or_else(|| Self::port_error(source, out_port))?;
        let in_index = self.node(target)?
                           .factory
                           .input_index(in_port)
                           .ok_or_else(|| Self::port_error(target, in_port))?;
        self.edges.push(Edge { source: PortRef { vertex: source, index: out_index },
                               target: PortRef { vertex: target, index: in_index } });
        Ok(())
    }

    /// Arista cruda entre índices de puerto (p. ej. desde `__in__`).
    pub fn connect_ports(&mut self, source: PortRef, target: PortRef) {
        self.edges.push(Edge { source, target });
    }

    pub fn set_input(&mut self, vertex: VertexId, port: &str, value: Value) -> Result<(), AdapterError> {
        let node = self.node_mut(vertex)?;
        let idx = node.factory.input_index(port).ok_or_else(|| Self::port_error(vertex, port))?;
        node.inputs[idx] = value;
        Ok(())
    }

    pub fn set_output(&mut self, vertex: VertexId, port: &str, value: Value) -> Result<(), AdapterError> {
        let node = self.node_mut(vertex)?;
        let idx = node.factory.output_index(port).ok_or_else(|| Self::port_error(vertex, port))?;
        node.outputs[idx] = value;
        Ok(())
    }

    /// Reemplaza todos los outputs; la aridad debe coincidir con la factory.
    pub fn set_outputs(&mut self, vertex: VertexId, values: Vec<Value>) -> Result<(), AdapterError> {
        let node = self.node_mut(vertex)?;
        if values.len() != node.factory.outputs.len() {
            return Err(AdapterError::ArityMismatch { vertex,
                                                     expected: node.factory.outputs.len(),
                                                     found: values.len() });
        }
        node.outputs = values;
        Ok(())
    }

    pub fn inputs_of(&self, vertex: VertexId) -> Result<&[Value], AdapterError> {
        Ok(&self.node(vertex)?.inputs)
    }

    pub fn out_edges(&self, vertex: VertexId) -> Vec<Edge> {
        self.edges.iter().filter(|e| e.source.vertex == vertex).copied().collect()
    }

    /// Copia los outputs actuales de `vertex` a las entradas conectadas aguas abajo.
    pub fn propagate(&mut self, vertex: VertexId) -> Result<(), AdapterError> {
        let outputs = self.node(vertex)?.outputs.clone();
        for edge in self.out_edges(vertex) {
            let value = outputs.get(edge.source.index).cloned().unwrap_or_default();
            let target = self.node_mut(edge.target.vertex)?;
            if let Some(slot) = target.inputs.get_mut(edge.target.index) {
                *slot = value;
            }
        }
        Ok(())
    }

    /// Vértices no-frontera en orden de inserción.
    pub fn insertion_order(&self) -> Vec<VertexId> {
        self.nodes.keys().copied().filter(|v| !BOUNDARY_VERTICES.contains(v)).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len() - BOUNDARY_VERTICES.len()
    }
}

impl Dataflow for MemoryDataflow {
    fn workflow_id(&self) -> Option<String> {
        self.uid.clone()
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.nodes.keys().copied().collect()
    }

    fn factory(&self, vertex: VertexId) -> Option<&NodeFactory> {
        self.nodes.get(&vertex).map(|n| &n.factory)
    }

    fn node_identity(&self, vertex: VertexId) -> Option<String> {
        self.nodes.get(&vertex).map(|n| n.identity.clone())
    }

    fn in_edges(&self, vertex: VertexId) -> Vec<Edge> {
        self.edges.iter().filter(|e| e.target.vertex == vertex).copied().collect()
    }

    fn input_value(&self, vertex: VertexId, index: usize) -> Option<Value> {
        self.nodes.get(&vertex).and_then(|n| n.inputs.get(index).cloned())
    }

    fn output_value(&self, vertex: VertexId, index: usize) -> Option<Value> {
        self.nodes.get(&vertex).and_then(|n| n.outputs.get(index).cloned())
    }
}

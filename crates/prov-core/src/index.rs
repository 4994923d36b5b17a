//! Traductor de ids de vértice externos a índices locales densos.
//!
//! Al construirse, los índices locales son la posición del vértice dentro de
//! la lista ordenada de vértices sin los dos de frontera. Una vez asignado, el
//! índice de un vértice no cambia durante la sesión: `extend` sólo agrega
//! vértices nuevos a continuación del máximo actual.

use std::collections::HashMap;

use crate::dataflow::{Dataflow, VertexId};
use crate::errors::ProvError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIndex {
    boundary: [VertexId; 2],
    order: Vec<VertexId>,
    locals: HashMap<VertexId, usize>,
}

impl NodeIndex {
    pub fn new(vertices: impl IntoIterator<Item = VertexId>, boundary: [VertexId; 2]) -> Self {
        let mut idx = Self { boundary,
                             order: Vec::new(),
                             locals: HashMap::new() };
        idx.extend(vertices);
        idx
    }

    pub fn from_dataflow<D: Dataflow + ?Sized>(dataflow: &D) -> Self {
        Self::new(dataflow.vertices(), dataflow.boundary_vertices())
    }

    /// Asigna índices a los vértices aún no vistos, en orden ascendente y a
    /// partir del máximo actual. Devuelve cuántos se agregaron.
    pub fn extend(&mut self, vertices: impl IntoIterator<Item = VertexId>) -> usize {
        let mut fresh: Vec<VertexId> = vertices.into_iter()
                                               .filter(|v| !self.boundary.contains(v) && !self.locals.contains_key(v))
                                               .collect();
        fresh.sort_unstable();
        fresh.dedup();
        for v in &fresh {
            self.locals.insert(*v, self.order.len());
            self.order.push(*v);
        }
        fresh.len()
    }

    pub fn local_id(&self, vertex: VertexId) -> Result<usize, ProvError> {
        if self.boundary.contains(&vertex) {
            return Err(ProvError::BoundaryVertex(vertex));
        }
        self.locals.get(&vertex).copied().ok_or(ProvError::UnknownVertex(vertex))
    }

    /// Operación inversa: vértice externo de un índice local.
    pub fn vertex_of(&self, local: usize) -> Option<VertexId> {
        self.order.get(local).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

//! Constantes del núcleo de procedencia.
//!
//! Algunos de estos valores forman parte del input del hashing o del formato
//! exportado; cambiarlos rompe la comparación con trazas previas.

use crate::dataflow::VertexId;

/// Vértices reservados por defecto para los puertos globales del grafo
/// (`__in__` y `__out__`). Nunca reciben índice local.
pub const BOUNDARY_VERTICES: [VertexId; 2] = [0, 1];

/// Descriptor de interfaz usado cuando el puerto no declara ninguno. Un
/// artifact con este tipo exporta `value` como `null` explícito.
pub const UNTYPED_INTERFACE: &str = "None";

/// Separadores del string canónico que alimenta el digest de tareas.
pub(crate) const PORT_DATA_SEP: char = ':';
pub(crate) const ENTRY_TERMINATOR: char = ';';

//! Generación determinista de ids de tareas, outputs y parámetros.
//!
//! Las tres clases de id se derivan de strings canónicos:
//! - tarea: `"<port>:<data>;"` por cada input resuelto (orden de declaración)
//!   seguido del token de identidad del nodo.
//! - output: el mismo string de la tarea; con `IdScheme::PortAware` se añade
//!   `"><index>:<port>"` del puerto de salida.
//! - parámetro: nombre de la factory + JSON canónico de la lista completa de
//!   valores de entrada; con `IdScheme::PortAware` se añade
//!   `"#<index>:<port>"` del puerto de entrada.
//!
//! Mismos inputs + misma identidad producen siempre los mismos ids.

use serde_json::Value;

use super::{hash_str, to_canonical_json};
use crate::config::IdScheme;
use crate::constants::{ENTRY_TERMINATOR, PORT_DATA_SEP};
use crate::model::PortData;

/// String canónico previo al digest de una tarea. NO es el id final.
pub fn task_fingerprint_input(inputs: &[PortData], node_identity: &str) -> String {
    let mut buf = String::new();
    for inp in inputs {
        buf.push_str(&inp.port);
        buf.push(PORT_DATA_SEP);
        buf.push_str(&inp.data);
        buf.push(ENTRY_TERMINATOR);
    }
    buf.push_str(node_identity);
    buf
}

pub fn task_id(inputs: &[PortData], node_identity: &str) -> String {
    hash_str(&task_fingerprint_input(inputs, node_identity))
}

pub fn output_data_id(scheme: IdScheme, inputs: &[PortData], node_identity: &str, port_index: usize, port_name: &str) -> String {
    let mut buf = task_fingerprint_input(inputs, node_identity);
    if scheme == IdScheme::PortAware {
        buf.push_str(&format!(">{port_index}:{port_name}"));
    }
    hash_str(&buf)
}

pub fn parameter_data_id(scheme: IdScheme,
                         factory_name: &str,
                         input_values: &[Value],
                         port_index: usize,
                         port_name: &str)
                         -> String {
    let mut buf = String::from(factory_name);
    buf.push_str(&to_canonical_json(&Value::Array(input_values.to_vec())));
    if scheme == IdScheme::PortAware {
        buf.push_str(&format!("#{port_index}:{port_name}"));
    }
    hash_str(&buf)
}

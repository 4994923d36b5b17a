//! Unidad de dato observada fluyendo por el grafo.
//!
//! Un `DataArtifact` se crea una sola vez y nunca se muta. Dos artifacts sólo
//! comparten `id` si son intercambiables (misma procedencia aguas arriba).
//! El valor se captura únicamente para parámetros raíz; los outputs calculados
//! guardan sólo el tamaño.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::UNTYPED_INTERFACE;

/// Estado del valor de un artifact, decidido al crearlo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ArtifactValue {
    /// Valor capturado (parámetros raíz).
    Captured(Value),
    /// Valor no retenido (outputs calculados o captura deshabilitada).
    Omitted,
    /// Tipo declarado desconocido: se exporta como `null` explícito.
    Untyped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataArtifact {
    pub id: String,
    pub declared_type: String,
    pub value: ArtifactValue,
    pub size: usize,
}

impl DataArtifact {
    /// Artifact de un parámetro raíz. `value = None` indica que no se captura.
    pub fn parameter(id: String, declared_type: String, value: Option<Value>, size: usize) -> Self {
        let value = if declared_type == UNTYPED_INTERFACE {
            ArtifactValue::Untyped
        } else {
            value.map(ArtifactValue::Captured).unwrap_or(ArtifactValue::Omitted)
        };
        Self { id, declared_type, value, size }
    }

    /// Artifact producido por un puerto de salida (sin valor).
    pub fn computed(id: String, declared_type: String, size: usize) -> Self {
        let value = if declared_type == UNTYPED_INTERFACE { ArtifactValue::Untyped } else { ArtifactValue::Omitted };
        Self { id, declared_type, value, size }
    }

    /// Valor tal como aparece en la exportación: `None` omite el campo,
    /// `Some(Value::Null)` lo emite como `null` explícito.
    pub fn exported_value(&self) -> Option<Value> {
        match &self.value {
            ArtifactValue::Captured(v) => Some(v.clone()),
            ArtifactValue::Omitted => None,
            ArtifactValue::Untyped => Some(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn untyped_parameter_drops_its_value() {
        let a = DataArtifact::parameter("d".into(), "None".into(), Some(json!(5)), 1);
        assert_eq!(a.value, ArtifactValue::Untyped);
        assert_eq!(a.exported_value(), Some(Value::Null));
    }

    #[test]
    fn typed_parameter_keeps_its_value() {
        let a = DataArtifact::parameter("d".into(), "IInt".into(), Some(json!(5)), 1);
        assert_eq!(a.exported_value(), Some(json!(5)));
        let b = DataArtifact::parameter("d".into(), "IInt".into(), None, 1);
        assert_eq!(b.value, ArtifactValue::Omitted);
    }

    #[test]
    fn computed_outputs_never_carry_values() {
        assert_eq!(DataArtifact::computed("d".into(), "IInt".into(), 3).exported_value(), None);
        assert_eq!(DataArtifact::computed("d".into(), "None".into(), 3).exported_value(), Some(Value::Null));
    }
}

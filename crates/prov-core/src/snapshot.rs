//! Proyección inmutable de la traza al registro anidado exportable.
//!
//! Esquema (nombres de campo fijos):
//! `{id, workflow, time_init, time_end, data: [{id, type, value?, size}],
//!   parameters: [{node, port, data}], executions: [{node, task_id, cpu_time,
//!   n_input, inputs, n_output, outputs}]}`.
//!
//! `n_input`/`n_output` se derivan de las listas al proyectar; nunca se
//! almacenan por separado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::{DataArtifact, Execution, Parameter, PortData};
use crate::trace::ExecutionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSnapshot {
    pub id: String,
    pub workflow: Option<String>,
    pub time_init: Option<DateTime<Utc>>,
    pub time_end: Option<DateTime<Utc>>,
    pub data: Vec<DataSnapshot>,
    pub parameters: Vec<Parameter>,
    pub executions: Vec<ExecutionSnapshot>,
}

// Un campo presente con `null` debe seguir siendo `Some(Value::Null)`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where D: Deserializer<'de>
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present_value")]
    pub value: Option<Value>,
    pub size: usize,
}

impl From<&DataArtifact> for DataSnapshot {
    fn from(a: &DataArtifact) -> Self {
        Self { id: a.id.clone(),
               data_type: a.declared_type.clone(),
               value: a.exported_value(),
               size: a.size }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSnapshot {
    pub node: usize,
    pub task_id: String,
    /// Segundos.
    pub cpu_time: f64,
    pub n_input: usize,
    pub inputs: Vec<PortData>,
    pub n_output: usize,
    pub outputs: Vec<PortData>,
}

impl From<&Execution> for ExecutionSnapshot {
    fn from(e: &Execution) -> Self {
        Self { node: e.node,
               task_id: e.task_id.clone(),
               cpu_time: e.cpu_time.as_secs_f64(),
               n_input: e.n_input(),
               inputs: e.inputs.clone(),
               n_output: e.n_output(),
               outputs: e.outputs.clone() }
    }
}

impl TraceSnapshot {
    pub(crate) fn project(id: &str,
                          workflow: Option<&str>,
                          time_init: Option<DateTime<Utc>>,
                          time_end: Option<DateTime<Utc>>,
                          trace: &ExecutionTrace)
                          -> Self {
        Self { id: id.to_string(),
               workflow: workflow.map(str::to_string),
               time_init,
               time_end,
               data: trace.data().iter().map(DataSnapshot::from).collect(),
               parameters: trace.parameters().to_vec(),
               executions: trace.executions().iter().map(ExecutionSnapshot::from).collect() }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_field_is_omitted_null_or_present() {
        let omitted = DataSnapshot::from(&DataArtifact::computed("a".into(), "IInt".into(), 1));
        let untyped = DataSnapshot::from(&DataArtifact::computed("b".into(), "None".into(), 1));
        let captured = DataSnapshot::from(&DataArtifact::parameter("c".into(), "IInt".into(), Some(json!(3)), 1));

        assert_eq!(serde_json::to_value(&omitted).unwrap(), json!({"id": "a", "type": "IInt", "size": 1}));
        assert_eq!(serde_json::to_value(&untyped).unwrap(),
                   json!({"id": "b", "type": "None", "value": null, "size": 1}));
        assert_eq!(serde_json::to_value(&captured).unwrap()["value"], json!(3));
    }

    #[test]
    fn explicit_null_survives_json_round_trip() {
        let raw = r#"{"id":"b","type":"None","value":null,"size":1}"#;
        let back: DataSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(back.value, Some(Value::Null));
        let raw = r#"{"id":"a","type":"IInt","size":1}"#;
        let back: DataSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(back.value, None);
    }
}

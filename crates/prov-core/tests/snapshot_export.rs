use std::time::Duration;

use chrono::{TimeZone, Utc};
use prov_adapters::MemoryDataflow;
use prov_core::{NodeFactory, PortSchema, Provenance, TraceSnapshot};
use serde_json::{json, Value};

fn traced() -> Provenance {
    let mut df = MemoryDataflow::new("wf-uid");
    let v = df.add_node(NodeFactory::new("plot").with_input(PortSchema::new("data", Some("ISequence")))
                                                .with_input(PortSchema::untyped("style"))
                                                .with_output(PortSchema::untyped("figure")));
    df.set_input(v, "data", json!([1, 2, 3])).unwrap();
    df.set_input(v, "style", json!({"color": "red"})).unwrap();

    let mut prov = Provenance::new();
    prov.init(&df);
    prov.set_time_init(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    prov.before_eval(&df, v).unwrap();
    prov.after_eval(&df, v, Duration::from_millis(500)).unwrap();
    prov.set_time_end(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 1).unwrap());
    prov
}

#[test]
fn snapshot_is_stable_without_intervening_hooks() {
    let prov = traced();
    let first = prov.as_snapshot().unwrap();
    let second = prov.as_snapshot().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn snapshot_json_has_the_fixed_schema() {
    let prov = traced();
    let json: Value = serde_json::from_str(&prov.as_snapshot().unwrap().to_json().unwrap()).unwrap();

    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["data", "executions", "id", "parameters", "time_end", "time_init", "workflow"]);
    assert_eq!(json["workflow"], json!("wf-uid"));
    assert_eq!(json["id"].as_str().map(str::len), Some(32));

    let exec = &json["executions"][0];
    assert_eq!(exec["node"], json!(0));
    assert_eq!(exec["n_input"], json!(2));
    assert_eq!(exec["inputs"].as_array().map(Vec::len), Some(2));
    assert_eq!(exec["n_output"], json!(1));
    assert_eq!(exec["cpu_time"], json!(0.5));
    assert_eq!(exec["inputs"][0]["port"], json!("data"));
    assert!(exec["inputs"][0]["size"].is_u64());

    assert_eq!(json["parameters"][1], json!({"node": 0, "port": "style", "data": exec["inputs"][1]["data"].clone()}));
}

#[test]
fn untyped_artifacts_export_explicit_null_values() {
    let snap = traced().as_snapshot().unwrap();
    let data = serde_json::to_value(&snap.data).unwrap();

    // parámetro tipado: valor capturado
    assert_eq!(data[0]["type"], json!("ISequence"));
    assert_eq!(data[0]["value"], json!([1, 2, 3]));
    // parámetro sin interfaz: null explícito aunque se capturó un valor
    assert_eq!(data[1]["type"], json!("None"));
    assert!(data[1].as_object().unwrap().contains_key("value"));
    assert_eq!(data[1]["value"], Value::Null);
    // output sin interfaz: también null explícito
    assert_eq!(data[2]["type"], json!("None"));
    assert!(data[2].as_object().unwrap().contains_key("value"));
}

#[test]
fn snapshot_json_round_trips() {
    let snap = traced().as_snapshot().unwrap();
    let back = TraceSnapshot::from_json(&snap.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, snap);
}

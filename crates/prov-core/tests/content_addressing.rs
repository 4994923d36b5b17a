use std::time::Duration;

use prov_adapters::MemoryDataflow;
use prov_core::hashing::{hash_str, task_id};
use prov_core::{IdScheme, NodeFactory, PortData, PortSchema, Provenance, TraceSnapshot};
use serde_json::json;

/// a(x) -> b(in), b tiene dos salidas.
fn build() -> MemoryDataflow {
    let mut df = MemoryDataflow::new("pipeline");
    let a = df.add_node(NodeFactory::new("load").with_input(PortSchema::new("path", Some("IFileStr")))
                                                .with_output(PortSchema::new("table", Some("ITable"))));
    let b = df.add_node(NodeFactory::new("split").with_input(PortSchema::new("in", Some("ITable")))
                                                 .with_output(PortSchema::new("train", Some("ITable")))
                                                 .with_output(PortSchema::new("test", Some("ITable"))));
    df.connect(a, "table", b, "in").expect("connect");
    df.set_input(a, "path", json!("data.csv")).expect("input");
    df
}

fn trace(scheme: IdScheme) -> TraceSnapshot {
    let df = build();
    let mut prov = Provenance::builder().id_scheme(scheme).build();
    prov.init(&df);
    for v in [2, 3] {
        prov.before_eval(&df, v).expect("before");
        prov.after_eval(&df, v, Duration::from_millis(10)).expect("after");
    }
    prov.as_snapshot().unwrap()
}

#[test]
fn identical_graphs_yield_identical_ids() {
    let first = trace(IdScheme::PortAware);
    let second = trace(IdScheme::PortAware);

    assert_ne!(first.id, second.id, "session ids are fresh per init");
    let tasks = |s: &TraceSnapshot| s.executions.iter().map(|e| e.task_id.clone()).collect::<Vec<_>>();
    let data = |s: &TraceSnapshot| s.data.iter().map(|d| d.id.clone()).collect::<Vec<_>>();
    assert_eq!(tasks(&first), tasks(&second));
    assert_eq!(data(&first), data(&second));
}

#[test]
fn ids_are_56_char_sha224_hex() {
    let snap = trace(IdScheme::PortAware);
    for id in snap.data.iter().map(|d| &d.id).chain(snap.executions.iter().map(|e| &e.task_id)) {
        assert_eq!(id.len(), 56);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn task_id_matches_documented_layout() {
    let snap = trace(IdScheme::PortAware);
    let load = &snap.executions[0];
    assert_eq!(load.task_id, hash_str(&format!("path:{};load#2", load.inputs[0].data)));

    let split = &snap.executions[1];
    let inputs: Vec<PortData> = split.inputs.clone();
    assert_eq!(split.task_id, task_id(&inputs, "split#3"));
}

#[test]
fn multi_output_ids_depend_on_scheme() {
    let aware = trace(IdScheme::PortAware);
    let split = &aware.executions[1];
    assert_ne!(split.outputs[0].data, split.outputs[1].data);
    assert_ne!(split.outputs[0].data, split.task_id);

    let reference = trace(IdScheme::Reference);
    let split = &reference.executions[1];
    assert_eq!(split.outputs[0].data, split.outputs[1].data);
    assert_eq!(split.outputs[0].data, split.task_id);
}

#[test]
fn changing_a_root_value_changes_downstream_ids() {
    let base = trace(IdScheme::PortAware);

    let mut df = build();
    df.set_input(2, "path", json!("other.csv")).expect("input");
    let mut prov = Provenance::new();
    prov.init(&df);
    for v in [2, 3] {
        prov.before_eval(&df, v).expect("before");
        prov.after_eval(&df, v, Duration::ZERO).expect("after");
    }
    let changed = prov.as_snapshot().unwrap();

    assert_ne!(base.parameters[0].data, changed.parameters[0].data);
    assert_ne!(base.executions[1].task_id, changed.executions[1].task_id);
}

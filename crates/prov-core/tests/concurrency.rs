use std::thread;
use std::time::Duration;

use prov_adapters::MemoryDataflow;
use prov_core::{NodeFactory, PortSchema, Provenance};
use serde_json::json;

#[test]
fn independent_nodes_can_be_traced_in_parallel() {
    let mut df = MemoryDataflow::new("fanout");
    let sources: Vec<usize> = (0..8).map(|i| {
                                        let v = df.add_node(NodeFactory::new(format!("src{i}"))
                                                                .with_input(PortSchema::new("seed", Some("IInt")))
                                                                .with_output(PortSchema::new("out", Some("IInt"))));
                                        df.set_input(v, "seed", json!(i)).unwrap();
                                        v
                                    })
                                    .collect();
    let mut join = NodeFactory::new("join").with_output(PortSchema::new("all", Some("ISequence")));
    for i in 0..sources.len() {
        join = join.with_input(PortSchema::new(format!("in{i}"), Some("IInt")));
    }
    let j = df.add_node(join);
    for (i, &s) in sources.iter().enumerate() {
        df.connect(s, "out", j, &format!("in{i}")).unwrap();
    }

    let mut prov = Provenance::new();
    prov.init(&df);

    thread::scope(|scope| {
        for &v in &sources {
            let (prov, df) = (&prov, &df);
            scope.spawn(move || {
                     prov.before_eval(df, v).expect("before");
                     thread::sleep(Duration::from_millis(1));
                     prov.after_eval(df, v, Duration::from_millis(1)).expect("after");
                 });
        }
    });

    assert_eq!(prov.pending_count(), 0);
    prov.before_eval(&df, j).expect("all upstream executions recorded");
    let exec = prov.after_eval(&df, j, Duration::ZERO).unwrap().expect("join exec");
    assert_eq!(exec.n_input(), sources.len());

    let snap = prov.as_snapshot().unwrap();
    assert_eq!(snap.executions.len(), sources.len() + 1);
    assert_eq!(snap.parameters.len(), sources.len());
    for (i, &s) in sources.iter().enumerate() {
        let node = prov.local_node_id(s).unwrap();
        let last = prov.last_execution(node).unwrap().expect("source exec");
        assert_eq!(exec.inputs[i].data, last.output_did("out").unwrap());
    }
}

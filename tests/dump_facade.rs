//! Public entry points: pass-through, label validation and sink output.

use graph_dump::{
    add_listener, describe_fields, dump, dump_as, dump_with, remove_listener, DumpError, DumpExt,
    DumpNode, DumpOptions, MemorySink, NodeKind,
};
use rstest::rstest;
use std::sync::Arc;

#[derive(Debug)]
struct Widget {
    id: u32,
    tags: Vec<String>,
}

describe_fields!(Widget { id, tags });

fn widget() -> Widget {
    Widget {
        id: 7,
        tags: vec!["a".into()],
    }
}

#[test]
fn dump_returns_the_instance_passed_to_it() {
    let value = widget();
    let returned = dump(&value, "name").expect("valid label");
    assert!(std::ptr::eq(returned, &value));

    let owned = dump(widget(), "owned").expect("valid label");
    assert_eq!(owned.id, 7);
}

#[rstest(label, case(""), case("   "), case(" \t\r\n "))]
fn blank_labels_are_invalid(label: &str) {
    let err = dump(&widget(), label).expect_err("blank label");
    assert!(matches!(err, DumpError::InvalidLabel(_)));
}

#[test]
fn dump_writes_to_registered_listeners() {
    let sink = Arc::new(MemorySink::new());
    add_listener(sink.clone());

    let label = "facade-output-5d1c7e";
    widget().dump(label).expect("valid label");
    remove_listener(&sink);

    let output = sink.contents();
    assert!(output.contains(&format!("#1: {label} [dump_facade::Widget]")));
    assert!(output.contains("id: 7"));
}

#[test]
fn invalid_labels_produce_no_output() {
    let sink = Arc::new(MemorySink::new());
    add_listener(sink.clone());

    let value = widget();
    let result = dump_with(&value, " ", &DumpOptions::default());
    remove_listener(&sink);

    assert!(result.is_err());
    assert!(!sink.contents().contains("dump_facade::Widget"));
}

#[test]
fn json_format_exposes_the_node_tree() {
    let json = dump_as(&widget(), "w", &DumpOptions::default(), "json").expect("json");
    let root: DumpNode = serde_json::from_str(&json).expect("node tree");
    assert_eq!(root.name, "w");
    assert_eq!(root.kind, NodeKind::Composite);
    assert_eq!(root.children[0], DumpNode::scalar("id", "7"));
}

#[test]
fn yaml_format_exposes_the_node_tree() {
    let yaml = dump_as(&widget(), "w", &DumpOptions::default(), "yaml").expect("yaml");
    let root: DumpNode = serde_yaml::from_str(&yaml).expect("node tree");
    assert_eq!(root.header_count(), 2);
}

#[test]
fn parsed_documents_can_be_dumped() {
    let document = serde_json::json!({
        "name": "gdump",
        "features": ["text", "json"],
        "nested": { "depth": 2, "missing": null }
    });
    let text = document.dump_to_string("doc").expect("valid label");
    assert!(text.starts_with("#1: doc [json::Object]"));
    assert!(text.contains("name: \"gdump\""));
    assert!(text.contains("#2: features [json::Array]"));
    assert!(text.contains("missing: null"));
}

//! Text rendering of whole graphs through the public entry points.

use graph_dump::{
    describe_fields, describe_opaque, dump_to_string, dump_to_string_with, Callable, Describe,
    DumpOptions, Member, Shape, Slot, LINE_ENDING,
};
use std::collections::BTreeMap;
use std::fmt;

struct EmptyClass {}

describe_fields!(EmptyClass {});

struct Node {
    name: String,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

describe_fields!(Node { name, left, right });

impl Node {
    fn leaf(name: &str) -> Box<Node> {
        Box::new(Node {
            name: name.to_string(),
            left: None,
            right: None,
        })
    }

    fn root() -> Node {
        Node {
            name: "root".into(),
            left: Some(Box::new(Node {
                name: "left".into(),
                left: Some(Node::leaf("left-left")),
                right: None,
            })),
            right: Some(Node::leaf("right")),
        }
    }
}

#[test]
fn empty_object_is_a_single_header_line() {
    let result = dump_to_string(&EmptyClass {}, "emptyClassInstance").expect("valid label");
    assert_eq!(
        result,
        format!("#1: emptyClassInstance [text_format::EmptyClass]{LINE_ENDING}")
    );
}

#[test]
fn full_depth_tree() {
    let result = dump_to_string(&Node::root(), "root").expect("valid label");
    assert!(result.contains("left sub-tree"));
    assert!(result.contains("fields"));
    insta::assert_snapshot!(result.trim_end(), @r###"
#1: root [text_format::Node]
  fields
    name: "root"
    left sub-tree
      #2: left [text_format::Node]
        fields
          name: "left"
          left sub-tree
            #3: left [text_format::Node]
              fields
                name: "left-left"
                left: null
                right: null
          right: null
    right sub-tree
      #4: right [text_format::Node]
        fields
          name: "right"
          left: null
          right: null
"###);
}

#[test]
fn no_fields_on_nested_maps_labels_each_sub_tree_once() {
    let mut left = BTreeMap::new();
    left.insert("left-left", *Node::leaf("a"));
    left.insert("left-right", *Node::leaf("b"));
    let mut tree = BTreeMap::new();
    tree.insert("left", left);
    tree.insert("right", BTreeMap::new());

    let options = DumpOptions::new().with_no_fields();
    let result = dump_to_string_with(&tree, "root", &options).expect("valid label");
    for label in ["left", "left-left", "left-right", "right"] {
        let line = format!("{label} sub-tree");
        assert_eq!(result.lines().filter(|l| l.trim() == line).count(), 1);
    }
    assert!(!result.contains("fields"));
    assert!(result.contains("#3: left-left [text_format::Node]"));
    assert!(result.contains("#4: left-right [text_format::Node]"));
    assert_eq!(result.lines().count(), 9);
}

#[test]
fn no_fields_keeps_sub_trees_of_composites() {
    let options = DumpOptions::new().with_no_fields();
    let result = dump_to_string_with(&Node::root(), "root", &options).expect("valid label");
    assert!(!result.contains("fields"));
    assert!(!result.contains("name:"));
    assert_eq!(result.matches("left sub-tree").count(), 2);
    assert_eq!(result.matches("right sub-tree").count(), 1);
    insta::assert_snapshot!(result.trim_end(), @r###"
#1: root [text_format::Node]
  left sub-tree
    #2: left [text_format::Node]
      left sub-tree
        #3: left [text_format::Node]
  right sub-tree
    #4: right [text_format::Node]
"###);
}

#[derive(Debug)]
struct ChainError {
    message: String,
    cause: Option<Box<ChainError>>,
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ChainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl Describe for ChainError {
    fn shape(&self) -> Shape<'_> {
        graph_dump::error_shape(self)
    }
}

fn chain(messages: &[&str]) -> Option<Box<ChainError>> {
    messages.split_first().map(|(first, rest)| {
        Box::new(ChainError {
            message: first.to_string(),
            cause: chain(rest),
        })
    })
}

#[test]
fn error_chains_show_every_message() {
    let error = chain(&["3", "2", "1"]).expect("non-empty chain");
    let result = dump_to_string(&error, "test").expect("valid label");
    for message in ["\"1\"", "\"2\"", "\"3\""] {
        assert!(result.contains(message), "missing {message} in {result}");
    }
    insta::assert_snapshot!(result.trim_end(), @r###"
#1: test [text_format::ChainError]
  message: "3"
  inner sub-tree
    #2: inner [dyn Error]
      message: "2"
      inner sub-tree
        #3: inner [dyn Error]
          message: "1"
"###);
}

#[test]
fn io_errors_render_as_errors() {
    let error = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
    let result = dump_to_string(&error, "err").expect("valid label");
    let expected = [
        "#1: err [std::io::error::Error]",
        "  message: \"config missing\"",
    ];
    assert_eq!(result, expected.map(|line| format!("{line}{LINE_ENDING}")).concat());
}

struct Counter {
    count: u32,
    on_change: Callable<Box<dyn Fn(u32)>>,
}

describe_fields!(Counter { count, on_change });

#[test]
fn delegates_show_target_and_method_only() {
    let on_change: Box<dyn Fn(u32)> = Box::new(|n: u32| println!("{n}"));
    let counter = Counter {
        count: 2,
        on_change: Callable::with_target(on_change, "Counter"),
    };
    let result = dump_to_string(&counter, "counter").expect("valid label");
    assert!(result.contains("on_change sub-tree"));
    assert!(result.contains("target: \"Counter\""));
    assert!(result.contains("method: "));
}

struct Flaky {
    stable: u8,
}

impl Describe for Flaky {
    fn shape(&self) -> Shape<'_> {
        let failing: Result<u8, &str> = Err("sensor offline");
        Shape::Composite(vec![
            Member::new("reading", Slot::from_result(failing)),
            Member::field("stable", &self.stable),
        ])
    }
}

#[test]
fn failing_fields_become_placeholders() {
    let result = dump_to_string(&Flaky { stable: 4 }, "sensor").expect("valid label");
    assert!(result.contains("reading: <error: sensor offline>"));
    assert!(result.contains("stable: 4"));
}

struct Encoder {
    buffer: EncoderBuffer,
    level: u8,
}

struct EncoderBuffer {
    bytes: [u8; 16],
}

describe_opaque!(EncoderBuffer);
describe_fields!(Encoder { buffer, level });

#[test]
fn opaque_types_are_headers_without_children() {
    let encoder = Encoder {
        buffer: EncoderBuffer { bytes: [0; 16] },
        level: 9,
    };
    assert_eq!(encoder.buffer.bytes.len(), 16);
    let result = dump_to_string(&encoder, "encoder").expect("valid label");
    assert!(result.contains("#2: buffer [text_format::EncoderBuffer]"));
    assert!(result.contains("level: 9"));
}

#[test]
fn depth_limit_truncates() {
    let options = DumpOptions::new().with_max_depth(1);
    let result = dump_to_string_with(&Node::root(), "root", &options).expect("valid label");
    assert!(result.contains("#3: left [text_format::Node]"));
    assert!(!result.contains("left-left"));
}

#[test]
fn field_filters_apply_to_composites() {
    let options = DumpOptions::new()
        .exclude_fields("^right$")
        .expect("valid pattern");
    let result = dump_to_string_with(&Node::root(), "root", &options).expect("valid label");
    assert!(!result.contains("right"));
    assert!(result.contains("left-left"));
}

#[test]
fn rendering_is_idempotent() {
    let root = Node::root();
    let first = dump_to_string(&root, "root").expect("valid label");
    let second = dump_to_string(&root, "root").expect("valid label");
    assert_eq!(first, second);
}

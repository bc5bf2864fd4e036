//! Text formatter for dump node trees
//!
//! One line per node, two spaces of indentation per level, pre-order:
//!
//! ```text
//! #1: root [app::Node]
//!   fields
//!     name: "root"
//!     left sub-tree
//!       #2: left [app::Node]
//!         fields
//!           name: "left"
//!           parent -> #1
//!     right: null
//! ```
//!
//! - fresh instance: `#<id>: <name> [<Type>]`
//! - back-reference: `<name> -> #<id>`
//! - scalar, null, fault: `<name>: <literal>`, `<name>: null`,
//!   `<name>: <error: <reason>>`
//! - a fresh child is introduced by `<name> sub-tree`, its header one level
//!   deeper
//! - composites list their fields under a `fields` label, except under
//!   `no_fields` where their sub-trees sit directly below the header
//! - collections list elements directly
//! - errors show `message: "<text>"` and then `inner`

use super::registry::{FormatError, NodeFormatter};
use crate::dumper::node::{DumpNode, NodeKind};
use std::fmt::Write;

/// Line terminator of the current platform.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const INDENT: &str = "  ";

pub struct TextFormatter;

impl NodeFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn serialize(&self, node: &DumpNode) -> Result<String, FormatError> {
        Ok(to_text(node))
    }

    fn description(&self) -> &str {
        "Indented #N: name [Type] rendering"
    }
}

pub fn to_text(root: &DumpNode) -> String {
    let mut out = String::new();
    append_node(&mut out, root, 0);
    out
}

fn push_line(out: &mut String, level: usize, args: std::fmt::Arguments<'_>) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
    out.write_fmt(args).ok();
    out.push_str(LINE_ENDING);
}

fn append_node(out: &mut String, node: &DumpNode, level: usize) {
    let name = &node.name;
    let text = node.text.as_deref().unwrap_or_default();

    let id = match node.id {
        Some(id) if node.back_reference => {
            push_line(out, level, format_args!("{name} -> #{id}"));
            return;
        }
        Some(id) => id,
        None => {
            match node.kind {
                NodeKind::Null => push_line(out, level, format_args!("{name}: null")),
                NodeKind::Fault => push_line(out, level, format_args!("{name}: <error: {text}>")),
                _ => push_line(out, level, format_args!("{name}: {text}")),
            }
            return;
        }
    };

    let type_name = node.type_name.as_deref().unwrap_or("?");
    push_line(out, level, format_args!("#{id}: {name} [{type_name}]"));

    match node.kind {
        NodeKind::Composite if !node.children.is_empty() && !node.fields_omitted => {
            push_line(out, level + 1, format_args!("fields"));
            append_children(out, &node.children, level + 2);
        }
        NodeKind::Error => {
            push_line(out, level + 1, format_args!("message: {text:?}"));
            append_children(out, &node.children, level + 1);
        }
        _ => append_children(out, &node.children, level + 1),
    }
}

fn append_children(out: &mut String, children: &[DumpNode], level: usize) {
    for child in children {
        if child.is_header() {
            push_line(out, level, format_args!("{} sub-tree", child.name));
            append_node(out, child, level + 1);
        } else {
            append_node(out, child, level);
        }
    }
}

//! Dump node tree
//!
//! The walker's output and every formatter's input. A node is one rendered
//! unit: a leaf line (scalar, null, fault), a back-reference, or a fresh
//! instance header with its children.

use super::classify::Classification;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Null,
    Scalar,
    Opaque,
    Error,
    Delegate,
    Collection,
    Composite,
    /// A child that could not be read.
    Fault,
}

impl From<Classification> for NodeKind {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Null => NodeKind::Null,
            Classification::Scalar => NodeKind::Scalar,
            Classification::Opaque => NodeKind::Opaque,
            Classification::Error => NodeKind::Error,
            Classification::Delegate => NodeKind::Delegate,
            Classification::Collection => NodeKind::Collection,
            Classification::Composite => NodeKind::Composite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpNode {
    /// Sequence number; `None` for leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "is_false")]
    pub back_reference: bool,
    /// Scalar literal, error message or fault reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DumpNode>,
    /// Header emitted without children because of the depth limit.
    #[serde(default, skip_serializing_if = "is_false")]
    pub truncated: bool,
    /// Composite dumped with `no_fields`: only its instance-valued members
    /// are listed, and no `fields` label is written.
    #[serde(default, skip_serializing_if = "is_false")]
    pub fields_omitted: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl DumpNode {
    fn leaf(name: impl Into<String>, kind: NodeKind, text: Option<String>) -> Self {
        DumpNode {
            id: None,
            name: name.into(),
            type_name: None,
            kind,
            back_reference: false,
            text,
            children: Vec::new(),
            truncated: false,
            fields_omitted: false,
        }
    }

    pub fn null(name: impl Into<String>) -> Self {
        Self::leaf(name, NodeKind::Null, None)
    }

    /// `literal` is the text exactly as it should appear after `name: `.
    pub fn scalar(name: impl Into<String>, literal: impl Into<String>) -> Self {
        Self::leaf(name, NodeKind::Scalar, Some(literal.into()))
    }

    pub fn fault(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::leaf(name, NodeKind::Fault, Some(reason.into()))
    }

    pub fn back_reference(
        name: impl Into<String>,
        id: usize,
        type_name: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        DumpNode {
            id: Some(id),
            type_name: Some(type_name.into()),
            back_reference: true,
            ..Self::leaf(name, kind, None)
        }
    }

    /// A fresh instance header; children are pushed by the walker.
    pub fn header(
        name: impl Into<String>,
        id: usize,
        type_name: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        DumpNode {
            id: Some(id),
            type_name: Some(type_name.into()),
            ..Self::leaf(name, kind, None)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn is_header(&self) -> bool {
        self.id.is_some() && !self.back_reference
    }

    /// Nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DumpNode::count).sum::<usize>()
    }

    /// Fresh headers in this subtree, including this one.
    pub fn header_count(&self) -> usize {
        usize::from(self.is_header())
            + self
                .children
                .iter()
                .map(DumpNode::header_count)
                .sum::<usize>()
    }

    /// Back-references in this subtree.
    pub fn back_reference_count(&self) -> usize {
        usize::from(self.back_reference)
            + self
                .children
                .iter()
                .map(DumpNode::back_reference_count)
                .sum::<usize>()
    }
}

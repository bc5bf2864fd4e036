//! `Describe` for parsed JSON and YAML documents.
//!
//! Objects and mappings render as composites named by key, arrays and
//! sequences as collections, everything else as scalars.

use super::{indexed, key_text, Describe, Member, Scalar, Shape, Slot};
use std::borrow::Cow;

impl Describe for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_json::Value;
        match self {
            Value::Null => Shape::Null,
            Value::Bool(value) => Shape::Scalar(Scalar::literal(value)),
            Value::Number(value) => Shape::Scalar(Scalar::literal(value)),
            Value::String(value) => Shape::Scalar(Scalar::text(value.as_str())),
            Value::Array(items) => Shape::Collection(indexed(items)),
            Value::Object(map) => Shape::Composite(
                map.iter()
                    .map(|(key, value)| Member::new(key.clone(), Slot::Borrowed(value)))
                    .collect(),
            ),
        }
    }

    fn type_name(&self) -> Cow<'static, str> {
        use serde_json::Value;
        Cow::Borrowed(match self {
            Value::Null => "json::Null",
            Value::Bool(_) => "json::Bool",
            Value::Number(_) => "json::Number",
            Value::String(_) => "json::String",
            Value::Array(_) => "json::Array",
            Value::Object(_) => "json::Object",
        })
    }
}

impl Describe for serde_yaml::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_yaml::Value;
        match self {
            Value::Null => Shape::Null,
            Value::Bool(value) => Shape::Scalar(Scalar::literal(value)),
            Value::Number(value) => Shape::Scalar(Scalar::literal(value)),
            Value::String(value) => Shape::Scalar(Scalar::text(value.as_str())),
            Value::Sequence(items) => Shape::Collection(indexed(items)),
            Value::Mapping(map) => Shape::Composite(
                map.iter()
                    .enumerate()
                    .map(|(index, (key, value))| {
                        let name = key_text(key).unwrap_or_else(|| format!("[{index}]"));
                        Member::new(name, Slot::Borrowed(value))
                    })
                    .collect(),
            ),
            Value::Tagged(tagged) => Shape::Transparent(Slot::Borrowed(&tagged.value)),
        }
    }

    fn type_name(&self) -> Cow<'static, str> {
        use serde_yaml::Value;
        Cow::Borrowed(match self {
            Value::Null => "yaml::Null",
            Value::Bool(_) => "yaml::Bool",
            Value::Number(_) => "yaml::Number",
            Value::String(_) => "yaml::String",
            Value::Sequence(_) => "yaml::Sequence",
            Value::Mapping(_) => "yaml::Mapping",
            Value::Tagged(_) => "yaml::Tagged",
        })
    }
}

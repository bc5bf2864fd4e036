//! Output formats for dump node trees
//!
//! - `text`: the indented `#N: name [Type]` rendering
//! - `json` / `yaml`: the node tree itself, serialized with serde

pub mod registry;
pub mod serialized;
pub mod text;

pub use registry::{FormatError, FormatRegistry, NodeFormatter};
pub use serialized::{JsonFormatter, YamlFormatter};
pub use text::{to_text, TextFormatter, LINE_ENDING};

//! # graph-dump
//!
//! Renders an in-memory object graph as deterministic, human-readable text for
//! logging or interactive inspection while debugging.
//!
//! Call [`dump`] on any value implementing [`Describe`] and get the value back
//! unchanged while the rendering goes to the registered diagnostic sinks, or
//! call [`dump_to_string`] to receive the text directly:
//!
//! ```rust
//! use graph_dump::{describe_fields, dump_to_string};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! describe_fields!(Point { x, y });
//!
//! let text = dump_to_string(&Point { x: 1, y: 2 }, "origin").unwrap();
//! assert!(text.starts_with("#1: origin ["));
//! ```
//!
//! Every non-scalar instance gets a sequence number the first time it is
//! reached; later encounters render as `name -> #N` back-references, which is
//! what keeps self-referential graphs finite.
//!
//! See [`dumper`] for the module layout.

pub mod dumper;

pub use dumper::classify::{classify, Classification};
pub use dumper::config::{load_defaults, DumpConfig, Loader, SinkLevel};
pub use dumper::describe::{
    error_shape, Callable, Describe, Held, Identity, Member, Scalar, Shape, Slot,
};
pub use dumper::error::{DumpError, Result};
pub use dumper::facade::{
    dump, dump_as, dump_to_string, dump_to_string_with, dump_tree, dump_with, validate_label,
    DumpExt,
};
pub use dumper::formats::{FormatError, FormatRegistry, NodeFormatter, LINE_ENDING};
pub use dumper::node::{DumpNode, NodeKind};
pub use dumper::options::{DumpOptions, FieldFilter};
pub use dumper::registry::IdentityRegistry;
pub use dumper::sink::{
    add_listener, clear_listeners, listener_count, remove_listener, DiagnosticSink, LogSink,
    MemorySink,
};
pub use dumper::walker::{walk, GraphWalker};

//! Main module for graph-dump functionality
//!
//! The pipeline, leaf-first:
//!
//! - [`describe`]: the `Describe` capability every dumpable type provides
//! - [`registry`]: instance identity to sequence number, per dump
//! - [`classify`]: picks the rendering strategy for a value
//! - [`walker`]: the recursive traversal producing [`node::DumpNode`] trees
//! - [`formats`]: node trees to text (and json/yaml)
//! - [`facade`]: the public entry points and label validation
//! - [`sink`]: process-wide diagnostic listeners
//! - [`options`] / [`config`]: per-dump options and their layered loading

pub mod classify;
pub mod config;
pub mod describe;
pub mod error;
pub mod facade;
pub mod formats;
pub mod node;
pub mod options;
pub mod registry;
pub mod sink;
pub mod walker;

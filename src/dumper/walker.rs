//! Graph walking
//!
//! The canonical traversal that turns a value into a [`DumpNode`] tree. Every
//! formatter consumes this tree rather than walking values itself.
//!
//! The walk recurses natively: a child handed out behind a `RefCell` or
//! `Mutex` guard is only reachable while that guard is alive, so the guard
//! lives in the stack frame that walks the child's subtree.
//!
//! Identity rules:
//!
//! - An instance already numbered renders as a back-reference before its
//!   shape is even requested. A locked mutex is never asked for its contents
//!   a second time.
//! - Transparent wrappers take no number, but their own identity is recorded
//!   as an alias of the first numbered value found inside them.
//! - Errors are keyed by address and message, so a `source()` link and the
//!   same error reached through its concrete type share one number.
//! - Instances numbered inside the storage of a [`Slot::Owned`] child are
//!   forgotten once that child is done, since that memory is released and
//!   the address may be handed out again. Anything the child merely points
//!   at (an upgraded `Weak`, a borrowed error source) stays numbered.

use super::classify::{classify_shape, Classification};
use super::describe::{Describe, Identity, Scalar, Shape, Slot};
use super::node::{DumpNode, NodeKind};
use super::options::DumpOptions;
use super::registry::IdentityRegistry;
use log::{debug, trace};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Walk `value` as the root of a new dump named `name`.
pub fn walk(value: &dyn Describe, name: &str, options: &DumpOptions) -> DumpNode {
    GraphWalker::new(options).walk(value, name)
}

/// State for one walk. Not reusable: numbering starts at 1 per walker.
pub struct GraphWalker<'o> {
    options: &'o DumpOptions,
    registry: IdentityRegistry,
    /// Type name and kind of every numbered instance, indexed by `id - 1`.
    headers: Vec<(String, NodeKind)>,
    /// Wrapper identities waiting for the number of the value they guard.
    pending_aliases: Vec<Identity>,
    /// Identities registered while inside owned children.
    scoped: Vec<Identity>,
    owned_depth: usize,
}

impl<'o> GraphWalker<'o> {
    pub fn new(options: &'o DumpOptions) -> Self {
        GraphWalker {
            options,
            registry: IdentityRegistry::new(),
            headers: Vec::new(),
            pending_aliases: Vec::new(),
            scoped: Vec::new(),
            owned_depth: 0,
        }
    }

    pub fn walk(mut self, value: &dyn Describe, name: &str) -> DumpNode {
        let root = self.visit(value, name, 0);
        debug!(
            "dumped '{}': {} nodes, {} instances, {} back-references",
            name,
            root.count(),
            self.registry.len(),
            root.back_reference_count()
        );
        root
    }

    fn visit(&mut self, value: &dyn Describe, name: &str, depth: usize) -> DumpNode {
        let identity = value.identity();
        if let Some(id) = identity.and_then(|identity| self.registry.lookup(&identity)) {
            return self.back_reference(name, id);
        }

        let shape = match describe(value) {
            Ok(shape) => shape,
            Err(reason) => {
                debug!("describing '{name}' panicked: {reason}");
                return DumpNode::fault(name, reason);
            }
        };

        if let Shape::Transparent(slot) = shape {
            let mark = self.pending_aliases.len();
            self.pending_aliases.extend(identity);
            let node = self.visit_slot(&slot, name, depth);
            self.pending_aliases.truncate(mark);
            return node;
        }

        let type_name = value.type_name();
        let classification = classify_shape(&shape, &type_name, self.options);
        match shape {
            Shape::Null => return DumpNode::null(name),
            Shape::Scalar(scalar) => return DumpNode::scalar(name, scalar.rendered()),
            _ => {}
        }

        let kind = NodeKind::from(classification);
        let key = match &shape {
            Shape::Error { message, .. } => identity.map(|identity| identity.as_error(message)),
            _ => identity,
        };
        let (id, fresh) = self.registry.register(key);
        if !fresh {
            return self.back_reference(name, id);
        }
        trace!("#{id}: {name} [{type_name}] at depth {depth}");
        self.headers.push((type_name.to_string(), kind));
        if let Some(key) = key {
            self.track_scoped(key);
        }
        if let Some(identity) = identity.filter(|identity| Some(*identity) != key) {
            self.registry.alias(identity, id);
            self.track_scoped(identity);
        }
        for alias in std::mem::take(&mut self.pending_aliases) {
            self.registry.alias(alias, id);
            self.track_scoped(alias);
        }

        let mut node = DumpNode::header(name, id, type_name, kind);
        if self.options.exceeds_depth(depth) {
            node.truncated = true;
            return node;
        }
        if classification == Classification::Opaque {
            return node;
        }

        match shape {
            Shape::Error { message, inner } => {
                node.text = Some(message);
                if let Some(inner) = inner {
                    node.children.push(self.visit_slot(&inner, "inner", depth + 1));
                }
            }
            Shape::Delegate { target, method } => {
                node.children
                    .push(DumpNode::scalar("target", Scalar::text(target).rendered()));
                node.children
                    .push(DumpNode::scalar("method", Scalar::text(method).rendered()));
            }
            Shape::Collection(members) => {
                for member in &members {
                    node.children
                        .push(self.visit_slot(&member.slot, &member.name, depth + 1));
                }
            }
            Shape::Composite(members) => {
                let no_fields = self.options.no_fields;
                for member in &members {
                    if !self.options.field_filter.allows(&member.name) {
                        continue;
                    }
                    let child = self.visit_slot(&member.slot, &member.name, depth + 1);
                    // no_fields keeps instances only
                    if !no_fields || child.id.is_some() {
                        node.children.push(child);
                    }
                }
                node.fields_omitted = no_fields;
            }
            _ => {}
        }
        node
    }

    fn visit_slot(&mut self, slot: &Slot<'_>, name: &str, depth: usize) -> DumpNode {
        match slot {
            Slot::Borrowed(value) => self.visit(*value, name, depth),
            Slot::Held(guard) => self.visit(guard.get(), name, depth),
            Slot::Owned(value) => {
                let mark = self.scoped.len();
                self.owned_depth += 1;
                let node = self.visit(value.as_ref(), name, depth);
                self.owned_depth -= 1;
                let storage = Storage::of(value.as_ref());
                let registered: Vec<Identity> = self.scoped.drain(mark..).collect();
                for identity in registered {
                    if storage.contains(&identity) {
                        self.registry.forget(&identity);
                    } else {
                        self.track_scoped(identity);
                    }
                }
                node
            }
            Slot::Fault(reason) => DumpNode::fault(name, reason.as_str()),
        }
    }

    fn track_scoped(&mut self, identity: Identity) {
        if self.owned_depth > 0 {
            self.scoped.push(identity);
        }
    }

    fn back_reference(&self, name: &str, id: usize) -> DumpNode {
        let (type_name, kind) = self
            .headers
            .get(id - 1)
            .map(|(type_name, kind)| (type_name.as_str(), *kind))
            .unwrap_or(("?", NodeKind::Opaque));
        DumpNode::back_reference(name, id, type_name, kind)
    }
}

/// Address range of a value's inline storage.
struct Storage {
    start: usize,
    len: usize,
}

impl Storage {
    fn of(value: &dyn Describe) -> Self {
        Storage {
            start: (value as *const dyn Describe).cast::<u8>() as usize,
            len: std::mem::size_of_val(value),
        }
    }

    fn contains(&self, identity: &Identity) -> bool {
        identity
            .address()
            .checked_sub(self.start)
            .is_some_and(|offset| offset < self.len)
    }
}

/// The value's shape, or the message of a panic raised while computing it.
fn describe(value: &dyn Describe) -> Result<Shape<'_>, String> {
    panic::catch_unwind(AssertUnwindSafe(|| value.shape()))
        .map_err(|payload| format!("describe panicked: {}", panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

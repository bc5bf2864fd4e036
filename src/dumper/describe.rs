//! The `Describe` capability
//!
//! Rust has no runtime reflection, so every dumpable type says what it looks
//! like through [`Describe`]: a [`Shape`] (its classification together with
//! its ordered children), a display type name and an optional [`Identity`].
//!
//! Children are handed out as [`Slot`]s. Most slots borrow straight from the
//! described value; interior-mutability cells hand out a [`Held`] guard that
//! stays alive while the child's subtree is walked, and a child that cannot be
//! read becomes a [`Slot::Fault`] carrying the reason.
//!
//! Implementations for the standard library live in `std_impls`, for
//! `serde_json`/`serde_yaml` values in `serde_values`, and user types usually
//! go through [`describe_fields!`](crate::describe_fields).

use super::formats::to_text;
use super::options::DumpOptions;
use super::walker::walk;
use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod macros;
mod serde_values;
mod std_impls;

pub use std_impls::Callable;

/// Something that can be rendered by the dumper.
pub trait Describe {
    /// The classification of this value and its children.
    fn shape(&self) -> Shape<'_>;

    /// Name shown in `[...]` after a header.
    fn type_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Reference identity used for cycle and sharing detection.
    ///
    /// Pointer types forward to their pointee, so two handles to the same
    /// allocation report the same identity.
    fn identity(&self) -> Option<Identity> {
        Identity::of(self)
    }
}

/// Address of an instance plus its static type.
///
/// The type name disambiguates a struct from its first field, which lives at
/// the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    ty: &'static str,
    discriminant: u64,
}

const ERROR_TAG: &str = "error";

impl Identity {
    /// Identity of `value`, or `None` for zero-sized values, which have no
    /// address of their own.
    pub fn of<T: ?Sized>(value: &T) -> Option<Self> {
        if std::mem::size_of_val(value) == 0 {
            return None;
        }
        Some(Identity {
            addr: (value as *const T).cast::<()>() as usize,
            ty: std::any::type_name::<T>(),
            discriminant: 0,
        })
    }

    /// The key an error is registered under.
    ///
    /// Chain links are only seen as `dyn Error`, so errors are matched by
    /// address and message instead of static type. The message still tells a
    /// wrapper apart from a source stored as its first field.
    pub fn as_error(self, message: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        message.hash(&mut hasher);
        Identity {
            addr: self.addr,
            ty: ERROR_TAG,
            discriminant: hasher.finish(),
        }
    }

    pub fn address(&self) -> usize {
        self.addr
    }

    pub fn type_name(&self) -> &'static str {
        self.ty
    }
}

/// Inline text of a scalar value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// Rendered quoted and escaped.
    Text(String),
    /// Rendered verbatim (numbers, booleans, chars).
    Literal(String),
}

impl Scalar {
    pub fn text(value: impl Into<String>) -> Self {
        Scalar::Text(value.into())
    }

    pub fn literal(value: impl fmt::Display) -> Self {
        Scalar::Literal(value.to_string())
    }

    /// Unquoted text, used when the scalar names a map entry.
    pub fn raw(&self) -> &str {
        match self {
            Scalar::Text(text) | Scalar::Literal(text) => text,
        }
    }

    /// Text as it appears in a rendered line.
    pub fn rendered(&self) -> String {
        match self {
            Scalar::Text(text) => format!("{text:?}"),
            Scalar::Literal(text) => text.clone(),
        }
    }
}

/// What a value looks like to the walker.
pub enum Shape<'a> {
    Null,
    Scalar(Scalar),
    /// A wrapper rendered as its inner value (cells, locks, weak pointers).
    /// Wrappers never consume a sequence number of their own.
    Transparent(Slot<'a>),
    /// Tracked but never descended into.
    Opaque,
    Error {
        message: String,
        inner: Option<Slot<'a>>,
    },
    Delegate {
        target: String,
        method: String,
    },
    Collection(Vec<Member<'a>>),
    Composite(Vec<Member<'a>>),
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Null => f.write_str("Null"),
            Shape::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Shape::Transparent(_) => f.write_str("Transparent"),
            Shape::Opaque => f.write_str("Opaque"),
            Shape::Error { message, inner } => f
                .debug_struct("Error")
                .field("message", message)
                .field("has_inner", &inner.is_some())
                .finish(),
            Shape::Delegate { target, method } => f
                .debug_struct("Delegate")
                .field("target", target)
                .field("method", method)
                .finish(),
            Shape::Collection(members) => write!(f, "Collection({} elements)", members.len()),
            Shape::Composite(members) => write!(f, "Composite({} fields)", members.len()),
        }
    }
}

/// A named child: a field, a collection element or a map entry.
pub struct Member<'a> {
    pub name: Cow<'static, str>,
    pub slot: Slot<'a>,
}

impl<'a> Member<'a> {
    pub fn new(name: impl Into<Cow<'static, str>>, slot: Slot<'a>) -> Self {
        Member {
            name: name.into(),
            slot,
        }
    }

    /// A field borrowed from the described value.
    pub fn field<T: Describe>(name: &'static str, value: &'a T) -> Self {
        Member::new(name, Slot::Borrowed(value))
    }

    /// A field that could not be read.
    pub fn fault(name: impl Into<Cow<'static, str>>, reason: impl fmt::Display) -> Self {
        Member::new(name, Slot::fault(reason))
    }
}

/// Keeps a borrowed child alive while its subtree is walked.
pub trait Held {
    fn get(&self) -> &dyn Describe;
}

/// One child position.
pub enum Slot<'a> {
    Borrowed(&'a dyn Describe),
    /// A value built on the fly. Instances living inside it are numbered but
    /// never matched as back-references; identities that forward outside it
    /// (`&T`, `Rc<T>`) are tracked as usual.
    Owned(Box<dyn Describe + 'a>),
    Held(Box<dyn Held + 'a>),
    Fault(String),
}

impl<'a> Slot<'a> {
    pub fn borrowed<T: Describe>(value: &'a T) -> Self {
        Slot::Borrowed(value)
    }

    pub fn owned<T: Describe + 'a>(value: T) -> Self {
        Slot::Owned(Box::new(value))
    }

    pub fn held<H: Held + 'a>(guard: H) -> Self {
        Slot::Held(Box::new(guard))
    }

    pub fn fault(reason: impl fmt::Display) -> Self {
        Slot::Fault(reason.to_string())
    }

    /// A computed child, or a fault placeholder when computing it failed.
    pub fn from_result<T, E>(result: Result<T, E>) -> Self
    where
        T: Describe + 'a,
        E: fmt::Display,
    {
        match result {
            Ok(value) => Slot::owned(value),
            Err(err) => Slot::fault(err),
        }
    }

    /// The value in this slot, or the fault message.
    pub fn get(&self) -> Result<&dyn Describe, &str> {
        match self {
            Slot::Borrowed(value) => Ok(*value),
            Slot::Owned(value) => Ok(value.as_ref()),
            Slot::Held(guard) => Ok(guard.get()),
            Slot::Fault(reason) => Err(reason.as_str()),
        }
    }
}

/// Shape of an error: its message plus the `source()` chain.
///
/// Use this from `Describe` impls of error types:
///
/// ```rust
/// fn shape(&self) -> Shape<'_> {
///     error_shape(self)
/// }
/// ```
pub fn error_shape<'a>(error: &'a (dyn Error + 'static)) -> Shape<'a> {
    Shape::Error {
        message: error.to_string(),
        inner: error.source().map(Slot::owned),
    }
}

/// Elements named by position: `[0]`, `[1]`, ...
pub(crate) fn indexed<'a, T, I>(items: I) -> Vec<Member<'a>>
where
    T: Describe + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Member::new(format!("[{index}]"), Slot::Borrowed(item)))
        .collect()
}

/// Raw text of a scalar key, used to name map entries.
pub(crate) fn key_text(key: &dyn Describe) -> Option<String> {
    match key.shape() {
        Shape::Scalar(scalar) => Some(scalar.raw().to_owned()),
        _ => None,
    }
}

/// Entries named by key text, falling back to the position for keys that
/// are not scalars.
pub(crate) fn keyed<'a, K, V, I>(entries: I) -> Vec<Member<'a>>
where
    K: Describe + 'a,
    V: Describe + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, (key, value))| {
            let name = key_text(key).unwrap_or_else(|| format!("[{index}]"));
            Member::new(name, Slot::Borrowed(value))
        })
        .collect()
}

/// Sort key for entries of hash-based containers: scalar keys by their raw
/// text, then every other key by the text of its own standalone dump.
fn order_key(key: &dyn Describe) -> (bool, String) {
    match key_text(key) {
        Some(text) => (false, text),
        None => (true, to_text(&walk(key, "key", &DumpOptions::default()))),
    }
}

/// Like [`keyed`], but ordered by key text first. Hash-based containers
/// iterate in a per-process random order.
pub(crate) fn sorted_keyed<'a, K, V, I>(entries: I) -> Vec<Member<'a>>
where
    K: Describe + 'a,
    V: Describe + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut entries: Vec<((bool, String), &'a V)> = entries
        .into_iter()
        .map(|(key, value)| (order_key(key), value))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
        .into_iter()
        .enumerate()
        .map(|(index, ((structured, key), value))| {
            let name = if structured {
                format!("[{index}]")
            } else {
                key
            };
            Member::new(name, Slot::Borrowed(value))
        })
        .collect()
}

/// Like [`indexed`], ordered the same way as [`sorted_keyed`] orders keys.
pub(crate) fn sorted_indexed<'a, T, I>(items: I) -> Vec<Member<'a>>
where
    T: Describe + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut items: Vec<((bool, String), &'a T)> = items
        .into_iter()
        .map(|item| (order_key(item), item))
        .collect();
    items.sort_by(|a, b| a.0.cmp(&b.0));
    items
        .into_iter()
        .enumerate()
        .map(|(index, (_, item))| Member::new(format!("[{index}]"), Slot::Borrowed(item)))
        .collect()
}

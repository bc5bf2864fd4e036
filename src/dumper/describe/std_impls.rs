//! `Describe` for standard library types

use super::{error_shape, indexed, keyed, sorted_indexed, sorted_keyed, Held, Identity};
use super::{Describe, Member, Scalar, Shape, Slot};
use std::borrow::Cow;
use std::cell::{Cell, Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::error::Error;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, TryLockError};

macro_rules! literal_scalars {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::literal(self))
                }
            }
        )*
    };
}

literal_scalars!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool,
);

impl Describe for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Literal(format!("{self:?}")))
    }
}

impl Describe for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::literal("()"))
    }
}

impl Describe for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::text(self))
    }
}

impl Describe for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::text(self.as_str()))
    }
}

impl Describe for Path {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::text(self.display().to_string()))
    }
}

impl Describe for PathBuf {
    fn shape(&self) -> Shape<'_> {
        self.as_path().shape()
    }
}

// Pointers render as their pointee and share its identity.
macro_rules! forward_pointer {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ptr {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn type_name(&self) -> Cow<'static, str> {
                    (**self).type_name()
                }

                fn identity(&self) -> Option<Identity> {
                    (**self).identity()
                }
            }
        )*
    };
}

forward_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<B> Describe for Cow<'_, B>
where
    B: Describe + ToOwned + ?Sized,
{
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn type_name(&self) -> Cow<'static, str> {
        (**self).type_name()
    }

    fn identity(&self) -> Option<Identity> {
        (**self).identity()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }

    fn type_name(&self) -> Cow<'static, str> {
        match self {
            Some(value) => value.type_name(),
            None => Cow::Borrowed(std::any::type_name::<Self>()),
        }
    }

    fn identity(&self) -> Option<Identity> {
        self.as_ref().and_then(Describe::identity)
    }
}

macro_rules! sequences {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: Describe> Describe for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Collection(indexed(self.iter()))
                }
            }
        )*
    };
}

sequences!([T], Vec<T>, VecDeque<T>, LinkedList<T>, BTreeSet<T>);

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Collection(indexed(self.iter()))
    }
}

impl<T: Describe> Describe for BinaryHeap<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Collection(sorted_indexed(self.iter()))
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Collection(sorted_indexed(self.iter()))
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Collection(keyed(self.iter()))
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Collection(sorted_keyed(self.iter()))
    }
}

macro_rules! tuples {
    ($(($($name:ident . $index:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Describe),+> Describe for ($($name,)+) {
                fn shape(&self) -> Shape<'_> {
                    Shape::Composite(vec![
                        $(Member::field(stringify!($index), &self.$index)),+
                    ])
                }
            }
        )*
    };
}

tuples!(
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
);

impl<T: Describe> Held for Ref<'_, T> {
    fn get(&self) -> &dyn Describe {
        &**self
    }
}

impl<T: Describe> Held for MutexGuard<'_, T> {
    fn get(&self) -> &dyn Describe {
        &**self
    }
}

impl<T: Describe> Held for RwLockReadGuard<'_, T> {
    fn get(&self) -> &dyn Describe {
        &**self
    }
}

impl<T: Describe> Describe for RefCell<T> {
    fn shape(&self) -> Shape<'_> {
        match self.try_borrow() {
            Ok(guard) => Shape::Transparent(Slot::held(guard)),
            Err(_) => Shape::Transparent(Slot::fault("value is mutably borrowed")),
        }
    }
}

/// Only scalar contents are shown: the copy taken out of the cell does not
/// outlive this call.
impl<T: Describe + Copy> Describe for Cell<T> {
    fn shape(&self) -> Shape<'_> {
        detached(self.get().shape())
    }
}

/// The parts of `shape` that borrow nothing; anything else is opaque.
fn detached<'a>(shape: Shape<'_>) -> Shape<'a> {
    match shape {
        Shape::Null => Shape::Null,
        Shape::Scalar(scalar) => Shape::Scalar(scalar),
        _ => Shape::Opaque,
    }
}

impl<T: Describe> Describe for Mutex<T> {
    fn shape(&self) -> Shape<'_> {
        match self.try_lock() {
            Ok(guard) => Shape::Transparent(Slot::held(guard)),
            Err(TryLockError::Poisoned(poisoned)) => {
                Shape::Transparent(Slot::held(poisoned.into_inner()))
            }
            Err(TryLockError::WouldBlock) => Shape::Transparent(Slot::fault("mutex is locked")),
        }
    }
}

impl<T: Describe> Describe for RwLock<T> {
    fn shape(&self) -> Shape<'_> {
        match self.try_read() {
            Ok(guard) => Shape::Transparent(Slot::held(guard)),
            Err(TryLockError::Poisoned(poisoned)) => {
                Shape::Transparent(Slot::held(poisoned.into_inner()))
            }
            Err(TryLockError::WouldBlock) => {
                Shape::Transparent(Slot::fault("lock is held for writing"))
            }
        }
    }
}

impl<T: Describe> Describe for rc::Weak<T> {
    fn shape(&self) -> Shape<'_> {
        match self.upgrade() {
            Some(strong) => Shape::Transparent(Slot::owned(strong)),
            None => Shape::Null,
        }
    }
}

impl<T: Describe> Describe for sync::Weak<T> {
    fn shape(&self) -> Shape<'_> {
        match self.upgrade() {
            Some(strong) => Shape::Transparent(Slot::owned(strong)),
            None => Shape::Null,
        }
    }
}

impl Describe for dyn Error + 'static {
    fn shape(&self) -> Shape<'_> {
        error_shape(self)
    }

    fn type_name(&self) -> Cow<'static, str> {
        Cow::Borrowed("dyn Error")
    }
}

impl Describe for dyn Error + Send + Sync + 'static {
    fn shape(&self) -> Shape<'_> {
        error_shape(self)
    }

    fn type_name(&self) -> Cow<'static, str> {
        Cow::Borrowed("dyn Error")
    }
}

macro_rules! std_errors {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape(&self) -> Shape<'_> {
                    error_shape(self)
                }
            }
        )*
    };
}

std_errors!(
    std::io::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::fmt::Error,
);

fn delegate<F: ?Sized>(target: &str) -> Shape<'static> {
    Shape::Delegate {
        target: target.to_owned(),
        method: std::any::type_name::<F>().to_owned(),
    }
}

macro_rules! fn_pointers {
    ($(($($arg:ident),*)),* $(,)?) => {
        $(
            impl<R, $($arg),*> Describe for fn($($arg),*) -> R {
                fn shape(&self) -> Shape<'_> {
                    delegate::<Self>("static")
                }
            }
        )*
    };
}

fn_pointers!((), (A), (A, B), (A, B, C));

macro_rules! boxed_fns {
    ($(($($arg:ident),*)),* $(,)?) => {
        $(
            impl<R, $($arg),*> Describe for dyn Fn($($arg),*) -> R {
                fn shape(&self) -> Shape<'_> {
                    delegate::<Self>("closure")
                }
            }

            impl<R, $($arg),*> Describe for dyn Fn($($arg),*) -> R + Send + Sync {
                fn shape(&self) -> Shape<'_> {
                    delegate::<Self>("closure")
                }
            }
        )*
    };
}

boxed_fns!((), (A), (A, B));

/// A callable rendered as a delegate: its target and method, never the
/// state it captured.
///
/// Closures have no nameable type, so wrap them to make them dumpable:
///
/// ```rust
/// let greet = Callable::new(|name: &str| format!("hello {name}"));
/// greet.dump("greet")?;
/// assert_eq!(greet("ada"), "hello ada");
/// ```
pub struct Callable<F> {
    func: F,
    target: Cow<'static, str>,
}

impl<F> Callable<F> {
    pub fn new(func: F) -> Self {
        Callable {
            func,
            target: Cow::Borrowed("closure"),
        }
    }

    /// Names the object the callable is bound to.
    pub fn with_target(func: F, target: impl Into<Cow<'static, str>>) -> Self {
        Callable {
            func,
            target: target.into(),
        }
    }

    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F> Deref for Callable<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.func
    }
}

impl<F> Describe for Callable<F> {
    fn shape(&self) -> Shape<'_> {
        delegate::<F>(&self.target)
    }
}

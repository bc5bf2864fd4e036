//! Macros that derive `Describe` for user types.

/// Implement [`Describe`](crate::Describe) for a struct as a composite of the
/// listed fields, in the order given.
///
/// ```rust
/// use graph_dump::describe_fields;
///
/// struct Node {
///     name: String,
///     children: Vec<Node>,
/// }
///
/// describe_fields!(Node { name, children });
/// ```
///
/// Tuple structs list positions: `describe_fields!(Meters { 0 });`.
/// Generic types put the parameters first:
/// `describe_fields!(<T> Wrapper<T> { inner });`.
#[macro_export]
macro_rules! describe_fields {
    (<$($param:ident),+> $ty:ty { $($field:tt),* $(,)? }) => {
        impl<$($param: $crate::Describe),+> $crate::Describe for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Composite(vec![
                    $($crate::Member::field(stringify!($field), &self.$field)),*
                ])
            }
        }
    };
    ($ty:ty { $($field:tt),* $(,)? }) => {
        impl $crate::Describe for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Composite(vec![
                    $($crate::Member::field(stringify!($field), &self.$field)),*
                ])
            }
        }
    };
}

/// Implement [`Describe`](crate::Describe) for types that are tracked but
/// never descended into (handles, large buffers, foreign resources).
#[macro_export]
macro_rules! describe_opaque {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Describe for $ty {
                fn shape(&self) -> $crate::Shape<'_> {
                    $crate::Shape::Opaque
                }
            }
        )+
    };
}

/// Implement [`Describe`](crate::Describe) for types rendered inline through
/// their `Display` impl.
#[macro_export]
macro_rules! describe_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Describe for $ty {
                fn shape(&self) -> $crate::Shape<'_> {
                    $crate::Shape::Scalar($crate::Scalar::literal(self))
                }
            }
        )+
    };
}

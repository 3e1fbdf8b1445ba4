//! Read-only views over arbitrary values.
//!
//! Every comparable type implements [`Diffable`], which classifies the value
//! into exactly one [`Kind`] and hands the engine a [`View`] carrying the
//! capability for that kind: a [`SequenceView`], [`MappingView`] or
//! [`RecordView`] for composites, the dereferenced target for references,
//! and a normalized [`ScalarValue`] for leaves.
//!
//! Adapters for the standard library live in [`crate::impls`]; user structs
//! get theirs from [`impl_record!`](crate::impl_record).

use serde::{Deserialize, Serialize};

use crate::scalar::ScalarValue;

/// The structural category of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Absent: nothing to compare.
    Invalid,
    Scalar,
    /// A function value. Only its presence is ever compared.
    Callable,
    Sequence,
    Mapping,
    Record,
    /// A nullable indirection to another value.
    Reference,
}

/// A value classified by kind, with the accessors that kind supports.
#[derive(Clone, Copy)]
pub enum View<'a> {
    Invalid,
    Scalar(ScalarValue<'a>),
    Callable,
    Sequence(&'a dyn SequenceView),
    Mapping(&'a dyn MappingView),
    Record(&'a dyn RecordView),
    /// `None` is a null reference.
    Reference(Option<&'a dyn Diffable>),
}

impl View<'_> {
    /// The kind of the viewed value.
    pub fn kind(&self) -> Kind {
        match self {
            View::Invalid => Kind::Invalid,
            View::Scalar(_) => Kind::Scalar,
            View::Callable => Kind::Callable,
            View::Sequence(_) => Kind::Sequence,
            View::Mapping(_) => Kind::Mapping,
            View::Record(_) => Kind::Record,
            View::Reference(_) => Kind::Reference,
        }
    }
}

/// A value that can take part in a structural diff.
pub trait Diffable {
    /// Classify the value and expose the accessors for its kind.
    fn view(&self) -> View<'_>;

    /// Type identity. Two values are structurally comparable only when their
    /// type names match.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Address identity, used to detect cycles.
    fn identity(&self) -> usize {
        (self as *const Self).cast::<()>() as usize
    }

    /// Shorthand for `self.view().kind()`.
    fn kind(&self) -> Kind {
        self.view().kind()
    }
}

/// An ordered collection addressed by index.
pub trait SequenceView {
    fn len(&self) -> usize;

    fn at(&self, index: usize) -> Option<&dyn Diffable>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A key to value association with unique keys.
///
/// Keys are matched by their canonical representation (see
/// [`crate::repr`]), which is also how they appear in paths.
pub trait MappingView {
    /// All entries, in enumeration order.
    fn entries(&self) -> Vec<(&dyn Diffable, &dyn Diffable)>;

    fn keys(&self) -> Vec<&dyn Diffable> {
        self.entries().into_iter().map(|(key, _)| key).collect()
    }

    fn get(&self, key: &dyn Diffable) -> Option<&dyn Diffable> {
        let wanted = crate::repr::repr(key);
        self.entries()
            .into_iter()
            .find(|(candidate, _)| crate::repr::repr(*candidate) == wanted)
            .map(|(_, value)| value)
    }
}

/// Named fields with a fixed shape.
pub trait RecordView {
    /// Field names in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    fn field(&self, name: &str) -> Option<&dyn Diffable>;
}

/// The value a null reference dereferences to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absent;

impl Diffable for Absent {
    fn view(&self) -> View<'_> {
        View::Invalid
    }
}

/// The shared [`Absent`] instance.
pub static ABSENT: Absent = Absent;

/// [`ABSENT`] as a trait object of any lifetime.
pub fn absent<'a>() -> &'a dyn Diffable {
    &ABSENT
}

/// Implement [`Diffable`] and [`RecordView`] for a struct, listing its fields
/// in declaration order. Tuple structs list their indices.
///
/// ```
/// struct Person {
///     name: String,
///     last: String,
/// }
/// idiff::impl_record!(Person { name, last });
///
/// let a = Person { name: "John".into(), last: "Snow".into() };
/// let b = Person { name: "John".into(), last: "Betterton".into() };
/// let (result, equal) = idiff::diff(&a, &b);
/// assert!(!equal);
/// assert_eq!(result.modified[0].path, ".last");
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:tt),* $(,)? }) => {
        impl $crate::Diffable for $ty {
            fn view(&self) -> $crate::View<'_> {
                $crate::View::Record(self)
            }
        }

        impl $crate::RecordView for $ty {
            fn field_names(&self) -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            #[allow(unused_variables)]
            fn field(&self, name: &str) -> ::std::option::Option<&dyn $crate::Diffable> {
                $(
                    if name == stringify!($field) {
                        return ::std::option::Option::Some(&self.$field as &dyn $crate::Diffable);
                    }
                )*
                ::std::option::Option::None
            }
        }
    };
}

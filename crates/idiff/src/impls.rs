//! [`Diffable`] adapters for standard library types.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};

use crate::repr::repr;
use crate::scalar::ScalarValue;
use crate::view::{Diffable, MappingView, RecordView, SequenceView, View};

// ---------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------

macro_rules! signed_scalar {
    ($($ty:ty),*) => {
        $(
            impl Diffable for $ty {
                fn view(&self) -> View<'_> {
                    View::Scalar(ScalarValue::Int(*self as i128))
                }
            }
        )*
    };
}

macro_rules! unsigned_scalar {
    ($($ty:ty),*) => {
        $(
            impl Diffable for $ty {
                fn view(&self) -> View<'_> {
                    View::Scalar(ScalarValue::UInt(*self as u128))
                }
            }
        )*
    };
}

signed_scalar!(i8, i16, i32, i64, i128, isize);
unsigned_scalar!(u8, u16, u32, u64, u128, usize);

impl Diffable for f32 {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::F32(*self))
    }
}

impl Diffable for f64 {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::F64(*self))
    }
}

impl Diffable for bool {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::Bool(*self))
    }
}

impl Diffable for char {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::Char(*self))
    }
}

impl Diffable for () {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::Unit)
    }
}

impl Diffable for str {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::Str(self))
    }
}

impl Diffable for &str {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::Str(self))
    }
}

impl Diffable for String {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::Str(self))
    }
}

impl Diffable for Cow<'_, str> {
    fn view(&self) -> View<'_> {
        View::Scalar(ScalarValue::Str(self))
    }
}

// ---------------------------------------------------------------
// Callables
// ---------------------------------------------------------------

macro_rules! callable {
    ($(($($arg:ident),*)),*) => {
        $(
            impl<R, $($arg),*> Diffable for fn($($arg),*) -> R {
                fn view(&self) -> View<'_> {
                    View::Callable
                }
            }
        )*
    };
}

callable!((), (A), (A, B), (A, B, C), (A, B, C, D));

macro_rules! boxed_callable {
    ($(($($arg:ident),*)),*) => {
        $(
            impl<'f, R, $($arg),*> Diffable for Box<dyn Fn($($arg),*) -> R + 'f> {
                fn view(&self) -> View<'_> {
                    View::Callable
                }
            }

            impl<'f, R, $($arg),*> Diffable for Arc<dyn Fn($($arg),*) -> R + Send + Sync + 'f> {
                fn view(&self) -> View<'_> {
                    View::Callable
                }
            }
        )*
    };
}

boxed_callable!((), (A), (A, B), (A, B, C), (A, B, C, D));

// ---------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------

impl<T: Diffable> Diffable for Vec<T> {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl<T: Diffable> SequenceView for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: usize) -> Option<&dyn Diffable> {
        self.get(index).map(|item| item as &dyn Diffable)
    }
}

impl<T: Diffable> Diffable for &[T] {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl<T: Diffable> SequenceView for &[T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn at(&self, index: usize) -> Option<&dyn Diffable> {
        self.get(index).map(|item| item as &dyn Diffable)
    }
}

impl<T: Diffable, const N: usize> Diffable for [T; N] {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl<T: Diffable, const N: usize> SequenceView for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> Option<&dyn Diffable> {
        self.get(index).map(|item| item as &dyn Diffable)
    }
}

impl<T: Diffable> Diffable for VecDeque<T> {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl<T: Diffable> SequenceView for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn at(&self, index: usize) -> Option<&dyn Diffable> {
        self.get(index).map(|item| item as &dyn Diffable)
    }
}

// ---------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------

impl<K: Diffable, V: Diffable> Diffable for BTreeMap<K, V> {
    fn view(&self) -> View<'_> {
        View::Mapping(self)
    }
}

impl<K: Diffable, V: Diffable> MappingView for BTreeMap<K, V> {
    fn entries(&self) -> Vec<(&dyn Diffable, &dyn Diffable)> {
        self.iter()
            .map(|(key, value)| (key as &dyn Diffable, value as &dyn Diffable))
            .collect()
    }
}

impl<K: Diffable, V: Diffable, S: BuildHasher> Diffable for HashMap<K, V, S> {
    fn view(&self) -> View<'_> {
        View::Mapping(self)
    }
}

/// Hash maps enumerate in canonical key order so that paths and entry order
/// are the same on every run.
impl<K: Diffable, V: Diffable, S: BuildHasher> MappingView for HashMap<K, V, S> {
    fn entries(&self) -> Vec<(&dyn Diffable, &dyn Diffable)> {
        let mut entries: Vec<(String, &dyn Diffable, &dyn Diffable)> = self
            .iter()
            .map(|(key, value)| (repr(key), key as &dyn Diffable, value as &dyn Diffable))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
            .into_iter()
            .map(|(_, key, value)| (key, value))
            .collect()
    }
}

// ---------------------------------------------------------------
// References
// ---------------------------------------------------------------

/// Borrows are never null and dereference to their target.
impl<T: Diffable> Diffable for &T {
    fn view(&self) -> View<'_> {
        View::Reference(Some(*self as &dyn Diffable))
    }
}

impl<T: Diffable> Diffable for Option<T> {
    fn view(&self) -> View<'_> {
        View::Reference(self.as_ref().map(|v| v as &dyn Diffable))
    }
}

impl<T: Diffable> Diffable for Box<T> {
    fn view(&self) -> View<'_> {
        View::Reference(Some(&**self as &dyn Diffable))
    }
}

impl<T: Diffable> Diffable for Rc<T> {
    fn view(&self) -> View<'_> {
        View::Reference(Some(&**self as &dyn Diffable))
    }
}

impl<T: Diffable> Diffable for Arc<T> {
    fn view(&self) -> View<'_> {
        View::Reference(Some(&**self as &dyn Diffable))
    }
}

impl<T: Diffable> Diffable for OnceCell<T> {
    fn view(&self) -> View<'_> {
        View::Reference(self.get().map(|v| v as &dyn Diffable))
    }
}

impl<T: Diffable> Diffable for OnceLock<T> {
    fn view(&self) -> View<'_> {
        View::Reference(self.get().map(|v| v as &dyn Diffable))
    }
}

// ---------------------------------------------------------------
// Tuples
// ---------------------------------------------------------------

macro_rules! tuple_record {
    ($(($($idx:tt $name:ident),+)),*) => {
        $(
            impl<$($name: Diffable),+> Diffable for ($($name,)+) {
                fn view(&self) -> View<'_> {
                    View::Record(self)
                }
            }

            impl<$($name: Diffable),+> RecordView for ($($name,)+) {
                fn field_names(&self) -> &'static [&'static str] {
                    &[$(stringify!($idx)),+]
                }

                fn field(&self, name: &str) -> Option<&dyn Diffable> {
                    $(
                        if name == stringify!($idx) {
                            return Some(&self.$idx as &dyn Diffable);
                        }
                    )+
                    None
                }
            }
        )*
    };
}

tuple_record!(
    (0 A),
    (0 A, 1 B),
    (0 A, 1 B, 2 C),
    (0 A, 1 B, 2 C, 3 D),
    (0 A, 1 B, 2 C, 3 D, 4 E),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F)
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Kind;

    fn noop() {}

    #[test]
    fn primitives_are_scalars() {
        assert!(matches!(7u8.view(), View::Scalar(ScalarValue::UInt(7))));
        assert!(matches!((-7i64).view(), View::Scalar(ScalarValue::Int(-7))));
        assert!(matches!(true.view(), View::Scalar(ScalarValue::Bool(true))));
        assert!(matches!("x".view(), View::Scalar(ScalarValue::Str("x"))));
        assert!(matches!(
            String::from("y").view(),
            View::Scalar(ScalarValue::Str("y"))
        ));
        assert_eq!(().kind(), Kind::Scalar);
    }

    #[test]
    fn function_pointers_are_callables() {
        let f: fn() = noop;
        assert_eq!(f.kind(), Kind::Callable);
        let g: fn(i32) -> i32 = |x| x + 1;
        assert_eq!(g.kind(), Kind::Callable);
    }

    #[test]
    fn shared_closures_are_callables() {
        let scale = 2;
        let boxed: Box<dyn Fn(i32) -> i32> = Box::new(move |x| x * scale);
        assert_eq!(boxed.kind(), Kind::Callable);
        let shared: Arc<dyn Fn() + Send + Sync> = Arc::new(|| {});
        assert_eq!(shared.kind(), Kind::Callable);
    }

    #[test]
    fn collections_expose_their_elements() {
        let v = vec![1, 2, 3];
        let View::Sequence(seq) = v.view() else {
            panic!("expected a sequence");
        };
        assert_eq!(seq.len(), 3);
        assert!(seq.at(3).is_none());

        let slice: &[i32] = &v;
        assert_eq!(slice.kind(), Kind::Sequence);
        assert_eq!([1u8; 4].kind(), Kind::Sequence);
        assert_eq!(VecDeque::from(vec!['a']).kind(), Kind::Sequence);
    }

    #[test]
    fn hash_map_enumerates_in_canonical_order() {
        let map: HashMap<String, i32> = [("c", 3), ("a", 1), ("b", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let View::Mapping(mapping) = map.view() else {
            panic!("expected a mapping");
        };
        let keys: Vec<String> = mapping.keys().into_iter().map(repr).collect();
        assert_eq!(keys, vec!["\"a\"", "\"b\"", "\"c\""]);
    }

    #[test]
    fn mapping_lookup_matches_by_representation() {
        let map = BTreeMap::from([(1u32, "one"), (2u32, "two")]);
        let View::Mapping(mapping) = map.view() else {
            panic!("expected a mapping");
        };
        let found = mapping.get(&2u32).map(repr);
        assert_eq!(found.as_deref(), Some("\"two\""));
        assert!(mapping.get(&3u32).is_none());
    }

    #[test]
    fn smart_pointers_are_references() {
        assert!(matches!(None::<i32>.view(), View::Reference(None)));
        assert!(matches!(Some(1).view(), View::Reference(Some(_))));
        assert_eq!(Box::new(1).kind(), Kind::Reference);
        assert_eq!(Rc::new(1).kind(), Kind::Reference);
        assert_eq!(Arc::new(1).kind(), Kind::Reference);

        let target = 5u8;
        let borrowed = &target;
        assert!(matches!(
            Diffable::view(&borrowed),
            View::Reference(Some(inner)) if inner.kind() == Kind::Scalar
        ));

        let cell: OnceCell<i32> = OnceCell::new();
        assert!(matches!(cell.view(), View::Reference(None)));
        let _ = cell.set(4);
        assert!(matches!(cell.view(), View::Reference(Some(_))));
    }

    #[test]
    fn tuples_are_records_with_positional_fields() {
        let pair = (1, "one");
        let View::Record(record) = pair.view() else {
            panic!("expected a record");
        };
        assert_eq!(record.field_names(), &["0", "1"]);
        assert!(record.field("1").is_some());
        assert!(record.field("2").is_none());
    }
}

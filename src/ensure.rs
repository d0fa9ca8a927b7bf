//! Nil/empty predicates over a closed set of capability traits.
//!
//! The questions the predicates answer are coarse and kind-based: "can this
//! shape represent absence, and does it right now?" and "does this shape have
//! a notion of emptiness, and is it empty right now?". Shapes that cannot be
//! absent (numbers, bools, strings, collections held by value) always count
//! as present; shapes with no length (numbers, bools) always count as
//! non-empty. Callers must not lean on [`not_nil`] for types that cannot be
//! null in the first place.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Shapes that may or may not represent absence.
///
/// Types that cannot be absent implement this with a constant `false` so the
/// predicates stay total over every supported shape.
pub trait Nullable {
    fn is_nil(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nullable for *const T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

macro_rules! never_nil {
    ($($t:ty),* $(,)?) => {
        $(
            impl Nullable for $t {
                fn is_nil(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_nil!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

impl<T> Nullable for Vec<T> {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<T> Nullable for [T] {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<T, const N: usize> Nullable for [T; N] {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<K, V, S> Nullable for HashMap<K, V, S> {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<K, V> Nullable for BTreeMap<K, V> {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<T, S> Nullable for HashSet<T, S> {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<T> Nullable for BTreeSet<T> {
    fn is_nil(&self) -> bool {
        false
    }
}

impl<T> Nullable for VecDeque<T> {
    fn is_nil(&self) -> bool {
        false
    }
}

/// Shapes with a notion of emptiness.
///
/// Strings are empty once surrounding whitespace is trimmed away. Shapes with
/// no length at all (numbers, bools, chars) are never empty. A struct counts
/// as empty when it equals the zero-valued instance of its type; wire that up
/// with [`zero_is_empty!`](crate::zero_is_empty).
pub trait Emptiness {
    fn is_empty_value(&self) -> bool;
}

impl Emptiness for str {
    fn is_empty_value(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Emptiness for String {
    fn is_empty_value(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Emptiness for [T; N] {
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<K, V, S> Emptiness for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Emptiness for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Emptiness for HashSet<T, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for BTreeSet<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for VecDeque<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// An absent value is empty; a present one defers to its contents.
impl<T: Emptiness> Emptiness for Option<T> {
    fn is_empty_value(&self) -> bool {
        match self {
            Some(v) => v.is_empty_value(),
            None => true,
        }
    }
}

macro_rules! never_empty {
    ($($t:ty),* $(,)?) => {
        $(
            impl Emptiness for $t {
                fn is_empty_value(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_empty!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

/// Implements [`Emptiness`] for a struct as "equal to its zero value", the
/// compile-time stand-in for a deep comparison against the zero-valued
/// instance. The type needs `Default` and `PartialEq`.
///
/// ```
/// #[derive(Default, PartialEq)]
/// struct Settings { retries: u32, host: String }
/// kitbag::zero_is_empty!(Settings);
///
/// assert!(!kitbag::ensure::not_empty(&Settings::default()));
/// ```
#[macro_export]
macro_rules! zero_is_empty {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::ensure::Emptiness for $t {
                fn is_empty_value(&self) -> bool {
                    *self == <$t as ::core::default::Default>::default()
                }
            }
        )*
    };
}

/// True unless `v` is an absent reference shape (a `None`, a null pointer).
/// Shapes that cannot be absent always come back true.
pub fn not_nil<T: Nullable + ?Sized>(v: &T) -> bool {
    !v.is_nil()
}

/// True unless `v` is empty for its shape: a whitespace-only string, a
/// zero-length collection, an absent `Option`, a zero-valued struct. Shapes
/// with no notion of length always come back true.
pub fn not_empty<T: Emptiness + ?Sized>(v: &T) -> bool {
    !v.is_empty_value()
}

/// Both [`not_nil`] and [`not_empty`].
pub fn not_nil_or_empty<T: Nullable + Emptiness + ?Sized>(v: &T) -> bool {
    not_nil(v) && not_empty(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[derive(Default, PartialEq)]
    struct Plain {
        count: u32,
        name: String,
    }

    zero_is_empty!(Plain);

    #[test]
    fn absent_shapes_are_nil() {
        assert!(!not_nil(&None::<&i32>));
        assert!(!not_nil(&None::<fn()>));
        assert!(!not_nil(&None::<HashMap<String, i32>>));
        assert!(!not_nil(&None::<Vec<u8>>));
        assert!(!not_nil(&ptr::null::<u8>()));
        assert!(!not_nil(&ptr::null_mut::<u8>()));
    }

    #[test]
    fn present_shapes_are_not_nil() {
        let x = 7;
        assert!(not_nil(&Some(&x)));
        assert!(not_nil(&Some(Vec::<u8>::new())));
        assert!(not_nil(&(&x as *const i32)));
    }

    #[test]
    fn non_nillable_shapes_are_always_not_nil() {
        // Documented overapproximation: these cannot represent absence.
        assert!(not_nil(&0));
        assert!(not_nil(&0.0f64));
        assert!(not_nil(&false));
        assert!(not_nil(""));
        assert!(not_nil(&Vec::<i32>::new()));
        assert!(not_nil(&[0u8; 0]));
    }

    #[test]
    fn whitespace_only_strings_are_empty() {
        assert!(!not_empty("   "));
        assert!(!not_empty("\t\n"));
        assert!(!not_empty(""));
        assert!(not_empty("a"));
        assert!(not_empty(" a "));
    }

    #[test]
    fn collections_are_empty_by_length() {
        assert!(!not_empty(&Vec::<i32>::new()));
        assert!(not_empty(&vec![1]));
        assert!(!not_empty(&HashMap::<String, i32>::new()));
        assert!(!not_empty(&[0u8; 0]));
        assert!(not_empty(&[1u8, 2]));
    }

    #[test]
    fn zero_valued_struct_is_empty() {
        assert!(!not_empty(&Plain::default()));
        assert!(not_empty(&Plain {
            count: 1,
            name: String::new(),
        }));
        assert!(not_empty(&Plain {
            count: 0,
            name: "x".into(),
        }));
    }

    #[test]
    fn scalars_are_never_empty() {
        assert!(not_empty(&0));
        assert!(not_empty(&false));
        assert!(not_empty(&0.0f32));
    }

    #[test]
    fn option_emptiness_follows_contents() {
        assert!(!not_empty(&None::<String>));
        assert!(!not_empty(&Some("  ".to_string())));
        assert!(not_empty(&Some("x".to_string())));
    }

    #[test]
    fn combined_predicate_ands_the_two() {
        assert!(!not_nil_or_empty(&None::<Vec<i32>>));
        assert!(!not_nil_or_empty(&Some(Vec::<i32>::new())));
        assert!(not_nil_or_empty(&Some(vec![1])));
        assert!(!not_nil_or_empty("  "));
        assert!(not_nil_or_empty("x"));
    }
}

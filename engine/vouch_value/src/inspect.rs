//! Capability classification: turning caller data into [`Value`] snapshots.
//!
//! Implement [`Inspect`] for a type to make it usable in assertions. Standard
//! library types are covered here; user structs usually build a [`Record`]:
//!
//! ```
//! use vouch_value::{Inspect, Record, Value};
//!
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Inspect for User {
//!     fn inspect(&self) -> Value {
//!         Record::named("User")
//!             .field("name", &self.name)
//!             .field("age", &self.age)
//!             .into()
//!     }
//! }
//!
//! let user = User { name: "John".into(), age: 30 };
//! assert_eq!(user.inspect().type_name(), "User");
//! ```
//!
//! [`Record`]: crate::Record

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;

use crate::Value;

/// Snapshot a caller-owned datum as a shape-tagged [`Value`].
pub trait Inspect {
    fn inspect(&self) -> Value;
}

impl Inspect for Value {
    fn inspect(&self) -> Value {
        self.clone()
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Value {
        (**self).inspect()
    }
}

macro_rules! inspect_signed {
    ($($ty:ty),*) => {
        $(impl Inspect for $ty {
            fn inspect(&self) -> Value {
                Value::int(i64::from(*self))
            }
        })*
    };
}

macro_rules! inspect_unsigned {
    ($($ty:ty),*) => {
        $(impl Inspect for $ty {
            fn inspect(&self) -> Value {
                Value::uint(u64::from(*self))
            }
        })*
    };
}

inspect_signed!(i8, i16, i32, i64);
inspect_unsigned!(u8, u16, u32, u64);

impl Inspect for isize {
    #[expect(
        clippy::cast_precision_loss,
        reason = "fallback for targets where isize is wider than 64 bits"
    )]
    fn inspect(&self) -> Value {
        // isize is at most 64 bits on every supported target.
        i64::try_from(*self).map_or_else(|_| Value::float(*self as f64), Value::int)
    }
}

impl Inspect for usize {
    #[expect(
        clippy::cast_precision_loss,
        reason = "fallback for targets where usize is wider than 64 bits"
    )]
    fn inspect(&self) -> Value {
        u64::try_from(*self).map_or_else(|_| Value::float(*self as f64), Value::uint)
    }
}

impl Inspect for f32 {
    fn inspect(&self) -> Value {
        Value::float(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn inspect(&self) -> Value {
        Value::float(*self)
    }
}

impl Inspect for bool {
    fn inspect(&self) -> Value {
        Value::bool(*self)
    }
}

impl Inspect for char {
    fn inspect(&self) -> Value {
        Value::char(*self)
    }
}

impl Inspect for str {
    fn inspect(&self) -> Value {
        Value::str(self)
    }
}

impl Inspect for String {
    fn inspect(&self) -> Value {
        Value::str(self.as_str())
    }
}

impl Inspect for () {
    fn inspect(&self) -> Value {
        Value::unit()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Value {
        match self {
            Some(inner) => Value::some(inner.inspect()),
            None => Value::null(),
        }
    }
}

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self) -> Value {
        Value::sequence(self.iter().map(Inspect::inspect))
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Value {
        self.as_slice().inspect()
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Value {
        self.as_slice().inspect()
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self) -> Value {
        Value::sequence(self.iter().map(Inspect::inspect))
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self) -> Value {
        Value::sorted_sequence(self.iter().map(Inspect::inspect))
    }
}

impl<T: Inspect, S: BuildHasher> Inspect for HashSet<T, S> {
    fn inspect(&self) -> Value {
        Value::sorted_sequence(self.iter().map(Inspect::inspect))
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Value {
        Value::mapping(self.iter().map(|(k, v)| (k.inspect(), v.inspect())))
    }
}

impl<K: Inspect, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Value {
        Value::mapping(self.iter().map(|(k, v)| (k.inspect(), v.inspect())))
    }
}

macro_rules! inspect_tuple {
    ($($name:ident),+) => {
        impl<$($name: Inspect),+> Inspect for ($($name,)+) {
            #[allow(non_snake_case, reason = "tuple fields are bound by their type names")]
            fn inspect(&self) -> Value {
                let ($($name,)+) = self;
                Value::sequence([$($name.inspect()),+])
            }
        }
    };
}

inspect_tuple!(A);
inspect_tuple!(A, B);
inspect_tuple!(A, B, C);
inspect_tuple!(A, B, C, D);

#[cfg(test)]
mod tests;

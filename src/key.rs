/*!
# Node Identity

Every graph is parameterized by a *key function* mapping a node value to a
canonical [`NodeKey`] string. Two values denote the same node exactly if their
keys are equal; this is the only notion of node equality the engine uses.
Structural or reference equality of the values themselves is never consulted.

A key function is injected at construction time (see
[`Graph::new_with_key`](crate::repr::Graph::new_with_key)). When none is given,
the graph falls back to [`GraphKey`], which is implemented for the common
value types below.

For plain data types that derive `serde::Serialize`, [`structural_key`]
produces a deterministic structural key, so two structurally-equal instances
collide to the same node even if they are distinct allocations.
*/

use std::rc::Rc;

use serde::Serialize;

/// Canonical string identity of a node value.
///
/// All lookups, adjacency bookkeeping and visited-sets inside the engine are
/// keyed by this string, never by the value itself.
pub type NodeKey = String;

/// An injected key-function strategy.
///
/// Shared via `Rc` so that derived graphs (residual networks, transforms,
/// parsed graphs) can reuse the identity scheme of their origin.
pub type KeyFn<V> = Rc<dyn Fn(&V) -> NodeKey>;

/// Default node identity for common value types.
///
/// The implementations are injective *within one value type* (a graph is
/// always homogeneous in `V`), which is all the engine requires:
///
/// - integers, `bool`, `char`: their `Display` form,
/// - floats: their `Display` form, which keeps `NaN`, `inf` and `-inf`
///   distinct from each other,
/// - `String` / `&str`: the string itself,
/// - `Option<T>`: tagged (`None` / `Some(..)`), so `None` never collides
///   with a stringy inner value,
/// - slices, `Vec`s, arrays and small tuples: structural, built from the
///   element keys.
pub trait GraphKey {
    /// Returns the canonical key of this value.
    fn graph_key(&self) -> NodeKey;
}

/// Returns the default key function for any `V: GraphKey`.
pub fn default_key_fn<V: GraphKey>() -> KeyFn<V> {
    Rc::new(|v: &V| v.graph_key())
}

/// Deterministic structural key for plain data types.
///
/// The value is rendered as canonical JSON: `serde_json` keeps object keys
/// sorted, so field order in equal maps cannot produce different keys.
///
/// Values the serializer rejects (most notably recursion-depth overflow, the
/// closest Rust analog of a circular object graph) fall back to the bare type
/// name. That fallback is **non-unique** by design; it is a documented
/// limitation inherited from the identity model, not an error.
///
/// ```
/// use kgraphs::key::structural_key;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(structural_key(&Point { x: 1, y: 2 }), structural_key(&Point { x: 1, y: 2 }));
/// assert_ne!(structural_key(&Point { x: 1, y: 2 }), structural_key(&Point { x: 2, y: 1 }));
/// ```
pub fn structural_key<T: Serialize>(value: &T) -> NodeKey {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(_) => std::any::type_name::<T>().to_string(),
    }
}

macro_rules! display_key {
    ($($t:ty),*) => {
        $(
            impl GraphKey for $t {
                fn graph_key(&self) -> NodeKey {
                    self.to_string()
                }
            }
        )*
    };
}

display_key!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char
);

impl GraphKey for String {
    fn graph_key(&self) -> NodeKey {
        self.clone()
    }
}

impl GraphKey for &str {
    fn graph_key(&self) -> NodeKey {
        (*self).to_string()
    }
}

impl GraphKey for () {
    fn graph_key(&self) -> NodeKey {
        "()".to_string()
    }
}

impl<T: GraphKey> GraphKey for Option<T> {
    fn graph_key(&self) -> NodeKey {
        match self {
            None => "None".to_string(),
            Some(v) => format!("Some({})", v.graph_key()),
        }
    }
}

impl<T: GraphKey> GraphKey for &T {
    fn graph_key(&self) -> NodeKey {
        (*self).graph_key()
    }
}

impl<T: GraphKey> GraphKey for Box<T> {
    fn graph_key(&self) -> NodeKey {
        self.as_ref().graph_key()
    }
}

fn slice_key<T: GraphKey>(items: &[T]) -> NodeKey {
    let mut key = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(&item.graph_key());
    }
    key.push(']');
    key
}

impl<T: GraphKey> GraphKey for [T] {
    fn graph_key(&self) -> NodeKey {
        slice_key(self)
    }
}

impl<T: GraphKey> GraphKey for Vec<T> {
    fn graph_key(&self) -> NodeKey {
        slice_key(self)
    }
}

impl<T: GraphKey, const N: usize> GraphKey for [T; N] {
    fn graph_key(&self) -> NodeKey {
        slice_key(self)
    }
}

impl<A: GraphKey, B: GraphKey> GraphKey for (A, B) {
    fn graph_key(&self) -> NodeKey {
        format!("({},{})", self.0.graph_key(), self.1.graph_key())
    }
}

impl<A: GraphKey, B: GraphKey, C: GraphKey> GraphKey for (A, B, C) {
    fn graph_key(&self) -> NodeKey {
        format!(
            "({},{},{})",
            self.0.graph_key(),
            self.1.graph_key(),
            self.2.graph_key()
        )
    }
}

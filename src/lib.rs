//! This crate provides ordered maps and sets based on red-black trees whose
//! nodes are allocated in a slab.
//!
//! Every tree owns two permanent sentinel nodes marking the positions before
//! the first and after the last element, so that positions in the tree can be
//! denoted by plain copyable [`Cursor`]s.
//! A cursor stays valid until the element it denotes is erased, and using it
//! afterward is reported as an [`Error`] rather than undefined behavior.
//!
//! ```
//! use rbtree_slab::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! for key in [50, 20, 80, 10, 30, 70, 90] {
//!     map.insert(key, key * 10);
//! }
//!
//! let cursor = map.lower_bound(&25);
//! assert_eq!(map.entry_at(cursor), Ok((&30, &300)));
//! assert_eq!(map.entry_at(map.prev(cursor).unwrap()), Ok((&20, &200)));
//! ```
//!
//! ## Features
//!
//! - `std-slab` (default): reexports the containers over [`slab::Slab`] at the root of the crate.
//! - `dot`: Graphviz rendering of the trees.
//! - `serde`: serialization of maps (as maps) and sets (as sequences).
pub mod compare;
pub mod error;
pub mod generic;

pub use compare::{Compare, Greater, Less};
pub use error::Error;
pub use generic::Cursor;

#[cfg(feature = "std-slab")]
use slab::Slab;

/// Red-black tree based on `Slab`.
#[cfg(feature = "std-slab")]
pub type RbTree<T, C = Less> = generic::Tree<T, C, Slab<generic::Node<T>>>;

/// Ordered map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type OrderedMap<K, V, C = Less> = generic::OrderedMap<K, V, C, Slab<generic::Node<(K, V)>>>;

/// Ordered set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type OrderedSet<T, C = Less> = generic::OrderedSet<T, C, Slab<generic::Node<(T, ())>>>;

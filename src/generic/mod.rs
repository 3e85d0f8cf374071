//! Generic red-black tree types.
//!
//! Types defined in this modules are independant of the actual storage type.
pub mod node;
pub use node::Node;

pub mod tree;
pub use tree::{Cursor, Tree};

pub mod map;
pub use map::OrderedMap;

pub mod set;
pub use set::OrderedSet;

#[cfg(feature = "serde")]
mod serde_impl;

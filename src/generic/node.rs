use std::fmt;

/// Type identified by a key.
///
/// Trees are ordered by the key of their content.
/// Map entries are stored as `(key, value)` pairs and set elements as `(element, ())`.
pub trait Keyed {
	type Key;

	fn key(&self) -> &Self::Key;
}

impl<K, V> Keyed for (K, V) {
	type Key = K;

	#[inline]
	fn key(&self) -> &K {
		&self.0
	}
}

/// Side of a child relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
	Left = 0,
	Right = 1,
}

impl Side {
	#[inline]
	pub fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}

	#[inline]
	fn index(self) -> usize {
		self as usize
	}
}

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
	Red,
	Black,
}

/// What a node holds.
///
/// Sentinels mark the two ends of the sequence and never hold content.
#[derive(Clone, Debug)]
pub enum Slot<T> {
	/// Actual content.
	Real(T),

	/// Position before the first element.
	Begin,

	/// Position after the last element.
	End,
}

/// Red-black tree node.
///
/// Links are slab identifiers. Both sentinels are nodes too, so that cursors
/// can denote the ends of the sequence the same way they denote elements.
#[derive(Clone, Debug)]
pub struct Node<T> {
	parent: Option<usize>,
	children: [Option<usize>; 2],
	color: Color,
	slot: Slot<T>,

	/// Allocation stamp, unique among all the nodes ever allocated by a tree.
	stamp: u64,
}

impl<T> Node<T> {
	/// Create a detached red node holding `content`.
	#[inline]
	pub fn new(content: T, stamp: u64) -> Node<T> {
		Node {
			parent: None,
			children: [None, None],
			color: Color::Red,
			slot: Slot::Real(content),
			stamp,
		}
	}

	/// Create a detached sentinel node.
	///
	/// Sentinels are always black.
	#[inline]
	pub fn sentinel(slot: Slot<T>, stamp: u64) -> Node<T> {
		debug_assert!(!matches!(slot, Slot::Real(_)));
		Node {
			parent: None,
			children: [None, None],
			color: Color::Black,
			slot,
			stamp,
		}
	}

	#[inline]
	pub fn parent(&self) -> Option<usize> {
		self.parent
	}

	#[inline]
	pub fn set_parent(&mut self, parent: Option<usize>) {
		self.parent = parent
	}

	#[inline]
	pub fn child(&self, side: Side) -> Option<usize> {
		self.children[side.index()]
	}

	#[inline]
	pub fn set_child(&mut self, side: Side, child: Option<usize>) {
		self.children[side.index()] = child
	}

	#[inline]
	pub fn color(&self) -> Color {
		self.color
	}

	#[inline]
	pub fn set_color(&mut self, color: Color) {
		debug_assert!(color == Color::Black || !self.is_sentinel());
		self.color = color
	}

	#[inline]
	pub fn is_red(&self) -> bool {
		self.color == Color::Red
	}

	#[inline]
	pub fn stamp(&self) -> u64 {
		self.stamp
	}

	#[inline]
	pub fn slot(&self) -> &Slot<T> {
		&self.slot
	}

	#[inline]
	pub fn is_sentinel(&self) -> bool {
		!matches!(self.slot, Slot::Real(_))
	}

	#[inline]
	pub fn content(&self) -> Option<&T> {
		match &self.slot {
			Slot::Real(content) => Some(content),
			_ => None,
		}
	}

	/// Modifying the key of the content in such a way that its order with regard to
	/// other keys changes is a logical error.
	#[inline]
	pub fn content_mut(&mut self) -> Option<&mut T> {
		match &mut self.slot {
			Slot::Real(content) => Some(content),
			_ => None,
		}
	}

	#[inline]
	pub fn into_content(self) -> Option<T> {
		match self.slot {
			Slot::Real(content) => Some(content),
			_ => None,
		}
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Color::Red => write!(f, "red"),
			Color::Black => write!(f, "black"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_nodes() {
		let node = Node::new((1, "a"), 7);
		assert!(node.is_red());
		assert!(!node.is_sentinel());
		assert_eq!(node.content().map(Keyed::key), Some(&1));
		assert_eq!(node.stamp(), 7);

		let sentinel: Node<(i32, &str)> = Node::sentinel(Slot::End, 0);
		assert_eq!(sentinel.color(), Color::Black);
		assert!(sentinel.is_sentinel());
		assert!(sentinel.into_content().is_none());
	}

	#[test]
	fn links() {
		let mut node = Node::new((0, ()), 0);
		node.set_child(Side::Right, Some(3));
		node.set_parent(Some(1));
		assert_eq!(node.child(Side::Right), Some(3));
		assert_eq!(node.child(Side::Right.opposite()), None);
		assert_eq!(node.parent(), Some(1));
	}
}

use std::fmt;

/// Position in a [`Tree`](super::Tree).
///
/// A cursor denotes either an element of the tree or one of its two sentinels:
/// the *begin sentinel*, right before the first element, and the *end sentinel*,
/// right after the last one. It is a plain copyable handle that does not borrow
/// the tree: every operation taking a cursor checks it against the tree first.
///
/// We write `@id#stamp` the cursor denoting the node `id` of the slab,
/// allocated with the given `stamp`.
///
/// ## Validity
///
/// A cursor is *live* as long as the node it denotes is in the tree.
/// Erasing the node retires every cursor denoting it, including when the slab entry
/// is later reused by another node (the stamp differs).
/// Using a retired cursor is reported as [`Error::InvalidCursor`](crate::Error::InvalidCursor).
/// Sentinel cursors stay live for the whole life of the tree,
/// including across [`clear`](super::Tree::clear).
///
/// Two cursors are equal if they denote the same node, regardless of the content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
	/// Identifier of the node.
	id: usize,
	stamp: u64,
}

impl Cursor {
	#[inline]
	pub(crate) fn new(id: usize, stamp: u64) -> Cursor {
		Cursor { id, stamp }
	}

	/// Slab identifier of the denoted node.
	#[inline]
	pub fn id(&self) -> usize {
		self.id
	}

	#[inline]
	pub(crate) fn stamp(&self) -> u64 {
		self.stamp
	}
}

impl fmt::Display for Cursor {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}#{}", self.id, self.stamp)
	}
}

impl fmt::Debug for Cursor {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}#{}", self.id, self.stamp)
	}
}

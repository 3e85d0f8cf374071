use crate::{
	generic::node::{Color, Keyed, Node, Side, Slot},
	Compare, Error, Less,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use log::debug;
use smallvec::SmallVec;
use std::{
	borrow::Borrow,
	marker::PhantomData,
	ops::RangeBounds,
	sync::atomic::{self, AtomicU64},
};

mod balance;
mod cursor;
mod iter;

pub use cursor::Cursor;
pub use iter::*;

/// Allocation stamps, shared by every tree.
///
/// A stamp is never handed out twice, so a cursor only ever denotes a node of
/// the tree it was obtained from.
static STAMPS: AtomicU64 = AtomicU64::new(0);

#[inline]
fn fresh_stamp() -> u64 {
	STAMPS.fetch_add(1, atomic::Ordering::Relaxed)
}

/// Traversal stack. Red-black trees are at most `2 * log2(n + 1)` high,
/// this covers any tree that fits in memory without spilling.
type Stack<T> = SmallVec<[T; 64]>;

/// Red-black tree based on a slab.
///
/// Nodes are allocated in a slab of [`Node`]s and linked together by their
/// identifiers: each node knows its parent and its two children.
/// Content is ordered by the [`Keyed::key`] of each element, according to the
/// comparator `C` (a strict weak ordering).
/// No two elements with equivalent keys are ever stored.
///
/// In addition to the content nodes, the tree owns two permanent *sentinel*
/// nodes: the begin sentinel is kept as the left child of the minimum and the
/// end sentinel as the right child of the maximum.
/// They give every [`Cursor`] a well-defined position, including past the ends.
/// Sentinels are black and take no part in the balance of the tree.
///
/// This is the engine behind [`OrderedMap`](crate::generic::OrderedMap) and
/// [`OrderedSet`](crate::generic::OrderedSet).
///
/// ```
/// use rbtree_slab::RbTree;
///
/// let mut tree: RbTree<(i32, &str)> = RbTree::new();
/// for key in [50, 20, 80, 10, 30, 70, 90] {
///     tree.insert((key, "x"));
/// }
///
/// let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, [10, 20, 30, 50, 70, 80, 90]);
///
/// let twenty = tree.find(&20);
/// tree.erase(twenty).unwrap();
/// assert_eq!(tree.len(), 6);
/// assert_eq!(tree.find(&20), tree.end());
/// ```
pub struct Tree<T, C, S> {
	/// Allocated nodes, including both sentinels.
	nodes: S,

	/// Root node id.
	root: Option<usize>,

	/// Begin sentinel id.
	begin: usize,

	/// End sentinel id.
	end: usize,

	/// Number of elements in the tree.
	len: usize,

	/// Begin sentinel stamp.
	begin_stamp: u64,

	/// End sentinel stamp.
	end_stamp: u64,

	compare: C,

	t: PhantomData<T>,
}

impl<T, S> Tree<T, Less, S> {
	/// Create a new empty tree in ascending key order.
	#[inline]
	pub fn new() -> Tree<T, Less, S>
	where
		S: Default + SlabMut<Node<T>>,
	{
		Self::with_comparator(Less)
	}
}

impl<T, C, S> Tree<T, C, S> {
	/// Create a new empty tree ordered by the given comparator.
	///
	/// This allocates the two sentinels.
	#[inline]
	pub fn with_comparator(compare: C) -> Tree<T, C, S>
	where
		S: Default + SlabMut<Node<T>>,
	{
		let mut nodes = S::default();
		let (begin_stamp, end_stamp) = (fresh_stamp(), fresh_stamp());
		let begin = nodes.insert(Node::sentinel(Slot::Begin, begin_stamp));
		let end = nodes.insert(Node::sentinel(Slot::End, end_stamp));
		Tree {
			nodes,
			root: None,
			begin,
			end,
			len: 0,
			begin_stamp,
			end_stamp,
			compare,
			t: PhantomData,
		}
	}

	/// Returns `true` if the tree contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the number of elements in the tree.
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	/// Upper bound on the number of elements a tree can hold,
	/// given the size of a node and the address space.
	#[inline]
	pub fn max_size(&self) -> usize {
		isize::MAX as usize / std::mem::size_of::<Node<T>>().max(1)
	}

	/// Comparator ordering the tree.
	#[inline]
	pub fn comparator(&self) -> &C {
		&self.compare
	}

	/// Cursor on the end sentinel, right after the last element.
	#[inline]
	pub fn end(&self) -> Cursor {
		Cursor::new(self.end, self.end_stamp)
	}

	/// Cursor on the begin sentinel, right before the first element.
	///
	/// This is the position reached when moving backward from [`Tree::begin`].
	#[inline]
	pub fn before_begin(&self) -> Cursor {
		Cursor::new(self.begin, self.begin_stamp)
	}

	/// Swaps the content of two trees in constant time.
	///
	/// Cursors follow the nodes they denote: a cursor obtained from `self`
	/// denotes the same element, now in `other`.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		std::mem::swap(self, other)
	}

	#[inline]
	fn less<L: ?Sized, R: ?Sized>(&self, lhs: &L, rhs: &R) -> bool
	where
		C: Compare<L, R>,
	{
		self.compare.less(lhs, rhs)
	}
}

impl<T, C, S: Slab<Node<T>>> Tree<T, C, S>
where
	S: SimpleCollectionRef,
{
	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is out of bounds.
	#[inline]
	pub(crate) fn node(&self, id: usize) -> &Node<T> {
		S::into_ref(self.nodes.get(id).unwrap())
	}

	#[inline]
	fn cursor(&self, id: usize) -> Cursor {
		Cursor::new(id, self.node(id).stamp())
	}

	/// Returns the node denoted by the given cursor, if it is live.
	#[inline]
	fn live(&self, cursor: Cursor) -> Result<&Node<T>, Error> {
		match self.nodes.get(cursor.id()) {
			Some(node) => {
				let node = S::into_ref(node);
				if node.stamp() == cursor.stamp() {
					Ok(node)
				} else {
					Err(Error::InvalidCursor)
				}
			}
			None => Err(Error::InvalidCursor),
		}
	}

	/// Checks that the given cursor denotes a node of this tree,
	/// either an element or a sentinel.
	#[inline]
	pub fn is_live(&self, cursor: Cursor) -> bool {
		self.live(cursor).is_ok()
	}

	/// Checks that the given cursor denotes one of the two sentinels.
	#[inline]
	pub fn is_sentinel(&self, cursor: Cursor) -> bool {
		cursor == self.end() || cursor == self.before_begin()
	}

	/// Returns `id` if it denotes an element (not a sentinel).
	#[inline]
	fn real(&self, id: Option<usize>) -> Option<usize> {
		id.filter(|id| !self.node(*id).is_sentinel())
	}

	#[inline]
	fn is_red(&self, id: Option<usize>) -> bool {
		match id {
			Some(id) => self.node(id).is_red(),
			None => false,
		}
	}

	/// Side of `child` under `parent`.
	#[inline]
	fn side_of(&self, child: usize, parent: usize) -> Side {
		if self.node(parent).child(Side::Left) == Some(child) {
			Side::Left
		} else {
			Side::Right
		}
	}

	/// Follows the `side` links from `id` to exhaustion, sentinels included.
	#[inline]
	fn extreme(&self, mut id: usize, side: Side) -> usize {
		while let Some(child) = self.node(id).child(side) {
			id = child
		}
		id
	}

	/// Follows the `side` links from `id` as long as they lead to elements.
	#[inline]
	fn extreme_real(&self, mut id: usize, side: Side) -> usize {
		while let Some(child) = self.real(self.node(id).child(side)) {
			id = child
		}
		id
	}

	/// Key of the element held by the node `id`.
	///
	/// Panics if `id` is a sentinel.
	#[inline]
	fn key_of(&self, id: usize) -> &T::Key
	where
		T: Keyed,
	{
		match self.node(id).slot() {
			Slot::Real(content) => content.key(),
			_ => unreachable!("sentinels have no key"),
		}
	}

	/// In-order neighbor of `id` on the given `side`.
	///
	/// Stepping forward from the end sentinel, or backward from the begin
	/// sentinel, stays in place.
	fn step(&self, id: usize, side: Side) -> usize {
		let boundary = match side {
			Side::Right => self.end,
			Side::Left => self.begin,
		};

		if id == boundary {
			return boundary;
		}

		if let Some(child) = self.node(id).child(side) {
			return self.extreme(child, side.opposite());
		}

		let mut current = id;
		while let Some(parent) = self.node(current).parent() {
			if self.node(parent).child(side) == Some(current) {
				current = parent
			} else {
				return parent;
			}
		}

		// Only reached when the tree is empty and the sentinels are detached.
		boundary
	}

	/// Cursor on the first element, or [`Tree::end`] if the tree is empty.
	#[inline]
	pub fn begin(&self) -> Cursor {
		self.cursor(self.step(self.begin, Side::Right))
	}

	/// Moves the cursor to the next position in order.
	///
	/// The begin sentinel moves to the first element, the last element moves to
	/// the end sentinel, and the end sentinel stays in place.
	#[inline]
	pub fn next(&self, cursor: Cursor) -> Result<Cursor, Error> {
		self.live(cursor)?;
		Ok(self.cursor(self.step(cursor.id(), Side::Right)))
	}

	/// Moves the cursor to the previous position in order.
	///
	/// The end sentinel moves to the last element, the first element moves to
	/// the begin sentinel, and the begin sentinel stays in place.
	#[inline]
	pub fn prev(&self, cursor: Cursor) -> Result<Cursor, Error> {
		self.live(cursor)?;
		Ok(self.cursor(self.step(cursor.id(), Side::Left)))
	}

	/// Returns a reference to the element denoted by the cursor.
	///
	/// Fails with [`Error::Sentinel`] if the cursor denotes a sentinel,
	/// or [`Error::InvalidCursor`] if it is not live.
	#[inline]
	pub fn get(&self, cursor: Cursor) -> Result<&T, Error> {
		self.live(cursor)?.content().ok_or(Error::Sentinel)
	}

	/// Returns the first element, if any.
	#[inline]
	pub fn first(&self) -> Option<&T> {
		self.get(self.begin()).ok()
	}

	/// Returns the last element, if any.
	#[inline]
	pub fn last(&self) -> Option<&T> {
		self.get(self.cursor(self.step(self.end, Side::Left))).ok()
	}

	/// Search the tree from the root.
	///
	/// Returns `None` if the tree is empty,
	/// `Some(Ok(id))` if the node `id` holds the key,
	/// or `Some(Err((parent, side)))` where `side` of `parent` is the free slot
	/// at which the key would be inserted. This slot may hold a sentinel.
	fn locate<Q: ?Sized>(&self, key: &Q) -> Option<Result<usize, (usize, Side)>>
	where
		T: Keyed,
		T::Key: Borrow<Q>,
		C: Compare<Q>,
	{
		let mut id = self.root?;
		loop {
			let node_key: &Q = self.key_of(id).borrow();
			let side = if self.less::<Q, Q>(key, node_key) {
				Side::Left
			} else if self.less::<Q, Q>(node_key, key) {
				Side::Right
			} else {
				return Some(Ok(id));
			};

			match self.real(self.node(id).child(side)) {
				Some(child) => id = child,
				None => return Some(Err((id, side))),
			}
		}
	}

	/// Returns a cursor on the element with the given key,
	/// or [`Tree::end`] if there is none.
	///
	/// The key may be any borrowed form of the tree's key type, but the ordering
	/// on the borrowed form *must* match the ordering on the key type.
	#[inline]
	pub fn find<Q: ?Sized>(&self, key: &Q) -> Cursor
	where
		T: Keyed,
		T::Key: Borrow<Q>,
		C: Compare<Q>,
	{
		match self.locate(key) {
			Some(Ok(id)) => self.cursor(id),
			_ => self.end(),
		}
	}

	/// Returns `true` if the tree contains an element with the given key.
	#[inline]
	pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
	where
		T: Keyed,
		T::Key: Borrow<Q>,
		C: Compare<Q>,
	{
		matches!(self.locate(key), Some(Ok(_)))
	}

	/// Returns a cursor on the first element whose key is not less than `key`,
	/// or [`Tree::end`] if there is none.
	pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Cursor
	where
		T: Keyed,
		T::Key: Borrow<Q>,
		C: Compare<Q>,
	{
		let mut candidate = self.end;
		let mut current = self.root;
		while let Some(id) = self.real(current) {
			let node_key: &Q = self.key_of(id).borrow();
			if self.less::<Q, Q>(node_key, key) {
				current = self.node(id).child(Side::Right)
			} else {
				candidate = id;
				current = self.node(id).child(Side::Left)
			}
		}

		self.cursor(candidate)
	}

	/// Returns a cursor on the first element whose key is greater than `key`,
	/// or [`Tree::end`] if there is none.
	pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Cursor
	where
		T: Keyed,
		T::Key: Borrow<Q>,
		C: Compare<Q>,
	{
		let mut candidate = self.end;
		let mut current = self.root;
		while let Some(id) = self.real(current) {
			let node_key: &Q = self.key_of(id).borrow();
			if self.less::<Q, Q>(key, node_key) {
				candidate = id;
				current = self.node(id).child(Side::Left)
			} else {
				current = self.node(id).child(Side::Right)
			}
		}

		self.cursor(candidate)
	}

	/// Gets an iterator over the elements of the tree, in order.
	#[inline]
	pub fn iter(&self) -> Iter<T, C, S> {
		Iter::new(self)
	}

	/// Constructs a double-ended iterator over a sub-range of elements in the tree.
	///
	/// # Panics
	///
	/// Panics if range `start > end`.
	/// Panics if range `start == end` and both bounds are `Excluded`.
	#[inline]
	pub fn range<Q: ?Sized, R>(&self, range: R) -> Range<T, C, S>
	where
		T: Keyed,
		T::Key: Borrow<Q>,
		C: Compare<Q>,
		R: RangeBounds<Q>,
	{
		Range::new(self, range)
	}

	/// Height of the tree, in elements.
	///
	/// The empty tree has height 0.
	pub fn height(&self) -> usize {
		let mut height = 0;
		let mut stack: Stack<(usize, usize)> = SmallVec::new();
		if let Some(root) = self.root {
			stack.push((root, 1))
		}

		while let Some((id, depth)) = stack.pop() {
			height = height.max(depth);
			for side in [Side::Left, Side::Right] {
				if let Some(child) = self.real(self.node(id).child(side)) {
					stack.push((child, depth + 1))
				}
			}
		}

		height
	}

	/// Validate the tree.
	///
	/// Panics if the tree is not a valid red-black tree: broken parent links,
	/// misplaced sentinels, a red node with a red child, unequal black-heights,
	/// elements out of order or a wrong element count.
	///
	/// Returns the black-height of the tree.
	pub fn validate(&self) -> usize
	where
		T: Keyed,
		C: Compare<T::Key>,
	{
		let begin = self.node(self.begin);
		let end = self.node(self.end);
		assert!(begin.child(Side::Left).is_none() && begin.child(Side::Right).is_none());
		assert!(end.child(Side::Left).is_none() && end.child(Side::Right).is_none());
		assert_eq!(begin.color(), Color::Black);
		assert_eq!(end.color(), Color::Black);

		match self.root {
			Some(root) => {
				assert!(self.node(root).parent().is_none());
				assert_eq!(self.node(root).color(), Color::Black);

				let min = self.extreme_real(root, Side::Left);
				let max = self.extreme_real(root, Side::Right);
				assert_eq!(begin.parent(), Some(min));
				assert_eq!(self.node(min).child(Side::Left), Some(self.begin));
				assert_eq!(end.parent(), Some(max));
				assert_eq!(self.node(max).child(Side::Right), Some(self.end));

				let (count, black_height) = self.validate_node(root);
				assert_eq!(count, self.len);

				let mut previous: Option<&T::Key> = None;
				for item in self.iter() {
					if let Some(previous) = previous {
						assert!(self.less(previous, item.key()))
					}
					previous = Some(item.key())
				}

				black_height
			}
			None => {
				assert_eq!(self.len, 0);
				assert!(begin.parent().is_none());
				assert!(end.parent().is_none());
				0
			}
		}
	}

	/// Validate the subtree rooted in `id`.
	///
	/// Returns the number of elements and the black-height of the subtree.
	fn validate_node(&self, id: usize) -> (usize, usize) {
		let node = self.node(id);
		if node.is_sentinel() {
			return (0, 0);
		}

		let mut count = 1;
		let mut black_heights = [0; 2];
		for side in [Side::Left, Side::Right] {
			if let Some(child) = node.child(side) {
				assert_eq!(self.node(child).parent(), Some(id));
				if node.is_red() {
					assert!(!self.node(child).is_red(), "red node {} has a red child", id)
				}

				let (child_count, child_black_height) = self.validate_node(child);
				count += child_count;
				black_heights[side as usize] = child_black_height;
			}
		}

		assert_eq!(black_heights[0], black_heights[1], "unbalanced node {}", id);
		let own = if node.is_red() { 0 } else { 1 };
		(count, black_heights[0] + own)
	}

	/// Write the tree in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		T: Keyed,
		T::Key: std::fmt::Display,
	{
		write!(f, "digraph tree {{\n\tnode [style=filled, fontcolor=white];\n")?;
		if let Some(id) = self.root {
			self.dot_write_node(f, id)?
		}
		write!(f, "}}")
	}

	/// Write the given node in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	fn dot_write_node<W: std::io::Write>(&self, f: &mut W, id: usize) -> std::io::Result<()>
	where
		T: Keyed,
		T::Key: std::fmt::Display,
	{
		let name = format!("n{}", id);
		let node = self.node(id);

		match node.slot() {
			Slot::Real(content) => {
				writeln!(f, "\t{} [label=\"{}\", fillcolor={}];", name, content.key(), node.color())?
			}
			Slot::Begin => writeln!(f, "\t{} [label=\"begin\", shape=point];", name)?,
			Slot::End => writeln!(f, "\t{} [label=\"end\", shape=point];", name)?,
		}

		for side in [Side::Left, Side::Right] {
			if let Some(child_id) = node.child(side) {
				self.dot_write_node(f, child_id)?;
				writeln!(f, "\t{} -> n{}", name, child_id)?;
			}
		}

		Ok(())
	}
}

impl<T, C, S: SlabMut<Node<T>>> Tree<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	/// Get the node associated to the given `id` mutabily.
	///
	/// Panics if `id` is out of bounds.
	#[inline]
	pub(crate) fn node_mut(&mut self, id: usize) -> &mut Node<T> {
		S::into_mut(self.nodes.get_mut(id).unwrap())
	}

	/// Returns a mutable reference to the element denoted by the cursor.
	///
	/// Modifying the key of the element in such a way that its order with regard
	/// to other keys changes is a logical error.
	#[inline]
	pub fn get_mut(&mut self, cursor: Cursor) -> Result<&mut T, Error> {
		self.live(cursor)?;
		self.node_mut(cursor.id()).content_mut().ok_or(Error::Sentinel)
	}

	/// Allocate a detached red node holding `content`.
	#[inline]
	fn allocate(&mut self, content: T) -> usize {
		self.nodes.insert(Node::new(content, fresh_stamp()))
	}

	/// Release the given node and return its content.
	#[inline]
	fn release(&mut self, id: usize) -> T {
		match self.nodes.remove(id).and_then(Node::into_content) {
			Some(content) => content,
			None => unreachable!("sentinels are never released"),
		}
	}

	/// Puts both sentinels back in their detached, empty-tree state.
	#[inline]
	fn detach_sentinels(&mut self) {
		let (begin, end) = (self.begin, self.end);
		self.node_mut(begin).set_parent(None);
		self.node_mut(end).set_parent(None);
	}

	/// Attach the given sentinel under `id`, on the given side.
	///
	/// The slot must be free.
	#[inline]
	fn attach_sentinel(&mut self, sentinel: usize, id: usize, side: Side) {
		debug_assert!(self.node(id).child(side).is_none());
		self.node_mut(id).set_child(side, Some(sentinel));
		self.node_mut(sentinel).set_parent(Some(id));
	}

	/// Link the detached node `id` as the root of the empty tree.
	fn link_root(&mut self, id: usize) {
		debug_assert!(self.root.is_none());
		let (begin, end) = (self.begin, self.end);
		self.root = Some(id);
		self.node_mut(id).set_color(Color::Black);
		self.attach_sentinel(begin, id, Side::Left);
		self.attach_sentinel(end, id, Side::Right);
		self.len = 1;
	}

	/// Link the detached node `id` on the given side of `parent`, then rebalance.
	///
	/// The slot must not hold an element. If it holds a sentinel, the sentinel
	/// moves under the new node, on the same side.
	fn link(&mut self, parent: usize, side: Side, id: usize) {
		let displaced = self.node(parent).child(side);
		debug_assert!(self.real(displaced).is_none());

		self.node_mut(parent).set_child(side, Some(id));
		self.node_mut(id).set_parent(Some(parent));
		if let Some(sentinel) = displaced {
			self.attach_sentinel(sentinel, id, side)
		}

		self.len += 1;
		self.insert_fixup(id)
	}

	/// Insert an element in the tree.
	///
	/// If the tree already contains an element with an equivalent key,
	/// the tree is not modified, `value` is dropped and the returned cursor denotes
	/// the existing element.
	/// Otherwise the returned cursor denotes the new element.
	/// The boolean is `true` if the element has been inserted.
	pub fn insert(&mut self, value: T) -> (Cursor, bool)
	where
		T: Keyed,
		C: Compare<T::Key>,
	{
		match self.locate::<T::Key>(value.key()) {
			None => {
				let id = self.allocate(value);
				self.link_root(id);
				(self.cursor(id), true)
			}
			Some(Ok(id)) => (self.cursor(id), false),
			Some(Err((parent, side))) => {
				let id = self.allocate(value);
				self.link(parent, side, id);
				(self.cursor(id), true)
			}
		}
	}

	/// Insert an element in the tree, using `hint` as a suggestion for its position.
	///
	/// If `value` belongs right before the position denoted by `hint`, it is linked
	/// there without searching the tree from the root.
	/// Otherwise (including when `hint` is not live) this falls back to [`Tree::insert`].
	///
	/// Returns a cursor on the element with the key of `value`,
	/// whether it was just inserted or already present.
	pub fn insert_hint(&mut self, hint: Cursor, value: T) -> Cursor
	where
		T: Keyed,
		C: Compare<T::Key>,
	{
		if self.is_empty() || !self.is_live(hint) || hint.id() == self.begin {
			return self.insert(value).0;
		}

		let after = hint.id();
		let before = self.step(after, Side::Left);

		let fits_before = after == self.end || self.less(value.key(), self.key_of(after));
		let fits_after = before == self.begin || self.less(self.key_of(before), value.key());

		if fits_before && fits_after {
			let (parent, side) = if after != self.end && self.real(self.node(after).child(Side::Left)).is_none() {
				(after, Side::Left)
			} else {
				(before, Side::Right)
			};

			let id = self.allocate(value);
			self.link(parent, side, id);
			self.cursor(id)
		} else {
			self.insert(value).0
		}
	}

	/// Erase the element denoted by the cursor and return it.
	///
	/// Returns `Ok(None)` without modifying the tree if the cursor denotes a
	/// sentinel, and fails with [`Error::InvalidCursor`] if it is not live.
	///
	/// Every cursor denoting the erased element is retired.
	/// Cursors denoting other elements stay valid: the nodes are relinked,
	/// never moved.
	pub fn erase(&mut self, cursor: Cursor) -> Result<Option<T>, Error> {
		if self.live(cursor)?.is_sentinel() {
			return Ok(None);
		}

		Ok(Some(self.remove_node(cursor.id())))
	}

	/// Removes the element with the given key, if any, and returns it.
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<T>
	where
		T: Keyed,
		T::Key: Borrow<Q>,
		C: Compare<Q>,
	{
		match self.locate(key) {
			Some(Ok(id)) => Some(self.remove_node(id)),
			_ => None,
		}
	}

	/// Unlink and release the element node `z`, then rebalance.
	fn remove_node(&mut self, z: usize) -> T {
		if self.len == 1 {
			debug!("erasing the last element, collapsing sentinels");
			self.root = None;
			self.len = 0;
			self.detach_sentinels();
			return self.release(z);
		}

		// Sentinels adjacent to `z` are detached now and re-attached to the new
		// extremes once the tree is rebalanced.
		// Nodes are relinked but never moved, so both extremes keep their identity.
		let (begin, end) = (self.begin, self.end);
		let new_min = if self.node(z).child(Side::Left) == Some(begin) {
			Some(self.step(z, Side::Right))
		} else {
			None
		};
		let new_max = if self.node(z).child(Side::Right) == Some(end) {
			Some(self.step(z, Side::Left))
		} else {
			None
		};
		if new_min.is_some() {
			self.node_mut(z).set_child(Side::Left, None)
		}
		if new_max.is_some() {
			self.node_mut(z).set_child(Side::Right, None)
		}

		let z_color = self.node(z).color();
		let z_parent = self.node(z).parent();

		// `x` is the (possibly empty) subtree taking the place of the removed
		// position, under `x_parent`, on `x_side`.
		let (removed_color, x, x_parent, x_side) =
			match (self.node(z).child(Side::Left), self.node(z).child(Side::Right)) {
				(None, child) | (child, None) => {
					let x_side = match z_parent {
						Some(parent) => self.side_of(z, parent),
						None => Side::Left,
					};
					self.replace(z, child);
					(z_color, child, z_parent, x_side)
				}
				(Some(left), Some(right)) => {
					// The successor takes the position of `z`.
					let y = self.extreme(right, Side::Left);
					let y_color = self.node(y).color();
					let x = self.real(self.node(y).child(Side::Right));

					let (x_parent, x_side) = if y == right {
						(y, Side::Right)
					} else {
						let y_parent = self.node(y).parent().unwrap();
						self.replace(y, x);
						self.node_mut(y).set_child(Side::Right, Some(right));
						self.node_mut(right).set_parent(Some(y));
						(y_parent, Side::Left)
					};

					self.replace(z, Some(y));
					self.node_mut(y).set_child(Side::Left, Some(left));
					self.node_mut(left).set_parent(Some(y));
					self.node_mut(y).set_color(z_color);

					(y_color, x, Some(x_parent), x_side)
				}
			};

		let content = self.release(z);
		self.len -= 1;

		if removed_color == Color::Black {
			self.erase_fixup(x, x_parent, x_side)
		}

		if let Some(min) = new_min {
			self.attach_sentinel(begin, min, Side::Left)
		}
		if let Some(max) = new_max {
			self.attach_sentinel(end, max, Side::Right)
		}

		content
	}

	/// Clears the tree, removing all elements.
	///
	/// The sentinels are kept, so [`Tree::end`] and [`Tree::before_begin`]
	/// remain valid.
	pub fn clear(&mut self) {
		debug!("clearing {} elements", self.len);
		let mut stack: Stack<usize> = SmallVec::new();
		stack.extend(self.root.take());

		while let Some(id) = stack.pop() {
			for side in [Side::Left, Side::Right] {
				if let Some(child) = self.real(self.node(id).child(side)) {
					stack.push(child)
				}
			}

			self.release(id);
		}

		self.len = 0;
		self.detach_sentinels()
	}

	/// Removes and returns the first element.
	#[inline]
	pub fn pop_first(&mut self) -> Option<T> {
		let first = self.begin();
		self.erase(first).ok().flatten()
	}

	/// Removes and returns the last element.
	#[inline]
	pub fn pop_last(&mut self) -> Option<T> {
		let last = self.cursor(self.step(self.end, Side::Left));
		self.erase(last).ok().flatten()
	}
}

impl<T: Clone, C: Clone, S: SlabMut<Node<T>>> Clone for Tree<T, C, S>
where
	S: Default + SimpleCollectionRef + SimpleCollectionMut,
{
	/// Structural copy: the clone has the same shape and colors.
	///
	/// Cursors of `self` are not valid in the clone.
	fn clone(&self) -> Self {
		let mut tree = Tree::with_comparator(self.compare.clone());

		// (source node, parent in the clone, side)
		let mut stack: Stack<(usize, Option<usize>, Side)> = SmallVec::new();
		stack.extend(self.root.map(|root| (root, None, Side::Left)));

		while let Some((id, parent, side)) = stack.pop() {
			let node = self.node(id);
			let content = match node.content() {
				Some(content) => content.clone(),
				None => continue,
			};

			let copy = tree.allocate(content);
			tree.node_mut(copy).set_color(node.color());
			tree.node_mut(copy).set_parent(parent);
			match parent {
				Some(parent) => tree.node_mut(parent).set_child(side, Some(copy)),
				None => tree.root = Some(copy),
			}

			for side in [Side::Left, Side::Right] {
				if let Some(child) = node.child(side) {
					stack.push((child, Some(copy), side))
				}
			}
		}

		if let Some(root) = tree.root {
			let (begin, end) = (tree.begin, tree.end);
			let min = tree.extreme(root, Side::Left);
			let max = tree.extreme(root, Side::Right);
			tree.attach_sentinel(begin, min, Side::Left);
			tree.attach_sentinel(end, max, Side::Right);
		}

		tree.len = self.len;
		tree
	}
}

impl<T, C: Default, S: SlabMut<Node<T>> + Default> Default for Tree<T, C, S> {
	#[inline]
	fn default() -> Self {
		Tree::with_comparator(C::default())
	}
}

impl<T: std::fmt::Debug, C, S: Slab<Node<T>>> std::fmt::Debug for Tree<T, C, S>
where
	S: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use crate::{Error, Greater, RbTree};

	type IntTree = RbTree<(i32, ())>;

	fn keys<C>(tree: &RbTree<(i32, ()), C>) -> Vec<i32> {
		tree.iter().map(|(k, _)| *k).collect()
	}

	#[test]
	fn empty_tree() {
		let tree = IntTree::new();
		assert!(tree.is_empty());
		assert_eq!(tree.begin(), tree.end());
		assert_eq!(tree.lower_bound(&5), tree.end());
		assert_eq!(tree.upper_bound(&5), tree.end());
		assert_eq!(tree.next(tree.before_begin()), Ok(tree.end()));
		assert_eq!(tree.prev(tree.end()), Ok(tree.before_begin()));
		assert_eq!(tree.get(tree.end()), Err(Error::Sentinel));
		assert_eq!(tree.validate(), 0);
	}

	#[test]
	fn sentinels_follow_extremes() {
		let mut tree = IntTree::new();
		for key in [50, 20, 80, 10, 30, 70, 90, 5, 95] {
			tree.insert((key, ()));
			tree.validate();
			let first = *tree.first().unwrap();
			let last = *tree.last().unwrap();
			assert_eq!(tree.get(tree.next(tree.before_begin()).unwrap()), Ok(&first));
			assert_eq!(tree.get(tree.prev(tree.end()).unwrap()), Ok(&last));
		}

		assert_eq!(keys(&tree), [5, 10, 20, 30, 50, 70, 80, 90, 95]);
		assert_eq!(tree.prev(tree.begin()), Ok(tree.before_begin()));
		assert_eq!(tree.next(tree.end()), Ok(tree.end()));
		assert_eq!(tree.prev(tree.before_begin()), Ok(tree.before_begin()));
	}

	#[test]
	fn duplicate_insert_is_rejected() {
		let mut tree: RbTree<(i32, &str)> = RbTree::new();
		let (first, inserted) = tree.insert((1, "a"));
		assert!(inserted);
		let (again, inserted) = tree.insert((1, "b"));
		assert!(!inserted);
		assert_eq!(first, again);
		assert_eq!(tree.get(again), Ok(&(1, "a")));
		assert_eq!(tree.len(), 1);
	}

	#[test]
	fn erased_cursor_is_retired() {
		let mut tree = IntTree::new();
		let (c, _) = tree.insert((1, ()));
		tree.insert((2, ()));
		assert_eq!(tree.erase(c), Ok(Some((1, ()))));
		assert_eq!(tree.get(c), Err(Error::InvalidCursor));
		assert_eq!(tree.next(c), Err(Error::InvalidCursor));
		assert_eq!(tree.erase(c), Err(Error::InvalidCursor));

		// the slab entry is reused, but the cursor stays retired.
		let (reused, _) = tree.insert((3, ()));
		assert_eq!(reused.id(), c.id());
		assert_ne!(reused, c);
		assert_eq!(tree.get(c), Err(Error::InvalidCursor));
		tree.validate();
	}

	#[test]
	fn erase_sentinel_is_noop() {
		let mut tree = IntTree::new();
		tree.insert((1, ()));
		assert_eq!(tree.erase(tree.end()), Ok(None));
		assert_eq!(tree.erase(tree.before_begin()), Ok(None));
		assert_eq!(tree.len(), 1);
	}

	#[test]
	fn erase_keeps_other_cursors() {
		let mut tree = IntTree::new();
		let cursors: Vec<_> = (0..64).map(|k| tree.insert((k, ())).0).collect();

		// erase nodes with two children, whose successors are relinked in their place.
		for k in (0..64).step_by(3) {
			tree.erase(cursors[k as usize]).unwrap();
			tree.validate();
		}

		for k in 0..64 {
			let result = tree.get(cursors[k as usize]);
			if k % 3 == 0 {
				assert_eq!(result, Err(Error::InvalidCursor))
			} else {
				assert_eq!(result, Ok(&(k, ())))
			}
		}
	}

	#[test]
	fn insert_hint() {
		let mut tree = IntTree::new();
		let end = tree.end();
		for key in 0..100 {
			// always the right place.
			tree.insert_hint(end, (key * 2, ()));
			tree.validate();
		}

		// wrong hint, falls back.
		let begin = tree.begin();
		let c = tree.insert_hint(begin, (51, ()));
		assert_eq!(tree.get(c), Ok(&(51, ())));

		// right hint, in the middle.
		let hint = tree.find(&60);
		let c = tree.insert_hint(hint, (59, ()));
		assert_eq!(tree.next(c), Ok(hint));

		// already present.
		let c = tree.insert_hint(hint, (60, ()));
		assert_eq!(c, hint);

		tree.validate();
		assert_eq!(tree.len(), 102);
	}

	#[test]
	fn clear_keeps_sentinels() {
		let mut tree = IntTree::new();
		let end = tree.end();
		for key in 0..32 {
			tree.insert((key, ()));
		}
		tree.clear();
		tree.validate();
		assert!(tree.is_empty());
		assert_eq!(tree.end(), end);
		assert_eq!(tree.begin(), end);

		tree.insert((4, ()));
		assert_eq!(keys(&tree), [4]);
		tree.validate();
	}

	#[test]
	fn clone_is_deep() {
		let mut tree = IntTree::new();
		for key in 0..100 {
			tree.insert((key, ()));
		}

		let copy = tree.clone();
		assert_eq!(copy.validate(), tree.validate());
		assert_eq!(copy.height(), tree.height());
		drop(tree);
		assert_eq!(keys(&copy), (0..100).collect::<Vec<_>>());
		assert_eq!(copy.len(), 100);
	}

	#[test]
	fn cursors_do_not_cross_trees() {
		let mut tree: RbTree<(i32, &str)> = RbTree::new();
		let cursors: Vec<_> = (1..=5).map(|k| tree.insert((k, "v")).0).collect();

		let mut copy = tree.clone();
		for &c in &cursors {
			assert_eq!(copy.get(c), Err(Error::InvalidCursor));
			assert_eq!(copy.next(c), Err(Error::InvalidCursor));
		}
		assert_eq!(copy.erase(cursors[0]), Err(Error::InvalidCursor));
		assert_eq!(copy.len(), 5);
		assert_ne!(copy.end(), tree.end());
		assert_ne!(copy.before_begin(), tree.before_begin());

		// same slab ids, different trees.
		let mut a = IntTree::new();
		let mut b = IntTree::new();
		let (c, _) = a.insert((1, ()));
		let (d, _) = b.insert((99, ()));
		assert_eq!(c.id(), d.id());
		assert_eq!(b.erase(c), Err(Error::InvalidCursor));
		assert_eq!(b.get(a.end()), Err(Error::InvalidCursor));
		assert_eq!(b.len(), 1);
	}

	#[test]
	fn swap() {
		let mut a = IntTree::new();
		let mut b = IntTree::new();
		let (c, _) = a.insert((1, ()));
		b.insert((2, ()));
		b.insert((3, ()));
		a.swap(&mut b);
		assert_eq!(keys(&a), [2, 3]);
		assert_eq!(keys(&b), [1]);
		assert_eq!(b.get(c), Ok(&(1, ())));
	}

	#[test]
	fn reverse_order() {
		let mut tree: RbTree<(i32, ()), Greater> = RbTree::with_comparator(Greater);
		for key in [3, 1, 2] {
			tree.insert((key, ()));
		}
		tree.validate();
		assert_eq!(keys(&tree), [3, 2, 1]);
		assert_eq!(tree.get(tree.lower_bound(&2)), Ok(&(2, ())));
		assert_eq!(tree.get(tree.upper_bound(&2)), Ok(&(1, ())));
	}
}

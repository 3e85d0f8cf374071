use super::Tree;
use crate::{
	generic::node::{Keyed, Node, Side},
	Compare,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator},
	ops::{Bound, RangeBounds},
};

/// Iterator over the elements of a [`Tree`], in order.
pub struct Iter<'a, T, C, S> {
	/// The tree reference.
	tree: &'a Tree<T, C, S>,

	/// Next front node.
	front: usize,

	/// Node following the next back node.
	back: usize,

	/// Number of remaining elements.
	len: usize,
}

impl<'a, T, C, S: Slab<Node<T>>> Iter<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	pub(crate) fn new(tree: &'a Tree<T, C, S>) -> Self {
		Iter {
			tree,
			front: tree.step(tree.begin, Side::Right),
			back: tree.end,
			len: tree.len(),
		}
	}
}

impl<'a, T, C, S: Slab<Node<T>>> Iterator for Iter<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		if self.len > 0 {
			let tree = self.tree;
			let id = self.front;
			self.front = tree.step(id, Side::Right);
			self.len -= 1;
			tree.node(id).content()
		} else {
			None
		}
	}
}

impl<'a, T, C, S: Slab<Node<T>>> DoubleEndedIterator for Iter<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		if self.len > 0 {
			let tree = self.tree;
			self.back = tree.step(self.back, Side::Left);
			self.len -= 1;
			tree.node(self.back).content()
		} else {
			None
		}
	}
}

impl<'a, T, C, S: Slab<Node<T>>> FusedIterator for Iter<'a, T, C, S> where S: SimpleCollectionRef {}
impl<'a, T, C, S: Slab<Node<T>>> ExactSizeIterator for Iter<'a, T, C, S> where S: SimpleCollectionRef {}

impl<'a, T, C, S: Slab<Node<T>>> IntoIterator for &'a Tree<T, C, S>
where
	S: SimpleCollectionRef,
{
	type IntoIter = Iter<'a, T, C, S>;
	type Item = &'a T;

	#[inline]
	fn into_iter(self) -> Iter<'a, T, C, S> {
		self.iter()
	}
}

/// Checks that the bounds of `range` are ordered according to `compare`.
fn is_valid_range<Q, R, C>(compare: &C, range: &R) -> bool
where
	Q: ?Sized,
	R: RangeBounds<Q>,
	C: Compare<Q>,
{
	match (range.start_bound(), range.end_bound()) {
		(Bound::Included(start), Bound::Included(end)) => !compare.less(end, start),
		(Bound::Included(start), Bound::Excluded(end)) => !compare.less(end, start),
		(Bound::Included(_), Bound::Unbounded) => true,
		(Bound::Excluded(start), Bound::Included(end)) => !compare.less(end, start),
		(Bound::Excluded(start), Bound::Excluded(end)) => compare.less(start, end),
		(Bound::Excluded(_), Bound::Unbounded) => true,
		(Bound::Unbounded, _) => true,
	}
}

/// Double-ended iterator over a sub-range of the elements of a [`Tree`].
pub struct Range<'a, T, C, S> {
	/// The tree reference.
	tree: &'a Tree<T, C, S>,

	/// Next front node.
	front: usize,

	/// Node following the next back node.
	back: usize,
}

impl<'a, T: Keyed, C, S: Slab<Node<T>>> Range<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	pub(crate) fn new<Q: ?Sized, R>(tree: &'a Tree<T, C, S>, range: R) -> Self
	where
		T::Key: Borrow<Q>,
		C: Compare<Q>,
		R: RangeBounds<Q>,
	{
		if !is_valid_range(tree.comparator(), &range) {
			panic!("Invalid range")
		}

		let front = match range.start_bound() {
			Bound::Included(start) => tree.lower_bound(start).id(),
			Bound::Excluded(start) => tree.upper_bound(start).id(),
			Bound::Unbounded => tree.begin().id(),
		};

		let back = match range.end_bound() {
			Bound::Included(end) => tree.upper_bound(end).id(),
			Bound::Excluded(end) => tree.lower_bound(end).id(),
			Bound::Unbounded => tree.end,
		};

		Range { tree, front, back }
	}
}

impl<'a, T, C, S: Slab<Node<T>>> Iterator for Range<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		if self.front != self.back {
			let tree = self.tree;
			let id = self.front;
			self.front = tree.step(id, Side::Right);
			tree.node(id).content()
		} else {
			None
		}
	}
}

impl<'a, T, C, S: Slab<Node<T>>> DoubleEndedIterator for Range<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		if self.front != self.back {
			let tree = self.tree;
			self.back = tree.step(self.back, Side::Left);
			tree.node(self.back).content()
		} else {
			None
		}
	}
}

impl<'a, T, C, S: Slab<Node<T>>> FusedIterator for Range<'a, T, C, S> where S: SimpleCollectionRef {}

/// Owning iterator over the elements of a [`Tree`], in order.
///
/// Elements not consumed are dropped along with the iterator.
pub struct IntoIter<T, C, S> {
	tree: Tree<T, C, S>,

	/// Remaining nodes, in order.
	order: std::collections::VecDeque<usize>,
}

impl<T, C, S: SlabMut<Node<T>>> IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	pub(crate) fn new(tree: Tree<T, C, S>) -> Self {
		let mut order = std::collections::VecDeque::with_capacity(tree.len());
		let mut id = tree.step(tree.begin, Side::Right);
		while id != tree.end {
			order.push_back(id);
			id = tree.step(id, Side::Right)
		}

		IntoIter { tree, order }
	}
}

impl<T, C, S: SlabMut<Node<T>>> Iterator for IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type Item = T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.order.len(), Some(self.order.len()))
	}

	#[inline]
	fn next(&mut self) -> Option<T> {
		let id = self.order.pop_front()?;
		Some(self.tree.release(id))
	}
}

impl<T, C, S: SlabMut<Node<T>>> DoubleEndedIterator for IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		let id = self.order.pop_back()?;
		Some(self.tree.release(id))
	}
}

impl<T, C, S: SlabMut<Node<T>>> FusedIterator for IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
}

impl<T, C, S: SlabMut<Node<T>>> ExactSizeIterator for IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
}

impl<T, C, S: SlabMut<Node<T>>> IntoIterator for Tree<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type IntoIter = IntoIter<T, C, S>;
	type Item = T;

	#[inline]
	fn into_iter(self) -> IntoIter<T, C, S> {
		IntoIter::new(self)
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use crate::RbTree;

	fn tree_of(keys: impl IntoIterator<Item = i32>) -> RbTree<(i32, ())> {
		let mut tree = RbTree::new();
		for key in keys {
			tree.insert((key, ()));
		}
		tree
	}

	#[test]
	fn iter_both_ends() {
		let tree = tree_of((0..10).rev());
		let mut it = tree.iter();
		assert_eq!(it.len(), 10);
		assert_eq!(it.next(), Some(&(0, ())));
		assert_eq!(it.next_back(), Some(&(9, ())));
		assert_eq!(it.len(), 8);
		let middle: Vec<i32> = it.map(|(k, _)| *k).collect();
		assert_eq!(middle, [1, 2, 3, 4, 5, 6, 7, 8]);
	}

	#[test]
	fn range_bounds() {
		use std::ops::Bound::*;
		let tree = tree_of((0..20).map(|k| k * 2));
		let keys = |r: (std::ops::Bound<i32>, std::ops::Bound<i32>)| -> Vec<i32> {
			tree.range(r).map(|(k, _)| *k).collect()
		};

		assert_eq!(keys((Included(4), Excluded(10))), [4, 6, 8]);
		assert_eq!(keys((Excluded(4), Included(10))), [6, 8, 10]);
		assert_eq!(keys((Included(5), Included(9))), [6, 8]);
		assert_eq!(keys((Unbounded, Excluded(4))), [0, 2]);
		assert_eq!(keys((Included(34), Unbounded)), [34, 36, 38]);
		assert_eq!(keys((Included(7), Excluded(7))), Vec::<i32>::new());
		assert!(keys((Included(100), Unbounded)).is_empty());

		let back: Vec<i32> = tree.range(3..9).rev().map(|(k, _)| *k).collect();
		assert_eq!(back, [8, 6, 4]);
	}

	#[test]
	#[should_panic(expected = "Invalid range")]
	fn inverted_range() {
		let tree = tree_of(0..4);
		tree.range(3..1).count();
	}

	#[test]
	fn into_iter_is_ordered() {
		let tree = tree_of([5, 3, 8, 1]);
		let keys: Vec<i32> = tree.into_iter().map(|(k, _)| k).collect();
		assert_eq!(keys, [1, 3, 5, 8]);

		let tree = tree_of([5, 3, 8, 1]);
		let mut it = tree.into_iter();
		assert_eq!(it.next_back(), Some((8, ())));
		assert_eq!(it.next(), Some((1, ())));
		assert_eq!(it.len(), 2);
	}
}

use crate::{
	generic::{map, node::Node, tree::Cursor, OrderedMap},
	Compare, Error, Less,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	cmp::Ordering,
	hash::{Hash, Hasher},
	iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, FusedIterator},
	ops::RangeBounds,
};

/// An ordered set based on a red-black tree.
///
/// See [`OrderedMap`]'s documentation for a discussion of cursors and allocation.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the comparator, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// ```
/// use rbtree_slab::OrderedSet;
///
/// let mut set: OrderedSet<i32> = [5, 1, 4].iter().cloned().collect();
/// let (cursor, inserted) = set.insert(3);
/// assert!(inserted);
/// assert_eq!(set.get_at(set.next(cursor).unwrap()), Ok(&4));
/// assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [1, 3, 4, 5]);
/// ```
pub struct OrderedSet<T, C, S> {
	map: OrderedMap<T, (), C, S>,
}

impl<T, S> OrderedSet<T, Less, S> {
	/// Makes a new, empty set, in ascending order.
	///
	/// # Example
	///
	/// ```
	/// # #![allow(unused_mut)]
	/// use rbtree_slab::OrderedSet;
	///
	/// let mut set: OrderedSet<i32> = OrderedSet::new();
	/// ```
	#[inline]
	pub fn new() -> Self
	where
		S: Default + SlabMut<Node<(T, ())>>,
	{
		OrderedSet { map: OrderedMap::new() }
	}
}

impl<T, C, S> OrderedSet<T, C, S> {
	/// Makes a new, empty set ordered by the given comparator.
	#[inline]
	pub fn with_comparator(compare: C) -> Self
	where
		S: Default + SlabMut<Node<(T, ())>>,
	{
		OrderedSet {
			map: OrderedMap::with_comparator(compare),
		}
	}

	/// Returns the number of elements in the set.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedSet;
	///
	/// let mut v = OrderedSet::new();
	/// assert_eq!(v.len(), 0);
	/// v.insert(1);
	/// assert_eq!(v.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Returns `true` if the set contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	/// Upper bound on the number of elements the set can hold.
	#[inline]
	pub fn max_size(&self) -> usize {
		self.map.max_size()
	}

	/// Position after the last element.
	#[inline]
	pub fn end(&self) -> Cursor {
		self.map.end()
	}

	/// Position before the first element.
	#[inline]
	pub fn before_begin(&self) -> Cursor {
		self.map.before_begin()
	}

	/// Swaps the content of two sets in constant time.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		self.map.swap(&mut other.map)
	}
}

impl<T, C: Default, S: SlabMut<Node<(T, ())>> + Default> Default for OrderedSet<T, C, S> {
	#[inline]
	fn default() -> Self {
		OrderedSet {
			map: OrderedMap::default(),
		}
	}
}

impl<T, C, S: Slab<Node<(T, ())>>> OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
{
	/// Gets an iterator that visits the values in the set in ascending order.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedSet;
	///
	/// let set: OrderedSet<usize> = [3, 1, 2].iter().cloned().collect();
	/// let mut set_iter = set.iter();
	/// assert_eq!(set_iter.next(), Some(&1));
	/// assert_eq!(set_iter.next(), Some(&2));
	/// assert_eq!(set_iter.next(), Some(&3));
	/// assert_eq!(set_iter.next(), None);
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<T, C, S> {
		Iter {
			inner: self.map.keys(),
		}
	}

	/// Position of the first element, or [`OrderedSet::end`] if the set is empty.
	#[inline]
	pub fn begin(&self) -> Cursor {
		self.map.begin()
	}

	/// Position following `cursor`.
	#[inline]
	pub fn next(&self, cursor: Cursor) -> Result<Cursor, Error> {
		self.map.next(cursor)
	}

	/// Position preceding `cursor`.
	#[inline]
	pub fn prev(&self, cursor: Cursor) -> Result<Cursor, Error> {
		self.map.prev(cursor)
	}

	/// Returns the element at the given position.
	#[inline]
	pub fn get_at(&self, cursor: Cursor) -> Result<&T, Error> {
		self.map.entry_at(cursor).map(|(t, _)| t)
	}

	/// Position of the given element, or [`OrderedSet::end`] if it is absent.
	#[inline]
	pub fn find<Q: ?Sized>(&self, value: &Q) -> Cursor
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.find(value)
	}

	/// Position of the first element not less than `value`.
	#[inline]
	pub fn lower_bound<Q: ?Sized>(&self, value: &Q) -> Cursor
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.lower_bound(value)
	}

	/// Position of the first element greater than `value`.
	#[inline]
	pub fn upper_bound<Q: ?Sized>(&self, value: &Q) -> Cursor
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.upper_bound(value)
	}

	/// Positions delimiting the elements equivalent to `value`.
	#[inline]
	pub fn equal_range<Q: ?Sized>(&self, value: &Q) -> (Cursor, Cursor)
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.equal_range(value)
	}

	/// Returns `true` if the set contains a value.
	///
	/// The value may be any borrowed form of the set's value type,
	/// but the ordering on the borrowed form *must* match the
	/// ordering on the value type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedSet;
	///
	/// let set: OrderedSet<_> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.contains(&1), true);
	/// assert_eq!(set.contains(&4), false);
	/// ```
	#[inline]
	pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.contains_key(value)
	}

	/// Returns a reference to the value in the set, if any, that is equal to the given value.
	#[inline]
	pub fn get<Q: ?Sized>(&self, value: &Q) -> Option<&T>
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.get_key_value(value).map(|(t, _)| t)
	}

	/// Number of elements equivalent to `value` (0 or 1).
	#[inline]
	pub fn count<Q: ?Sized>(&self, value: &Q) -> usize
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.count(value)
	}

	/// Constructs a double-ended iterator over a sub-range of elements in the set.
	///
	/// # Panics
	///
	/// Panics if range `start > end`.
	/// Panics if range `start == end` and both bounds are `Excluded`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedSet;
	/// use std::ops::Bound::Included;
	///
	/// let mut set = OrderedSet::new();
	/// set.insert(3);
	/// set.insert(5);
	/// set.insert(8);
	/// for &elem in set.range((Included(&4), Included(&8))) {
	///     println!("{}", elem);
	/// }
	/// assert_eq!(Some(&5), set.range(4..).next());
	/// ```
	#[inline]
	pub fn range<Q: ?Sized, R>(&self, range: R) -> Range<T, C, S>
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		R: RangeBounds<Q>,
	{
		Range {
			inner: self.map.range(range),
		}
	}

	/// Returns a reference to the first value in the set, if any.
	/// This value is always the minimum of all values in the set.
	#[inline]
	pub fn first(&self) -> Option<&T> {
		self.map.first_key_value().map(|(k, _)| k)
	}

	/// Returns a reference to the last value in the set, if any.
	/// This value is always the maximum of all values in the set.
	#[inline]
	pub fn last(&self) -> Option<&T> {
		self.map.last_key_value().map(|(k, _)| k)
	}
}

impl<T, C, S: SlabMut<Node<(T, ())>>> OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	/// Clears the set, removing all values.
	#[inline]
	pub fn clear(&mut self) {
		self.map.clear()
	}

	/// Adds a value to the set, unless an equivalent one is already present.
	///
	/// Returns the position of the element equivalent to `value`
	/// and `true` if `value` has been inserted.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedSet;
	///
	/// let mut set = OrderedSet::new();
	///
	/// assert_eq!(set.insert(2).1, true);
	/// assert_eq!(set.insert(2).1, false);
	/// assert_eq!(set.len(), 1);
	/// ```
	#[inline]
	pub fn insert(&mut self, value: T) -> (Cursor, bool)
	where
		C: Compare<T>,
	{
		self.map.insert(value, ())
	}

	/// Adds a value to the set, using `hint` as a suggestion for its position.
	#[inline]
	pub fn insert_hint(&mut self, hint: Cursor, value: T) -> Cursor
	where
		C: Compare<T>,
	{
		self.map.insert_hint(hint, value, ())
	}

	/// Removes the element at the given position and returns it.
	#[inline]
	pub fn erase(&mut self, cursor: Cursor) -> Result<Option<T>, Error> {
		self.map.erase(cursor).map(|entry| entry.map(|(t, _)| t))
	}

	/// Removes every element from `first` (included) to `last` (excluded).
	#[inline]
	pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, Error> {
		self.map.erase_range(first, last)
	}

	/// If the set contains an element equal to the value, removes it from the
	/// set and drops it. Returns whether such an element was present.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedSet;
	///
	/// let mut set = OrderedSet::new();
	///
	/// set.insert(2);
	/// assert_eq!(set.remove(&2), true);
	/// assert_eq!(set.remove(&2), false);
	/// ```
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.take(value).is_some()
	}

	/// Removes and returns the value in the set, if any, that is equal to the given one.
	#[inline]
	pub fn take<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
	where
		T: Borrow<Q>,
		C: Compare<Q>,
	{
		self.map.remove_entry(value).map(|(t, _)| t)
	}

	/// Removes the first value from the set and returns it, if any.
	/// The first value is always the minimum value in the set.
	#[inline]
	pub fn pop_first(&mut self) -> Option<T> {
		self.map.pop_first().map(|kv| kv.0)
	}

	/// Removes the last value from the set and returns it, if any.
	/// The last value is always the maximum value in the set.
	#[inline]
	pub fn pop_last(&mut self) -> Option<T> {
		self.map.pop_last().map(|kv| kv.0)
	}
}

impl<T: Clone, C: Clone, S: SlabMut<Node<(T, ())>>> Clone for OrderedSet<T, C, S>
where
	S: Default + SimpleCollectionRef + SimpleCollectionMut,
{
	#[inline]
	fn clone(&self) -> Self {
		OrderedSet {
			map: self.map.clone(),
		}
	}
}

impl<T, C: Compare<T> + Default, S: SlabMut<Node<(T, ())>> + Default> FromIterator<T> for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut set = OrderedSet::default();
		set.extend(iter);
		set
	}
}

impl<T, C, S: SlabMut<Node<(T, ())>>> IntoIterator for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type Item = T;
	type IntoIter = IntoIter<T, C, S>;

	#[inline]
	fn into_iter(self) -> IntoIter<T, C, S> {
		IntoIter {
			inner: self.map.into_keys(),
		}
	}
}

impl<'a, T, C, S: Slab<Node<(T, ())>>> IntoIterator for &'a OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = &'a T;
	type IntoIter = Iter<'a, T, C, S>;

	#[inline]
	fn into_iter(self) -> Iter<'a, T, C, S> {
		self.iter()
	}
}

impl<T, C: Compare<T>, S: SlabMut<Node<(T, ())>>> Extend<T> for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for t in iter {
			self.insert(t);
		}
	}
}

impl<'a, T: 'a + Copy, C: Compare<T>, S: SlabMut<Node<(T, ())>>> Extend<&'a T> for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
		self.extend(iter.into_iter().copied());
	}
}

impl<T, L: PartialEq<T>, C, D, S: Slab<Node<(T, ())>>, U: Slab<Node<(L, ())>>> PartialEq<OrderedSet<L, D, U>>
	for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
	U: SimpleCollectionRef,
{
	#[inline]
	fn eq(&self, other: &OrderedSet<L, D, U>) -> bool {
		self.map.eq(&other.map)
	}
}

impl<T: Eq, C, S: Slab<Node<(T, ())>>> Eq for OrderedSet<T, C, S> where S: SimpleCollectionRef {}

impl<T, L: PartialOrd<T>, C, D, S: Slab<Node<(T, ())>>, U: Slab<Node<(L, ())>>> PartialOrd<OrderedSet<L, D, U>>
	for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
	U: SimpleCollectionRef,
{
	#[inline]
	fn partial_cmp(&self, other: &OrderedSet<L, D, U>) -> Option<Ordering> {
		self.map.partial_cmp(&other.map)
	}
}

impl<T: Ord, C, S: Slab<Node<(T, ())>>> Ord for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn cmp(&self, other: &Self) -> Ordering {
		self.map.cmp(&other.map)
	}
}

impl<T: Hash, C, S: Slab<Node<(T, ())>>> Hash for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn hash<H: Hasher>(&self, h: &mut H) {
		self.map.hash(h)
	}
}

impl<T: std::fmt::Debug, C, S: Slab<Node<(T, ())>>> std::fmt::Debug for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

/// Iterator over the elements of an [`OrderedSet`], in ascending order.
pub struct Iter<'a, T, C, S> {
	inner: map::Keys<'a, T, (), C, S>,
}

impl<'a, T, C, S: Slab<Node<(T, ())>>> Iterator for Iter<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		self.inner.next()
	}
}

impl<'a, T, C, S: Slab<Node<(T, ())>>> DoubleEndedIterator for Iter<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		self.inner.next_back()
	}
}

impl<'a, T, C, S: Slab<Node<(T, ())>>> FusedIterator for Iter<'a, T, C, S> where S: SimpleCollectionRef {}
impl<'a, T, C, S: Slab<Node<(T, ())>>> ExactSizeIterator for Iter<'a, T, C, S> where S: SimpleCollectionRef {}

/// Owning iterator over the elements of an [`OrderedSet`], in ascending order.
pub struct IntoIter<T, C, S> {
	inner: map::IntoKeys<T, (), C, S>,
}

impl<T, C, S: SlabMut<Node<(T, ())>>> Iterator for IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type Item = T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<T> {
		self.inner.next()
	}
}

impl<T, C, S: SlabMut<Node<(T, ())>>> DoubleEndedIterator for IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		self.inner.next_back()
	}
}

impl<T, C, S: SlabMut<Node<(T, ())>>> FusedIterator for IntoIter<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
}

/// Double-ended iterator over a sub-range of the elements of an [`OrderedSet`].
pub struct Range<'a, T, C, S> {
	inner: map::Range<'a, T, (), C, S>,
}

impl<'a, T, C, S: Slab<Node<(T, ())>>> Iterator for Range<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<'a, T, C, S: Slab<Node<(T, ())>>> DoubleEndedIterator for Range<'a, T, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		self.inner.next_back().map(|(k, _)| k)
	}
}

impl<'a, T, C, S: Slab<Node<(T, ())>>> FusedIterator for Range<'a, T, C, S> where S: SimpleCollectionRef {}

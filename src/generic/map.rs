use crate::{
	generic::{
		node::Node,
		tree::{self, Cursor, Tree},
	},
	Compare, Error, Less,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	cmp::Ordering,
	hash::{Hash, Hasher},
	iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, FusedIterator},
	ops::{Index, RangeBounds},
};

/// An ordered map based on a red-black tree.
///
/// Entries are `(key, value)` pairs stored in the nodes of a [`Tree`], itself
/// allocated in a slab of [`Node`]s.
/// Keys are ordered by the comparator `C` (by default [`Less`](crate::Less),
/// the ascending [`Ord`] order) and are unique.
///
/// # Basic usage
///
/// ```
/// use rbtree_slab::OrderedMap;
///
/// let mut scores = OrderedMap::new();
/// scores.insert("carol", 7);
/// scores.insert("alice", 12);
/// scores.insert("bob", 3);
///
/// // `insert` never overwrites an existing entry.
/// let (_, inserted) = scores.insert("bob", 100);
/// assert!(!inserted);
/// assert_eq!(scores["bob"], 3);
///
/// // `insert_or_replace` does.
/// assert_eq!(scores.insert_or_replace("bob", 4), Some(3));
///
/// *scores.get_or_insert_default("dave") += 1;
///
/// let names: Vec<_> = scores.keys().cloned().collect();
/// assert_eq!(names, ["alice", "bob", "carol", "dave"]);
/// ```
///
/// # Cursors
///
/// Positions in the map are denoted by [`Cursor`]s.
/// A cursor is a copyable handle that stays valid until the entry it denotes is
/// erased, whatever happens to the other entries.
/// The map has two extra positions, [`OrderedMap::end`] after the last entry and
/// [`OrderedMap::before_begin`] before the first one.
///
/// ```
/// use rbtree_slab::OrderedMap;
///
/// let mut map: OrderedMap<i32, char> = (0..10).zip('a'..).collect();
///
/// // erase every entry in [2, 6).
/// let first = map.lower_bound(&2);
/// let last = map.lower_bound(&6);
/// map.erase_range(first, last).unwrap();
///
/// let mut cursor = map.begin();
/// let mut keys = Vec::new();
/// while cursor != map.end() {
///     keys.push(*map.entry_at(cursor).unwrap().0);
///     cursor = map.next(cursor).unwrap();
/// }
/// assert_eq!(keys, [0, 1, 6, 7, 8, 9]);
/// ```
///
/// ## Custom allocation
///
/// This data structure is built on top of a slab data structure,
/// but is agnostic of the actual slab implementation which is taken as parameter (`S`).
/// If the `std-slab` feature is enabled,
/// the [`slab::Slab`] implementation is used by default by reexporting
/// `OrderedMap<K, V, C, slab::Slab<_>>` at the root of the crate.
/// Any container implementing "slab-like" functionalities can be used.
pub struct OrderedMap<K, V, C, S> {
	tree: Tree<(K, V), C, S>,
}

impl<K: Clone, V: Clone, C: Clone, S: SlabMut<Node<(K, V)>>> Clone for OrderedMap<K, V, C, S>
where
	S: Default + SimpleCollectionRef + SimpleCollectionMut,
{
	#[inline]
	fn clone(&self) -> Self {
		OrderedMap {
			tree: self.tree.clone(),
		}
	}
}

impl<K, V, S> OrderedMap<K, V, Less, S> {
	/// Create a new empty map, in ascending key order.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	///
	/// // entries can now be inserted into the empty map
	/// map.insert(1, "a");
	/// ```
	#[inline]
	pub fn new() -> OrderedMap<K, V, Less, S>
	where
		S: Default + SlabMut<Node<(K, V)>>,
	{
		OrderedMap { tree: Tree::new() }
	}
}

impl<K, V, C, S> OrderedMap<K, V, C, S> {
	/// Create a new empty map ordered by the given comparator.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::{Greater, OrderedMap};
	///
	/// let mut map = OrderedMap::with_comparator(Greater);
	/// map.insert(1, "a");
	/// map.insert(2, "b");
	/// assert_eq!(map.first_key_value(), Some((&2, &"b")));
	/// ```
	#[inline]
	pub fn with_comparator(compare: C) -> OrderedMap<K, V, C, S>
	where
		S: Default + SlabMut<Node<(K, V)>>,
	{
		OrderedMap {
			tree: Tree::with_comparator(compare),
		}
	}

	/// Returns `true` if the map contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.tree.is_empty()
	}

	/// Returns the number of elements in the map.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut a = OrderedMap::new();
	/// assert_eq!(a.len(), 0);
	/// a.insert(1, "a");
	/// assert_eq!(a.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.tree.len()
	}

	/// Upper bound on the number of entries the map can hold.
	#[inline]
	pub fn max_size(&self) -> usize {
		self.tree.max_size()
	}

	/// Comparator ordering the keys.
	#[inline]
	pub fn comparator(&self) -> &C {
		self.tree.comparator()
	}

	/// Position after the last entry.
	#[inline]
	pub fn end(&self) -> Cursor {
		self.tree.end()
	}

	/// Position before the first entry.
	#[inline]
	pub fn before_begin(&self) -> Cursor {
		self.tree.before_begin()
	}

	/// Swaps the content of two maps in constant time.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		self.tree.swap(&mut other.tree)
	}

	/// Underlying tree.
	#[inline]
	pub fn tree(&self) -> &Tree<(K, V), C, S> {
		&self.tree
	}
}

impl<K, V, C, S: Slab<Node<(K, V)>>> OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
{
	/// Position of the first entry, or [`OrderedMap::end`] if the map is empty.
	#[inline]
	pub fn begin(&self) -> Cursor {
		self.tree.begin()
	}

	/// Position following `cursor`.
	#[inline]
	pub fn next(&self, cursor: Cursor) -> Result<Cursor, Error> {
		self.tree.next(cursor)
	}

	/// Position preceding `cursor`.
	#[inline]
	pub fn prev(&self, cursor: Cursor) -> Result<Cursor, Error> {
		self.tree.prev(cursor)
	}

	/// Returns the entry at the given position.
	#[inline]
	pub fn entry_at(&self, cursor: Cursor) -> Result<(&K, &V), Error> {
		self.tree.get(cursor).map(|(k, v)| (k, v))
	}

	/// Returns the position of the entry with the given key,
	/// or [`OrderedMap::end`] if there is none.
	#[inline]
	pub fn find<Q: ?Sized>(&self, key: &Q) -> Cursor
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.tree.find(key)
	}

	/// Position of the first entry whose key is not less than `key`.
	#[inline]
	pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Cursor
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.tree.lower_bound(key)
	}

	/// Position of the first entry whose key is greater than `key`.
	#[inline]
	pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Cursor
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.tree.upper_bound(key)
	}

	/// Positions delimiting the entries with the given key: `(lower_bound, upper_bound)`.
	///
	/// Since keys are unique, the range holds at most one entry.
	#[inline]
	pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> (Cursor, Cursor)
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		(self.tree.lower_bound(key), self.tree.upper_bound(key))
	}

	/// Returns a reference to the value corresponding to the key.
	///
	/// The key may be any borrowed form of the map's key type, but the ordering
	/// on the borrowed form *must* match the ordering on the key type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get(&1), Some(&"a"));
	/// assert_eq!(map.get(&2), None);
	/// ```
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.get_key_value(key).map(|(_, v)| v)
	}

	/// Returns the key-value pair corresponding to the supplied key.
	#[inline]
	pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.entry_at(self.tree.find(key)).ok()
	}

	/// Returns a reference to the value corresponding to the key,
	/// or [`Error::KeyNotFound`].
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::{Error, OrderedMap};
	///
	/// let mut map = OrderedMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.at(&1), Ok(&"a"));
	/// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
	/// ```
	#[inline]
	pub fn at<Q: ?Sized>(&self, key: &Q) -> Result<&V, Error>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.get(key).ok_or(Error::KeyNotFound)
	}

	/// Returns `true` if the map contains a value for the specified key.
	#[inline]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.tree.contains(key)
	}

	/// Number of entries with the given key (0 or 1).
	#[inline]
	pub fn count<Q: ?Sized>(&self, key: &Q) -> usize
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.contains_key(key) as usize
	}

	/// Returns the first key-value pair in the map.
	/// The key in this pair is the minimum key in the map.
	#[inline]
	pub fn first_key_value(&self) -> Option<(&K, &V)> {
		self.tree.first().map(|(k, v)| (k, v))
	}

	/// Returns the last key-value pair in the map.
	/// The key in this pair is the maximum key in the map.
	#[inline]
	pub fn last_key_value(&self) -> Option<(&K, &V)> {
		self.tree.last().map(|(k, v)| (k, v))
	}

	/// Gets an iterator over the entries of the map, sorted by key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	/// map.insert(3, "c");
	/// map.insert(2, "b");
	/// map.insert(1, "a");
	///
	/// for (key, value) in map.iter() {
	///     println!("{}: {}", key, value);
	/// }
	///
	/// let (first_key, first_value) = map.iter().next().unwrap();
	/// assert_eq!((*first_key, *first_value), (1, "a"));
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<K, V, C, S> {
		Iter {
			inner: self.tree.iter(),
		}
	}

	/// Gets an iterator over the keys of the map, in sorted order.
	#[inline]
	pub fn keys(&self) -> Keys<K, V, C, S> {
		Keys { inner: self.iter() }
	}

	/// Gets an iterator over the values of the map, in order by key.
	#[inline]
	pub fn values(&self) -> Values<K, V, C, S> {
		Values { inner: self.iter() }
	}

	/// Constructs a double-ended iterator over a sub-range of entries in the map.
	///
	/// # Panics
	///
	/// Panics if range `start > end`.
	/// Panics if range `start == end` and both bounds are `Excluded`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	/// use std::ops::Bound::Included;
	///
	/// let mut map = OrderedMap::new();
	/// map.insert(3, "a");
	/// map.insert(5, "b");
	/// map.insert(8, "c");
	/// for (&key, &value) in map.range((Included(&4), Included(&8))) {
	///     println!("{}: {}", key, value);
	/// }
	/// assert_eq!(Some((&5, &"b")), map.range(4..).next());
	/// ```
	#[inline]
	pub fn range<Q: ?Sized, R>(&self, range: R) -> Range<K, V, C, S>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		R: RangeBounds<Q>,
	{
		Range {
			inner: self.tree.range(range),
		}
	}

	/// Write the map in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
	{
		self.tree.dot_write(f)
	}
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	/// Clears the map, removing all elements.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut a = OrderedMap::new();
	/// a.insert(1, "a");
	/// a.clear();
	/// assert!(a.is_empty());
	/// ```
	#[inline]
	pub fn clear(&mut self) {
		self.tree.clear()
	}

	/// Returns a mutable reference to the value at the given position.
	#[inline]
	pub fn value_at_mut(&mut self, cursor: Cursor) -> Result<&mut V, Error> {
		self.tree.get_mut(cursor).map(|(_, v)| v)
	}

	/// Inserts a key-value pair into the map, unless the key is already present.
	///
	/// Returns the position of the entry with the given key and `true` if the
	/// pair has been inserted. An existing entry is left untouched and `value`
	/// is dropped.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	/// let (a, inserted) = map.insert(37, "a");
	/// assert!(inserted);
	///
	/// let (b, inserted) = map.insert(37, "b");
	/// assert!(!inserted);
	/// assert_eq!(a, b);
	/// assert_eq!(map[&37], "a");
	/// ```
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool)
	where
		C: Compare<K>,
	{
		self.tree.insert((key, value))
	}

	/// Inserts a key-value pair, using `hint` as a suggestion for its position.
	///
	/// The pair is linked right before `hint` when it belongs there.
	/// Returns the position of the entry with the given key.
	#[inline]
	pub fn insert_hint(&mut self, hint: Cursor, key: K, value: V) -> Cursor
	where
		C: Compare<K>,
	{
		self.tree.insert_hint(hint, (key, value))
	}

	/// Inserts a key-value pair into the map, replacing the value of an
	/// existing entry.
	///
	/// Returns the replaced value, if any. The key itself is not updated.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	/// assert_eq!(map.insert_or_replace(37, "a"), None);
	/// assert_eq!(map.insert_or_replace(37, "b"), Some("a"));
	/// assert_eq!(map[&37], "b");
	/// ```
	#[inline]
	pub fn insert_or_replace(&mut self, key: K, value: V) -> Option<V>
	where
		C: Compare<K>,
	{
		let cursor = self.tree.find(&key);
		match self.tree.get_mut(cursor) {
			Ok((_, v)) => Some(std::mem::replace(v, value)),
			Err(_) => {
				self.tree.insert((key, value));
				None
			}
		}
	}

	/// Returns a mutable reference to the value of the given key,
	/// inserting `V::default()` first if the key is absent.
	#[inline]
	pub fn get_or_insert_default(&mut self, key: K) -> &mut V
	where
		C: Compare<K>,
		V: Default,
	{
		let mut cursor = self.tree.find(&key);
		if cursor == self.tree.end() {
			cursor = self.tree.insert((key, V::default())).0
		}

		match self.tree.get_mut(cursor) {
			Ok((_, v)) => v,
			Err(_) => unreachable!("the entry has just been found or inserted"),
		}
	}

	/// Returns a mutable reference to the value corresponding to the key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	/// map.insert(1, "a");
	/// if let Some(x) = map.get_mut(&1) {
	///     *x = "b";
	/// }
	/// assert_eq!(map[&1], "b");
	/// ```
	#[inline]
	pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		let cursor = self.tree.find(key);
		self.value_at_mut(cursor).ok()
	}

	/// Returns a mutable reference to the value corresponding to the key,
	/// or [`Error::KeyNotFound`].
	#[inline]
	pub fn at_mut<Q: ?Sized>(&mut self, key: &Q) -> Result<&mut V, Error>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.get_mut(key).ok_or(Error::KeyNotFound)
	}

	/// Removes the entry at the given position and returns it.
	///
	/// Returns `Ok(None)` for [`OrderedMap::end`] and [`OrderedMap::before_begin`].
	#[inline]
	pub fn erase(&mut self, cursor: Cursor) -> Result<Option<(K, V)>, Error> {
		self.tree.erase(cursor)
	}

	/// Removes every entry from `first` (included) to `last` (excluded).
	///
	/// Returns `last`. A `first` on [`OrderedMap::before_begin`] starts at the
	/// first entry. Stops early when reaching the end, so a `last` that does
	/// not follow `first` erases up to the end of the map.
	pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, Error> {
		if !self.tree.is_live(last) {
			return Err(Error::InvalidCursor);
		}

		let mut current = first;
		if current == self.tree.before_begin() && current != last {
			current = self.tree.next(current)?
		}

		while current != last {
			let next = self.tree.next(current)?;
			if self.tree.erase(current)?.is_none() {
				break;
			}
			current = next
		}

		Ok(last)
	}

	/// Removes a key from the map, returning the value at the key if the key
	/// was previously in the map.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.remove(&1), Some("a"));
	/// assert_eq!(map.remove(&1), None);
	/// ```
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.remove_entry(key).map(|(_, v)| v)
	}

	/// Removes a key from the map, returning the stored key and value if the key
	/// was previously in the map.
	#[inline]
	pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
	{
		self.tree.remove(key)
	}

	/// Removes and returns the first element in the map.
	/// The key of this element is the minimum key that was in the map.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::OrderedMap;
	///
	/// let mut map = OrderedMap::new();
	/// map.insert(1, "a");
	/// map.insert(2, "b");
	/// while let Some((key, _val)) = map.pop_first() {
	///     assert!(map.iter().all(|(k, _v)| *k > key));
	/// }
	/// assert!(map.is_empty());
	/// ```
	#[inline]
	pub fn pop_first(&mut self) -> Option<(K, V)> {
		self.tree.pop_first()
	}

	/// Removes and returns the last element in the map.
	/// The key of this element is the maximum key that was in the map.
	#[inline]
	pub fn pop_last(&mut self) -> Option<(K, V)> {
		self.tree.pop_last()
	}

	/// Creates a consuming iterator visiting all the keys, in sorted order.
	#[inline]
	pub fn into_keys(self) -> IntoKeys<K, V, C, S> {
		IntoKeys {
			inner: self.into_iter(),
		}
	}

	/// Creates a consuming iterator visiting all the values, in order by key.
	#[inline]
	pub fn into_values(self) -> IntoValues<K, V, C, S> {
		IntoValues {
			inner: self.into_iter(),
		}
	}
}

impl<K, V, C: Default, S: SlabMut<Node<(K, V)>> + Default> Default for OrderedMap<K, V, C, S> {
	#[inline]
	fn default() -> Self {
		OrderedMap::with_comparator(C::default())
	}
}

impl<K, Q: ?Sized, V, C: Compare<Q>, S: Slab<Node<(K, V)>>> Index<&Q> for OrderedMap<K, V, C, S>
where
	K: Borrow<Q>,
	S: SimpleCollectionRef,
{
	type Output = V;

	/// Returns a reference to the value corresponding to the supplied key.
	///
	/// # Panics
	///
	/// Panics if the key is not present in the map.
	#[inline]
	fn index(&self, key: &Q) -> &V {
		self.get(key).expect("no entry found for key")
	}
}

impl<K, L: PartialEq<K>, V, W: PartialEq<V>, C, D, S: Slab<Node<(K, V)>>, T: Slab<Node<(L, W)>>>
	PartialEq<OrderedMap<L, W, D, T>> for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
	T: SimpleCollectionRef,
{
	fn eq(&self, other: &OrderedMap<L, W, D, T>) -> bool {
		self.len() == other.len() && self.iter().zip(other.iter()).all(|((k, v), (l, w))| l == k && w == v)
	}
}

impl<K: Eq, V: Eq, C, S: Slab<Node<(K, V)>>> Eq for OrderedMap<K, V, C, S> where S: SimpleCollectionRef {}

impl<K, L: PartialOrd<K>, V, W: PartialOrd<V>, C, D, S: Slab<Node<(K, V)>>, T: Slab<Node<(L, W)>>>
	PartialOrd<OrderedMap<L, W, D, T>> for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
	T: SimpleCollectionRef,
{
	fn partial_cmp(&self, other: &OrderedMap<L, W, D, T>) -> Option<Ordering> {
		let mut it1 = self.iter();
		let mut it2 = other.iter();

		loop {
			match (it1.next(), it2.next()) {
				(None, None) => return Some(Ordering::Equal),
				(_, None) => return Some(Ordering::Greater),
				(None, _) => return Some(Ordering::Less),
				(Some((k, v)), Some((l, w))) => match l.partial_cmp(k) {
					Some(Ordering::Greater) => return Some(Ordering::Less),
					Some(Ordering::Less) => return Some(Ordering::Greater),
					Some(Ordering::Equal) => match w.partial_cmp(v) {
						Some(Ordering::Greater) => return Some(Ordering::Less),
						Some(Ordering::Less) => return Some(Ordering::Greater),
						Some(Ordering::Equal) => (),
						None => return None,
					},
					None => return None,
				},
			}
		}
	}
}

impl<K: Ord, V: Ord, C, S: Slab<Node<(K, V)>>> Ord for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
{
	fn cmp(&self, other: &OrderedMap<K, V, C, S>) -> Ordering {
		self.iter().cmp(other.iter())
	}
}

impl<K: Hash, V: Hash, C, S: Slab<Node<(K, V)>>> Hash for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn hash<H: Hasher>(&self, h: &mut H) {
		for (k, v) in self {
			k.hash(h);
			v.hash(h);
		}
	}
}

impl<K: std::fmt::Debug, V: std::fmt::Debug, C, S: Slab<Node<(K, V)>>> std::fmt::Debug
	for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<K, V, C: Compare<K> + Default, S: SlabMut<Node<(K, V)>> + Default> FromIterator<(K, V)>
	for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<I>(iter: I) -> OrderedMap<K, V, C, S>
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut map = OrderedMap::with_comparator(C::default());
		map.extend(iter);
		map
	}
}

impl<K, V, C: Compare<K>, S: SlabMut<Node<(K, V)>>> Extend<(K, V)> for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	/// Inserts every pair. Later values replace earlier ones with the same key.
	#[inline]
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in iter {
			self.insert_or_replace(key, value);
		}
	}
}

impl<'a, K: Copy, V: Copy, C: Compare<K>, S: SlabMut<Node<(K, V)>>> Extend<(&'a K, &'a V)>
	for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = (&'a K, &'a V)>,
	{
		self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> IntoIterator for &'a OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
{
	type IntoIter = Iter<'a, K, V, C, S>;
	type Item = (&'a K, &'a V);

	#[inline]
	fn into_iter(self) -> Iter<'a, K, V, C, S> {
		self.iter()
	}
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> IntoIterator for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type IntoIter = IntoIter<K, V, C, S>;
	type Item = (K, V);

	#[inline]
	fn into_iter(self) -> IntoIter<K, V, C, S> {
		IntoIter {
			inner: self.tree.into_iter(),
		}
	}
}

/// Iterator over the entries of an [`OrderedMap`], sorted by key.
pub struct Iter<'a, K, V, C, S> {
	inner: tree::Iter<'a, (K, V), C, S>,
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> Iterator for Iter<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = (&'a K, &'a V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a V)> {
		self.inner.next().map(|(k, v)| (k, v))
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> DoubleEndedIterator for Iter<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
		self.inner.next_back().map(|(k, v)| (k, v))
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> FusedIterator for Iter<'a, K, V, C, S> where S: SimpleCollectionRef {}
impl<'a, K, V, C, S: Slab<Node<(K, V)>>> ExactSizeIterator for Iter<'a, K, V, C, S> where
	S: SimpleCollectionRef
{
}

/// Iterator over the keys of an [`OrderedMap`], in sorted order.
pub struct Keys<'a, K, V, C, S> {
	inner: Iter<'a, K, V, C, S>,
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> Iterator for Keys<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = &'a K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a K> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> DoubleEndedIterator for Keys<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a K> {
		self.inner.next_back().map(|(k, _)| k)
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> FusedIterator for Keys<'a, K, V, C, S> where S: SimpleCollectionRef {}
impl<'a, K, V, C, S: Slab<Node<(K, V)>>> ExactSizeIterator for Keys<'a, K, V, C, S> where
	S: SimpleCollectionRef
{
}

/// Iterator over the values of an [`OrderedMap`], in order by key.
pub struct Values<'a, K, V, C, S> {
	inner: Iter<'a, K, V, C, S>,
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> Iterator for Values<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = &'a V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> DoubleEndedIterator for Values<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a V> {
		self.inner.next_back().map(|(_, v)| v)
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> FusedIterator for Values<'a, K, V, C, S> where S: SimpleCollectionRef {}
impl<'a, K, V, C, S: Slab<Node<(K, V)>>> ExactSizeIterator for Values<'a, K, V, C, S> where
	S: SimpleCollectionRef
{
}

/// Double-ended iterator over a sub-range of the entries of an [`OrderedMap`].
pub struct Range<'a, K, V, C, S> {
	inner: tree::Range<'a, (K, V), C, S>,
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> Iterator for Range<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	type Item = (&'a K, &'a V);

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a V)> {
		self.inner.next().map(|(k, v)| (k, v))
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> DoubleEndedIterator for Range<'a, K, V, C, S>
where
	S: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
		self.inner.next_back().map(|(k, v)| (k, v))
	}
}

impl<'a, K, V, C, S: Slab<Node<(K, V)>>> FusedIterator for Range<'a, K, V, C, S> where S: SimpleCollectionRef {}

/// Owning iterator over the entries of an [`OrderedMap`], sorted by key.
pub struct IntoIter<K, V, C, S> {
	inner: tree::IntoIter<(K, V), C, S>,
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> Iterator for IntoIter<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type Item = (K, V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<(K, V)> {
		self.inner.next()
	}
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> DoubleEndedIterator for IntoIter<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<(K, V)> {
		self.inner.next_back()
	}
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> FusedIterator for IntoIter<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
}
impl<K, V, C, S: SlabMut<Node<(K, V)>>> ExactSizeIterator for IntoIter<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
}

/// Owning iterator over the keys of an [`OrderedMap`], in sorted order.
pub struct IntoKeys<K, V, C, S> {
	inner: IntoIter<K, V, C, S>,
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> Iterator for IntoKeys<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type Item = K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<K> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> DoubleEndedIterator for IntoKeys<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<K> {
		self.inner.next_back().map(|(k, _)| k)
	}
}

/// Owning iterator over the values of an [`OrderedMap`], in order by key.
pub struct IntoValues<K, V, C, S> {
	inner: IntoIter<K, V, C, S>,
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> Iterator for IntoValues<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	type Item = V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<K, V, C, S: SlabMut<Node<(K, V)>>> DoubleEndedIterator for IntoValues<K, V, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<V> {
		self.inner.next_back().map(|(_, v)| v)
	}
}

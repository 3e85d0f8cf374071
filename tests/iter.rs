use rbtree_slab::{Error, OrderedMap, OrderedSet};
use std::{cell::Cell, rc::Rc};

#[test]
pub fn iter() {
	let mut map = OrderedMap::new();
	for i in (0..10).rev() {
		map.insert(i, i * i);
	}

	let mut i = 0;
	for (key, value) in &map {
		assert_eq!(*key, i);
		assert_eq!(*value, i * i);
		i += 1;
	}

	assert_eq!(i, 10);
	assert_eq!(map.iter().len(), 10);
	assert!(map.iter().rev().map(|(k, _)| *k).eq((0..10).rev()));
}

/// Drop counter.
struct Element {
	counter: Rc<Cell<usize>>,
	value: i32,
}

impl Element {
	fn new(counter: &Rc<Cell<usize>>, value: i32) -> Self {
		Element {
			counter: counter.clone(),
			value,
		}
	}
}

impl Drop for Element {
	fn drop(&mut self) {
		self.counter.set(self.counter.get() + 1);
	}
}

#[test]
pub fn into_iter() {
	let counter = Rc::new(Cell::new(0));
	let mut map = OrderedMap::new();
	for i in 0..100 {
		map.insert(i, Element::new(&counter, i));
	}

	for (key, value) in map {
		assert_eq!(key, value.value);
	}

	assert_eq!(counter.get(), 100);
}

#[test]
pub fn into_iter_partial() {
	let counter = Rc::new(Cell::new(0));
	let mut map = OrderedMap::new();
	for i in 0..100 {
		map.insert(i, Element::new(&counter, i));
	}

	let mut it = map.into_iter();
	assert_eq!(it.next().map(|(k, _)| k), Some(0));
	assert_eq!(it.next_back().map(|(k, _)| k), Some(99));
	assert_eq!(counter.get(), 2);
	drop(it);

	assert_eq!(counter.get(), 100);
}

#[test]
pub fn clear_drops_everything() {
	let counter = Rc::new(Cell::new(0));
	let mut map = OrderedMap::new();
	for i in 0..50 {
		map.insert(i, Element::new(&counter, i));
	}

	// rejected duplicates are dropped right away.
	map.insert(0, Element::new(&counter, -1));
	assert_eq!(counter.get(), 1);

	map.clear();
	assert_eq!(counter.get(), 51);
	assert!(map.is_empty());
	assert_eq!(map.begin(), map.end());
}

#[test]
pub fn cursor_walk() {
	let set: OrderedSet<i32> = (0..20).map(|i| i * 3).collect();

	let mut forward = Vec::new();
	let mut cursor = set.next(set.before_begin()).unwrap();
	while cursor != set.end() {
		forward.push(*set.get_at(cursor).unwrap());
		cursor = set.next(cursor).unwrap();
	}
	assert_eq!(forward, set.iter().cloned().collect::<Vec<_>>());

	// the end sentinel is absorbing forward.
	assert_eq!(set.next(set.end()), Ok(set.end()));

	let mut backward = Vec::new();
	let mut cursor = set.prev(set.end()).unwrap();
	while cursor != set.before_begin() {
		backward.push(*set.get_at(cursor).unwrap());
		cursor = set.prev(cursor).unwrap();
	}
	backward.reverse();
	assert_eq!(backward, forward);

	// the begin sentinel is absorbing backward.
	assert_eq!(set.prev(set.before_begin()), Ok(set.before_begin()));
	assert_eq!(set.get_at(set.before_begin()), Err(Error::Sentinel));
}

#[test]
pub fn empty_cursors() {
	let set: OrderedSet<i32> = OrderedSet::new();
	assert_eq!(set.begin(), set.end());
	assert_eq!(set.next(set.before_begin()), Ok(set.end()));
	assert_eq!(set.prev(set.end()), Ok(set.before_begin()));
	assert!(set.iter().next().is_none());
	assert!(set.iter().next_back().is_none());
}

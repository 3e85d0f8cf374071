use rbtree_slab::{OrderedMap, OrderedSet};
use std::ops::{
	Bound::{self, Excluded, Included, Unbounded},
	RangeBounds,
};

fn range_keys(map: &OrderedMap<i32, i32>, range: impl RangeBounds<i32>) -> Vec<i32> {
	map.range(range)
		.map(|(&k, &v)| {
			assert_eq!(k, v);
			k
		})
		.collect()
}

/// Checks every combination of bounds around both ends of `1..=size`.
fn check_edges(size: i32) {
	let all: Vec<i32> = (1..=size).collect();
	let (first, last) = (vec![1], vec![size]);
	let none: Vec<i32> = Vec::new();
	let map: OrderedMap<i32, i32> = all.iter().map(|&i| (i, i)).collect();

	let whole = [
		(Excluded(0), Excluded(size + 1)),
		(Excluded(0), Included(size)),
		(Included(0), Unbounded),
		(Included(1), Included(size + 1)),
		(Unbounded, Excluded(size + 1)),
		(Unbounded, Unbounded),
	];
	for range in whole {
		assert_eq!(range_keys(&map, range), all);
	}

	let empty = [
		(Excluded(0), Excluded(1)),
		(Excluded(0), Included(0)),
		(Included(0), Included(0)),
		(Unbounded, Excluded(1)),
		(Excluded(size), Unbounded),
		(Included(size + 1), Included(size + 1)),
	];
	for range in empty {
		assert_eq!(range_keys(&map, range), none);
	}

	let firsts = [
		(Excluded(0), Excluded(2)),
		(Included(0), Included(1)),
		(Included(1), Excluded(2)),
		(Unbounded, Included(1)),
	];
	for range in firsts {
		assert_eq!(range_keys(&map, range), first);
	}

	let lasts = [
		(Excluded(size - 1), Excluded(size + 1)),
		(Included(size), Included(size)),
		(Excluded(size - 1), Unbounded),
	];
	for range in lasts {
		assert_eq!(range_keys(&map, range), last);
	}
}

#[test]
fn range_small() {
	check_edges(4);

	let map: OrderedMap<i32, i32> = (1..=4).map(|i| (i, i)).collect();
	assert_eq!(range_keys(&map, ..3), [1, 2]);
	assert_eq!(range_keys(&map, 3..), [3, 4]);
	assert_eq!(range_keys(&map, 2..=3), [2, 3]);
}

#[test]
fn range_large() {
	check_edges(200);
}

#[test]
fn range_all_pairs() {
	let size = 100;
	let map: OrderedMap<i32, i32> = (0..size).map(|i| (i, i)).collect();

	for i in 0..size {
		for j in i..size {
			let forward: Vec<i32> = map.range(i..=j).map(|(k, _)| *k).collect();
			assert!(forward.iter().cloned().eq(i..=j));

			let backward: Vec<i32> = map.range(i..j).rev().map(|(k, _)| *k).collect();
			assert!(backward.into_iter().eq((i..j).rev()));
		}
	}
}

#[test]
fn range_bounds_by_reference() {
	let map: OrderedMap<u32, u32> = (0..1000).map(|i| (i, i)).collect();

	fn test(map: &OrderedMap<u32, u32>, min: Bound<&u32>, max: Bound<&u32>, expected: usize) {
		assert_eq!(map.range((min, max)).count(), expected)
	}

	test(&map, Included(&0), Excluded(&1000), 1000);
	test(&map, Unbounded, Included(&999), 1000);
	test(&map, Excluded(&0), Unbounded, 999);
	test(&map, Included(&10), Excluded(&20), 10);
}

#[test]
fn range_borrowed_key() {
	let mut map = OrderedMap::new();
	map.insert("aardvark".to_string(), 1);
	map.insert("baboon".to_string(), 2);
	map.insert("coyote".to_string(), 3);
	map.insert("dingo".to_string(), 4);

	let mut iter = map.range::<str, _>((Included("b"), Excluded("d")));
	assert_eq!(iter.next(), Some((&"baboon".to_string(), &2)));
	assert_eq!(iter.next(), Some((&"coyote".to_string(), &3)));
	assert_eq!(iter.next(), None);
}

#[test]
fn range_inclusive_max_value() {
	let max = usize::MAX;
	let mut map = OrderedMap::new();
	map.insert(max, 0);
	assert_eq!(map.range(max..=max).collect::<Vec<_>>(), [(&max, &0)]);
}

#[test]
fn equal_bounds() {
	let set: OrderedSet<i32> = (0..5).collect();
	assert_eq!(set.range((Included(2), Excluded(2))).next(), None);
	assert_eq!(set.range((Excluded(2), Included(2))).next(), None);
	assert_eq!(set.range((Included(2), Included(2))).next(), Some(&2));
}

#[test]
#[should_panic(expected = "Invalid range")]
fn equal_excluded_bounds() {
	let set: OrderedSet<i32> = (0..5).collect();
	let _ = set.range((Excluded(2), Excluded(2)));
}

#[test]
#[should_panic(expected = "Invalid range")]
fn backward_range() {
	let mut map = OrderedMap::new();
	map.insert(3, "a");
	map.insert(5, "b");
	map.insert(8, "c");

	let _ = map.range((Included(&8), Included(&3)));
}

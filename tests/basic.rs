use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use rbtree_slab::{Error, OrderedMap, RbTree};
use std::collections::BTreeMap;

const SEED: u64 = 0x5eed;

fn random_items(len: usize) -> Vec<(u32, u32)> {
	let mut rng = SmallRng::seed_from_u64(SEED);
	(0..len).map(|_| (rng.gen_range(0..10_000), rng.gen())).collect()
}

#[test]
pub fn insert() {
	let mut map: OrderedMap<u32, u32> = OrderedMap::new();
	let mut reference = BTreeMap::new();

	for (key, value) in random_items(500) {
		let (cursor, inserted) = map.insert(key, value);
		let expected = !reference.contains_key(&key);
		reference.entry(key).or_insert(value);
		assert_eq!(inserted, expected);
		assert_eq!(map.entry_at(cursor), Ok((&key, &reference[&key])));
		map.tree().validate();
	}

	assert_eq!(map.len(), reference.len());
	assert!(map.iter().eq(reference.iter()));
}

#[test]
pub fn remove() {
	let mut map: OrderedMap<u32, u32> = OrderedMap::new();
	let mut items = random_items(500);

	for (key, value) in &items {
		map.insert_or_replace(*key, *value);
	}

	let mut rng = SmallRng::seed_from_u64(SEED + 1);
	items.shuffle(&mut rng);

	for (key, _) in &items {
		map.remove(key);
		assert!(!map.contains_key(key));
		map.tree().validate();
	}

	assert!(map.is_empty());
	assert_eq!(map.begin(), map.end());
}

#[test]
pub fn random_operations() {
	let mut rng = SmallRng::seed_from_u64(SEED + 2);
	let mut map: OrderedMap<u16, u32> = OrderedMap::new();
	let mut reference = BTreeMap::new();

	for _ in 0..5000 {
		let key = rng.gen_range(0..512);
		match rng.gen_range(0..4) {
			0 | 1 => {
				let value = rng.gen();
				assert_eq!(map.insert_or_replace(key, value), reference.insert(key, value))
			}
			2 => assert_eq!(map.remove(&key), reference.remove(&key)),
			_ => {
				let cursor = map.lower_bound(&key);
				let expected = reference.range(key..).next();
				assert_eq!(map.entry_at(cursor).ok(), expected);
			}
		}
	}

	map.tree().validate();
	assert!(map.iter().eq(reference.iter()));
}

#[test]
pub fn scenario() {
	let mut tree: RbTree<(i32, ())> = RbTree::new();
	for key in [50, 20, 80, 10, 30, 70, 90] {
		tree.insert((key, ()));
	}

	let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
	assert_eq!(keys, [10, 20, 30, 50, 70, 80, 90]);
	assert_eq!(tree.len(), 7);
	tree.validate();

	let twenty = tree.find(&20);
	assert_eq!(tree.erase(twenty), Ok(Some((20, ()))));
	let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
	assert_eq!(keys, [10, 30, 50, 70, 80, 90]);
	assert_eq!(tree.len(), 6);
	tree.validate();
}

#[test]
pub fn bounds() {
	let mut tree: RbTree<(i32, ())> = RbTree::new();
	assert_eq!(tree.lower_bound(&5), tree.end());
	assert_eq!(tree.upper_bound(&5), tree.end());

	tree.insert((5, ()));
	assert_eq!(tree.get(tree.lower_bound(&5)), Ok(&(5, ())));
	assert_eq!(tree.get(tree.lower_bound(&4)), Ok(&(5, ())));
	assert_eq!(tree.upper_bound(&5), tree.end());
	assert_eq!(tree.lower_bound(&6), tree.end());

	for key in [1, 9, 3, 7] {
		tree.insert((key, ()));
	}
	assert_eq!(tree.get(tree.lower_bound(&6)), Ok(&(7, ())));
	assert_eq!(tree.get(tree.upper_bound(&7)), Ok(&(9, ())));
	assert_eq!(tree.get(tree.upper_bound(&0)), Ok(&(1, ())));
	assert_eq!(tree.upper_bound(&9), tree.end());
}

#[test]
pub fn erase_all() {
	let mut map: OrderedMap<i32, i32> = (0..100).map(|i| (i, -i)).collect();
	let end = map.end();

	while map.begin() != end {
		let first = map.begin();
		let (key, value) = map.erase(first).unwrap().unwrap();
		assert_eq!(key, -value);
		assert_eq!(map.entry_at(first), Err(Error::InvalidCursor));
		map.tree().validate();
	}

	assert!(map.is_empty());
	assert_eq!(map.end(), end);
	assert_eq!(map.prev(end), Ok(map.before_begin()));
}

#[test]
pub fn monotonic_height() {
	let mut tree: RbTree<(u32, ())> = RbTree::new();
	for key in 0..10_000 {
		tree.insert((key, ()));
	}

	tree.validate();
	let bound = 2.0 * ((tree.len() + 1) as f64).log2();
	assert!((tree.height() as f64) <= bound);

	for key in (0..10_000).step_by(2) {
		tree.remove(&key);
	}

	tree.validate();
	let bound = 2.0 * ((tree.len() + 1) as f64).log2();
	assert!((tree.height() as f64) <= bound);
}

#[test]
pub fn copy_outlives_original() {
	let original: OrderedMap<String, usize> = (0..64).map(|i| (format!("k{:02}", i), i)).collect();
	let copy = original.clone();
	assert_eq!(copy, original);
	drop(original);

	copy.tree().validate();
	assert_eq!(copy.len(), 64);
	assert_eq!(copy.get("k10"), Some(&10));
	assert_eq!(copy.first_key_value(), Some((&"k00".to_string(), &0)));
}

#[test]
pub fn stable_cursors() {
	let mut rng = SmallRng::seed_from_u64(SEED + 3);
	let mut map: OrderedMap<u32, u32> = OrderedMap::new();
	let mut cursors = Vec::new();

	for key in 0..256 {
		cursors.push((key, map.insert(key, key * 2).0));
	}

	cursors.shuffle(&mut rng);
	let (erased, kept) = cursors.split_at(128);

	for (_, cursor) in erased {
		map.erase(*cursor).unwrap();
	}

	map.tree().validate();
	for (key, cursor) in erased {
		assert_eq!(map.entry_at(*cursor), Err(Error::InvalidCursor));
		assert!(!map.contains_key(key));
	}

	for (key, cursor) in kept {
		assert_eq!(map.entry_at(*cursor), Ok((key, &(key * 2))));
	}
}

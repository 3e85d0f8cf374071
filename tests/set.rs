use rand::{rngs::SmallRng, Rng, SeedableRng};
use rbtree_slab::{Greater, OrderedSet};
use std::collections::BTreeSet;

#[test]
pub fn against_std() {
	let mut rng = SmallRng::seed_from_u64(7);
	let mut set: OrderedSet<u16> = OrderedSet::new();
	let mut reference = BTreeSet::new();

	for _ in 0..4000 {
		let value = rng.gen_range(0..300);
		if rng.gen_bool(0.6) {
			assert_eq!(set.insert(value).1, reference.insert(value));
		} else {
			assert_eq!(set.remove(&value), reference.remove(&value));
		}

		assert_eq!(set.len(), reference.len());
		assert_eq!(set.first(), reference.iter().next());
		assert_eq!(set.last(), reference.iter().next_back());
	}

	assert!(set.iter().eq(reference.iter()));
	assert!(set.into_iter().eq(reference.into_iter()));
}

#[test]
pub fn custom_order() {
	let mut set: OrderedSet<&str, Greater> = OrderedSet::with_comparator(Greater);
	set.extend(vec!["pear", "apple", "fig", "apple"]);

	assert_eq!(set.len(), 3);
	assert_eq!(set.iter().cloned().collect::<Vec<_>>(), ["pear", "fig", "apple"]);

	// bounds follow the comparator order.
	assert_eq!(set.get_at(set.lower_bound("banana")), Ok(&"apple"));
	assert_eq!(set.upper_bound("apple"), set.end());
}

#[test]
pub fn erase_range_and_swap() {
	let mut a: OrderedSet<i32> = (0..10).collect();
	let mut b: OrderedSet<i32> = (100..103).collect();

	let (first, last) = (a.find(&3), a.find(&7));
	a.erase_range(first, last).unwrap();
	assert_eq!(a.iter().cloned().collect::<Vec<_>>(), [0, 1, 2, 7, 8, 9]);

	a.swap(&mut b);
	assert_eq!(a.len(), 3);
	assert_eq!(b.len(), 6);
	assert!(b.contains(&7));
	assert_eq!(b.get_at(last), Ok(&7));

	let hint = b.end();
	let c = b.insert_hint(hint, 10);
	assert_eq!(b.last(), Some(&10));
	assert_eq!(b.next(c), Ok(b.end()));
}

#[test]
pub fn ordering() {
	let a: OrderedSet<i32> = [1, 2, 3].iter().cloned().collect();
	let b: OrderedSet<i32> = [1, 2, 4].iter().cloned().collect();
	assert!(a < b);
	assert_eq!(a.clone(), a);
	assert_ne!(a, b);
}

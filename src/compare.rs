//! Ordering predicates.
//!
//! Trees are ordered by a *strict weak ordering* given as a [`Compare`] value
//! instead of being hard-wired to [`Ord`].
//! Two keys `a` and `b` are considered equivalent when neither `less(a, b)`
//! nor `less(b, a)` holds, and a tree never stores two equivalent keys.

/// Strict weak ordering between a left-hand type `L` and a right-hand type `R`.
///
/// For a tree with keys of type `K`, the comparator must at least implement
/// `Compare<K>`.
/// Lookups with a borrowed form `Q` of the key (e.g. `str` for `String`) additionally
/// require `Compare<Q>`, and both orderings must agree.
pub trait Compare<L: ?Sized, R: ?Sized = L> {
	/// Returns `true` if `lhs` is strictly ordered before `rhs`.
	fn less(&self, lhs: &L, rhs: &R) -> bool;
}

/// Ascending order given by [`Ord`].
///
/// This is the default comparator of every container of this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Less;

impl<T: Ord + ?Sized> Compare<T> for Less {
	#[inline]
	fn less(&self, lhs: &T, rhs: &T) -> bool {
		lhs < rhs
	}
}

/// Descending order given by [`Ord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Greater;

impl<T: Ord + ?Sized> Compare<T> for Greater {
	#[inline]
	fn less(&self, lhs: &T, rhs: &T) -> bool {
		lhs > rhs
	}
}

impl<'a, L: ?Sized, R: ?Sized, C: Compare<L, R> + ?Sized> Compare<L, R> for &'a C {
	#[inline]
	fn less(&self, lhs: &L, rhs: &R) -> bool {
		C::less(*self, lhs, rhs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn natural_and_reverse() {
		assert!(Less.less(&1, &2));
		assert!(!Less.less(&2, &2));
		assert!(Greater.less(&3, &2));
		assert!(!Greater.less(&2, &3));
		assert!(Compare::<str>::less(&Less, "a", "b"));
	}
}

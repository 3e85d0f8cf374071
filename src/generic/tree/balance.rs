use super::Tree;
use crate::generic::node::{Color, Node, Side};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, SlabMut};
use log::trace;

impl<T, C, S: SlabMut<Node<T>>> Tree<T, C, S>
where
	S: SimpleCollectionRef,
	S: SimpleCollectionMut,
{
	/// Rotate the subtree rooted in `x` toward `dir`.
	///
	/// The child of `x` on the opposite side takes its place,
	/// and `x` becomes its child on the `dir` side.
	/// In-order is preserved, sentinels included.
	pub(crate) fn rotate(&mut self, x: usize, dir: Side) {
		trace!("rotate {} {:?}", x, dir);
		let y = self.node(x).child(dir.opposite()).unwrap();

		let inner = self.node(y).child(dir);
		self.node_mut(x).set_child(dir.opposite(), inner);
		if let Some(inner) = inner {
			self.node_mut(inner).set_parent(Some(x))
		}

		self.replace(x, Some(y));
		self.node_mut(y).set_child(dir, Some(x));
		self.node_mut(x).set_parent(Some(y));
	}

	/// Puts `new` in place of `old` under the parent of `old` (or as the root).
	///
	/// The links of `old` itself are left untouched.
	pub(crate) fn replace(&mut self, old: usize, new: Option<usize>) {
		let parent = self.node(old).parent();
		if let Some(new) = new {
			self.node_mut(new).set_parent(parent)
		}

		match parent {
			Some(parent) => {
				let side = self.side_of(old, parent);
				self.node_mut(parent).set_child(side, new)
			}
			None => self.root = new,
		}
	}

	/// Restore the red-black properties after linking the red node `id`.
	pub(crate) fn insert_fixup(&mut self, mut id: usize) {
		loop {
			let parent = match self.node(id).parent() {
				Some(parent) if self.node(parent).is_red() => parent,
				_ => break,
			};

			// A red node is never the root.
			let grand_parent = self.node(parent).parent().unwrap();
			let parent_side = self.side_of(parent, grand_parent);
			let uncle = self.node(grand_parent).child(parent_side.opposite());

			if self.is_red(uncle) {
				self.node_mut(parent).set_color(Color::Black);
				self.node_mut(uncle.unwrap()).set_color(Color::Black);
				self.node_mut(grand_parent).set_color(Color::Red);
				id = grand_parent
			} else {
				let mut parent = parent;
				if self.side_of(id, parent) != parent_side {
					self.rotate(parent, parent_side);
					id = parent;
					parent = self.node(id).parent().unwrap();
				}

				self.node_mut(parent).set_color(Color::Black);
				self.node_mut(grand_parent).set_color(Color::Red);
				self.rotate(grand_parent, parent_side.opposite());
				break;
			}
		}

		if let Some(root) = self.root {
			self.node_mut(root).set_color(Color::Black)
		}
	}

	/// Restore the red-black properties after unlinking a black node.
	///
	/// `x` is the subtree that took the place of the unlinked node, on the `side`
	/// of `parent`. It is one black node short.
	/// `x` may be empty, in which case `parent` and `side` still locate it.
	pub(crate) fn erase_fixup(&mut self, mut x: Option<usize>, mut parent: Option<usize>, mut side: Side) {
		while let Some(p) = parent {
			if self.is_red(x) {
				break;
			}

			// The sibling subtree holds at least one black node.
			let mut sibling = self.node(p).child(side.opposite()).unwrap();

			if self.node(sibling).is_red() {
				self.node_mut(sibling).set_color(Color::Black);
				self.node_mut(p).set_color(Color::Red);
				self.rotate(p, side);
				sibling = self.node(p).child(side.opposite()).unwrap();
			}

			let near = self.node(sibling).child(side);
			let far = self.node(sibling).child(side.opposite());

			if !self.is_red(near) && !self.is_red(far) {
				self.node_mut(sibling).set_color(Color::Red);
				x = Some(p);
				parent = self.node(p).parent();
				if let Some(grand_parent) = parent {
					side = self.side_of(p, grand_parent)
				}
			} else {
				if !self.is_red(far) {
					self.node_mut(near.unwrap()).set_color(Color::Black);
					self.node_mut(sibling).set_color(Color::Red);
					self.rotate(sibling, side.opposite());
					sibling = self.node(p).child(side.opposite()).unwrap();
				}

				let far = self.node(sibling).child(side.opposite()).unwrap();
				let parent_color = self.node(p).color();
				self.node_mut(sibling).set_color(parent_color);
				self.node_mut(p).set_color(Color::Black);
				self.node_mut(far).set_color(Color::Black);
				self.rotate(p, side);

				x = self.root;
				parent = None;
			}
		}

		if let Some(x) = x {
			self.node_mut(x).set_color(Color::Black)
		}
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use crate::RbTree;

	fn tree_of(keys: &[i32]) -> RbTree<(i32, ())> {
		let mut tree = RbTree::new();
		for key in keys {
			tree.insert((*key, ()));
		}
		tree
	}

	#[test]
	fn ascending_inserts_rotate() {
		// 1, 2, 3 in a row must rotate the root.
		let tree = tree_of(&[1, 2, 3]);
		assert_eq!(tree.validate(), 1);
		assert_eq!(tree.height(), 2);
		assert_eq!(tree.node(tree.root.unwrap()).content(), Some(&(2, ())));
	}

	#[test]
	fn inner_child_double_rotation() {
		let tree = tree_of(&[3, 1, 2]);
		tree.validate();
		assert_eq!(tree.node(tree.root.unwrap()).content(), Some(&(2, ())));
	}

	#[test]
	fn uncle_recoloring() {
		let tree = tree_of(&[50, 20, 80, 10]);
		// 20 and 80 become black, the root stays black.
		assert_eq!(tree.validate(), 2);
	}

	#[test]
	fn erase_fixup_cases() {
		let mut tree = tree_of(&(0..32).collect::<Vec<_>>());
		for key in [0, 31, 15, 16, 7, 8, 23, 24, 1, 30] {
			assert_eq!(tree.remove(&key), Some((key, ())));
			tree.validate();
		}

		for key in 0..32 {
			tree.remove(&key);
			tree.validate();
		}

		assert!(tree.is_empty());
		assert_eq!(tree.begin(), tree.end());
	}
}

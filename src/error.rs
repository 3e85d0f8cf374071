use std::fmt;

/// Errors reported by the checked tree and container operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
	/// The key looked up with `at` is not in the map.
	KeyNotFound,

	/// The cursor denotes one of the two sentinel positions,
	/// which hold no content.
	Sentinel,

	/// The cursor does not denote a live node of the tree.
	///
	/// This happens when the node it was pointing to has been erased,
	/// even if its slab entry has since been reused.
	InvalidCursor,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::KeyNotFound => write!(f, "key not found"),
			Error::Sentinel => write!(f, "cursor is positioned on a sentinel"),
			Error::InvalidCursor => write!(f, "cursor does not denote a live node"),
		}
	}
}

impl std::error::Error for Error {}

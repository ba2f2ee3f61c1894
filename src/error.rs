/// Errors returned by tree and set operations.
///
/// Ordinary absence (looking up or removing an element the tree does not hold) is reported as
/// `None` or `false`, not as an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A tree was built without a comparator. Without one the tree has no order.
    #[error("an ordered tree cannot be built without a comparator")]
    MissingComparator,
    /// A node handle does not name a live node of the tree.
    #[error("node handle does not name a live node")]
    NotFound,
}

use core::{fmt, marker::PhantomData};

use compare::Compare;

use crate::{BoundedSet, Error, OrderedTree};

/// Configures and builds an [`OrderedTree`] or a [`BoundedSet`].
///
/// ```
/// use ordtree::{Builder, Error, Natural, OrderedTree};
///
/// let tree: OrderedTree<u8, _> = Builder::new()
///     .comparator(|a: &u8, b: &u8| a.cmp(b))
///     .capacity(16)
///     .build()
///     .unwrap();
/// assert!(tree.is_empty());
///
/// let missing = Builder::<u8, Natural<u8>>::new().build();
/// assert_eq!(missing.err(), Some(Error::MissingComparator));
/// ```
pub struct Builder<T, C> {
    comparator: Option<C>,
    capacity: usize,
    _element: PhantomData<fn(&T)>,
}

impl<T, C> Builder<T, C>
where
    C: Compare<T>,
{
    /// Returns a builder with no comparator and no preallocated nodes.
    pub const fn new() -> Self {
        Builder {
            comparator: None,
            capacity: 0,
            _element: PhantomData,
        }
    }

    /// Sets the comparator that orders the elements.
    pub fn comparator(mut self, cmp: C) -> Self {
        self.comparator = Some(cmp);
        self
    }

    /// Preallocates storage for `capacity` nodes.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds an empty tree.
    ///
    /// Fails with [`Error::MissingComparator`] if no comparator was set.
    pub fn build(self) -> Result<OrderedTree<T, C>, Error> {
        let cmp = self.comparator.ok_or(Error::MissingComparator)?;
        Ok(OrderedTree::with_capacity(cmp, self.capacity))
    }

    /// Builds an empty set.
    ///
    /// Fails with [`Error::MissingComparator`] if no comparator was set.
    pub fn build_set(self) -> Result<BoundedSet<T, C>, Error> {
        self.build().map(BoundedSet::from_tree)
    }
}

impl<T, C> Default for Builder<T, C>
where
    C: Compare<T>,
{
    fn default() -> Self {
        Builder::new()
    }
}

impl<T, C> fmt::Debug for Builder<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("comparator", &self.comparator.as_ref().map(|_| ".."))
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Natural;

    #[test]
    fn missing_comparator() {
        let result = Builder::<i32, Natural<i32>>::new().capacity(8).build();
        assert_eq!(result.err(), Some(Error::MissingComparator));

        let result = Builder::<i32, Natural<i32>>::default().build_set();
        assert_eq!(result.err(), Some(Error::MissingComparator));
    }

    #[test]
    fn builds_with_comparator() {
        let mut tree = Builder::new()
            .comparator(|a: &i32, b: &i32| b.cmp(a))
            .capacity(4)
            .build()
            .expect("comparator was set");

        for value in [1, 3, 2] {
            tree.insert(value);
        }

        assert_eq!(tree.materialize(), vec![3, 2, 1]);
    }

    #[test]
    fn builds_set() {
        let mut set = Builder::new()
            .comparator(crate::natural())
            .build_set()
            .expect("comparator was set");

        assert!(set.add(7u8));
        assert!(!set.add(7u8));
        assert_eq!(set.len(), 1);
    }
}

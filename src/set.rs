//! A duplicate-free set built on an [`OrderedTree`].

use core::fmt;

use compare::{Compare, Natural};

use crate::{Iter, OrderedTree};

/// A set of elements ordered by a comparator.
///
/// The set keeps its own count of elements, updated only when the underlying tree reports an
/// insertion or a removal. Whole-set operations (`for_each`, `map`, `union`, `intersection`) work
/// from an ascending snapshot of the tree and never touch its nodes.
#[derive(Clone)]
pub struct BoundedSet<T, C = Natural<T>> {
    tree: OrderedTree<T, C>,
    len: usize,
}

impl<T: Ord> BoundedSet<T> {
    /// Creates an empty set ordered according to the natural order of its elements.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = ordtree::BoundedSet::natural();
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// assert_eq!(set.to_vec(), [1, 2, 3]);
    /// ```
    pub fn natural() -> BoundedSet<T> {
        BoundedSet::new(compare::natural())
    }
}

impl<T: Ord> Default for BoundedSet<T> {
    fn default() -> Self {
        BoundedSet::natural()
    }
}

impl<T, C> BoundedSet<T, C>
where
    C: Compare<T>,
{
    /// Creates an empty set ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BoundedSet, Compare};
    ///
    /// let mut set = BoundedSet::new(ordtree::natural().rev());
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// assert_eq!(set.to_vec(), [3, 2, 1]);
    /// ```
    pub fn new(cmp: C) -> BoundedSet<T, C> {
        BoundedSet::from_tree(OrderedTree::new(cmp))
    }

    /// Creates a set from an existing tree.
    pub fn from_tree(tree: OrderedTree<T, C>) -> BoundedSet<T, C> {
        let len = tree.len();
        BoundedSet { tree, len }
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns a reference to the set's comparator.
    pub fn cmp(&self) -> &C {
        self.tree.cmp()
    }

    /// Adds an element to the set, returning `true` if the set did not already contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = ordtree::BoundedSet::natural();
    /// assert!(set.add(1));
    /// assert!(!set.add(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, element: T) -> bool {
        if self.tree.find(&element).is_some() {
            return false;
        }

        let rejected = self.tree.insert(element);
        debug_assert!(rejected.is_none(), "element was absent a moment ago");

        self.len += 1;
        true
    }

    /// Removes the element comparing equal to `element` from the set and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = ordtree::BoundedSet::natural();
    ///
    /// set.add(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// assert!(set.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, element: &Q) -> Option<T>
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        let removed = self.tree.remove(element)?;
        self.len -= 1;
        Some(removed)
    }

    /// Checks if the set contains an element comparing equal to `element`.
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        self.tree.find(element).is_some()
    }

    /// Returns an iterator over the set's elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        self.tree.iter()
    }

    /// Returns the set's elements in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.tree.materialize()
    }

    /// Calls `f` on every element, in ascending order.
    pub fn for_each<F>(&self, mut f: F)
    where
        T: Clone,
        F: FnMut(&T),
    {
        for element in self.to_vec() {
            f(&element);
        }
    }

    /// Returns the set of images of this set's elements under `f`, ordered by `cmp`.
    ///
    /// Elements whose images compare equal collapse into one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BoundedSet;
    ///
    /// let words: BoundedSet<&str> = ["apple", "bob", "cat"].into_iter().collect();
    /// let lengths = words.map_by(|word| word.len(), ordtree::natural());
    ///
    /// assert_eq!(lengths.to_vec(), [3, 5]);
    /// ```
    pub fn map_by<U, D, F>(&self, mut f: F, cmp: D) -> BoundedSet<U, D>
    where
        T: Clone,
        D: Compare<U>,
        F: FnMut(&T) -> U,
    {
        let mut mapped = BoundedSet::new(cmp);
        for element in self.to_vec() {
            mapped.add(f(&element));
        }
        mapped
    }

    /// Returns the set of images of this set's elements under `f`, ordered by this set's
    /// comparator.
    pub fn map<F>(&self, f: F) -> BoundedSet<T, C>
    where
        T: Clone,
        C: Clone,
        F: FnMut(&T) -> T,
    {
        self.map_by(f, self.cmp().clone())
    }

    /// Returns the union of this set and `other`, ordered by `cmp`.
    pub fn union_by<E, D>(&self, other: &BoundedSet<T, E>, cmp: D) -> BoundedSet<T, D>
    where
        T: Clone,
        E: Compare<T>,
        D: Compare<T>,
    {
        let mut union = BoundedSet::new(cmp);
        union.extend(self.to_vec());
        union.extend(other.to_vec());
        union
    }

    /// Returns the union of this set and `other`, ordered by this set's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BoundedSet;
    ///
    /// let a: BoundedSet<u32> = [1, 2].into_iter().collect();
    /// let b: BoundedSet<u32> = [2, 3].into_iter().collect();
    ///
    /// assert_eq!(a.union(&b).to_vec(), [1, 2, 3]);
    /// ```
    pub fn union<E>(&self, other: &BoundedSet<T, E>) -> BoundedSet<T, C>
    where
        T: Clone,
        C: Clone,
        E: Compare<T>,
    {
        self.union_by(other, self.cmp().clone())
    }

    /// Returns the elements present in both this set and `other`, ordered by `cmp`.
    ///
    /// The smaller set is enumerated and each element is looked up in the larger one.
    pub fn intersection_by<E, D>(&self, other: &BoundedSet<T, E>, cmp: D) -> BoundedSet<T, D>
    where
        T: Clone,
        E: Compare<T>,
        D: Compare<T>,
    {
        let mut intersection = BoundedSet::new(cmp);

        if self.len() <= other.len() {
            intersection.extend(self.to_vec().into_iter().filter(|e| other.contains(e)));
        } else {
            intersection.extend(other.to_vec().into_iter().filter(|e| self.contains(e)));
        }

        intersection
    }

    /// Returns the elements present in both this set and `other`, ordered by this set's
    /// comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BoundedSet;
    ///
    /// let a: BoundedSet<u32> = [1, 2].into_iter().collect();
    /// let b: BoundedSet<u32> = [2, 3].into_iter().collect();
    ///
    /// assert_eq!(a.intersection(&b).to_vec(), [2]);
    /// ```
    pub fn intersection<E>(&self, other: &BoundedSet<T, E>) -> BoundedSet<T, C>
    where
        T: Clone,
        C: Clone,
        E: Compare<T>,
    {
        self.intersection_by(other, self.cmp().clone())
    }

    /// Dismantles the set and returns its underlying tree.
    pub fn into_tree(self) -> OrderedTree<T, C> {
        self.tree
    }
}

impl<T, C> Extend<T> for BoundedSet<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Ord> FromIterator<T> for BoundedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = BoundedSet::natural();
        set.extend(iter);
        set
    }
}

impl<'a, T, C> IntoIterator for &'a BoundedSet<T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> fmt::Debug for BoundedSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(values: core::ops::RangeInclusive<u32>) -> BoundedSet<u32> {
        values.collect()
    }

    #[test]
    fn add_rejects_duplicates() {
        let mut set = BoundedSet::natural();

        for i in 0..50u32 {
            assert!(set.add(i));
        }
        assert_eq!(set.len(), 50);

        for i in 0..50u32 {
            assert!(!set.add(i));
        }
        assert_eq!(set.len(), 50);

        let mut single = BoundedSet::natural();
        single.add("x");
        single.add("x");
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn remove_tracks_size() {
        let mut set = range(0..=9);

        assert_eq!(set.remove(&4), Some(4));
        assert_eq!(set.remove(&4), None);
        assert_eq!(set.remove(&100), None);
        assert_eq!(set.len(), 9);
        assert!(!set.contains(&4));
        assert!(set.contains(&5));

        for i in 0..=9 {
            set.remove(&i);
        }
        assert!(set.is_empty());
    }

    #[test]
    fn union_of_disjoint_sets() {
        let evens: BoundedSet<u32> = (0..20).map(|i| i * 2).collect();
        let odds: BoundedSet<u32> = (0..20).map(|i| i * 2 + 1).collect();
        assert_eq!(evens.len(), 20);
        assert_eq!(odds.len(), 20);

        let union = evens.union(&odds);
        assert_eq!(union.len(), 40);
        assert!(evens.iter().chain(odds.iter()).all(|e| union.contains(e)));
        assert_eq!(union.to_vec(), (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn intersection_of_overlapping_ranges() {
        let low = range(0..=20);
        let high = range(10..=30);

        let expected: Vec<u32> = (10..=20).collect();
        assert_eq!(low.intersection(&high).to_vec(), expected);
        assert_eq!(high.intersection(&low).to_vec(), expected);

        let empty = BoundedSet::natural();
        assert!(low.intersection(&empty).is_empty());
    }

    #[test]
    fn operations_with_explicit_comparator() {
        let low = range(0..=3);
        let high = range(2..=5);

        let descending = |a: &u32, b: &u32| b.cmp(a);
        assert_eq!(low.union_by(&high, descending).to_vec(), [5, 4, 3, 2, 1, 0]);
        assert_eq!(low.intersection_by(&high, descending).to_vec(), [3, 2]);

        let doubled = low.map_by(|e| e * 2, descending);
        assert_eq!(doubled.to_vec(), [6, 4, 2, 0]);
    }

    #[test]
    fn map_collapses_equal_images() {
        let set = range(0..=9);

        let halves = set.map(|e| e / 2);
        assert_eq!(halves.len(), 5);
        assert_eq!(halves.to_vec(), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn for_each_visits_in_order() {
        let set: BoundedSet<u32> = [3, 1, 2].into_iter().collect();

        let mut seen = Vec::new();
        set.for_each(|&e| seen.push(e));
        assert_eq!(seen, [1, 2, 3]);
    }

    #[test]
    fn into_tree_keeps_elements() {
        let mut set = range(1..=5);
        set.remove(&3);

        let tree = set.into_tree();
        tree.assert_invariants();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.materialize(), [1, 2, 4, 5]);

        let set = BoundedSet::from_tree(tree);
        assert_eq!(set.len(), 4);
        assert!(set.contains(&4));
    }

    #[test]
    fn debug_format() {
        let set: BoundedSet<u32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{set:?}"), "{1, 2}");
    }
}

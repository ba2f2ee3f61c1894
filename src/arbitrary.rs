use ::arbitrary::{Arbitrary, Result, Unstructured};

use crate::{BoundedSet, OrderedTree};

impl<'a, T> Arbitrary<'a> for OrderedTree<T>
where
    T: Arbitrary<'a> + Ord,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        u.arbitrary_iter::<T>()?.collect()
    }

    fn arbitrary_take_rest(u: Unstructured<'a>) -> Result<Self> {
        u.arbitrary_take_rest_iter::<T>()?.collect()
    }
}

impl<'a, T> Arbitrary<'a> for BoundedSet<T>
where
    T: Arbitrary<'a> + Ord,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        u.arbitrary_iter::<T>()?.collect()
    }

    fn arbitrary_take_rest(u: Unstructured<'a>) -> Result<Self> {
        u.arbitrary_take_rest_iter::<T>()?.collect()
    }
}

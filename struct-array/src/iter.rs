use std::iter::FusedIterator;

use crate::StructArray;

/// Borrowing iterator over the slots of a [`StructArray`], in index order.
pub struct Iter<'a, A> {
    array: &'a A,
    front: usize,
    back: usize,
}

impl<'a, A: StructArray> Iter<'a, A> {
    pub(crate) fn new(array: &'a A) -> Self {
        Self {
            array,
            front: 0,
            back: A::LENGTH,
        }
    }
}

impl<'a, A: StructArray> Iterator for Iter<'a, A> {
    type Item = &'a A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.array.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, A: StructArray> DoubleEndedIterator for Iter<'a, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.array.get(self.back)
    }
}

impl<'a, A: StructArray> ExactSizeIterator for Iter<'a, A> {}

impl<'a, A: StructArray> FusedIterator for Iter<'a, A> {}

// Not derived: that would require `A: Clone`.
impl<'a, A> Clone for Iter<'a, A> {
    fn clone(&self) -> Self {
        Self {
            array: self.array,
            front: self.front,
            back: self.back,
        }
    }
}

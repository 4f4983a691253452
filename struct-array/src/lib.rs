//! Fixed-capacity containers whose elements are stored as individual named
//! fields instead of an array.
//!
//! Types are declared either in place with [`struct_array`]:
//!
//! ```
//! use struct_array::{struct_array, StructArray};
//!
//! #[struct_array(3)]
//! pub struct Rgb<C>;
//!
//! let mut rgb = Rgb::<u8>::default();
//! rgb[2] = 7;
//! assert_eq!(rgb.to_vec(), vec![0, 0, 7]);
//! assert!(rgb.get(3).is_none());
//! assert_eq!(<Rgb<u8> as StructArray>::LENGTH, 3);
//! ```
//!
//! or by name, grouped into modules, with [`struct_arrays!`]:
//!
//! ```
//! struct_array::struct_arrays! {
//!     ("Vec3Storage", "Geometry", 3),
//! }
//!
//! let v = geometry::Vec3Storage::from_fn(|i| i as f32 * 0.5);
//! assert_eq!(v.into_vec(), vec![0.0, 0.5, 1.0]);
//! ```
//!
//! Every generated type implements [`StructArray`]. Access is strict: an
//! index outside `0..LENGTH` never aliases another slot. `get` returns
//! `None`, `set` returns [`IndexOutOfRange`] and indexing panics.

// Generated code names this crate by absolute path, including inside it.
extern crate self as struct_array;

mod error;
mod iter;

pub use error::IndexOutOfRange;
pub use iter::Iter;
pub use struct_array_macros::{struct_array, struct_arrays};

/// Common interface of every generated container.
pub trait StructArray: Sized {
    type Item;

    /// Number of slots. Fixed at generation time.
    const LENGTH: usize;

    fn get(&self, index: usize) -> Option<&Self::Item>;

    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

    /// Moves every slot, in index order, into a `Vec`.
    fn into_vec(self) -> Vec<Self::Item>;

    fn len(&self) -> usize {
        Self::LENGTH
    }

    fn is_empty(&self) -> bool {
        Self::LENGTH == 0
    }

    /// Stores `value` at `index` and returns the previous value.
    fn set(&mut self, index: usize, value: Self::Item) -> Result<Self::Item, IndexOutOfRange> {
        match self.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(IndexOutOfRange::new(index, Self::LENGTH)),
        }
    }

    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        self.iter().cloned().collect()
    }

    fn iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }
}

#[doc(hidden)]
#[cold]
#[track_caller]
pub fn out_of_range(index: usize, length: usize) -> ! {
    panic!("{}", IndexOutOfRange::new(index, length))
}

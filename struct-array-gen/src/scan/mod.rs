//! Sources of attribute occurrences.
//!
//! The generator never inspects declarations itself. A [`Scanner`] stands in
//! for the host's symbol model and hands over every declaration carrying the
//! requested attribute, with its arguments already resolved to literals.

pub mod manifest;
pub mod tokens;

use crate::error::Error;
use crate::ir::AttributeOccurrence;

pub trait Scanner {
    /// All declarations carrying the attribute whose fully-qualified name is
    /// `attribute`, in discovery order.
    fn occurrences(&self, attribute: &str) -> Result<Vec<AttributeOccurrence>, Error>;
}

/// A fixed list of occurrences, e.g. already parsed from a macro invocation.
impl Scanner for [AttributeOccurrence] {
    fn occurrences(&self, _attribute: &str) -> Result<Vec<AttributeOccurrence>, Error> {
        Ok(self.to_vec())
    }
}

impl<S: Scanner + ?Sized> Scanner for &S {
    fn occurrences(&self, attribute: &str) -> Result<Vec<AttributeOccurrence>, Error> {
        (**self).occurrences(attribute)
    }
}

//! One-based element identifiers
//!
//! OBJ files reference vertices by their 1-based position in the file, and the
//! tool keeps that convention for faces as well. These newtypes carry the
//! 1-based value everywhere outside of the storage vectors, so a raw 0-based
//! slot never leaks out of this crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

macro_rules! one_based_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonZeroUsize);

        impl $name {
            /// Create an index from its 1-based value, `None` for zero
            pub fn new(one_based: usize) -> Option<Self> {
                NonZeroUsize::new(one_based).map(Self)
            }

            /// The 1-based value, as written in an OBJ file
            pub fn get(self) -> usize {
                self.0.get()
            }

            pub(crate) fn from_slot(slot: usize) -> Self {
                Self(NonZeroUsize::MIN.saturating_add(slot))
            }

            pub(crate) fn slot(self) -> usize {
                self.0.get() - 1
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

one_based_index!(
    /// 1-based position of a vertex inside a mesh
    VertexIndex
);

one_based_index!(
    /// 1-based position of a face inside a mesh
    FaceIndex
);

//! Strongly typed identifier wrappers.
//!
//! Road segments and charging stations are both addressed by dense indices
//! into `Vec`s owned by their collections.  Wrapping the index keeps a
//! segment number from ever being passed where a station number is expected.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a road segment in the loaded network, in input order.
    pub struct SegmentId(u32);
}

typed_id! {
    /// Index of a charging station in the registry.  Pre-built stations take
    /// the low indices; proposed stations are appended after them.
    pub struct StationId(u32);
}

use core::fmt::{Formatter, UpperHex};

/// Wraps a byte slice to format it as a list of hexadecimal bytes.
///
/// Used by trace logging to dump frame buffers.
pub struct HexSlice<'a>(&'a [u8]);

impl<'a> HexSlice<'a> {
    /// Creates a new `HexSlice` from a slice of bytes.
    #[must_use]
    pub const fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }
}

impl UpperHex for HexSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "[")?;

        if let Some((first, rest)) = self.0.split_first() {
            UpperHex::fmt(first, f)?;

            for byte in rest {
                write!(f, ", ")?;
                UpperHex::fmt(byte, f)?;
            }
        }

        write!(f, "]")
    }
}

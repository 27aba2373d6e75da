//! Modulo-8 frame sequence numbers.

use core::fmt::Display;
use core::ops::{Add, AddAssign};

const MASK: u8 = 0b0000_0111;

/// A three-bit frame sequence number wrapping at eight.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct SeqNum(u8);

impl SeqNum {
    /// Creates a sequence number from the low three bits of `n`.
    #[must_use]
    pub const fn from_u8_lossy(n: u8) -> Self {
        Self(n & MASK)
    }

    /// Returns the sequence number as an u8.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Returns the current value and advances the counter by one.
    pub fn post_increment(&mut self) -> Self {
        let current = *self;
        *self += 1;
        current
    }
}

impl Add<u8> for SeqNum {
    type Output = Self;

    fn add(self, rhs: u8) -> Self::Output {
        Self::from_u8_lossy(self.0.wrapping_add(rhs))
    }
}

impl AddAssign<u8> for SeqNum {
    fn add_assign(&mut self, rhs: u8) {
        *self = *self + rhs;
    }
}

impl Display for SeqNum {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<SeqNum> for u8 {
    fn from(seq_num: SeqNum) -> Self {
        seq_num.as_u8()
    }
}

impl PartialEq<u8> for SeqNum {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

impl TryFrom<u8> for SeqNum {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value & MASK == value {
            Ok(Self(value))
        } else {
            Err(value)
        }
    }
}

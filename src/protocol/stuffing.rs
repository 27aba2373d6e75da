//! Byte stuffing and unstuffing.
//!
//! Inside a frame body, any byte that could be mistaken for a [`FLAG`] or an
//! [`ESCAPE`] is replaced by the two-byte sequence `ESCAPE, byte ^ COMPLEMENT_BIT`.
//! The receive side undoes this one byte at a time.

use core::iter::once;

use crate::protocol::{COMPLEMENT_BIT, ESCAPE, FLAG};

/// Stateless encoder mapping one logical byte to one or two wire bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stuffer {
    force_escape: bool,
}

impl Stuffer {
    /// Creates a new `Stuffer`.
    ///
    /// With `force_escape` set, every byte is escaped, not just the reserved ones.
    #[must_use]
    pub const fn new(force_escape: bool) -> Self {
        Self { force_escape }
    }

    /// Stuffs a single byte, yielding its one- or two-byte wire representation.
    pub fn stuff(self, byte: u8) -> impl Iterator<Item = u8> {
        if byte == FLAG || byte == ESCAPE || self.force_escape {
            once(ESCAPE).chain(Some(byte ^ COMPLEMENT_BIT))
        } else {
            once(byte).chain(None)
        }
    }
}

/// Stateful decoder undoing [`Stuffer`] one wire byte at a time.
///
/// Carries exactly one bit of state: whether the previous byte was an
/// [`ESCAPE`] marker, in which case the next byte is complemented and passed
/// through no matter its value. This ordering is what allows the flag byte's
/// bit pattern to travel safely inside a frame body.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Unstuffer {
    pending: bool,
}

impl Unstuffer {
    /// Creates a new `Unstuffer` with no pending escape.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Returns whether an escape marker was received and its follow byte is outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Unstuffs a single wire byte.
    ///
    /// Returns `None` when the byte was an escape marker that got consumed,
    /// otherwise the logical byte it decodes to.
    pub fn unstuff(&mut self, byte: u8) -> Option<u8> {
        if self.pending {
            self.pending = false;
            Some(byte ^ COMPLEMENT_BIT)
        } else if byte == ESCAPE {
            self.pending = true;
            None
        } else {
            Some(byte)
        }
    }

    /// Drops any pending escape.
    pub fn reset(&mut self) {
        self.pending = false;
    }
}

//! Receive-side error taxonomy.

use core::fmt::{Display, Formatter};

/// Reasons for discarding a received frame.
///
/// None of these are fatal: the frame is dropped, the buffer index is reset
/// and the state machine is immediately ready for the next frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameError {
    /// The frame closed with fewer than the four bytes of address, control
    /// and checksum.
    ShortFrame {
        /// Number of bytes buffered when the frame closed.
        len: usize,
    },
    /// The checksum trailer did not match the frame body.
    CrcMismatch {
        /// Checksum computed over the received body.
        expected: u16,
        /// Checksum found in the frame trailer.
        found: u16,
    },
    /// More bytes arrived than the configured capacity before the frame closed.
    BufferOverrun,
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ShortFrame { len } => {
                write!(f, "Short frame: {len} bytes.")
            }
            Self::CrcMismatch { expected, found } => {
                write!(f, "CRC mismatch: expected {expected:#06X}, found {found:#06X}.")
            }
            Self::BufferOverrun => write!(f, "Receive buffer overrun."),
        }
    }
}

impl std::error::Error for FrameError {}

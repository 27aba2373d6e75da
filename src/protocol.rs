//! Wire-level constants and codecs shared by the receive and transmit paths.

pub mod control;
pub mod stuffing;

/// Flag byte delimiting the start and end of a frame.
pub const FLAG: u8 = 0x7E;

/// Escape byte introducing a two-byte escape sequence inside a frame body.
pub const ESCAPE: u8 = 0x7D;

/// Bit complemented to hide a reserved byte and to restore it on receive.
pub const COMPLEMENT_BIT: u8 = 1 << 5;

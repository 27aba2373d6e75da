//! Utilities that are not specific to the protocol.

mod hex_slice;

pub use hex_slice::HexSlice;

//! Common types used throughout the crate.

/// A stack-allocated receive buffer holding the unstuffed bytes of one frame.
///
/// The capacity is a const generic parameter, so the storage size of every
/// link instance is resolved at compile time. The length field is a `usize`;
/// the capacity itself never changes at runtime.
pub type PacketBuffer<const N: usize> = heapless::Vec<u8, N>;

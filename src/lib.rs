//! Link-layer framer for lightweight point-to-point serial protocols.
//!
//! Turns an outgoing command and payload into a flag-delimited, byte-stuffed,
//! CRC16-checked stream, and turns an incoming byte stream back into
//! validated packets, one byte at a time, without heap allocation.
//!
//! One frame on the wire:
//!
//! ```text
//! 0x7E  <station-id>  <control>  <command>  <payload...>  <crc-lo> <crc-hi>  0x7E
//! ```
//!
//! Everything between the two flag bytes is the escaped region: a literal
//! `0x7E` or `0x7D` in there is replaced by `0x7D` followed by the byte with
//! bit five complemented. The checksum covers the unstuffed body and gates
//! dispatch to the [`PacketHandler`].
//!
//! This crate is an embeddable protocol core: the caller owns the read loop
//! and feeds bytes into a [`Receiver`] or [`Link`]. Retransmission, frame
//! reassembly, flow control and multiplexing belong to the layers above.

pub use baud_rate::BaudRate;
pub use config::Config;
pub use crc::{Crc16Sdlc, CrcEngine, CRC};
pub use error::FrameError;
pub use link::Link;
pub use protocol::control::{ControlField, SupervisoryFunction, UnnumberedFunction};
pub use protocol::stuffing::{Stuffer, Unstuffer};
pub use protocol::{ESCAPE, FLAG};
pub use receiver::{Counters, PacketHandler, Receiver};
pub use seq_num::SeqNum;
pub use serial_port::open;
pub use transmitter::Transmitter;
pub use transport::Transport;
pub use types::PacketBuffer;

mod baud_rate;
mod config;
mod crc;
mod error;
mod link;
mod protocol;
mod receiver;
mod seq_num;
mod serial_port;
mod transmitter;
mod transport;
mod types;
mod utils;

//! Transmit-side frame encoding.

use log::{debug, trace};

use crate::config::Config;
use crate::crc::{Crc16Sdlc, CrcEngine};
use crate::protocol::control::ControlField;
use crate::protocol::stuffing::Stuffer;
use crate::protocol::FLAG;
use crate::seq_num::SeqNum;
use crate::transport::Transport;
use crate::utils::HexSlice;

/// Encodes outgoing frames and streams them to a [`Transport`].
///
/// Encoding streams directly to the transport byte by byte; no staging
/// buffer is involved and payload size is only limited by the peer's
/// receive capacity.
#[derive(Debug)]
pub struct Transmitter<T, C> {
    transport: T,
    crc: C,
    stuffer: Stuffer,
    station_id: u8,
    tx_seq: SeqNum,
}

impl<T> Transmitter<T, Crc16Sdlc>
where
    T: Transport,
{
    /// Creates a transmitter using the default checksum engine.
    pub fn new(transport: T, config: Config) -> Self {
        Self::with_crc_engine(transport, config, Crc16Sdlc::default())
    }
}

impl<T, C> Transmitter<T, C>
where
    T: Transport,
    C: CrcEngine,
{
    /// Creates a transmitter using a custom checksum engine.
    ///
    /// Both peers on a link must use the same algorithm.
    pub fn with_crc_engine(transport: T, config: Config, crc: C) -> Self {
        Self {
            transport,
            crc,
            stuffer: Stuffer::new(config.force_escape()),
            station_id: config.station_id(),
            tx_seq: SeqNum::default(),
        }
    }

    /// Encodes one complete frame for `command` and `payload`, writes it to
    /// the transport and flushes.
    ///
    /// Advances the transmit sequence number once the frame is out.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if a write or the flush fails; the
    /// frame may then have been partially written.
    pub fn send(&mut self, command: u8, payload: &[u8]) -> Result<(), T::Error> {
        debug!(
            "Sending command {command:#04X} with {} byte payload.",
            payload.len()
        );
        trace!("Payload: {:#04X}", HexSlice::new(payload));

        self.crc.reset();
        self.send_preamble()?;
        self.send_byte(command)?;

        for &byte in payload {
            self.send_byte(byte)?;
        }

        self.send_postamble()
    }

    /// Returns the sequence number of the next frame to transmit.
    #[must_use]
    pub const fn tx_seq(&self) -> SeqNum {
        self.tx_seq
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Opening flag, then station id and control byte, escaped and checksummed.
    ///
    /// The flag itself is written verbatim and stays outside the checksum.
    fn send_preamble(&mut self) -> Result<(), T::Error> {
        self.transport.write_byte(FLAG)?;
        self.send_byte(self.station_id)?;
        self.send_byte(ControlField::default().to_byte())
    }

    /// Checksum trailer low byte first, closing flag, flush.
    fn send_postamble(&mut self) -> Result<(), T::Error> {
        for byte in self.crc.finish().to_le_bytes() {
            self.write_stuffed(byte)?;
        }

        self.transport.write_byte(FLAG)?;
        self.transport.flush()?;
        self.tx_seq += 1;
        Ok(())
    }

    /// Feeds one byte into the checksum, then stuffs and writes it.
    fn send_byte(&mut self, byte: u8) -> Result<(), T::Error> {
        self.crc.update(byte);
        self.write_stuffed(byte)
    }

    fn write_stuffed(&mut self, byte: u8) -> Result<(), T::Error> {
        for wire_byte in self.stuffer.stuff(byte) {
            self.transport.write_byte(wire_byte)?;
        }

        Ok(())
    }
}

//! Receive-side frame assembly and validation.

use log::{debug, trace, warn};

use crate::crc::{Crc16Sdlc, CrcEngine};
use crate::error::FrameError;
use crate::protocol::stuffing::Unstuffer;
use crate::protocol::FLAG;
use crate::seq_num::SeqNum;
use crate::types::PacketBuffer;
use crate::utils::HexSlice;

/// Bytes of framing around the packet: address, control and the checksum trailer.
const MIN_FRAME_SIZE: usize = HEADER_SIZE + TRAILER_SIZE;
const HEADER_SIZE: usize = 2;
const TRAILER_SIZE: usize = 2;

/// Receives the packet bytes of every validated frame.
pub trait PacketHandler {
    /// Called synchronously with command and payload of one validated frame,
    /// address, control and checksum stripped.
    ///
    /// The slice borrows the receive buffer and cannot outlive the call.
    /// The handler must not feed bytes back into the same receiver from
    /// within this call.
    fn handle_packet(&mut self, packet: &[u8]);
}

impl<F> PacketHandler for F
where
    F: FnMut(&[u8]),
{
    fn handle_packet(&mut self, packet: &[u8]) {
        self(packet);
    }
}

/// Running totals of frame outcomes, for diagnostics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counters {
    /// Frames validated and dispatched.
    pub delivered: u32,
    /// Frames discarded for closing with fewer than four bytes.
    pub short_frames: u32,
    /// Frames discarded for a checksum mismatch.
    pub crc_mismatches: u32,
    /// Frames discarded because the buffer filled up before the frame closed.
    pub overruns: u32,
}

/// Per-byte receiver state machine assembling frames out of an unreliable
/// byte stream.
///
/// `N` is the receive buffer capacity in bytes, fixed at compile time.
/// Each call to [`receive`](Self::receive) consumes exactly one byte and
/// performs bounded work without allocating, which makes it safe to drive
/// from an interrupt handler or a tight polling loop.
#[derive(Debug)]
pub struct Receiver<C, const N: usize> {
    buffer: PacketBuffer<N>,
    unstuffer: Unstuffer,
    in_frame: bool,
    overrun: bool,
    crc: C,
    counters: Counters,
    rx_next_seq: SeqNum,
}

impl<const N: usize> Receiver<Crc16Sdlc, N> {
    /// Creates a receiver using the default checksum engine.
    #[must_use]
    pub fn new() -> Self {
        Self::with_crc_engine(Crc16Sdlc::default())
    }
}

impl<const N: usize> Default for Receiver<Crc16Sdlc, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, const N: usize> Receiver<C, N>
where
    C: CrcEngine,
{
    /// Creates a receiver using a custom checksum engine.
    ///
    /// Both peers on a link must use the same algorithm.
    #[must_use]
    pub fn with_crc_engine(crc: C) -> Self {
        Self {
            buffer: PacketBuffer::new(),
            unstuffer: Unstuffer::new(),
            in_frame: false,
            overrun: false,
            crc,
            counters: Counters::default(),
            rx_next_seq: SeqNum::default(),
        }
    }

    /// Consumes one byte from the line.
    ///
    /// When the byte completes a valid frame, `handler` is invoked with the
    /// packet bytes before this call returns. When it closes an invalid
    /// frame, the frame's [`FrameError`] is returned; the discard is not
    /// fatal and the receiver is already re-armed for the next frame.
    pub fn receive<H>(&mut self, byte: u8, handler: &mut H) -> Option<FrameError>
    where
        H: PacketHandler,
    {
        // An outstanding escape claims the byte before boundary detection,
        // so a stuffed flag pattern never terminates a frame.
        if byte == FLAG && !self.unstuffer.is_pending() {
            return self.flag_received(handler);
        }

        let Some(byte) = self.unstuffer.unstuff(byte) else {
            return None;
        };

        if self.buffer.push(byte).is_err() {
            self.overrun = true;
        }

        None
    }

    /// Returns the frame outcome totals.
    #[must_use]
    pub const fn counters(&self) -> Counters {
        self.counters
    }

    /// Returns the sequence number expected from the peer next.
    ///
    /// Declared by the wire protocol but neither advanced nor validated
    /// here; reserved for a future ARQ layer.
    #[must_use]
    pub const fn rx_next_seq(&self) -> SeqNum {
        self.rx_next_seq
    }

    fn flag_received<H>(&mut self, handler: &mut H) -> Option<FrameError>
    where
        H: PacketHandler,
    {
        if self.in_frame && !self.buffer.is_empty() {
            let result = self.close_frame(handler);
            self.in_frame = false;
            return result;
        }

        // Frame start. A flag closing an empty frame re-arms accumulation
        // instead of leaving the receiver stuck waiting for content.
        trace!("Frame start.");
        self.buffer.clear();
        self.overrun = false;
        self.in_frame = true;
        self.crc.reset();
        None
    }

    fn close_frame<H>(&mut self, handler: &mut H) -> Option<FrameError>
    where
        H: PacketHandler,
    {
        let result = self.validate(handler);

        if let Some(error) = result {
            warn!("Discarding frame: {error}");
            trace!("Buffer: {:#04X}", HexSlice::new(&self.buffer));

            match error {
                FrameError::ShortFrame { .. } => self.counters.short_frames += 1,
                FrameError::CrcMismatch { .. } => self.counters.crc_mismatches += 1,
                FrameError::BufferOverrun => self.counters.overruns += 1,
            }
        }

        self.buffer.clear();
        self.overrun = false;
        result
    }

    fn validate<H>(&mut self, handler: &mut H) -> Option<FrameError>
    where
        H: PacketHandler,
    {
        if self.overrun {
            return Some(FrameError::BufferOverrun);
        }

        let len = self.buffer.len();

        if len < MIN_FRAME_SIZE {
            return Some(FrameError::ShortFrame { len });
        }

        self.crc.reset();
        for &byte in &self.buffer[..len - TRAILER_SIZE] {
            self.crc.update(byte);
        }

        let expected = self.crc.finish();
        let found = u16::from_le_bytes([self.buffer[len - 2], self.buffer[len - 1]]);

        if expected != found {
            return Some(FrameError::CrcMismatch { expected, found });
        }

        let packet = &self.buffer[HEADER_SIZE..len - TRAILER_SIZE];
        debug!("Delivering {} byte packet.", packet.len());
        trace!("Packet: {:#04X}", HexSlice::new(packet));
        handler.handle_packet(packet);
        self.counters.delivered += 1;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{Counters, Receiver};
    use crate::crc::{Crc16Sdlc, CRC};
    use crate::error::FrameError;
    use crate::protocol::stuffing::Stuffer;
    use crate::protocol::{ESCAPE, FLAG};

    /// Frames a command and payload for station 0x05 the way the transmitter would.
    fn encode_frame(station_id: u8, command: u8, payload: &[u8]) -> Vec<u8> {
        let mut body = vec![station_id, 0x03, command];
        body.extend_from_slice(payload);
        body.extend_from_slice(&CRC.checksum(&body).to_le_bytes());
        encode_raw_body(&body)
    }

    /// Stuffs an already-checksummed body and adds the frame delimiters.
    fn encode_raw_body(body: &[u8]) -> Vec<u8> {
        let stuffer = Stuffer::new(false);
        let mut frame = vec![FLAG];
        frame.extend(body.iter().flat_map(|&byte| stuffer.stuff(byte)));
        frame.push(FLAG);
        frame
    }

    /// Feeds a byte stream and collects dispatched packets and frame errors.
    fn run<const N: usize>(
        receiver: &mut Receiver<Crc16Sdlc, N>,
        stream: &[u8],
    ) -> (Vec<Vec<u8>>, Vec<FrameError>) {
        let mut packets: Vec<Vec<u8>> = Vec::new();
        let mut errors = Vec::new();

        for &byte in stream {
            let mut handler = |packet: &[u8]| packets.push(packet.to_vec());
            if let Some(error) = receiver.receive(byte, &mut handler) {
                errors.push(error);
            }
        }

        (packets, errors)
    }

    #[test]
    fn test_worked_example() {
        let mut receiver: Receiver<Crc16Sdlc, 16> = Receiver::new();
        let stream = encode_frame(0x05, 0x10, &[0x01, 0x02]);

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(packets, vec![vec![0x10, 0x01, 0x02]]);
        assert_eq!(errors, vec![]);
        assert_eq!(
            receiver.counters(),
            Counters {
                delivered: 1,
                ..Counters::default()
            }
        );
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut receiver: Receiver<Crc16Sdlc, 32> = Receiver::new();
        let mut stream = encode_frame(0x05, 0x10, &[0xAA]);
        stream.extend(encode_frame(0x05, 0x11, &[]));

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(packets, vec![vec![0x10, 0xAA], vec![0x11]]);
        assert_eq!(errors, vec![]);
        assert_eq!(receiver.counters().delivered, 2);
    }

    #[test]
    fn test_reserved_bytes_in_payload() {
        let mut receiver: Receiver<Crc16Sdlc, 32> = Receiver::new();
        let payload = [FLAG, ESCAPE, FLAG, ESCAPE, 0x20];
        let stream = encode_frame(0x05, 0x42, &payload);

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(errors, vec![]);
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0][0], 0x42);
        assert_eq!(&packets[0][1..], &payload);
    }

    #[test]
    fn test_short_frame_discarded() {
        let mut receiver: Receiver<Crc16Sdlc, 16> = Receiver::new();
        let stream = [FLAG, 0x01, 0x02, FLAG];

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(packets, Vec::<Vec<u8>>::new());
        assert_eq!(errors, vec![FrameError::ShortFrame { len: 2 }]);
        assert_eq!(receiver.counters().short_frames, 1);
    }

    #[test]
    fn test_crc_mismatch_discarded() {
        let mut receiver: Receiver<Crc16Sdlc, 16> = Receiver::new();
        let mut stream = encode_frame(0x05, 0x10, &[0x01, 0x02]);
        // Corrupt the command byte, which is never stuffed here.
        stream[3] ^= 0x01;

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(packets, Vec::<Vec<u8>>::new());
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], FrameError::CrcMismatch { .. }));
        assert_eq!(receiver.counters().crc_mismatches, 1);
    }

    #[test]
    fn test_single_bit_flips_are_detected() {
        // CRC16 detects all single-bit errors anywhere in the unstuffed body,
        // checksum trailer included.
        let mut body = vec![0x05, 0x03, 0x10, 0x01, 0x02];
        body.extend_from_slice(&CRC.checksum(&body).to_le_bytes());

        for index in 0..body.len() {
            for bit in 0..8 {
                let mut corrupted = body.clone();
                corrupted[index] ^= 1 << bit;

                let mut receiver: Receiver<Crc16Sdlc, 16> = Receiver::new();
                let (packets, errors) = run(&mut receiver, &encode_raw_body(&corrupted));

                assert_eq!(packets, Vec::<Vec<u8>>::new());
                assert_eq!(errors.len(), 1);
                assert!(matches!(errors[0], FrameError::CrcMismatch { .. }));
            }
        }
    }

    #[test]
    fn test_overrun_discards_but_recovers() {
        // Capacity of five holds a payload-less frame but nothing more.
        let mut receiver: Receiver<Crc16Sdlc, 5> = Receiver::new();
        let mut stream = encode_frame(0x05, 0x10, &[0x01, 0x02, 0x03, 0x04]);
        stream.extend(encode_frame(0x05, 0x11, &[]));

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(errors, vec![FrameError::BufferOverrun]);
        assert_eq!(packets, vec![vec![0x11]]);
        assert_eq!(receiver.counters().overruns, 1);
        assert_eq!(receiver.counters().delivered, 1);
    }

    #[test]
    fn test_empty_frame_rearms() {
        // Repeated flags before a frame must not stall the receiver.
        let mut receiver: Receiver<Crc16Sdlc, 16> = Receiver::new();
        let mut stream = vec![FLAG, FLAG, FLAG];
        stream.extend(encode_frame(0x05, 0x10, &[0x01]));

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(errors, vec![]);
        assert_eq!(packets, vec![vec![0x10, 0x01]]);
    }

    #[test]
    fn test_noise_before_frame_is_ignored() {
        let mut receiver: Receiver<Crc16Sdlc, 16> = Receiver::new();
        let mut stream = vec![0xDE, 0xAD, 0xBE, 0xEF];
        stream.extend(encode_frame(0x05, 0x10, &[0x01]));

        let (packets, errors) = run(&mut receiver, &stream);

        assert_eq!(errors, vec![]);
        assert_eq!(packets, vec![vec![0x10, 0x01]]);
    }

    #[test]
    fn test_rx_next_seq_is_inert() {
        let mut receiver: Receiver<Crc16Sdlc, 16> = Receiver::new();
        let stream = encode_frame(0x05, 0x10, &[0x01]);
        let _ = run(&mut receiver, &stream);
        assert_eq!(receiver.rx_next_seq(), 0);
    }
}

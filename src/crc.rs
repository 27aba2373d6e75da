//! Frame integrity checking.

use core::fmt::{Debug, Formatter};
use core::mem;

use crc::{Crc, Digest, CRC_16_IBM_SDLC};

/// CRC-16/IBM-SDLC checksum function, the HDLC FCS-16 of RFC 1549.
pub const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_SDLC);

/// An incremental 16-bit checksum accumulator.
///
/// The algorithm is swappable, but both peers on a link must use the same
/// one. An engine carries no state across a [`reset`](Self::reset).
pub trait CrcEngine {
    /// Discards all accumulated state.
    fn reset(&mut self);

    /// Feeds one byte into the checksum.
    fn update(&mut self, byte: u8);

    /// Returns the checksum of the bytes fed in since the last reset.
    ///
    /// The engine is reset as a side effect.
    fn finish(&mut self) -> u16;
}

/// The default [`CrcEngine`], backed by [`CRC`].
pub struct Crc16Sdlc {
    digest: Digest<'static, u16>,
}

impl CrcEngine for Crc16Sdlc {
    fn reset(&mut self) {
        self.digest = CRC.digest();
    }

    fn update(&mut self, byte: u8) {
        self.digest.update(&[byte]);
    }

    fn finish(&mut self) -> u16 {
        mem::replace(&mut self.digest, CRC.digest()).finalize()
    }
}

impl Debug for Crc16Sdlc {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Crc16Sdlc").finish_non_exhaustive()
    }
}

impl Default for Crc16Sdlc {
    fn default() -> Self {
        Self {
            digest: CRC.digest(),
        }
    }
}

//! One complete link instance.

use crate::config::Config;
use crate::crc::{Crc16Sdlc, CrcEngine};
use crate::error::FrameError;
use crate::receiver::{Counters, PacketHandler, Receiver};
use crate::transmitter::Transmitter;
use crate::transport::Transport;

/// One point-to-point link: a receiver and a transmitter sharing a
/// configuration.
///
/// All mutable state lives inside the instance, so independent links can
/// run side by side. A link is confined to one owning task; it does no
/// internal locking.
#[derive(Debug)]
pub struct Link<T, C, const N: usize> {
    receiver: Receiver<C, N>,
    transmitter: Transmitter<T, C>,
}

impl<T, const N: usize> Link<T, Crc16Sdlc, N>
where
    T: Transport,
{
    /// Creates a link over the given transport using the default checksum engine.
    pub fn new(transport: T, config: Config) -> Self {
        Self {
            receiver: Receiver::new(),
            transmitter: Transmitter::new(transport, config),
        }
    }
}

impl<T, C, const N: usize> Link<T, C, N>
where
    T: Transport,
    C: CrcEngine,
{
    /// Encodes and transmits one frame.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if a write or the flush fails.
    pub fn send(&mut self, command: u8, payload: &[u8]) -> Result<(), T::Error> {
        self.transmitter.send(command, payload)
    }

    /// Feeds one received byte into the frame assembler.
    ///
    /// See [`Receiver::receive`].
    pub fn receive<H>(&mut self, byte: u8, handler: &mut H) -> Option<FrameError>
    where
        H: PacketHandler,
    {
        self.receiver.receive(byte, handler)
    }

    /// Returns the receive-side frame outcome totals.
    #[must_use]
    pub const fn counters(&self) -> Counters {
        self.receiver.counters()
    }

    /// Returns the receive side of the link.
    #[must_use]
    pub const fn receiver(&self) -> &Receiver<C, N> {
        &self.receiver
    }

    /// Returns the transmit side of the link.
    #[must_use]
    pub const fn transmitter(&self) -> &Transmitter<T, C> {
        &self.transmitter
    }

    /// Tears the link down and returns the transport.
    #[must_use]
    pub fn into_transport(self) -> T {
        self.transmitter.into_inner()
    }
}

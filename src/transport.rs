//! Outbound byte transport.

/// A sink for encoded frame bytes.
///
/// The framer only writes; the caller owns the read loop and feeds received
/// bytes into the [`Receiver`](crate::Receiver) one at a time.
pub trait Transport {
    /// The error type returned by the transport.
    type Error;

    /// Writes a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the byte could not be written.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Flushes any buffered output to the line.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the output could not be flushed.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Every [`std::io::Write`] implementor is a transport, serial ports included.
impl<T> Transport for T
where
    T: std::io::Write,
{
    type Error = std::io::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.write_all(&[byte])
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(self)
    }
}

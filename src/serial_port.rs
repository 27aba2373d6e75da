use crate::BaudRate;

#[cfg(windows)]
pub use serialport::COMPort as SerialPortImpl;

#[cfg(unix)]
pub use serialport::TTYPort as SerialPortImpl;

/// Opens the serial port at `path`, picking the implementation for the local
/// operating system.
///
/// The returned port implements [`std::io::Write`] and therefore
/// [`Transport`](crate::Transport).
///
/// # Errors
///
/// Returns a [`serialport::Error`] if the port cannot be opened.
pub fn open<'a>(
    path: impl Into<std::borrow::Cow<'a, str>>,
    baud_rate: BaudRate,
) -> serialport::Result<SerialPortImpl> {
    SerialPortImpl::open(&serialport::new(path, baud_rate.into()))
}

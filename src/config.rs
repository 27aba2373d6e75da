//! Per-link configuration.

/// Configuration of one link instance, immutable for its lifetime.
///
/// The maximum frame size is not part of this value: it is the const generic
/// capacity of the receiver, fixed at compile time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    station_id: u8,
    force_escape: bool,
}

impl Config {
    /// Creates a configuration for the given station identity.
    #[must_use]
    pub const fn new(station_id: u8) -> Self {
        Self {
            station_id,
            force_escape: false,
        }
    }

    /// Escapes every transmitted byte instead of only the reserved ones.
    #[must_use]
    pub const fn with_force_escape(mut self, force_escape: bool) -> Self {
        self.force_escape = force_escape;
        self
    }

    /// Returns the station identity byte.
    #[must_use]
    pub const fn station_id(&self) -> u8 {
        self.station_id
    }

    /// Returns whether every transmitted byte is escaped.
    #[must_use]
    pub const fn force_escape(&self) -> bool {
        self.force_escape
    }
}

//! HDLC control-field model.
//!
//! The control byte is modeled as a tagged value with dedicated encode and
//! decode functions, per ISO 4335. The transmitter currently emits the
//! default value ([`ControlField::default`], an unnumbered UI frame encoding
//! to `0x03`); the full construction exists so that a future ARQ layer does
//! not have to deal with raw bit layout.

use core::fmt::{Display, Formatter};

use crate::seq_num::SeqNum;

/// Low two bits marking a supervisory frame.
const SUPERVISORY_BITS: u8 = 0b01;

/// Low two bits marking an unnumbered frame.
const UNNUMBERED_BITS: u8 = 0b11;

/// Poll/final bit, common to all three layouts.
const POLL: u8 = 1 << 4;

/// A decoded HDLC control field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ControlField {
    /// Numbered information frame carrying payload.
    Information {
        /// Send sequence number of this frame.
        tx_seq: SeqNum,
        /// Poll/final bit.
        poll: bool,
        /// Sequence number of the next frame expected from the peer.
        rx_seq: SeqNum,
    },
    /// Supervisory frame controlling the flow of information frames.
    Supervisory {
        /// Supervisory function code.
        function: SupervisoryFunction,
        /// Poll/final bit.
        poll: bool,
        /// Sequence number of the next frame expected from the peer.
        rx_seq: SeqNum,
    },
    /// Unnumbered frame for link management.
    Unnumbered {
        /// Unnumbered function code.
        function: UnnumberedFunction,
        /// Poll/final bit.
        poll: bool,
    },
}

impl ControlField {
    /// Encodes the control field into its wire byte.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Information {
                tx_seq,
                poll,
                rx_seq,
            } => (tx_seq.as_u8() << 1) | (poll as u8) << 4 | (rx_seq.as_u8() << 5),
            Self::Supervisory {
                function,
                poll,
                rx_seq,
            } => {
                SUPERVISORY_BITS
                    | (function as u8) << 2
                    | (poll as u8) << 4
                    | (rx_seq.as_u8() << 5)
            }
            Self::Unnumbered { function, poll } => {
                let code = function as u8;
                UNNUMBERED_BITS | (code >> 3) << 2 | (poll as u8) << 4 | (code & 0b111) << 5
            }
        }
    }
}

impl Default for ControlField {
    /// The fixed control byte the transmitter currently puts on the wire: `0x03`.
    fn default() -> Self {
        Self::Unnumbered {
            function: UnnumberedFunction::UnnumberedInformation,
            poll: false,
        }
    }
}

impl Display for ControlField {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Information {
                tx_seq,
                poll,
                rx_seq,
            } => write!(f, "I({tx_seq}, {}, {rx_seq})", u8::from(*poll)),
            Self::Supervisory {
                function,
                poll,
                rx_seq,
            } => write!(f, "S({function:?}, {}, {rx_seq})", u8::from(*poll)),
            Self::Unnumbered { function, poll } => {
                write!(f, "U({function:?}, {})", u8::from(*poll))
            }
        }
    }
}

impl From<ControlField> for u8 {
    fn from(control: ControlField) -> Self {
        control.to_byte()
    }
}

impl TryFrom<u8> for ControlField {
    type Error = u8;

    /// Decodes a wire byte, returning it unchanged if it carries an unknown
    /// unnumbered function code.
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        if byte & 0b1 == 0 {
            return Ok(Self::Information {
                tx_seq: SeqNum::from_u8_lossy(byte >> 1),
                poll: byte & POLL != 0,
                rx_seq: SeqNum::from_u8_lossy(byte >> 5),
            });
        }

        if byte & 0b11 == SUPERVISORY_BITS {
            return Ok(Self::Supervisory {
                function: SupervisoryFunction::from_bits(byte >> 2),
                poll: byte & POLL != 0,
                rx_seq: SeqNum::from_u8_lossy(byte >> 5),
            });
        }

        let code = (byte >> 2 & 0b11) << 3 | byte >> 5;
        UnnumberedFunction::try_from(code)
            .map(|function| Self::Unnumbered {
                function,
                poll: byte & POLL != 0,
            })
            .map_err(|_| byte)
    }
}

/// Supervisory function codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum SupervisoryFunction {
    /// Receiver ready.
    ReceiverReady = 0x0,
    /// Receiver not ready.
    ReceiverNotReady = 0x1,
    /// Reject.
    Reject = 0x2,
    /// Selective reject.
    SelectiveReject = 0x3,
}

impl SupervisoryFunction {
    /// All two-bit values map to a function, so decoding cannot fail.
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0x0 => Self::ReceiverReady,
            0x1 => Self::ReceiverNotReady,
            0x2 => Self::Reject,
            _ => Self::SelectiveReject,
        }
    }
}

/// Unnumbered function codes, numbered as the concatenation of the two
/// modifier bits and the three function bits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum UnnumberedFunction {
    /// Unnumbered information.
    UnnumberedInformation = 0x00,
    /// Set normal response mode.
    SetNormalResponseMode = 0x01,
    /// Request disconnect.
    RequestDisconnect = 0x02,
    /// Unnumbered poll.
    UnnumberedPoll = 0x04,
    /// Unnumbered acknowledgment.
    UnnumberedAcknowledgment = 0x06,
    /// Test.
    Test = 0x07,
    /// Request initialization mode.
    RequestInitializationMode = 0x10,
    /// Frame reject.
    FrameReject = 0x11,
    /// Set initialization mode.
    SetInitializationMode = 0x12,
}

impl TryFrom<u8> for UnnumberedFunction {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(Self::UnnumberedInformation),
            0x01 => Ok(Self::SetNormalResponseMode),
            0x02 => Ok(Self::RequestDisconnect),
            0x04 => Ok(Self::UnnumberedPoll),
            0x06 => Ok(Self::UnnumberedAcknowledgment),
            0x07 => Ok(Self::Test),
            0x10 => Ok(Self::RequestInitializationMode),
            0x11 => Ok(Self::FrameReject),
            0x12 => Ok(Self::SetInitializationMode),
            code => Err(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ControlField, SupervisoryFunction, UnnumberedFunction};
    use crate::seq_num::SeqNum;

    #[test]
    fn test_default_is_wire_constant() {
        assert_eq!(ControlField::default().to_byte(), 0x03);
    }

    #[test]
    fn test_information_round_trip() {
        for tx in 0..8 {
            for rx in 0..8 {
                for poll in [false, true] {
                    let control = ControlField::Information {
                        tx_seq: SeqNum::from_u8_lossy(tx),
                        poll,
                        rx_seq: SeqNum::from_u8_lossy(rx),
                    };
                    let byte = control.to_byte();
                    assert_eq!(byte & 0b1, 0);
                    assert_eq!(ControlField::try_from(byte), Ok(control));
                }
            }
        }
    }

    #[test]
    fn test_supervisory_round_trip() {
        let control = ControlField::Supervisory {
            function: SupervisoryFunction::Reject,
            poll: true,
            rx_seq: SeqNum::from_u8_lossy(5),
        };
        let byte = control.to_byte();
        assert_eq!(byte & 0b11, 0b01);
        assert_eq!(ControlField::try_from(byte), Ok(control));
    }

    #[test]
    fn test_unnumbered_round_trip() {
        for function in [
            UnnumberedFunction::UnnumberedInformation,
            UnnumberedFunction::SetNormalResponseMode,
            UnnumberedFunction::RequestDisconnect,
            UnnumberedFunction::UnnumberedPoll,
            UnnumberedFunction::UnnumberedAcknowledgment,
            UnnumberedFunction::Test,
            UnnumberedFunction::RequestInitializationMode,
            UnnumberedFunction::FrameReject,
            UnnumberedFunction::SetInitializationMode,
        ] {
            for poll in [false, true] {
                let control = ControlField::Unnumbered { function, poll };
                let byte = control.to_byte();
                assert_eq!(byte & 0b11, 0b11);
                assert_eq!(ControlField::try_from(byte), Ok(control));
            }
        }
    }

    #[test]
    fn test_unknown_unnumbered_function() {
        // Modifier 01 is unused by every known function code.
        let byte = 0b11 | 0b01 << 2;
        assert_eq!(ControlField::try_from(byte), Err(byte));
    }

    #[test]
    fn test_to_string() {
        let control = ControlField::Information {
            tx_seq: SeqNum::from_u8_lossy(2),
            poll: false,
            rx_seq: SeqNum::from_u8_lossy(7),
        };
        assert_eq!(control.to_string(), "I(2, 0, 7)");
        assert_eq!(ControlField::default().to_string(), "U(UnnumberedInformation, 0)");
    }
}

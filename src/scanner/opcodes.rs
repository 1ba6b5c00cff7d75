//! ECMA-335 opcode operand widths.
//!
//! Only two opcodes carry meaning for binding recovery (`ldstr`, `stsfld`);
//! every other opcode just has to be stepped over correctly, which needs the
//! width of its inline operand.

/// Prefix byte of the two-byte opcode space.
pub const PREFIX: u8 = 0xFE;

/// `ldstr <user string token>`
pub const LDSTR: u16 = 0x72;
/// `stsfld <field token>`
pub const STSFLD: u16 = 0x80;

/// Inline operand carried by an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    U8,
    U16,
    U32,
    U64,
    /// `u32` count followed by that many `i32` branch targets
    Switch,
}

impl Operand {
    /// Fixed operand size in bytes; `None` for the variable-width switch table.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Operand::None => Some(0),
            Operand::U8 => Some(1),
            Operand::U16 => Some(2),
            Operand::U32 => Some(4),
            Operand::U64 => Some(8),
            Operand::Switch => None,
        }
    }
}

/// Operand of a one-byte opcode, `None` when the byte is not a valid opcode.
pub fn single_byte_operand(opcode: u8) -> Option<Operand> {
    let operand = match opcode {
        0x00..=0x0D => Operand::None,
        0x0E..=0x13 => Operand::U8,
        0x14..=0x1E => Operand::None,
        0x1F => Operand::U8,
        0x20 | 0x22 => Operand::U32,
        0x21 | 0x23 => Operand::U64,
        0x25 | 0x26 => Operand::None,
        0x27..=0x29 => Operand::U32,
        0x2A => Operand::None,
        0x2B..=0x37 => Operand::U8,
        0x38..=0x44 => Operand::U32,
        0x45 => Operand::Switch,
        0x46..=0x6E => Operand::None,
        0x6F..=0x75 => Operand::U32,
        0x76 => Operand::None,
        0x79 => Operand::U32,
        0x7A => Operand::None,
        0x7B..=0x81 => Operand::U32,
        0x82..=0x8B => Operand::None,
        0x8C | 0x8D => Operand::U32,
        0x8E => Operand::None,
        0x8F => Operand::U32,
        0x90..=0xA2 => Operand::None,
        0xA3..=0xA5 => Operand::U32,
        0xB3..=0xBA => Operand::None,
        0xC2 => Operand::U32,
        0xC3 => Operand::None,
        0xC6 => Operand::U32,
        0xD0 => Operand::U32,
        0xD1..=0xDC => Operand::None,
        0xDD => Operand::U32,
        0xDE => Operand::U8,
        0xDF | 0xE0 => Operand::None,
        _ => return None,
    };
    Some(operand)
}

/// Operand of a `0xFE`-prefixed opcode, keyed by its second byte.
pub fn prefixed_operand(second: u8) -> Option<Operand> {
    let operand = match second {
        0x00..=0x05 => Operand::None,
        0x06 | 0x07 => Operand::U32,
        0x09..=0x0E => Operand::U16,
        0x0F | 0x11 => Operand::None,
        0x12 => Operand::U8,
        0x13 | 0x14 => Operand::None,
        0x15 | 0x16 => Operand::U32,
        0x17 | 0x18 => Operand::None,
        0x19 => Operand::U8,
        0x1A => Operand::None,
        0x1C => Operand::U32,
        0x1D | 0x1E => Operand::None,
        _ => return None,
    };
    Some(operand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_opcodes_take_tokens() {
        assert_eq!(single_byte_operand(LDSTR as u8), Some(Operand::U32));
        assert_eq!(single_byte_operand(STSFLD as u8), Some(Operand::U32));
    }

    #[test]
    fn test_common_initializer_opcodes() {
        // call, ret, ldc.i4.s, br.s, switch
        assert_eq!(single_byte_operand(0x28), Some(Operand::U32));
        assert_eq!(single_byte_operand(0x2A), Some(Operand::None));
        assert_eq!(single_byte_operand(0x1F), Some(Operand::U8));
        assert_eq!(single_byte_operand(0x2B), Some(Operand::U8));
        assert_eq!(single_byte_operand(0x45), Some(Operand::Switch));
    }

    #[test]
    fn test_reserved_bytes_are_rejected() {
        for byte in [0x24u8, 0x77, 0x78, 0xA6, 0xB2, 0xC4, 0xE1, 0xFF] {
            assert_eq!(single_byte_operand(byte), None, "0x{byte:02X}");
        }
        assert_eq!(prefixed_operand(0x08), None);
        assert_eq!(prefixed_operand(0x1B), None);
    }

    #[test]
    fn test_prefixed_local_access_is_u16() {
        // ldloc, stloc
        assert_eq!(prefixed_operand(0x0C), Some(Operand::U16));
        assert_eq!(prefixed_operand(0x0E), Some(Operand::U16));
        assert_eq!(Operand::U16.fixed_width(), Some(2));
        assert_eq!(Operand::Switch.fixed_width(), None);
    }
}

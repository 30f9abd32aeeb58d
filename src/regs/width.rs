/// Load/store width qualifier, as decoded from the `funct3` field.
use bitfield::bitfield;

bitfield! {
    /// funct3 of a RISC-V load, store or AMO instruction.
    ///
    /// The bus accepts this on every access but treats all registers as
    /// full 64-bit values regardless of what it says.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AccessWidth(u8);

    // Bits [7:3] - Not part of funct3

    /// Bit [2] - Zero-extend on load (LBU, LHU, LWU)
    pub unsigned, set_unsigned: 2;

    /// Bits [1:0] - log2 of the access size in bytes
    size_bits, set_size_bits: 1, 0;
}

impl AccessWidth {
    pub const BYTE: Self = Self(0b000);
    pub const HALFWORD: Self = Self(0b001);
    pub const WORD: Self = Self(0b010);
    pub const DOUBLEWORD: Self = Self(0b011);

    /// Create from a raw funct3 value; bits above [2:0] are dropped.
    pub const fn from_funct3(funct3: u8) -> Self {
        Self(funct3 & 0b111)
    }

    pub const fn raw(&self) -> u8 {
        self.0
    }

    pub fn size(&self) -> AccessSize {
        AccessSize::from(self.size_bits())
    }
}

impl Default for AccessWidth {
    fn default() -> Self {
        Self::DOUBLEWORD
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AccessSize {
    Byte = 0b00,
    Halfword = 0b01,
    Word = 0b10,
    DoubleWord = 0b11,
}

impl From<u8> for AccessSize {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0b00 => AccessSize::Byte,
            0b01 => AccessSize::Halfword,
            0b10 => AccessSize::Word,
            _ => AccessSize::DoubleWord,
        }
    }
}

impl From<AccessSize> for usize {
    fn from(val: AccessSize) -> Self {
        match val {
            AccessSize::Byte => 1,
            AccessSize::Halfword => 2,
            AccessSize::Word => 4,
            AccessSize::DoubleWord => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_funct3() {
        let lbu = AccessWidth::from_funct3(0b100);
        assert!(lbu.unsigned());
        assert_eq!(lbu.size(), AccessSize::Byte);

        let sd = AccessWidth::from_funct3(0b011);
        assert!(!sd.unsigned());
        assert_eq!(usize::from(sd.size()), 8);

        let lwu = AccessWidth::from_funct3(0b110);
        assert_eq!(usize::from(lwu.size()), 4);
    }

    #[test]
    fn test_high_bits_dropped() {
        assert_eq!(AccessWidth::from_funct3(0xFA).raw(), 0b010);
        assert_eq!(AccessWidth::default(), AccessWidth::DOUBLEWORD);
    }
}

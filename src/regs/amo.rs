/// RISC-V "A" extension encodings.
use bitfield::bitfield;

use crate::regs::AccessWidth;

bitfield! {
    /// An R-type AMO instruction word (opcode 0b0101111).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct AmoInstruction(u32);

    /// Bits [31:27] - Operation selector
    u8, funct5, set_funct5: 31, 27;

    /// Bit [26] - Acquire ordering
    pub aq, set_aq: 26;

    /// Bit [25] - Release ordering
    pub rl, set_rl: 25;

    /// Bits [24:20] - Source register (value operand)
    pub u8, rs2, set_rs2: 24, 20;

    /// Bits [19:15] - Address register
    pub u8, rs1, set_rs1: 19, 15;

    /// Bits [14:12] - Width (0b010 = .W, 0b011 = .D)
    u8, funct3, set_funct3: 14, 12;

    /// Bits [11:7] - Destination register
    pub u8, rd, set_rd: 11, 7;

    /// Bits [6:0] - Major opcode
    pub u8, opcode, set_opcode: 6, 0;
}

pub const AMO_OPCODE: u8 = 0b010_1111;

impl AmoInstruction {
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub fn is_amo(&self) -> bool {
        self.opcode() == AMO_OPCODE
    }

    pub fn op(&self) -> Result<AmoOp, u8> {
        AmoOp::try_from(self.funct5())
    }

    pub fn width(&self) -> AccessWidth {
        AccessWidth::from_funct3(self.funct3())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AmoOp {
    Add = 0b00000,
    Swap = 0b00001,
    LoadReserved = 0b00010,
    StoreConditional = 0b00011,
    Xor = 0b00100,
    Or = 0b01000,
    And = 0b01100,
    Min = 0b10000,
    Max = 0b10100,
    MinU = 0b11000,
    MaxU = 0b11100,
}

impl AmoOp {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            AmoOp::Add => "amoadd",
            AmoOp::Swap => "amoswap",
            AmoOp::LoadReserved => "lr",
            AmoOp::StoreConditional => "sc",
            AmoOp::Xor => "amoxor",
            AmoOp::Or => "amoor",
            AmoOp::And => "amoand",
            AmoOp::Min => "amomin",
            AmoOp::Max => "amomax",
            AmoOp::MinU => "amominu",
            AmoOp::MaxU => "amomaxu",
        }
    }

    pub fn from_mnemonic(text: &str) -> Option<Self> {
        AMO_OPS
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }
}

const AMO_OPS: [AmoOp; 11] = [
    AmoOp::Add,
    AmoOp::Swap,
    AmoOp::LoadReserved,
    AmoOp::StoreConditional,
    AmoOp::Xor,
    AmoOp::Or,
    AmoOp::And,
    AmoOp::Min,
    AmoOp::Max,
    AmoOp::MinU,
    AmoOp::MaxU,
];

impl TryFrom<u8> for AmoOp {
    type Error = u8;

    fn try_from(funct5: u8) -> Result<Self, Self::Error> {
        AMO_OPS
            .iter()
            .copied()
            .find(|op| *op as u8 == funct5)
            .ok_or(funct5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_amoswap_d_aqrl() {
        // amoswap.d.aqrl a0, a1, (a2)
        let mut insn = AmoInstruction::from_raw(0);
        insn.set_opcode(AMO_OPCODE);
        insn.set_funct5(AmoOp::Swap as u8);
        insn.set_aq(true);
        insn.set_rl(true);
        insn.set_funct3(0b011);
        insn.set_rd(10);
        insn.set_rs1(12);
        insn.set_rs2(11);

        assert_eq!(insn.raw(), 0x0EB6_352F);
        assert!(insn.is_amo());
        assert_eq!(insn.op(), Ok(AmoOp::Swap));
        assert_eq!(insn.width(), AccessWidth::DOUBLEWORD);
        assert!(insn.aq() && insn.rl());
        assert_eq!((insn.rd(), insn.rs1(), insn.rs2()), (10, 12, 11));
    }

    #[test]
    fn test_unknown_funct5() {
        assert_eq!(AmoOp::try_from(0b00101), Err(0b00101));
        assert_eq!(AmoOp::try_from(0b11100), Ok(AmoOp::MaxU));
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(AmoOp::from_mnemonic("AMOADD"), Some(AmoOp::Add));
        assert_eq!(AmoOp::from_mnemonic("lr"), Some(AmoOp::LoadReserved));
        assert_eq!(AmoOp::from_mnemonic("amonand"), None);
    }
}

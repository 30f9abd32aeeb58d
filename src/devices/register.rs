use crate::regs::AccessWidth;

pub trait Register {
    fn read(&self) -> u64;
    fn write(&mut self, value: u64, width: AccessWidth);
    fn reset(&mut self);
}

/// Full 64-bit read/write register with a power-on value.
#[derive(Debug, Clone)]
pub struct RwRegister {
    value: u64,
    reset_value: u64,
}

impl RwRegister {
    pub fn new(reset_value: u64) -> Self {
        Self {
            value: reset_value,
            reset_value,
        }
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }
}

impl Register for RwRegister {
    fn read(&self) -> u64 {
        self.value
    }

    // Width is not consulted: partial writes replace the whole register.
    fn write(&mut self, value: u64, _width: AccessWidth) {
        self.value = value;
    }

    fn reset(&mut self) {
        self.value = self.reset_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rw_register() {
        let mut reg = RwRegister::new(1);
        assert_eq!(reg.read(), 1);

        reg.write(0xDEAD_BEEF_0000_0001, AccessWidth::BYTE);
        assert_eq!(reg.read(), 0xDEAD_BEEF_0000_0001);

        reg.reset();
        assert_eq!(reg.read(), 1);
    }
}

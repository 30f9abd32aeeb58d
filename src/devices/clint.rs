//! Machine timer and software-interrupt registers.
//!
//! Only the three single-hart registers are modelled, each at a fixed
//! absolute address and always accessed as a whole 64-bit value.

use crate::MmioDevice;
use crate::devices::register::{Register, RwRegister};
use crate::err::MmioError;
use crate::mems::{MSIP_BASE, MTIME_BASE, MTIMECMP_BASE};
use crate::regs::AccessWidth;

/// `mtime` starts one ahead of `mtimecmp` so the first tick after reset
/// does not report a pending interrupt.
pub const MTIME_RESET: u64 = 1;
pub const MTIMECMP_RESET: u64 = 0;
pub const MSIP_RESET: u64 = 0;

#[derive(Debug, Clone)]
pub struct Clint {
    mtime: RwRegister,
    mtimecmp: RwRegister,
    msip: RwRegister,
}

impl Default for Clint {
    fn default() -> Self {
        Self {
            mtime: RwRegister::new(MTIME_RESET),
            mtimecmp: RwRegister::new(MTIMECMP_RESET),
            msip: RwRegister::new(MSIP_RESET),
        }
    }
}

impl Clint {
    pub fn mtime(&self) -> u64 {
        self.mtime.read()
    }

    pub fn mtimecmp(&self) -> u64 {
        self.mtimecmp.read()
    }

    pub fn msip(&self) -> u64 {
        self.msip.read()
    }

    /// Bit 0 of `msip`. The register itself is stored verbatim.
    pub fn software_interrupt_pending(&self) -> bool {
        self.msip.read() & 1 != 0
    }

    /// Advance the clock by one cycle.
    ///
    /// The comparison uses the values from before the increment and fires
    /// while `mtimecmp >= mtime`. A firing clears `mtimecmp` so the
    /// condition does not repeat until software writes it again.
    pub fn tick(&mut self) -> bool {
        let mtime = self.mtime.read();
        let pending = self.mtimecmp.read() >= mtime;
        if pending {
            log::trace!("timer fired at mtime {mtime}, clearing mtimecmp");
            self.mtimecmp.set_value(0);
        }
        self.mtime.set_value(mtime.wrapping_add(1));
        pending
    }
}

impl MmioDevice for Clint {
    fn read(&self, addr: u64, _width: AccessWidth) -> Option<u64> {
        match addr {
            MTIME_BASE => Some(self.mtime.read()),
            MTIMECMP_BASE => Some(self.mtimecmp.read()),
            MSIP_BASE => Some(self.msip.read()),
            _ => None,
        }
    }

    fn write(&mut self, addr: u64, width: AccessWidth, value: u64) -> Result<(), MmioError> {
        match addr {
            MTIME_BASE => self.mtime.write(value, width),
            MTIMECMP_BASE => self.mtimecmp.write(value, width),
            MSIP_BASE => self.msip.write(value, width),
            _ => return Err(MmioError::store_amo_fault(addr)),
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.mtime.reset();
        self.mtimecmp.reset();
        self.msip.reset();
    }
}

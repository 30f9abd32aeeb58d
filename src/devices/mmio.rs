use crate::devices::clint::Clint;
use crate::devices::console::Console;
use crate::err::MmioError;
use crate::mems::{Peripheral, region_of};
use crate::regs::{AccessWidth, AmoOp};

/// Value returned for reads nothing is bound to. Not peripheral data.
pub const UNIMPLEMENTED_READ: u64 = 0xAAAA_AAAA_AAAA_AAAA;

/// A peripheral decoding absolute addresses inside its own window.
pub trait MmioDevice {
    /// `None` when nothing readable sits at `addr`.
    fn read(&self, addr: u64, width: AccessWidth) -> Option<u64>;
    fn write(&mut self, addr: u64, width: AccessWidth, value: u64) -> Result<(), MmioError>;
    fn reset(&mut self);
}

/// Register bank and access dispatcher for one simulated machine.
///
/// Callers must only hand it addresses for which
/// [`is_io_address`](crate::mems::is_io_address) holds. The bus is not
/// synchronised; hosts sharing it across threads serialise every call.
#[derive(Debug, Clone, Default)]
pub struct MmioBus {
    clint: Clint,
    console: Console,
}

impl MmioBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn device(&self, peripheral: Peripheral) -> &dyn MmioDevice {
        match peripheral {
            Peripheral::ConsoleOut | Peripheral::Uart => &self.console,
            Peripheral::Mtime | Peripheral::Mtimecmp | Peripheral::Msip => &self.clint,
        }
    }

    fn device_mut(&mut self, peripheral: Peripheral) -> &mut dyn MmioDevice {
        match peripheral {
            Peripheral::ConsoleOut | Peripheral::Uart => &mut self.console,
            Peripheral::Mtime | Peripheral::Mtimecmp | Peripheral::Msip => &mut self.clint,
        }
    }

    /// Never faults: unbound addresses yield [`UNIMPLEMENTED_READ`].
    pub fn read(&self, width: AccessWidth, addr: u64) -> u64 {
        log::debug!("Read from {addr:#0x} ({:?})", width.size());
        region_of(addr)
            .and_then(|region| self.device(region.peripheral).read(addr, width))
            .unwrap_or(UNIMPLEMENTED_READ)
    }

    /// Returns 0 on success. Faulting writes leave every register untouched.
    pub fn write(&mut self, width: AccessWidth, addr: u64, value: u64) -> Result<u64, MmioError> {
        log::debug!("Write {value:#x} to {addr:#0x} ({:?})", width.size());
        let region = region_of(addr).ok_or(MmioError::store_amo_fault(addr))?;
        self.device_mut(region.peripheral)
            .write(addr, width, value)
            .inspect_err(|err| log::warn!("{err}"))?;
        Ok(0)
    }

    /// Atomics are not supported on any I/O address.
    pub fn atomic_op(
        &mut self,
        addr: u64,
        width: AccessWidth,
        op: AmoOp,
        aq: bool,
        rl: bool,
        value: u64,
    ) -> Result<u64, MmioError> {
        log::warn!(
            "Rejecting {} at {addr:#0x} ({:?}, aq={aq}, rl={rl}, value={value:#x})",
            op.mnemonic(),
            width.size(),
        );
        Err(MmioError::store_amo_fault(addr))
    }

    /// Advance `mtime` by one; `true` when the timer interrupt is pending.
    pub fn tick(&mut self) -> bool {
        self.clint.tick()
    }

    pub fn consume_console_output(&mut self) -> Vec<u8> {
        self.console.drain()
    }

    pub fn read_all_console_output(&self) -> Vec<u8> {
        self.console.history()
    }

    pub fn clint(&self) -> &Clint {
        &self.clint
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn reset(&mut self) {
        self.clint.reset();
        self.console.reset();
    }
}

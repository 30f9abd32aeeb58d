use crate::MmioDevice;
use crate::err::MmioError;
use crate::mems::{CONSOLE_OUT_BASE, Peripheral, UART_OUT, region_of};
use crate::regs::AccessWidth;

/// Console output fed by the legacy port and the UART transmit register.
///
/// Bytes land in `pending` and move to `consumed` when the host drains
/// them, so `consumed ++ pending` is always the whole output history.
#[derive(Debug, Clone, Default)]
pub struct Console {
    consumed: Vec<u8>,
    pending: Vec<u8>,
}

impl Console {
    fn transmit(&mut self, data: u8) {
        self.pending.push(data);
    }

    /// Returns only the bytes written since the previous drain.
    pub fn drain(&mut self) -> Vec<u8> {
        let drained = std::mem::take(&mut self.pending);
        self.consumed.extend_from_slice(&drained);
        drained
    }

    pub fn history(&self) -> Vec<u8> {
        let mut all = Vec::with_capacity(self.consumed.len() + self.pending.len());
        all.extend_from_slice(&self.consumed);
        all.extend_from_slice(&self.pending);
        all
    }

    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn consumed(&self) -> &[u8] {
        &self.consumed
    }
}

fn in_uart_block(addr: u64) -> bool {
    matches!(region_of(addr), Some(region) if region.peripheral == Peripheral::Uart)
}

impl MmioDevice for Console {
    // Both ports are write-only.
    fn read(&self, _addr: u64, _width: AccessWidth) -> Option<u64> {
        None
    }

    fn write(&mut self, addr: u64, _width: AccessWidth, value: u64) -> Result<(), MmioError> {
        match addr {
            CONSOLE_OUT_BASE | UART_OUT => self.transmit(value as u8),
            // Remaining UART registers are accepted and ignored.
            addr if in_uart_block(addr) => {}
            _ => return Err(MmioError::store_amo_fault(addr)),
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.consumed.clear();
        self.pending.clear();
    }
}

// MMIO address map

// Each peripheral claims a window of the physical address space.
// Nothing behind these windows is RAM: the CPU asks `is_io_address`
// first and routes hits to the bus instead of memory.

/// Legacy console output port.
pub const CONSOLE_OUT_BASE: u64 = 0xFFF4;
pub const CONSOLE_OUT_SIZE: u64 = 8;

// Named after a 0xC000_0000 UART in older firmware, but the effective
// base has always been decimal 10000.
pub const UART_BASE: u64 = 10000;
pub const UART_SIZE: u64 = 0x80;
pub const UART_OUT: u64 = UART_BASE;

pub const MSIP_BASE: u64 = 0x0200_0000;
pub const MSIP_SIZE: u64 = 8;

pub const MTIMECMP_BASE: u64 = 0x0200_4000;
pub const MTIMECMP_SIZE: u64 = 8;

pub const MTIME_BASE: u64 = 0x0200_BFF8;
pub const MTIME_SIZE: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Peripheral {
    ConsoleOut,
    Uart,
    Mtime,
    Mtimecmp,
    Msip,
}

/// Half-open byte interval `[base, limit)` claimed by one peripheral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressRange {
    pub peripheral: Peripheral,
    pub base: u64,
    pub limit: u64,
}

impl AddressRange {
    pub const fn new(peripheral: Peripheral, base: u64, size: u64) -> Self {
        Self {
            peripheral,
            base,
            limit: base + size,
        }
    }

    pub fn contains(&self, addr: u64) -> bool {
        (self.base..self.limit).contains(&addr)
    }

    pub fn offset_of(&self, addr: u64) -> Option<u64> {
        if self.contains(addr) {
            Some(addr - self.base)
        } else {
            None
        }
    }

    pub fn size(&self) -> u64 {
        self.limit - self.base
    }
}

/// Checked in order, first match wins.
pub const IO_ADDRESS_MAP: [AddressRange; 5] = [
    AddressRange::new(Peripheral::ConsoleOut, CONSOLE_OUT_BASE, CONSOLE_OUT_SIZE),
    AddressRange::new(Peripheral::Uart, UART_BASE, UART_SIZE),
    AddressRange::new(Peripheral::Mtime, MTIME_BASE, MTIME_SIZE),
    AddressRange::new(Peripheral::Mtimecmp, MTIMECMP_BASE, MTIMECMP_SIZE),
    AddressRange::new(Peripheral::Msip, MSIP_BASE, MSIP_SIZE),
];

pub fn region_of(addr: u64) -> Option<&'static AddressRange> {
    IO_ADDRESS_MAP.iter().find(|range| range.contains(addr))
}

pub fn is_io_address(addr: u64) -> bool {
    region_of(addr).is_some()
}

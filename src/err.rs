use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("MMIO error: {0}")]
    Mmio(#[from] MmioError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("General error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// RISC-V exception code for a store/AMO access fault (mcause = 7).
pub const STORE_AMO_ACCESS_FAULT_CAUSE: u64 = 7;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmioError {
    #[error("Store/AMO access fault at address 0x{addr:016x}")]
    StoreAmoAccessFault { addr: u64 },
}

impl MmioError {
    pub fn store_amo_fault(addr: u64) -> Self {
        Self::StoreAmoAccessFault { addr }
    }

    /// Exception code the trap machinery writes to `mcause`.
    pub fn cause(&self) -> u64 {
        match self {
            Self::StoreAmoAccessFault { .. } => STORE_AMO_ACCESS_FAULT_CAUSE,
        }
    }

    /// Faulting address, destined for `mtval`.
    pub fn addr(&self) -> u64 {
        match self {
            Self::StoreAmoAccessFault { addr } => *addr,
        }
    }
}

// Physical address layout.
//
// RAM is owned by the CPU side of the simulator; this module only knows
// which addresses are *not* RAM.
pub mod mmio;

pub use mmio::*;

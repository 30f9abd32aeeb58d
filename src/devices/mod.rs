pub mod clint;
pub mod console;
pub mod mmio;
pub mod register;

pub use mmio::*;

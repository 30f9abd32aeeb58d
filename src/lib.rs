pub mod debugger;
pub mod devices;
pub mod err;
pub mod mems;
pub mod regs;

pub use devices::*;
pub use err::*;
pub use mems::*;
pub use regs::*;

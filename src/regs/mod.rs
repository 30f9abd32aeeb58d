pub mod amo;
pub mod width;

pub use amo::*;
pub use width::*;

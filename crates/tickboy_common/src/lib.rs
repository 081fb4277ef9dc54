//! Helpers shared by the TickBoy crates.

pub mod bits;

//! ### SOFT_RESET (`0xE0`, 1 byte, Write-only)
//!
//! Writing 0xB6 performs the same sequence as a power-on reset. Any other value has no effect.
#![doc(alias = "SOFT_RESET")]
use crate::register::{Reg, Writable};

/// Marker type for the SOFT_RESET (0xE0) register
pub struct SoftReset;
impl Reg for SoftReset { const ADDR: u8 = 0xE0; }

/// The only payload the device reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResetCommand;

impl Writable for SoftReset {
    type In = ResetCommand;
    fn encode(_: &Self::In) -> u8 {
        0xB6
    }
}

#![cfg_attr(not(test), no_std)]

mod calibrated_adc;
mod remap;

pub use calibrated_adc::{CalibratedAdc, Config};
pub use remap::{map_approximate, map_exact, Approximation, CalibratedRange, Error, TargetRange};

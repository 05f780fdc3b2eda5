//! Pixel conversions — transfer curves, luminance, and stop space.

pub mod exposure;
pub mod transfer;

pub use exposure::{linear_to_stop, luminance, stop_to_linear};
pub use transfer::{gamma_to_linear, linear_to_gamma, DecodeTable, Transfer, TransferFunction};

//! The device module contains the drivers for each of the supported devices.
//!
//! In most cases you will not need anything from here explicitly, the exposed types at the root of
//! the crate should be enough.

pub mod ads1100;
pub mod pca9548a;

//! Drivers for devices on a shared I2C bus.
//!
//! - [`Pca9548a`]: 8-channel bus switch.  [`SharedMux`] turns it into one [`ChannelBus`] per
//!   downstream channel.
//! - [`Ads1100`]: 16-bit analog-to-digital converter.
//!
//! Devices talk to the bus through a [`Transport`], which every `embedded-hal` I2C bus
//! implements.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod bus;
mod channel;
mod common;
pub mod dev;
mod error;
mod mutex;

pub use bus::{DeviceInterface, Transport};
pub use channel::{ChannelBus, Parts, SharedMux};
pub use common::{I2cDevice, Sensor};
pub use error::Error;
pub use mutex::DeviceMutex;

pub use dev::ads1100::Ads1100;
pub use dev::pca9548a::Pca9548a;

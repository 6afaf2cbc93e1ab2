//! Support for the `PCA9548A` "Low voltage 8-channel I2C-bus switch with reset"
//!
//! Datasheet: https://www.ti.com/lit/ds/symlink/pca9548a.pdf
//!
//! The switch has a single 8-bit control register without a register pointer: a one-byte write
//! sets it and a one-byte read returns it.  Bit `n` connects downstream channel `n` to the
//! upstream bus.  Three address pins place the device anywhere in `0x70..=0x77`.
//!
//! The driver keeps a shadow copy of the control register.  Every change is made to the shadow
//! first and then committed with [`Pca9548a::write()`].  If that write fails, the shadow is ahead
//! of the hardware until the next successful [`Pca9548a::write()`] or [`Pca9548a::read()`].
use crate::{DeviceInterface, Error, I2cDevice, Transport};

/// Address used when the requested one is outside [`ADDRESS_RANGE`].
pub const DEFAULT_ADDRESS: u8 = 0x70;
/// Addresses selectable through the A0..A2 pins.
pub const ADDRESS_RANGE: core::ops::RangeInclusive<u8> = 0x70..=0x77;
/// Number of downstream channels.
pub const CHANNELS: u8 = 8;

/// `PCA9548A` "Low voltage 8-channel I2C-bus switch with reset"
#[derive(Debug, Clone)]
pub struct Pca9548a<T> {
    iface: DeviceInterface<T>,
    ctrl: u8,
    default_address: bool,
}

impl<T: Transport> Pca9548a<T> {
    /// Bind to `address`, falling back to [`DEFAULT_ADDRESS`] when it is not a PCA9548A address.
    ///
    /// The fallback is silent; check [`used_default_address()`][Self::used_default_address] if
    /// the address comes from untrusted input.
    pub fn new(transport: T, address: u8) -> Self {
        let default_address = !ADDRESS_RANGE.contains(&address);
        let address = if default_address {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "PCA9548A address {=u8:#x} out of range, using {=u8:#x}",
                address,
                DEFAULT_ADDRESS
            );
            DEFAULT_ADDRESS
        } else {
            address
        };
        Self {
            iface: DeviceInterface::new(transport, address),
            ctrl: 0x00,
            default_address,
        }
    }

    /// Bind to [`DEFAULT_ADDRESS`], the address with all address pins low.
    pub fn with_default_address(transport: T) -> Self {
        Self::new(transport, DEFAULT_ADDRESS)
    }

    /// Bind to the address given by the levels of the A0..A2 pins.
    pub fn with_address_pins(transport: T, a0: bool, a1: bool, a2: bool) -> Self {
        let address = DEFAULT_ADDRESS | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8);
        Self::new(transport, address)
    }

    /// Whether the constructor had to replace the requested address with [`DEFAULT_ADDRESS`].
    ///
    /// Cleared once an address is set explicitly through [`I2cDevice::set_address()`].
    pub fn used_default_address(&self) -> bool {
        self.default_address
    }

    /// The shadow copy of the control register.
    pub fn control_register(&self) -> u8 {
        self.ctrl
    }

    /// Whether channel `n` is enabled according to the shadow register.
    pub fn is_channel_enabled(&self, n: u8) -> bool {
        n < CHANNELS && self.ctrl & (1 << n) != 0
    }

    /// Load the control register from the device into the shadow.
    ///
    /// On failure the shadow keeps its previous value.
    pub fn read(&mut self) -> Result<(), Error<T::Error>> {
        let mut buf = [0x00];
        self.iface.read_exact(&mut buf)?;
        self.ctrl = buf[0];
        Ok(())
    }

    /// Commit the shadow register to the device.
    pub fn write(&mut self) -> Result<(), Error<T::Error>> {
        self.iface.write_exact(&[self.ctrl])
    }

    /// Enable or disable channel `n`, leaving all other channels as they are.
    ///
    /// An invalid channel is rejected before anything changes.  Otherwise the shadow is updated
    /// even if the following write fails.
    pub fn set_channel(&mut self, n: u8, enable: bool) -> Result<(), Error<T::Error>> {
        let mask = channel_mask(n)?;
        if enable {
            self.ctrl |= mask;
        } else {
            self.ctrl &= !mask;
        }
        self.write()
    }

    /// Disconnect all downstream channels with a single register write.
    pub fn disable_all(&mut self) -> Result<(), Error<T::Error>> {
        self.ctrl = 0x00;
        self.write()
    }

    /// Route the bus exclusively to channel `n`.
    ///
    /// All channels are disabled first, then `n` is enabled, so a previously selected channel is
    /// never connected together with the new one.  When disabling fails, channel `n` is not
    /// touched and the error is returned; the hardware state is then unknown.
    pub fn select(&mut self, n: u8) -> Result<(), Error<T::Error>> {
        channel_mask(n)?;
        if let Err(e) = self.disable_all() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "PCA9548A {=u8:#x}: disabling channels failed, channel {=u8} not selected",
                self.iface.address(),
                n
            );
            return Err(e);
        }
        self.set_channel(n, true)
    }

    pub(crate) fn transport_mut(&mut self) -> &mut T {
        self.iface.transport_mut()
    }

    /// Destroy the driver and give back the transport.
    pub fn release(self) -> T {
        self.iface.release()
    }
}

impl<T: Transport> I2cDevice for Pca9548a<T> {
    type Error = Error<T::Error>;

    fn address(&self) -> u8 {
        self.iface.address()
    }

    fn set_address(&mut self, address: u8) {
        self.default_address = false;
        self.iface.set_address(address)
    }

    fn initialize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.read().is_ok()
    }
}

fn channel_mask<E>(n: u8) -> Result<u8, Error<E>> {
    if n < CHANNELS {
        Ok(1 << n)
    } else {
        Err(Error::InvalidChannel(n))
    }
}

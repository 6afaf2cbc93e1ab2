/// A device bound to one address on the bus.
pub trait I2cDevice {
    type Error;

    /// The bus address this device is bound to.
    fn address(&self) -> u8;

    /// Rebind the device to a different address.
    ///
    /// No range check is done; the address is used as given.
    fn set_address(&mut self, address: u8);

    /// Bring the device into a usable state.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Probe whether the device answers on the bus.
    ///
    /// This is a liveness check only, the value read back is not inspected.
    fn is_connected(&mut self) -> bool;
}

/// A device producing a calibrated physical reading.
pub trait Sensor {
    /// The reading derived from the most recently acquired raw data.
    ///
    /// Implementations must not touch the bus here.
    fn measure(&self) -> f32;
}

//! Support for the `ADS1100` "Self-Calibrating, 16-Bit Analog-to-Digital Converter"
//!
//! Datasheet: https://www.ti.com/lit/ds/symlink/ads1100.pdf
//!
//! The converter runs continuously after power-up and needs no configuration.  A plain two-byte
//! read returns the latest conversion result, most significant byte first.
use crate::{DeviceInterface, Error, I2cDevice, Sensor, Transport};

/// Address of the `AD0` variant.  Other variants are reached through
/// [`Ads1100::with_address()`].
pub const DEFAULT_ADDRESS: u8 = 0x48;
/// Reference voltage assumed unless configured otherwise.
pub const DEFAULT_REFERENCE_VOLTAGE: f32 = 2.048;
/// Number of codes spanning the reference voltage.
pub const FULL_SCALE_CODE: f32 = 32768.0;

/// `ADS1100` "Self-Calibrating, 16-Bit Analog-to-Digital Converter"
#[derive(Debug, Clone)]
pub struct Ads1100<T> {
    iface: DeviceInterface<T>,
    value: u16,
    reference_voltage: f32,
}

impl<T: Transport> Ads1100<T> {
    pub fn new(transport: T) -> Self {
        Self::with_address(transport, DEFAULT_ADDRESS)
    }

    /// Bind to `address`.  Any address is accepted as-is.
    pub fn with_address(transport: T, address: u8) -> Self {
        Self {
            iface: DeviceInterface::new(transport, address),
            value: 0,
            reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
        }
    }

    /// Use `volts` as the reference for [`measure()`][Sensor::measure].
    ///
    /// The ADS1100 converts relative to its supply voltage, so this is usually the supply.
    pub fn with_reference_voltage(mut self, volts: f32) -> Self {
        self.reference_voltage = volts;
        self
    }

    pub fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    /// Fetch the latest conversion result and store it.
    ///
    /// Both bytes must arrive; a partial read is an error and keeps the previous value.
    pub fn read(&mut self) -> Result<u16, Error<T::Error>> {
        let mut buf = [0x00; 2];
        self.iface.read_exact(&mut buf)?;
        self.value = u16::from_be_bytes(buf);
        Ok(self.value)
    }

    /// The value stored by the last successful [`read()`][Self::read].
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Destroy the driver and give back the transport.
    pub fn release(self) -> T {
        self.iface.release()
    }
}

impl<T: Transport> I2cDevice for Ads1100<T> {
    type Error = Error<T::Error>;

    fn address(&self) -> u8 {
        self.iface.address()
    }

    fn set_address(&mut self, address: u8) {
        self.iface.set_address(address)
    }

    fn initialize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn is_connected(&mut self) -> bool {
        self.read().is_ok()
    }
}

impl<T> Sensor for Ads1100<T> {
    /// Voltage of the last stored value.  Call [`Ads1100::read()`] first for a fresh reading.
    fn measure(&self) -> f32 {
        self.value as f32 * self.reference_voltage / FULL_SCALE_CODE
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    use super::*;

    /// Transport which answers every read with a single byte.
    struct OneByte;

    impl Transport for OneByte {
        type Error = ();

        fn read_bytes(&mut self, _address: u8, buffer: &mut [u8]) -> Result<usize, ()> {
            buffer[0] = 0x7f;
            Ok(1)
        }

        fn write_bytes(&mut self, _address: u8, data: &[u8]) -> Result<usize, ()> {
            Ok(data.len())
        }
    }

    #[test]
    fn ads1100() {
        let expectations = [
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x12, 0x34]),
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x80, 0x00]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut adc = Ads1100::new(bus.clone());
        adc.initialize().unwrap();
        assert_eq!(adc.address(), 0x48);

        assert_eq!(adc.read().unwrap(), 0x1234);
        assert_eq!(adc.value(), 0x1234);
        assert_eq!(adc.measure(), 0x1234 as f32 * 2.048 / 32768.0);

        assert!(adc.is_connected());
        assert_eq!(adc.value(), 0x8000);
        assert_eq!(adc.measure(), 2.048);

        bus.done();
    }

    #[test]
    fn measure_uses_stored_value() {
        let expectations: [mock_i2c::Transaction; 0] = [];
        let bus = mock_i2c::Mock::new(&expectations);

        let adc = Ads1100::new(bus).with_reference_voltage(3.3);
        assert_eq!(adc.reference_voltage(), 3.3);
        assert_eq!(adc.value(), 0);
        assert_eq!(adc.measure(), 0.0);

        adc.release().done();
    }

    #[test]
    fn reference_voltage_scales_measurement() {
        let expectations = [mock_i2c::Transaction::read(0x4b, vec![0x40, 0x00])];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut adc = Ads1100::with_address(bus.clone(), 0x4b).with_reference_voltage(5.0);
        adc.read().unwrap();
        assert_eq!(adc.measure(), 2.5);

        bus.done();
    }

    #[test]
    fn bus_error_keeps_value() {
        let expectations = [
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x01, 0x02]),
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut adc = Ads1100::new(bus.clone());
        adc.read().unwrap();
        assert!(!adc.is_connected());
        assert_eq!(adc.value(), 0x0102);

        bus.done();
    }

    #[test]
    fn partial_read_is_rejected() {
        let mut adc = Ads1100::with_address(OneByte, 0x49);
        assert_eq!(
            adc.read(),
            Err(Error::ShortTransfer {
                expected: 2,
                transferred: 1
            })
        );
        assert_eq!(adc.value(), 0);
        assert!(!adc.is_connected());
    }

    #[test]
    fn clones_are_independent() {
        let expectations = [
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x00, 0x10]),
            mock_i2c::Transaction::read(0x4a, vec![0x00, 0x20]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut adc = Ads1100::new(bus.clone());
        adc.read().unwrap();

        let mut copy = adc.clone();
        assert_eq!(copy.value(), 0x0010);
        copy.set_address(0x4a);
        copy.read().unwrap();

        assert_eq!(copy.value(), 0x0020);
        assert_eq!(adc.value(), 0x0010);
        assert_eq!(adc.address(), DEFAULT_ADDRESS);

        bus.done();
    }
}

use embedded_hal::i2c as hal_i2c;

/// Raw byte transfers to a 7-bit bus address.
///
/// Both methods return the number of bytes actually transferred.  A transport may report fewer
/// bytes than requested; the device drivers treat that as a failed operation.
///
/// Every [`embedded_hal::i2c::I2c`] bus implements this trait and always reports full transfers.
pub trait Transport {
    type Error;

    /// Read `buffer.len()` bytes from the device at `address`.
    fn read_bytes(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write all of `data` to the device at `address`.
    fn write_bytes(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error>;
}

impl<I2C: hal_i2c::I2c> Transport for I2C {
    type Error = I2C::Error;

    fn read_bytes(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        self.read(address, buffer)?;
        Ok(buffer.len())
    }

    fn write_bytes(&mut self, address: u8, data: &[u8]) -> Result<usize, Self::Error> {
        self.write(address, data)?;
        Ok(data.len())
    }
}

/// A transport bound to a single device address.
///
/// No range checking happens here; devices validate their addresses before constructing the
/// interface.
#[derive(Debug, Clone)]
pub struct DeviceInterface<T> {
    transport: T,
    address: u8,
}

impl<T: Transport> DeviceInterface<T> {
    pub fn new(transport: T, address: u8) -> Self {
        Self { transport, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Read into `buffer`, returning how many bytes the transport delivered.
    pub fn read_all_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, T::Error> {
        self.transport.read_bytes(self.address, buffer)
    }

    /// Write `data`, returning how many bytes the transport accepted.
    pub fn write_all_bytes(&mut self, data: &[u8]) -> Result<usize, T::Error> {
        self.transport.write_bytes(self.address, data)
    }

    /// Like [`read_all_bytes()`][Self::read_all_bytes] but anything short of a full buffer is an
    /// error.
    pub fn read_exact(&mut self, buffer: &mut [u8]) -> Result<(), crate::Error<T::Error>> {
        let transferred = self.read_all_bytes(buffer)?;
        check_transfer(self.address, buffer.len(), transferred)
    }

    /// Like [`write_all_bytes()`][Self::write_all_bytes] but anything short of the full slice is
    /// an error.
    pub fn write_exact(&mut self, data: &[u8]) -> Result<(), crate::Error<T::Error>> {
        let transferred = self.write_all_bytes(data)?;
        check_transfer(self.address, data.len(), transferred)
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }
}

fn check_transfer<E>(
    _address: u8,
    expected: usize,
    transferred: usize,
) -> Result<(), crate::Error<E>> {
    if transferred == expected {
        Ok(())
    } else {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "short transfer at {=u8:#x}: {=usize} of {=usize} bytes",
            _address,
            transferred,
            expected
        );
        Err(crate::Error::ShortTransfer {
            expected,
            transferred,
        })
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    use super::*;

    /// Transport which never delivers more than `limit` bytes.
    struct Truncating {
        limit: usize,
    }

    impl Transport for Truncating {
        type Error = ();

        fn read_bytes(&mut self, _address: u8, buffer: &mut [u8]) -> Result<usize, ()> {
            let n = buffer.len().min(self.limit);
            buffer[..n].fill(0xaa);
            Ok(n)
        }

        fn write_bytes(&mut self, _address: u8, data: &[u8]) -> Result<usize, ()> {
            Ok(data.len().min(self.limit))
        }
    }

    #[test]
    fn hal_bus_reports_full_transfers() {
        let expectations = [
            mock_i2c::Transaction::write(0x48, vec![0x01, 0x02]),
            mock_i2c::Transaction::read(0x48, vec![0x12, 0x34]),
            mock_i2c::Transaction::write(0x49, vec![0xff]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut iface = DeviceInterface::new(bus.clone(), 0x48);
        assert_eq!(iface.write_all_bytes(&[0x01, 0x02]).unwrap(), 2);

        let mut buf = [0x00; 2];
        assert_eq!(iface.read_all_bytes(&mut buf).unwrap(), 2);
        assert_eq!(buf, [0x12, 0x34]);

        iface.set_address(0x49);
        assert_eq!(iface.address(), 0x49);
        iface.write_exact(&[0xff]).unwrap();

        bus.done();
    }

    #[test]
    fn hal_errors_propagate() {
        let expectations =
            [mock_i2c::Transaction::read(0x48, vec![0x00]).with_error(ErrorKind::Other)];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let mut iface = DeviceInterface::new(bus.clone(), 0x48);
        let mut buf = [0x00];
        assert_eq!(
            iface.read_exact(&mut buf),
            Err(crate::Error::Bus(ErrorKind::Other))
        );

        bus.done();
    }

    #[test]
    fn short_transfers_are_errors() {
        let mut iface = DeviceInterface::new(Truncating { limit: 1 }, 0x10);

        let mut buf = [0x00; 2];
        assert_eq!(iface.read_all_bytes(&mut buf), Ok(1));
        assert_eq!(
            iface.read_exact(&mut buf),
            Err(crate::Error::ShortTransfer {
                expected: 2,
                transferred: 1
            })
        );
        assert_eq!(iface.write_exact(&[0x01]), Ok(()));
        assert_eq!(
            iface.write_exact(&[0x01, 0x02, 0x03]),
            Err(crate::Error::ShortTransfer {
                expected: 3,
                transferred: 1
            })
        );
    }
}

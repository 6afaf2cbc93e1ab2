use embedded_hal::i2c::{self as hal_i2c, I2c};

use crate::{DeviceMutex, Error, Pca9548a, Transport};

/// A [`Pca9548a`] shared between per-channel bus handles.
///
/// Use [`split()`][SharedMux::split] to get one [`ChannelBus`] for each downstream channel.
/// Every transaction on a `ChannelBus` first selects its channel, so drivers for devices behind
/// the multiplexer can use it like any other I2C bus.
pub struct SharedMux<M>(M);

impl<I2C> SharedMux<core::cell::RefCell<Pca9548a<I2C>>>
where
    I2C: I2c,
{
    pub fn new(mux: Pca9548a<I2C>) -> Self {
        Self::with_mutex(mux)
    }
}

impl<T, M> SharedMux<M>
where
    T: Transport,
    M: DeviceMutex<Device = Pca9548a<T>>,
{
    pub fn with_mutex(mux: Pca9548a<T>) -> Self {
        Self(DeviceMutex::create(mux))
    }

    pub fn split(&mut self) -> Parts<'_, M> {
        Parts {
            ch0: ChannelBus::new(0, &self.0),
            ch1: ChannelBus::new(1, &self.0),
            ch2: ChannelBus::new(2, &self.0),
            ch3: ChannelBus::new(3, &self.0),
            ch4: ChannelBus::new(4, &self.0),
            ch5: ChannelBus::new(5, &self.0),
            ch6: ChannelBus::new(6, &self.0),
            ch7: ChannelBus::new(7, &self.0),
        }
    }

    /// Run `f` with exclusive access to the multiplexer itself.
    pub fn lock<R, F: FnOnce(&mut Pca9548a<T>) -> R>(&self, f: F) -> R {
        self.0.lock(f)
    }
}

pub struct Parts<'a, M> {
    pub ch0: ChannelBus<'a, M>,
    pub ch1: ChannelBus<'a, M>,
    pub ch2: ChannelBus<'a, M>,
    pub ch3: ChannelBus<'a, M>,
    pub ch4: ChannelBus<'a, M>,
    pub ch5: ChannelBus<'a, M>,
    pub ch6: ChannelBus<'a, M>,
    pub ch7: ChannelBus<'a, M>,
}

/// I2C bus behind one channel of a [`Pca9548a`].
///
/// `ChannelBus` is not constructed directly, it is handed out by [`SharedMux::split()`].
pub struct ChannelBus<'a, M> {
    channel: u8,
    mux: &'a M,
}

impl<'a, M> ChannelBus<'a, M> {
    pub(crate) fn new(channel: u8, mux: &'a M) -> Self {
        assert!(channel < crate::dev::pca9548a::CHANNELS);
        Self { channel, mux }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }
}

impl<'a, I2C, M> ChannelBus<'a, M>
where
    I2C: I2c,
    M: DeviceMutex<Device = Pca9548a<I2C>>,
{
    /// Select this channel and run `f` on the upstream bus, all under one lock.
    ///
    /// `f` is not called if selecting the channel fails.
    fn routed<R, F>(&self, f: F) -> Result<R, Error<<I2C as hal_i2c::ErrorType>::Error>>
    where
        F: FnOnce(&mut I2C) -> Result<R, <I2C as hal_i2c::ErrorType>::Error>,
    {
        self.mux.lock(|mux| {
            mux.select(self.channel)?;
            f(mux.transport_mut()).map_err(Error::Bus)
        })
    }
}

impl<'a, I2C, M> hal_i2c::ErrorType for ChannelBus<'a, M>
where
    I2C: I2c,
    M: DeviceMutex<Device = Pca9548a<I2C>>,
{
    type Error = Error<<I2C as hal_i2c::ErrorType>::Error>;
}

impl<'a, I2C, M> I2c for ChannelBus<'a, M>
where
    I2C: I2c,
    M: DeviceMutex<Device = Pca9548a<I2C>>,
{
    fn read(&mut self, address: u8, read: &mut [u8]) -> Result<(), Self::Error> {
        self.routed(|bus| bus.read(address, read))
    }

    fn write(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        self.routed(|bus| bus.write(address, write))
    }

    fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        self.routed(|bus| bus.write_read(address, write, read))
    }

    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [hal_i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.routed(|bus| bus.transaction(address, operations))
    }
}

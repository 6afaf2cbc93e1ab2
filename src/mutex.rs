/// Lock guarding a [`Pca9548a`][crate::Pca9548a] shared by several
/// [`ChannelBus`][crate::ChannelBus] handles.
///
/// A channel select and the downstream transaction it gates run inside one `lock()` call, so
/// no other handle can re-route the multiplexer in between.
///
/// Provided implementations:
///
/// - [`core::cell::RefCell`]: single execution context, no feature needed.
/// - `std::sync::Mutex`: feature `std`.
/// - `critical_section::Mutex<RefCell<_>>`: feature `critical-section`, usable from interrupts.
///
/// Any other lock can be plugged in through a newtype:
///
/// ```
/// use core::cell::RefCell;
/// use i2c_bus_devices::DeviceMutex;
///
/// struct Guarded<D>(RefCell<D>);
///
/// impl<D> DeviceMutex for Guarded<D> {
///     type Device = D;
///
///     fn create(device: D) -> Self {
///         Guarded(RefCell::new(device))
///     }
///
///     fn lock<R, F: FnOnce(&mut D) -> R>(&self, f: F) -> R {
///         f(&mut self.0.borrow_mut())
///     }
/// }
/// ```
pub trait DeviceMutex {
    type Device;

    /// Wrap `device` in a new lock.
    fn create(device: Self::Device) -> Self;

    /// Run `f` with exclusive access to the device.
    fn lock<R, F: FnOnce(&mut Self::Device) -> R>(&self, f: F) -> R;
}

impl<T> DeviceMutex for core::cell::RefCell<T> {
    type Device = T;

    fn create(device: Self::Device) -> Self {
        core::cell::RefCell::new(device)
    }

    fn lock<R, F: FnOnce(&mut Self::Device) -> R>(&self, f: F) -> R {
        f(&mut self.borrow_mut())
    }
}

#[cfg(any(test, feature = "std"))]
impl<T> DeviceMutex for std::sync::Mutex<T> {
    type Device = T;

    fn create(device: Self::Device) -> Self {
        std::sync::Mutex::new(device)
    }

    fn lock<R, F: FnOnce(&mut Self::Device) -> R>(&self, f: F) -> R {
        let mut guard = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

#[cfg(feature = "critical-section")]
impl<T> DeviceMutex for critical_section::Mutex<core::cell::RefCell<T>> {
    type Device = T;

    fn create(device: Self::Device) -> Self {
        critical_section::Mutex::new(core::cell::RefCell::new(device))
    }

    fn lock<R, F: FnOnce(&mut Self::Device) -> R>(&self, f: F) -> R {
        critical_section::with(|cs| f(&mut self.borrow_ref_mut(cs)))
    }
}

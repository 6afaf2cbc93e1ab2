/// Errors returned by the device drivers in this crate.
///
/// `E` is the error type of the underlying [`Transport`][crate::Transport].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transport reported an error.
    Bus(E),
    /// The transport moved fewer bytes than the operation requires.
    ShortTransfer { expected: usize, transferred: usize },
    /// Channel index outside of `0..=7`.
    InvalidChannel(u8),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Bus(e)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(err) => write!(f, "I2C bus error: {}", err),
            Error::ShortTransfer {
                expected,
                transferred,
            } => write!(
                f,
                "short transfer: {} of {} bytes",
                transferred, expected
            ),
            Error::InvalidChannel(n) => write!(f, "invalid channel: {}", n),
        }
    }
}

impl<E: embedded_hal::i2c::Error> embedded_hal::i2c::Error for Error<E> {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match self {
            Error::Bus(err) => err.kind(),
            _ => embedded_hal::i2c::ErrorKind::Other,
        }
    }
}

// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for the receive side of the meter's RS232 link.
///
/// The decoder never opens or configures a port; the host hands one in.
pub trait M9803rSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}

/// Wraps any `embedded-io` UART that can report read readiness.
///
/// Requires the `impl-native` feature.
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct NativeAdapter<T> {
    uart: T,
}

#[cfg(feature = "impl-native")]
impl<T> NativeAdapter<T>
where
    T: embedded_io::Read + embedded_io::ReadReady,
{
    pub fn new(uart: T) -> Self {
        NativeAdapter { uart }
    }

    pub fn into_inner(self) -> T {
        self.uart
    }
}

#[cfg(feature = "impl-native")]
impl<T> M9803rSerial for NativeAdapter<T>
where
    T: embedded_io::Read + embedded_io::ReadReady,
{
    type Error = T::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        if !self.uart.read_ready().map_err(nb::Error::Other)? {
            return Err(nb::Error::WouldBlock);
        }
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte).map_err(nb::Error::Other)? {
            0 => Err(nb::Error::WouldBlock),
            _ => Ok(byte[0]),
        }
    }
}

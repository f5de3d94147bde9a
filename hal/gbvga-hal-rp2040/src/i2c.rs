//! Blocking I2C master
//!
//! Implements [`gbvga_hal::I2cBus`] over an `embassy_rp` blocking I2C
//! peripheral.

use embassy_rp::i2c::{self, Blocking, I2c, Instance, SclPin, SdaPin};
use embassy_rp::Peri;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c as _};
use gbvga_hal::{I2cBus, I2cConfig};

/// I2C transfer failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Address or data byte not acknowledged
    Nack,
    /// Another master took the bus
    ArbitrationLost,
    /// Any other bus failure
    Bus,
}

impl From<ErrorKind> for I2cError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::Nack,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLost,
            _ => Self::Bus,
        }
    }
}

/// Blocking I2C bus on one of the RP2040 I2C blocks
pub struct BlockingI2c<'d, T: Instance> {
    bus: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> BlockingI2c<'d, T> {
    pub fn new(
        peri: Peri<'d, T>,
        scl: Peri<'d, impl SclPin<T>>,
        sda: Peri<'d, impl SdaPin<T>>,
        config: I2cConfig,
    ) -> Self {
        let mut cfg = i2c::Config::default();
        cfg.frequency = config.frequency;
        Self {
            bus: I2c::new_blocking(peri, scl, sda, cfg),
        }
    }
}

impl<T: Instance> I2cBus for BlockingI2c<'_, T> {
    type Error = I2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus
            .write(address, data)
            .map_err(|e| I2cError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus
            .read(address, buf)
            .map_err(|e| I2cError::from(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::NoAcknowledgeSource;

    #[test]
    fn test_error_kinds_map() {
        assert_eq!(
            I2cError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            I2cError::Nack
        );
        assert_eq!(
            I2cError::from(ErrorKind::ArbitrationLoss),
            I2cError::ArbitrationLost
        );
        assert_eq!(I2cError::from(ErrorKind::Overrun), I2cError::Bus);
    }
}

#![cfg_attr(not(test), no_std)]
//! # LTC2943 battery gas gauge driver
//!
//! Controls the ADC mode of the LTC2943 and reports its pending alerts. Every
//! operation makes sure the bus is initialized first, then talks to the chip
//! directly. Nothing is cached, all chip state lives in the chip.
//!
//! ```no_run
//! use ltc2943::{AdcMode, Error, HalBus, Ltc2943};
//! # use embedded_hal::i2c::I2c;
//! # fn example<I: I2c>(i2c: I) -> Result<(), Error<I::Error>> {
//! let mut gauge = Ltc2943::new(HalBus::new(i2c));
//!
//! gauge.set_adc_mode(AdcMode::Automatic)?;
//!
//! if gauge.is_temperature_alert_pending()? {
//!     // ... cool down
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod fmt;

mod bus;
mod error;
mod registers;

#[cfg(test)]
mod sim;

pub use bus::{BusPort, HalBus};
pub use error::Error;
pub use registers::*;

// Address byte, followed by at most the whole register map.
const MAX_FRAME_LEN: usize = 1 + REGISTER_COUNT;

/// LTC2943 driver.
///
/// `B` can be an owned bus or a `&mut` borrow of one. The driver never
/// deinitializes the bus.
pub struct Ltc2943<B> {
    bus: B,
}

impl<B> Ltc2943<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Gives the bus back to the caller, untouched.
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B> Ltc2943<B>
where
    B: BusPort,
{
    /// Initializes the bus unless it already reports being initialized.
    pub fn ensure_ready(&mut self) -> Result<(), Error<B::Error>> {
        if self.bus.is_initialized() {
            return Ok(());
        }

        debug!("LTC2943: initializing bus");
        self.bus.init().map_err(|e| {
            warn!("LTC2943: bus initialization failed");
            Error::NotReady(e)
        })
    }

    /// Changes the ADC mode, keeping the rest of the Control register.
    ///
    /// The written value is not read back.
    pub fn set_adc_mode(&mut self, mode: AdcMode) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;

        if mode == AdcMode::Invalid {
            return Err(Error::InvalidMode);
        }

        let control = self.control()?;
        let updated = control.with_adc_mode(mode).ok_or(Error::InvalidMode)?;

        self.write_register(Register::Control, &[updated.bits()])?;

        debug!(
            "LTC2943: ADC mode {:?} -> {:?}",
            control.adc_mode(),
            updated.adc_mode()
        );

        Ok(())
    }

    pub fn get_adc_mode(&mut self) -> Result<AdcMode, Error<B::Error>> {
        self.ensure_ready()?;

        Ok(self.control()?.adc_mode())
    }

    pub fn is_temperature_alert_pending(&mut self) -> Result<bool, Error<B::Error>> {
        self.ensure_ready()?;

        Ok(self.status()?.temperature_alert())
    }

    pub fn is_voltage_alert_pending(&mut self) -> Result<bool, Error<B::Error>> {
        self.ensure_ready()?;

        Ok(self.status()?.voltage_alert())
    }

    /// Reads every flag of the Status register at once.
    pub fn read_status(&mut self) -> Result<Status, Error<B::Error>> {
        self.ensure_ready()?;

        self.status()
    }

    pub fn read_control(&mut self) -> Result<Control, Error<B::Error>> {
        self.ensure_ready()?;

        self.control()
    }

    fn status(&mut self) -> Result<Status, Error<B::Error>> {
        self.read_byte(Register::Status).map(Status::from_bits)
    }

    fn control(&mut self) -> Result<Control, Error<B::Error>> {
        self.read_byte(Register::Control).map(Control::from_bits)
    }

    fn read_byte(&mut self, reg: Register) -> Result<u8, Error<B::Error>> {
        let mut buffer = [0];
        self.read_register(reg, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Sends the register address, then reads `out.len()` bytes.
    ///
    /// The contents of `out` are unspecified if the transfer fails.
    fn read_register(&mut self, reg: Register, out: &mut [u8]) -> Result<(), Error<B::Error>> {
        trace!("LTC2943: read {:?}, {} bytes", reg, out.len());

        self.bus
            .write(DEVICE_ADDRESS, &[reg.address()])
            .map_err(transfer_failed)?;
        self.bus.read(DEVICE_ADDRESS, out).map_err(transfer_failed)
    }

    /// Writes `data` starting at `reg` in a single transfer.
    fn write_register(&mut self, reg: Register, data: &[u8]) -> Result<(), Error<B::Error>> {
        trace!("LTC2943: write {:?}, {} bytes", reg, data.len());

        let mut frame = heapless::Vec::<u8, MAX_FRAME_LEN>::new();
        frame
            .push(reg.address())
            .map_err(|_| Error::PayloadTooLong)?;
        frame
            .extend_from_slice(data)
            .map_err(|_| Error::PayloadTooLong)?;

        self.bus
            .write(DEVICE_ADDRESS, &frame)
            .map_err(transfer_failed)
    }
}

fn transfer_failed<E>(error: E) -> Error<E> {
    warn!("LTC2943: bus transfer failed");
    Error::Transfer(error)
}

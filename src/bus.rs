//! The two-wire bus the gauge is attached to.

use embedded_hal::i2c::I2c;

/// Minimal bus interface the driver needs.
///
/// Addresses are 7-bit. A port whose operations only report success or
/// failure can use `()` as its error type.
pub trait BusPort {
    type Error;

    fn init(&mut self) -> Result<(), Self::Error>;

    /// Not called by the driver, the bus lifetime belongs to its owner.
    fn deinit(&mut self) -> Result<(), Self::Error>;

    fn is_initialized(&self) -> bool;

    /// Reads `dst.len()` bytes from the device at `address`.
    fn read(&mut self, address: u8, dst: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `src` to the device at `address` in a single transfer.
    fn write(&mut self, address: u8, src: &[u8]) -> Result<(), Self::Error>;
}

impl<B> BusPort for &mut B
where
    B: BusPort + ?Sized,
{
    type Error = B::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        B::init(self)
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        B::deinit(self)
    }

    fn is_initialized(&self) -> bool {
        B::is_initialized(self)
    }

    fn read(&mut self, address: u8, dst: &mut [u8]) -> Result<(), Self::Error> {
        B::read(self, address, dst)
    }

    fn write(&mut self, address: u8, src: &[u8]) -> Result<(), Self::Error> {
        B::write(self, address, src)
    }
}

/// [`BusPort`] on top of an `embedded-hal` I2C bus.
///
/// HAL buses are usable once constructed, so the port starts out initialized.
/// `deinit` and `init` only toggle that state.
pub struct HalBus<I> {
    i2c: I,
    initialized: bool,
}

impl<I> HalBus<I> {
    pub const fn new(i2c: I) -> Self {
        Self {
            i2c,
            initialized: true,
        }
    }

    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I> BusPort for HalBus<I>
where
    I: I2c,
{
    type Error = I::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.initialized = true;
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        self.initialized = false;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn read(&mut self, address: u8, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address, dst)
    }

    fn write(&mut self, address: u8, src: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, src)
    }
}

//! In-memory LTC2943 used by the driver tests.

use crate::{BusPort, DEVICE_ADDRESS, REGISTER_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nak;

/// Register file behind a simulated bus. A write sets the register pointer
/// from its first byte and stores the rest from there, a read returns bytes
/// starting at the pointer. Both auto-increment.
pub struct SimulatedBus {
    pub registers: [u8; REGISTER_COUNT],
    pointer: usize,

    pub initialized: bool,
    pub init_succeeds: bool,
    pub fail_reads: bool,
    pub fail_writes: bool,
    /// Only fail writes that carry register data, not pointer updates.
    pub fail_data_writes: bool,

    pub init_count: usize,
    pub read_count: usize,
    pub write_count: usize,
    pub frames: Vec<Vec<u8>>,
}

impl SimulatedBus {
    pub fn new() -> Self {
        let mut registers = [0; REGISTER_COUNT];
        registers[crate::Register::Control.address() as usize] = crate::Control::DEFAULT_VALUE;

        Self {
            registers,
            pointer: 0,
            initialized: true,
            init_succeeds: true,
            fail_reads: false,
            fail_writes: false,
            fail_data_writes: false,
            init_count: 0,
            read_count: 0,
            write_count: 0,
            frames: Vec::new(),
        }
    }

    pub fn uninitialized() -> Self {
        Self {
            initialized: false,
            ..Self::new()
        }
    }

    pub fn transfer_count(&self) -> usize {
        self.read_count + self.write_count
    }
}

impl BusPort for SimulatedBus {
    type Error = Nak;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.init_count += 1;
        if !self.init_succeeds {
            return Err(Nak);
        }

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
        assert_eq!(address, DEVICE_ADDRESS);
        self.read_count += 1;
        if self.fail_reads {
            return Err(Nak);
        }

        for byte in dst.iter_mut() {
            *byte = self.registers[self.pointer];
            self.pointer = (self.pointer + 1) % REGISTER_COUNT;
        }

        Ok(())
    }

    fn write(&mut self, address: u8, src: &[u8]) -> Result<(), Self::Error> {
        assert_eq!(address, DEVICE_ADDRESS);
        self.write_count += 1;
        if self.fail_writes || (self.fail_data_writes && src.len() > 1) {
            return Err(Nak);
        }

        self.frames.push(src.to_vec());

        if let Some((&pointer, data)) = src.split_first() {
            self.pointer = pointer as usize;
            for &byte in data {
                self.registers[self.pointer] = byte;
                self.pointer = (self.pointer + 1) % REGISTER_COUNT;
            }
        }

        Ok(())
    }
}

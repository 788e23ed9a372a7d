//! Register map and bit field layouts of the LTC2943.

/// 7-bit I2C address of the LTC2943.
pub const DEVICE_ADDRESS: u8 = 0x64;

/// Number of addressable registers.
pub const REGISTER_COUNT: usize = 24;

/// LTC2943 registers. The discriminant is the address byte sent on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    Status = 0x00,
    Control = 0x01,
    AccumulatedChargeMsb = 0x02,
    AccumulatedChargeLsb = 0x03,
    ChargeThresholdHighMsb = 0x04,
    ChargeThresholdHighLsb = 0x05,
    ChargeThresholdLowMsb = 0x06,
    ChargeThresholdLowLsb = 0x07,
    VoltageMsb = 0x08,
    VoltageLsb = 0x09,
    VoltageThresholdHighMsb = 0x0A,
    VoltageThresholdHighLsb = 0x0B,
    VoltageThresholdLowMsb = 0x0C,
    VoltageThresholdLowLsb = 0x0D,
    CurrentMsb = 0x0E,
    CurrentLsb = 0x0F,
    CurrentThresholdHighMsb = 0x10,
    CurrentThresholdHighLsb = 0x11,
    CurrentThresholdLowMsb = 0x12,
    CurrentThresholdLowLsb = 0x13,
    TemperatureMsb = 0x14,
    TemperatureLsb = 0x15,
    TemperatureThresholdHigh = 0x16,
    TemperatureThresholdLow = 0x17,
}

impl Register {
    /// Every register, indexed by address.
    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::Status,
        Register::Control,
        Register::AccumulatedChargeMsb,
        Register::AccumulatedChargeLsb,
        Register::ChargeThresholdHighMsb,
        Register::ChargeThresholdHighLsb,
        Register::ChargeThresholdLowMsb,
        Register::ChargeThresholdLowLsb,
        Register::VoltageMsb,
        Register::VoltageLsb,
        Register::VoltageThresholdHighMsb,
        Register::VoltageThresholdHighLsb,
        Register::VoltageThresholdLowMsb,
        Register::VoltageThresholdLowLsb,
        Register::CurrentMsb,
        Register::CurrentLsb,
        Register::CurrentThresholdHighMsb,
        Register::CurrentThresholdHighLsb,
        Register::CurrentThresholdLowMsb,
        Register::CurrentThresholdLowLsb,
        Register::TemperatureMsb,
        Register::TemperatureLsb,
        Register::TemperatureThresholdHigh,
        Register::TemperatureThresholdLow,
    ];

    #[inline(always)]
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Register name as printed in the datasheet.
    pub const fn name(self) -> &'static str {
        match self {
            Register::Status => "A: Status",
            Register::Control => "B: Control",
            Register::AccumulatedChargeMsb => "C: Accumulated Charge MSB",
            Register::AccumulatedChargeLsb => "D: Accumulated Charge LSB",
            Register::ChargeThresholdHighMsb => "E: Charge Threshold High MSB",
            Register::ChargeThresholdHighLsb => "F: Charge Threshold High LSB",
            Register::ChargeThresholdLowMsb => "G: Charge Threshold Low MSB",
            Register::ChargeThresholdLowLsb => "H: Charge Threshold Low LSB",
            Register::VoltageMsb => "I: Voltage MSB",
            Register::VoltageLsb => "J: Voltage LSB",
            Register::VoltageThresholdHighMsb => "K: Voltage Threshold High MSB",
            Register::VoltageThresholdHighLsb => "L: Voltage Threshold High LSB",
            Register::VoltageThresholdLowMsb => "M: Voltage Threshold Low MSB",
            Register::VoltageThresholdLowLsb => "N: Voltage Threshold Low LSB",
            Register::CurrentMsb => "O: Current MSB",
            Register::CurrentLsb => "P: Current LSB",
            Register::CurrentThresholdHighMsb => "Q: Current Threshold High MSB",
            Register::CurrentThresholdHighLsb => "R: Current Threshold High LSB",
            Register::CurrentThresholdLowMsb => "S: Current Threshold Low MSB",
            Register::CurrentThresholdLowLsb => "T: Current Threshold Low LSB",
            Register::TemperatureMsb => "U: Temperature MSB",
            Register::TemperatureLsb => "V: Temperature LSB",
            Register::TemperatureThresholdHigh => "W: Temperature Threshold High",
            Register::TemperatureThresholdLow => "X: Temperature Threshold Low",
        }
    }
}

impl TryFrom<u8> for Register {
    type Error = u8;

    fn try_from(address: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(address as usize).copied().ok_or(address)
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.address()
    }
}

/// A `WIDTH` bit wide field starting at bit `POS` of a register byte.
#[derive(Clone, Copy)]
struct Field {
    pos: u8,
    width: u8,
}

impl Field {
    const fn new(pos: u8, width: u8) -> Self {
        assert!(width > 0 && pos + width <= 8);
        Self { pos, width }
    }

    #[inline(always)]
    const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.pos
    }

    #[inline(always)]
    const fn read(self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.pos
    }

    #[inline(always)]
    const fn write(self, byte: u8, value: u8) -> u8 {
        // make sure value fits into field
        debug_assert!(value <= self.mask() >> self.pos);

        (byte & !self.mask()) | ((value << self.pos) & self.mask())
    }

    #[inline(always)]
    const fn is_set(self, byte: u8) -> bool {
        self.read(byte) != 0
    }
}

// Control register (B)
const SHUTDOWN: Field = Field::new(0, 1);
const ALCC_CONFIG: Field = Field::new(1, 2);
const PRESCALER: Field = Field::new(3, 3);
const ADC_MODE: Field = Field::new(6, 2);

// Status register (A)
const UNDERVOLTAGE_LOCKOUT: Field = Field::new(0, 1);
const VOLTAGE_ALERT: Field = Field::new(1, 1);
const CHARGE_ALERT_LOW: Field = Field::new(2, 1);
const CHARGE_ALERT_HIGH: Field = Field::new(3, 1);
const TEMPERATURE_ALERT: Field = Field::new(4, 1);
const ACCUMULATED_CHARGE_OVERFLOW: Field = Field::new(5, 1);
const CURRENT_ALERT: Field = Field::new(6, 1);

/// ADC sampling schedule, Control register B[7:6].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcMode {
    /// Continuous voltage, current and temperature conversions.
    Automatic = 0b11,
    /// Conversions every 10 seconds.
    Scan = 0b10,
    /// A single conversion, after which the ADC returns to sleep.
    Manual = 0b01,
    /// ADC powered down, only the charge counter runs.
    Sleep = 0b00,
    /// Placeholder for "no mode". Never written to the chip.
    Invalid = 0xFF,
}

impl AdcMode {
    /// Field encoding of the mode, `None` for [`AdcMode::Invalid`].
    pub const fn bits(self) -> Option<u8> {
        match self {
            AdcMode::Invalid => None,
            mode => Some(mode as u8),
        }
    }

    const fn from_field(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => AdcMode::Sleep,
            0b01 => AdcMode::Manual,
            0b10 => AdcMode::Scan,
            _ => AdcMode::Automatic,
        }
    }
}

impl TryFrom<u8> for AdcMode {
    type Error = u8;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0b00..=0b11 => Ok(AdcMode::from_field(bits)),
            _ => Err(bits),
        }
    }
}

/// ALCC pin configuration, Control register B[2:1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlccConfig {
    Disabled,
    ChargeComplete,
    Alert,
    NotAllowed,
}

/// Contents of the Control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Control(u8);

impl Control {
    /// Power-on value: sleep, prescaler M = 4096, ALCC in alert mode.
    pub const DEFAULT_VALUE: u8 = 0x3C;

    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn adc_mode(self) -> AdcMode {
        AdcMode::from_field(ADC_MODE.read(self.0))
    }

    /// Returns the register with B[7:6] replaced by `mode`, every other bit kept.
    ///
    /// ```rust
    /// # use ltc2943::{AdcMode, Control};
    /// let control = Control::from_bits(0b0010_1101);
    ///
    /// let updated = control.with_adc_mode(AdcMode::Scan).unwrap();
    /// assert_eq!(updated.bits(), 0b1010_1101);
    ///
    /// assert_eq!(control.with_adc_mode(AdcMode::Invalid), None);
    /// ```
    pub const fn with_adc_mode(self, mode: AdcMode) -> Option<Self> {
        match mode.bits() {
            Some(bits) => Some(Self(ADC_MODE.write(self.0, bits))),
            None => None,
        }
    }

    /// Raw prescaler selection, B[5:3].
    pub const fn prescaler(self) -> u8 {
        PRESCALER.read(self.0)
    }

    /// Coulomb counter prescaling factor M.
    pub const fn prescaler_factor(self) -> u16 {
        match self.prescaler() {
            0b111 => 4096,
            bits => 1 << (2 * bits),
        }
    }

    pub const fn alcc_config(self) -> AlccConfig {
        match ALCC_CONFIG.read(self.0) {
            0b00 => AlccConfig::Disabled,
            0b01 => AlccConfig::ChargeComplete,
            0b10 => AlccConfig::Alert,
            _ => AlccConfig::NotAllowed,
        }
    }

    /// Analog section shut down.
    pub const fn shutdown(self) -> bool {
        SHUTDOWN.is_set(self.0)
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::from_bits(Self::DEFAULT_VALUE)
    }
}

/// Contents of the Status register. Each flag reports a pending alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(u8);

impl Status {
    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn undervoltage_lockout(self) -> bool {
        UNDERVOLTAGE_LOCKOUT.is_set(self.0)
    }

    pub const fn voltage_alert(self) -> bool {
        VOLTAGE_ALERT.is_set(self.0)
    }

    pub const fn charge_alert_low(self) -> bool {
        CHARGE_ALERT_LOW.is_set(self.0)
    }

    pub const fn charge_alert_high(self) -> bool {
        CHARGE_ALERT_HIGH.is_set(self.0)
    }

    pub const fn temperature_alert(self) -> bool {
        TEMPERATURE_ALERT.is_set(self.0)
    }

    /// The accumulated charge register overflowed or underflowed.
    pub const fn accumulated_charge_overflow(self) -> bool {
        ACCUMULATED_CHARGE_OVERFLOW.is_set(self.0)
    }

    pub const fn current_alert(self) -> bool {
        CURRENT_ALERT.is_set(self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn register_discriminants_match_addresses() {
        for (index, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.address() as usize, index, "{}", reg.name());
            assert_eq!(Register::try_from(index as u8), Ok(*reg));
        }

        assert_eq!(Register::Status.address(), 0);
        assert_eq!(Register::Control.address(), 1);
        assert_eq!(Register::TemperatureThresholdLow.address(), 23);
        assert_eq!(Register::try_from(24), Err(24));
    }

    #[test]
    fn adc_mode_is_read_from_top_bits() {
        #[rustfmt::skip]
        let table = [
            (0b0011_1100, AdcMode::Sleep),
            (0b0111_1100, AdcMode::Manual),
            (0b1000_0000, AdcMode::Scan),
            (0b1111_1111, AdcMode::Automatic),
        ];

        for (bits, expected) in table {
            assert_eq!(Control::from_bits(bits).adc_mode(), expected);
        }
    }

    #[test]
    fn writing_adc_mode_preserves_low_bits() {
        for bits in 0..=u8::MAX {
            let control = Control::from_bits(bits);
            for mode in [
                AdcMode::Sleep,
                AdcMode::Manual,
                AdcMode::Scan,
                AdcMode::Automatic,
            ] {
                let updated = control.with_adc_mode(mode).unwrap();
                assert_eq!(updated.bits() & 0b0011_1111, bits & 0b0011_1111);
                assert_eq!(updated.adc_mode(), mode);
            }
        }
    }

    #[test]
    fn invalid_adc_mode_is_rejected() {
        assert_eq!(AdcMode::Invalid.bits(), None);
        assert_eq!(Control::default().with_adc_mode(AdcMode::Invalid), None);
        assert_eq!(AdcMode::try_from(4), Err(4));
        assert_eq!(AdcMode::try_from(0b10), Ok(AdcMode::Scan));
    }

    #[test]
    fn default_control_fields() {
        let control = Control::default();

        assert_eq!(control.adc_mode(), AdcMode::Sleep);
        assert_eq!(control.prescaler(), 0b111);
        assert_eq!(control.prescaler_factor(), 4096);
        assert_eq!(control.alcc_config(), AlccConfig::Alert);
        assert!(!control.shutdown());
    }

    #[test]
    fn prescaler_factors() {
        #[rustfmt::skip]
        let table = [
            (0b000, 1),
            (0b001, 4),
            (0b010, 16),
            (0b011, 64),
            (0b100, 256),
            (0b101, 1024),
            (0b110, 4096),
            (0b111, 4096),
        ];

        for (bits, factor) in table {
            assert_eq!(Control::from_bits(bits << 3).prescaler_factor(), factor);
        }
    }

    #[test]
    fn status_alert_flags() {
        let status = Status::from_bits(0b0001_0010);
        assert!(status.temperature_alert());
        assert!(status.voltage_alert());
        assert!(!status.current_alert());
        assert!(!status.undervoltage_lockout());

        let status = Status::from_bits(0);
        assert!(!status.temperature_alert());
        assert!(!status.voltage_alert());

        let status = Status::from_bits(0b0110_1101);
        assert!(status.undervoltage_lockout());
        assert!(status.charge_alert_low());
        assert!(status.charge_alert_high());
        assert!(status.accumulated_charge_overflow());
        assert!(status.current_alert());
        assert!(!status.voltage_alert());
        assert!(!status.temperature_alert());
    }
}

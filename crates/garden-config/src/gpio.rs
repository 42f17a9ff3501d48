//! ESP32 GPIO numbering and per-pin capabilities.
//!
//! Covers the classic ESP32 (D0WD / WROOM modules). GPIO 20, 24 and 28..=31
//! are not bonded out; 6..=11 belong to the SPI flash.

use core::fmt;

use crate::pins::PinError;

/// Highest GPIO number on the ESP32.
pub const MAX_GPIO: u8 = 39;

/// SAR ADC unit a pin is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcUnit {
    Adc1,
    /// Unusable while the WiFi radio is running.
    Adc2,
}

/// A GPIO number that exists on the ESP32 and is not reserved for flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GpioPin(u8);

impl GpioPin {
    pub const fn new(number: u8) -> Result<Self, PinError> {
        if !is_bonded(number) {
            return Err(PinError::NoSuchPin(number));
        }
        if is_flash(number) {
            return Err(PinError::FlashPin(number));
        }
        Ok(Self(number))
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// GPIO 34..=39 have no output driver and no internal pulls.
    pub const fn is_input_only(self) -> bool {
        self.0 >= 34
    }

    pub const fn is_output_capable(self) -> bool {
        !self.is_input_only()
    }

    pub const fn adc_unit(self) -> Option<AdcUnit> {
        match self.0 {
            32..=39 => Some(AdcUnit::Adc1),
            0 | 2 | 4 | 12..=15 | 25..=27 => Some(AdcUnit::Adc2),
            _ => None,
        }
    }

    /// Sampled at reset: boot mode (0, 2), boot log (15), SDIO timing (5),
    /// flash voltage (12).
    pub const fn is_strapping(self) -> bool {
        matches!(self.0, 0 | 2 | 5 | 12 | 15)
    }

    /// UART0 TX/RX, shared with the flashing/log console.
    pub const fn is_console_uart(self) -> bool {
        matches!(self.0, 1 | 3)
    }
}

impl fmt::Display for GpioPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

const fn is_bonded(number: u8) -> bool {
    matches!(number, 0..=19 | 21..=23 | 25..=27 | 32..=MAX_GPIO)
}

const fn is_flash(number: u8) -> bool {
    matches!(number, 6..=11)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn rejects_unbonded_numbers() {
        for n in [20, 24, 28, 29, 30, 31, 40, 255] {
            assert_eq!(GpioPin::new(n), Err(PinError::NoSuchPin(n)), "GPIO{n}");
        }
    }

    #[test]
    fn rejects_flash_pins() {
        for n in 6..=11 {
            assert_eq!(GpioPin::new(n), Err(PinError::FlashPin(n)));
        }
    }

    #[test]
    fn input_only_range() {
        assert!(GpioPin::new(34).unwrap().is_input_only());
        assert!(GpioPin::new(39).unwrap().is_input_only());
        assert!(GpioPin::new(33).unwrap().is_output_capable());
        assert!(GpioPin::new(0).unwrap().is_output_capable());
    }

    #[test]
    fn adc_routing() {
        let unit = |n| GpioPin::new(n).unwrap().adc_unit();
        assert_eq!(unit(32), Some(AdcUnit::Adc1));
        assert_eq!(unit(36), Some(AdcUnit::Adc1));
        assert_eq!(unit(13), Some(AdcUnit::Adc2));
        assert_eq!(unit(25), Some(AdcUnit::Adc2));
        assert_eq!(unit(5), None);
        assert_eq!(unit(18), None);
    }

    #[test]
    fn strapping_and_console() {
        assert!(GpioPin::new(5).unwrap().is_strapping());
        assert!(GpioPin::new(15).unwrap().is_strapping());
        assert!(!GpioPin::new(4).unwrap().is_strapping());
        assert!(GpioPin::new(1).unwrap().is_console_uart());
        assert!(!GpioPin::new(19).unwrap().is_console_uart());
    }

    #[test]
    fn display_uses_gpio_prefix() {
        assert_eq!(GpioPin::new(27).unwrap().to_string(), "GPIO27");
    }
}

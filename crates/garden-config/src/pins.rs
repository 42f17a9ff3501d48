//! Board wiring: which GPIO drives or reads what.

use core::fmt;

use thiserror_no_std::Error;

use crate::gpio::{AdcUnit, GpioPin};
use crate::roles::{Actuator, PinRequirement, PinRole, Sensor};

/// Actuators plus sensors.
pub const PIN_COUNT: usize = Actuator::COUNT + Sensor::COUNT;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    #[error("GPIO{0} does not exist on the ESP32")]
    NoSuchPin(u8),
    #[error("GPIO{0} is reserved for the SPI flash")]
    FlashPin(u8),
    #[error("{pin} is assigned to both {first} and {second}")]
    Duplicate {
        pin: GpioPin,
        first: PinRole,
        second: PinRole,
    },
    #[error("{role} needs an output driver but {pin} is input-only")]
    NotOutputCapable { role: PinRole, pin: GpioPin },
    #[error("{role} is read through ADC1 but {pin} is not an ADC1 channel")]
    NotAdc1 { role: PinRole, pin: GpioPin },
}

/// A legal assignment that can still bite at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinWarning {
    Strapping { role: PinRole, pin: GpioPin },
    ConsoleUart { role: PinRole, pin: GpioPin },
}

impl PinWarning {
    pub const fn for_pin(role: PinRole, pin: GpioPin) -> Option<Self> {
        if pin.is_strapping() {
            Some(PinWarning::Strapping { role, pin })
        } else if pin.is_console_uart() {
            Some(PinWarning::ConsoleUart { role, pin })
        } else {
            None
        }
    }
}

impl fmt::Display for PinWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinWarning::Strapping { role, pin } => write!(
                f,
                "{role} uses strapping pin {pin}; keep it at its default level during reset"
            ),
            PinWarning::ConsoleUart { role, pin } => {
                write!(f, "{role} uses {pin}, which is shared with the UART0 console")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorPins {
    pub pump: GpioPin,
    pub upper_valve: GpioPin,
    pub lower_valve: GpioPin,
    pub fan1: GpioPin,
    pub fan2: GpioPin,
    pub light1: GpioPin,
    pub light2: GpioPin,
    pub buzzer: GpioPin,
}

impl ActuatorPins {
    pub const fn pin(&self, actuator: Actuator) -> GpioPin {
        match actuator {
            Actuator::Pump => self.pump,
            Actuator::UpperValve => self.upper_valve,
            Actuator::LowerValve => self.lower_valve,
            Actuator::Fan1 => self.fan1,
            Actuator::Fan2 => self.fan2,
            Actuator::Light1 => self.light1,
            Actuator::Light2 => self.light2,
            Actuator::Buzzer => self.buzzer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorPins {
    pub dht1: GpioPin,
    pub dht2: GpioPin,
    pub soil_moisture1: GpioPin,
    pub soil_moisture2: GpioPin,
    pub rain: GpioPin,
    pub ultrasonic_trigger: GpioPin,
    pub ultrasonic_echo: GpioPin,
}

impl SensorPins {
    pub const fn pin(&self, sensor: Sensor) -> GpioPin {
        match sensor {
            Sensor::Dht1 => self.dht1,
            Sensor::Dht2 => self.dht2,
            Sensor::SoilMoisture1 => self.soil_moisture1,
            Sensor::SoilMoisture2 => self.soil_moisture2,
            Sensor::Rain => self.rain,
            Sensor::UltrasonicTrigger => self.ultrasonic_trigger,
            Sensor::UltrasonicEcho => self.ultrasonic_echo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pub actuators: ActuatorPins,
    pub sensors: SensorPins,
}

impl PinMap {
    pub const fn pin(&self, role: PinRole) -> GpioPin {
        match role {
            PinRole::Actuator(a) => self.actuators.pin(a),
            PinRole::Sensor(s) => self.sensors.pin(s),
        }
    }

    /// Every assignment, actuators first, in declaration order.
    pub const fn entries(&self) -> [(PinRole, GpioPin); PIN_COUNT] {
        let mut out = [(PinRole::Actuator(Actuator::Pump), self.actuators.pump); PIN_COUNT];
        let mut i = 0;
        while i < Actuator::COUNT {
            let role = PinRole::Actuator(Actuator::ALL[i]);
            out[i] = (role, self.pin(role));
            i += 1;
        }
        let mut j = 0;
        while j < Sensor::COUNT {
            let role = PinRole::Sensor(Sensor::ALL[j]);
            out[Actuator::COUNT + j] = (role, self.pin(role));
            j += 1;
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (PinRole, GpioPin)> {
        self.entries().into_iter()
    }

    pub fn role_of(&self, pin: GpioPin) -> Option<PinRole> {
        self.iter().find(|&(_, p)| p == pin).map(|(role, _)| role)
    }

    /// Uniqueness first, then per-role electrical requirements.
    pub const fn check(&self) -> Result<(), PinError> {
        let entries = self.entries();

        let mut i = 0;
        while i < PIN_COUNT {
            let mut j = i + 1;
            while j < PIN_COUNT {
                if entries[i].1.number() == entries[j].1.number() {
                    return Err(PinError::Duplicate {
                        pin: entries[i].1,
                        first: entries[i].0,
                        second: entries[j].0,
                    });
                }
                j += 1;
            }
            i += 1;
        }

        let mut k = 0;
        while k < PIN_COUNT {
            let (role, pin) = entries[k];
            match role.requirement() {
                PinRequirement::Output | PinRequirement::Bidirectional => {
                    if !pin.is_output_capable() {
                        return Err(PinError::NotOutputCapable { role, pin });
                    }
                }
                PinRequirement::Adc1Input => {
                    if !matches!(pin.adc_unit(), Some(AdcUnit::Adc1)) {
                        return Err(PinError::NotAdc1 { role, pin });
                    }
                }
                PinRequirement::Input => {}
            }
            k += 1;
        }

        Ok(())
    }

    pub fn warnings(&self) -> impl Iterator<Item = PinWarning> {
        self.iter()
            .filter_map(|(role, pin)| PinWarning::for_pin(role, pin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn gpio(n: u8) -> GpioPin {
        match GpioPin::new(n) {
            Ok(pin) => pin,
            Err(_) => panic!("bad test pin"),
        }
    }

    fn sample() -> PinMap {
        PinMap {
            actuators: ActuatorPins {
                pump: gpio(13),
                upper_valve: gpio(16),
                lower_valve: gpio(14),
                fan1: gpio(27),
                fan2: gpio(26),
                light1: gpio(25),
                light2: gpio(17),
                buzzer: gpio(19),
            },
            sensors: SensorPins {
                dht1: gpio(15),
                dht2: gpio(4),
                soil_moisture1: gpio(34),
                soil_moisture2: gpio(33),
                rain: gpio(32),
                ultrasonic_trigger: gpio(5),
                ultrasonic_echo: gpio(18),
            },
        }
    }

    #[test]
    fn sample_map_is_valid() {
        assert_eq!(sample().check(), Ok(()));
    }

    #[test]
    fn entries_cover_every_role_once() {
        let map = sample();
        let entries = map.entries();
        assert_eq!(entries.len(), PIN_COUNT);
        assert_eq!(entries[0], (PinRole::Actuator(Actuator::Pump), gpio(13)));
        assert_eq!(
            entries[PIN_COUNT - 1],
            (PinRole::Sensor(Sensor::UltrasonicEcho), gpio(18))
        );
    }

    #[test]
    fn duplicate_reports_both_roles() {
        let mut map = sample();
        map.actuators.buzzer = gpio(13);
        assert_eq!(
            map.check(),
            Err(PinError::Duplicate {
                pin: gpio(13),
                first: PinRole::Actuator(Actuator::Pump),
                second: PinRole::Actuator(Actuator::Buzzer),
            })
        );
    }

    #[test]
    fn duplicate_across_actuator_and_sensor() {
        let mut map = sample();
        map.sensors.rain = gpio(26);
        assert!(matches!(
            map.check(),
            Err(PinError::Duplicate {
                first: PinRole::Actuator(Actuator::Fan2),
                second: PinRole::Sensor(Sensor::Rain),
                ..
            })
        ));
    }

    #[test]
    fn relay_on_input_only_pin_is_rejected() {
        let mut map = sample();
        map.actuators.light2 = gpio(35);
        assert_eq!(
            map.check(),
            Err(PinError::NotOutputCapable {
                role: PinRole::Actuator(Actuator::Light2),
                pin: gpio(35),
            })
        );
    }

    #[test]
    fn dht_on_input_only_pin_is_rejected() {
        let mut map = sample();
        map.sensors.dht2 = gpio(39);
        assert!(matches!(map.check(), Err(PinError::NotOutputCapable { .. })));
    }

    #[test]
    fn soil_sensor_on_adc2_is_rejected() {
        let mut map = sample();
        map.sensors.soil_moisture2 = gpio(12);
        assert_eq!(
            map.check(),
            Err(PinError::NotAdc1 {
                role: PinRole::Sensor(Sensor::SoilMoisture2),
                pin: gpio(12),
            })
        );
    }

    #[test]
    fn echo_may_use_input_only_pin() {
        let mut map = sample();
        map.sensors.ultrasonic_echo = gpio(36);
        assert_eq!(map.check(), Ok(()));
    }

    #[test]
    fn role_lookup() {
        let map = sample();
        assert_eq!(map.role_of(gpio(34)), Some(PinRole::Sensor(Sensor::SoilMoisture1)));
        assert_eq!(map.role_of(gpio(19)), Some(PinRole::Actuator(Actuator::Buzzer)));
        assert_eq!(map.role_of(gpio(23)), None);
        assert_eq!(map.pin(PinRole::Actuator(Actuator::Fan1)), gpio(27));
    }

    #[test]
    fn strapping_pins_warn() {
        let map = sample();
        let mut warnings = map.warnings();
        assert_eq!(
            warnings.next(),
            Some(PinWarning::Strapping {
                role: PinRole::Sensor(Sensor::Dht1),
                pin: gpio(15),
            })
        );
        assert_eq!(
            warnings.next(),
            Some(PinWarning::Strapping {
                role: PinRole::Sensor(Sensor::UltrasonicTrigger),
                pin: gpio(5),
            })
        );
        assert_eq!(warnings.next(), None);
    }

    #[test]
    fn console_pin_warns() {
        let mut map = sample();
        map.actuators.buzzer = gpio(1);
        assert!(map.warnings().any(|w| w
            == PinWarning::ConsoleUart {
                role: PinRole::Actuator(Actuator::Buzzer),
                pin: gpio(1),
            }));
    }
}

//! What each configured GPIO is wired to.

use core::fmt;

/// Relay-driven loads and the buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actuator {
    Pump,
    UpperValve,
    LowerValve,
    Fan1,
    Fan2,
    Light1,
    Light2,
    Buzzer,
}

impl Actuator {
    pub const COUNT: usize = 8;

    pub const ALL: [Actuator; Self::COUNT] = [
        Actuator::Pump,
        Actuator::UpperValve,
        Actuator::LowerValve,
        Actuator::Fan1,
        Actuator::Fan2,
        Actuator::Light1,
        Actuator::Light2,
        Actuator::Buzzer,
    ];

    /// Position in [`Actuator::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Actuator::Pump => "pump",
            Actuator::UpperValve => "upper valve",
            Actuator::LowerValve => "lower valve",
            Actuator::Fan1 => "fan 1",
            Actuator::Fan2 => "fan 2",
            Actuator::Light1 => "light 1",
            Actuator::Light2 => "light 2",
            Actuator::Buzzer => "buzzer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    Dht1,
    Dht2,
    SoilMoisture1,
    SoilMoisture2,
    Rain,
    UltrasonicTrigger,
    UltrasonicEcho,
}

impl Sensor {
    pub const COUNT: usize = 7;

    pub const ALL: [Sensor; Self::COUNT] = [
        Sensor::Dht1,
        Sensor::Dht2,
        Sensor::SoilMoisture1,
        Sensor::SoilMoisture2,
        Sensor::Rain,
        Sensor::UltrasonicTrigger,
        Sensor::UltrasonicEcho,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Sensor::Dht1 => "DHT 1",
            Sensor::Dht2 => "DHT 2",
            Sensor::SoilMoisture1 => "soil moisture 1",
            Sensor::SoilMoisture2 => "soil moisture 2",
            Sensor::Rain => "rain sensor",
            Sensor::UltrasonicTrigger => "ultrasonic trigger",
            Sensor::UltrasonicEcho => "ultrasonic echo",
        }
    }
}

/// What the pin must be able to do electrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRequirement {
    Output,
    /// Single-wire protocols (DHT) drive and sample the same line.
    Bidirectional,
    Input,
    /// Analog read while WiFi is up, so ADC1 only.
    Adc1Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRole {
    Actuator(Actuator),
    Sensor(Sensor),
}

impl PinRole {
    pub const fn requirement(self) -> PinRequirement {
        match self {
            PinRole::Actuator(_) => PinRequirement::Output,
            PinRole::Sensor(Sensor::Dht1 | Sensor::Dht2) => PinRequirement::Bidirectional,
            PinRole::Sensor(Sensor::SoilMoisture1 | Sensor::SoilMoisture2) => {
                PinRequirement::Adc1Input
            }
            PinRole::Sensor(Sensor::Rain | Sensor::UltrasonicEcho) => PinRequirement::Input,
            PinRole::Sensor(Sensor::UltrasonicTrigger) => PinRequirement::Output,
        }
    }

    /// Name the pin went by in the original firmware headers.
    pub const fn label(self) -> &'static str {
        match self {
            PinRole::Actuator(Actuator::Pump) => "MAYBOM_PIN",
            PinRole::Actuator(Actuator::UpperValve) => "VANTREN_PIN",
            PinRole::Actuator(Actuator::LowerValve) => "VANDUOI_PIN",
            PinRole::Actuator(Actuator::Fan1) => "QUAT1_PIN",
            PinRole::Actuator(Actuator::Fan2) => "QUAT2_PIN",
            PinRole::Actuator(Actuator::Light1) => "DEN1_PIN",
            PinRole::Actuator(Actuator::Light2) => "DEN2_PIN",
            PinRole::Actuator(Actuator::Buzzer) => "BUZZER_PIN",
            PinRole::Sensor(Sensor::Dht1) => "DHT1_PIN",
            PinRole::Sensor(Sensor::Dht2) => "DHT2_PIN",
            PinRole::Sensor(Sensor::SoilMoisture1) => "SOIL_MOISTURE1_PIN",
            PinRole::Sensor(Sensor::SoilMoisture2) => "SOIL_MOISTURE2_PIN",
            PinRole::Sensor(Sensor::Rain) => "RAIN_SENSOR_PIN",
            PinRole::Sensor(Sensor::UltrasonicTrigger) => "ULTRASONIC_TRIG_PIN",
            PinRole::Sensor(Sensor::UltrasonicEcho) => "ULTRASONIC_ECHO_PIN",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PinRole::Actuator(a) => a.name(),
            PinRole::Sensor(s) => s.name(),
        }
    }
}

impl From<Actuator> for PinRole {
    fn from(actuator: Actuator) -> Self {
        PinRole::Actuator(actuator)
    }
}

impl From<Sensor> for PinRole {
    fn from(sensor: Sensor) -> Self {
        PinRole::Sensor(sensor)
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.label())
    }
}

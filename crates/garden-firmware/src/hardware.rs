//! esp-hal drivers for the configured GPIOs.
//!
//! Every binding checks the pin it is handed against the [`PinMap`], so the
//! peripheral chosen in `main` and the configured number can't disagree.

use core::convert::Infallible;

use esp_hal::gpio::{AnyPin, Input, InputConfig, Level, Output, OutputConfig, Pin};
use garden_config::actuators::ActuatorBank;
use garden_config::traits::Switch;
use garden_config::{Actuator, GpioPin, PinMap, PinRole, Sensor};
use log::info;
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    #[error("{role} is configured on {expected} but GPIO{actual} was wired up")]
    PinMismatch {
        role: PinRole,
        expected: GpioPin,
        actual: u8,
    },
}

fn claim<'d>(pins: &PinMap, role: PinRole, pin: AnyPin<'d>) -> Result<AnyPin<'d>, HardwareError> {
    let expected = pins.pin(role);
    let actual = pin.number();
    if actual != expected.number() {
        return Err(HardwareError::PinMismatch {
            role,
            expected,
            actual,
        });
    }
    Ok(pin)
}

/// A relay channel (or the buzzer) driven high while on.
pub struct Relay<'d> {
    output: Output<'d>,
}

impl<'d> Relay<'d> {
    pub fn new(pins: &PinMap, actuator: Actuator, pin: AnyPin<'d>) -> Result<Self, HardwareError> {
        let pin = claim(pins, PinRole::Actuator(actuator), pin)?;
        // Start released; a relay must never energise on boot.
        let output = Output::new(pin, Level::Low, OutputConfig::default());
        Ok(Self { output })
    }
}

impl Switch for Relay<'_> {
    type Error = Infallible;

    fn set(&mut self, on: bool) -> Result<(), Infallible> {
        self.output.set_level(Level::from(on));
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.output.is_set_high()
    }
}

/// Raw pins for the actuators, taken from `Peripherals` by the caller.
pub struct ActuatorGpios<'d> {
    pub pump: AnyPin<'d>,
    pub upper_valve: AnyPin<'d>,
    pub lower_valve: AnyPin<'d>,
    pub fan1: AnyPin<'d>,
    pub fan2: AnyPin<'d>,
    pub light1: AnyPin<'d>,
    pub light2: AnyPin<'d>,
    pub buzzer: AnyPin<'d>,
}

pub fn init_actuators<'d>(
    pins: &PinMap,
    gpios: ActuatorGpios<'d>,
) -> Result<ActuatorBank<Relay<'d>>, HardwareError> {
    let bank = ActuatorBank {
        pump: Relay::new(pins, Actuator::Pump, gpios.pump)?,
        upper_valve: Relay::new(pins, Actuator::UpperValve, gpios.upper_valve)?,
        lower_valve: Relay::new(pins, Actuator::LowerValve, gpios.lower_valve)?,
        fan1: Relay::new(pins, Actuator::Fan1, gpios.fan1)?,
        fan2: Relay::new(pins, Actuator::Fan2, gpios.fan2)?,
        light1: Relay::new(pins, Actuator::Light1, gpios.light1)?,
        light2: Relay::new(pins, Actuator::Light2, gpios.light2)?,
        buzzer: Relay::new(pins, Actuator::Buzzer, gpios.buzzer)?,
    };
    info!("[HW] {} actuators bound, all off", Actuator::COUNT);
    Ok(bank)
}

pub struct SensorGpios<'d> {
    pub dht1: AnyPin<'d>,
    pub dht2: AnyPin<'d>,
    pub soil_moisture1: AnyPin<'d>,
    pub soil_moisture2: AnyPin<'d>,
    pub rain: AnyPin<'d>,
    pub ultrasonic_trigger: AnyPin<'d>,
    pub ultrasonic_echo: AnyPin<'d>,
}

/// Sensor lines, reserved and checked. The DHT and analog lines stay raw so a
/// sensor driver can put them in the mode it needs.
pub struct SensorHardware<'d> {
    pub dht1: AnyPin<'d>,
    pub dht2: AnyPin<'d>,
    pub soil_moisture1: AnyPin<'d>,
    pub soil_moisture2: AnyPin<'d>,
    pub rain: Input<'d>,
    pub ultrasonic_trigger: Output<'d>,
    pub ultrasonic_echo: Input<'d>,
}

pub fn init_sensors<'d>(
    pins: &PinMap,
    gpios: SensorGpios<'d>,
) -> Result<SensorHardware<'d>, HardwareError> {
    let role = PinRole::Sensor;

    let hw = SensorHardware {
        dht1: claim(pins, role(Sensor::Dht1), gpios.dht1)?,
        dht2: claim(pins, role(Sensor::Dht2), gpios.dht2)?,
        soil_moisture1: claim(pins, role(Sensor::SoilMoisture1), gpios.soil_moisture1)?,
        soil_moisture2: claim(pins, role(Sensor::SoilMoisture2), gpios.soil_moisture2)?,
        rain: Input::new(
            claim(pins, role(Sensor::Rain), gpios.rain)?,
            InputConfig::default(),
        ),
        ultrasonic_trigger: Output::new(
            claim(pins, role(Sensor::UltrasonicTrigger), gpios.ultrasonic_trigger)?,
            Level::Low,
            OutputConfig::default(),
        ),
        ultrasonic_echo: Input::new(
            claim(pins, role(Sensor::UltrasonicEcho), gpios.ultrasonic_echo)?,
            InputConfig::default(),
        ),
    };
    info!("[HW] {} sensor lines reserved", Sensor::COUNT);
    Ok(hw)
}

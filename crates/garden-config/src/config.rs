//! The board's configuration constants and the checks run on them at boot.

use thiserror_no_std::Error;

use crate::endpoint::{Endpoint, EndpointError};
use crate::gpio::GpioPin;
use crate::pins::{ActuatorPins, PinError, PinMap, SensorPins};
use crate::wifi::{WifiCredentials, WifiError};

// Credentials and URL come from the build environment (or `.env`, see build.rs).
// The fallbacks are the values the board shipped with.
pub const WIFI_SSID: &str = match option_env!("GARDEN_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "maychu",
};
pub const WIFI_PASS: &str = match option_env!("GARDEN_WIFI_PASS") {
    Some(pass) => pass,
    None => "12345678",
};
/// Sensor readings are posted here and actuator commands fetched from here.
pub const SENSOR_CONTROLLER_URL: &str = match option_env!("GARDEN_SENSOR_CONTROLLER_URL") {
    Some(url) => url,
    None => "http://192.168.1.123/SmartGarden/backend-api/routes/sensor.php",
};

/*** Relays and buzzer ***/
pub const MAYBOM_PIN: GpioPin = gpio(13);
pub const VANTREN_PIN: GpioPin = gpio(16);
pub const VANDUOI_PIN: GpioPin = gpio(14);
pub const QUAT1_PIN: GpioPin = gpio(27);
pub const QUAT2_PIN: GpioPin = gpio(26);
pub const DEN1_PIN: GpioPin = gpio(25);
pub const DEN2_PIN: GpioPin = gpio(17);
pub const BUZZER_PIN: GpioPin = gpio(19);

/*** Sensors ***/
pub const DHT1_PIN: GpioPin = gpio(15);
pub const DHT2_PIN: GpioPin = gpio(4);
pub const SOIL_MOISTURE1_PIN: GpioPin = gpio(34);
pub const SOIL_MOISTURE2_PIN: GpioPin = gpio(33);
pub const RAIN_SENSOR_PIN: GpioPin = gpio(32);
pub const ULTRASONIC_TRIG_PIN: GpioPin = gpio(5);
pub const ULTRASONIC_ECHO_PIN: GpioPin = gpio(18);

pub const PINS: PinMap = PinMap {
    actuators: ActuatorPins {
        pump: MAYBOM_PIN,
        upper_valve: VANTREN_PIN,
        lower_valve: VANDUOI_PIN,
        fan1: QUAT1_PIN,
        fan2: QUAT2_PIN,
        light1: DEN1_PIN,
        light2: DEN2_PIN,
        buzzer: BUZZER_PIN,
    },
    sensors: SensorPins {
        dht1: DHT1_PIN,
        dht2: DHT2_PIN,
        soil_moisture1: SOIL_MOISTURE1_PIN,
        soil_moisture2: SOIL_MOISTURE2_PIN,
        rain: RAIN_SENSOR_PIN,
        ultrasonic_trigger: ULTRASONIC_TRIG_PIN,
        ultrasonic_echo: ULTRASONIC_ECHO_PIN,
    },
};

// A wiring mistake fails the build instead of the boot.
const _: () = match PINS.check() {
    Ok(()) => {}
    Err(PinError::Duplicate { .. }) => panic!("two roles share a GPIO"),
    Err(PinError::NotOutputCapable { .. }) => panic!("output role on an input-only GPIO"),
    Err(PinError::NotAdc1 { .. }) => panic!("analog sensor on a non-ADC1 GPIO"),
    Err(PinError::NoSuchPin(_) | PinError::FlashPin(_)) => panic!("unusable GPIO"),
};

/// The whole board configuration.
pub const GARDEN: GardenConfig = GardenConfig {
    wifi: WifiCredentials::new(WIFI_SSID, WIFI_PASS),
    sensor_controller_url: SENSOR_CONTROLLER_URL,
    pins: PINS,
};

const fn gpio(number: u8) -> GpioPin {
    match GpioPin::new(number) {
        Ok(pin) => pin,
        Err(_) => panic!("GPIO number not usable on the ESP32"),
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WiFi credentials: {0}")]
    Wifi(#[from] WifiError),
    #[error("sensor controller URL: {0}")]
    Endpoint(#[from] EndpointError),
    #[error("pin map: {0}")]
    Pins(#[from] PinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GardenConfig {
    pub wifi: WifiCredentials,
    pub sensor_controller_url: &'static str,
    pub pins: PinMap,
}

impl GardenConfig {
    /// Checks credentials, then the URL, then the pin map. Hands back the
    /// parsed endpoint so callers don't parse twice.
    pub fn validate(&self) -> Result<Endpoint<'static>, ConfigError> {
        self.wifi.validate()?;
        let endpoint = Endpoint::parse(self.sensor_controller_url)?;
        self.pins.check()?;
        Ok(endpoint)
    }

    pub fn endpoint(&self) -> Result<Endpoint<'static>, EndpointError> {
        Endpoint::parse(self.sensor_controller_url)
    }

    pub fn log_summary(&self) {
        log::info!("WiFi: ssid=\"{}\"", self.wifi.ssid);
        log::info!("Sensor controller: {}", self.sensor_controller_url);
        for (role, pin) in self.pins.iter() {
            log::info!("  {:<20} {:<18} {}", role.label(), role.name(), pin);
        }
        for warning in self.pins.warnings() {
            log::warn!("{warning}");
        }
    }
}

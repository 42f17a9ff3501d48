//! Hardware-independent configuration for the smart-garden controller.
//!
//! Holds the WiFi credentials, the backend endpoint and the GPIO wiring of the
//! relays, buzzer and sensors as one typed, validated record ([`GARDEN`]).
//! `#![no_std]` so it builds for the ESP32 and for desktop hosts (tests).

#![no_std]

pub mod actuators;
#[doc(hidden)]
pub mod build_env;
pub mod config;
pub mod endpoint;
pub mod gpio;
pub mod pins;
pub mod roles;
pub mod traits;
pub mod wifi;

pub use config::{ConfigError, GARDEN, GardenConfig};
pub use endpoint::{Endpoint, EndpointError, Host, Scheme};
pub use gpio::{AdcUnit, GpioPin};
pub use pins::{ActuatorPins, PinError, PinMap, PinWarning, SensorPins};
pub use roles::{Actuator, PinRequirement, PinRole, Sensor};
pub use wifi::{WifiCredentials, WifiError};

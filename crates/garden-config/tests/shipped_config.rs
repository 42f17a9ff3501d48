//! Properties the shipped board configuration must hold.

use std::collections::HashSet;

use garden_config::config::{self, GARDEN, PINS};
use garden_config::{Actuator, Endpoint, GpioPin, PinRole, Sensor};

fn all_pins() -> Vec<GpioPin> {
    vec![
        config::MAYBOM_PIN,
        config::VANTREN_PIN,
        config::VANDUOI_PIN,
        config::QUAT1_PIN,
        config::QUAT2_PIN,
        config::DEN1_PIN,
        config::DEN2_PIN,
        config::BUZZER_PIN,
        config::DHT1_PIN,
        config::DHT2_PIN,
        config::SOIL_MOISTURE1_PIN,
        config::SOIL_MOISTURE2_PIN,
        config::RAIN_SENSOR_PIN,
        config::ULTRASONIC_TRIG_PIN,
        config::ULTRASONIC_ECHO_PIN,
    ]
}

#[test]
fn fifteen_pins_pairwise_distinct() {
    let pins = all_pins();
    assert_eq!(pins.len(), 15);
    let unique: HashSet<u8> = pins.iter().map(|p| p.number()).collect();
    assert_eq!(unique.len(), pins.len(), "duplicate GPIO in {pins:?}");
}

#[test]
fn every_pin_exists_on_the_esp32() {
    for pin in all_pins() {
        assert_eq!(GpioPin::new(pin.number()), Ok(pin));
        assert!(pin.number() <= garden_config::gpio::MAX_GPIO);
    }
}

#[test]
fn pin_map_matches_named_constants() {
    let from_map: Vec<GpioPin> = PINS.iter().map(|(_, pin)| pin).collect();
    assert_eq!(from_map, all_pins());
    assert_eq!(GARDEN.pins, PINS);
}

#[test]
fn url_is_well_formed() {
    let endpoint = Endpoint::parse(config::SENSOR_CONTROLLER_URL).expect("valid URL");
    assert!(endpoint.path.starts_with('/'));
    assert!(endpoint.port > 0);
}

#[test]
fn credentials_are_present() {
    assert!(!config::WIFI_SSID.is_empty());
    assert!(!config::WIFI_PASS.is_empty());
    GARDEN.wifi.validate().expect("usable WiFi credentials");
}

#[test]
fn relays_can_drive_and_soil_sensors_use_adc1() {
    for actuator in Actuator::ALL {
        let pin = PINS.pin(PinRole::Actuator(actuator));
        assert!(pin.is_output_capable(), "{} on {pin}", actuator.name());
    }
    for soil in [Sensor::SoilMoisture1, Sensor::SoilMoisture2] {
        let pin = PINS.pin(PinRole::Sensor(soil));
        assert_eq!(pin.adc_unit(), Some(garden_config::AdcUnit::Adc1));
    }
}

#[test]
fn shipped_wiring_only_warns_about_strapping_pins() {
    let warned: Vec<u8> = PINS
        .warnings()
        .map(|w| match w {
            garden_config::PinWarning::Strapping { pin, .. } => pin.number(),
            other => panic!("unexpected warning: {other}"),
        })
        .collect();
    assert_eq!(warned, vec![15, 5]);
}

#[test]
fn whole_config_validates() {
    let endpoint = GARDEN.validate().expect("shipped config is valid");
    let rendered = endpoint.to_string();
    assert_eq!(Endpoint::parse(&rendered), Ok(endpoint));
}

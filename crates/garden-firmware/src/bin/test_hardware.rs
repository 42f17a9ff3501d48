#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_backtrace as _;
use esp_hal::gpio::{AnyPin, Pin};
use esp_hal::timer::timg::TimerGroup;

use garden_config::traits::Switch;
use garden_config::{Actuator, GARDEN, PinRole, PinWarning};
use garden_firmware::hardware::{HardwareError, Relay};

esp_bootloader_esp_idf::esp_app_desc!();

// Test result tracking
struct TestResults {
    passed: u32,
    failed: u32,
    total: u32,
}

impl TestResults {
    fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
            total: 0,
        }
    }

    fn assert(&mut self, condition: bool, test_name: &str) {
        self.total += 1;
        if condition {
            self.passed += 1;
            esp_println::println!("  ✓ {}", test_name);
        } else {
            self.failed += 1;
            esp_println::println!("  ✗ {} FAILED", test_name);
        }
    }

    fn assert_eq<T: PartialEq + core::fmt::Debug>(&mut self, left: T, right: T, test_name: &str) {
        self.total += 1;
        if left == right {
            self.passed += 1;
            esp_println::println!("  ✓ {}", test_name);
        } else {
            self.failed += 1;
            esp_println::println!("  ✗ {} FAILED: {:?} != {:?}", test_name, left, right);
        }
    }

    fn print_summary(&self) {
        esp_println::println!("\n==========================================");
        esp_println::println!("Test Summary:");
        esp_println::println!("  Total:  {}", self.total);
        esp_println::println!("  Passed: {}", self.passed);
        esp_println::println!("  Failed: {}", self.failed);
        if self.failed == 0 {
            esp_println::println!("\n✓ ALL TESTS PASSED!");
        } else {
            esp_println::println!("\n✗ SOME TESTS FAILED");
        }
        esp_println::println!("==========================================");
    }
}

fn test_config(results: &mut TestResults) {
    esp_println::println!("\n[TEST] Configuration");

    match GARDEN.validate() {
        Ok(endpoint) => {
            results.assert(true, "config validates");
            results.assert(endpoint.path.starts_with('/'), "endpoint has a path");
            esp_println::println!("    Endpoint: {}", endpoint);
        }
        Err(e) => {
            esp_println::println!("    {}", e);
            results.assert(false, "config validates");
        }
    }

    results.assert_eq(GARDEN.pins.check(), Ok(()), "pin map check");
    results.assert(GARDEN.wifi.validate().is_ok(), "WiFi credentials usable");
    results.assert(
        GARDEN
            .pins
            .warnings()
            .all(|w| matches!(w, PinWarning::Strapping { .. })),
        "only strapping-pin warnings",
    );
}

fn test_pin_binding(results: &mut TestResults, wrong_pin: AnyPin<'static>) {
    esp_println::println!("\n[TEST] Pin binding");

    let actual = wrong_pin.number();
    match Relay::new(&GARDEN.pins, Actuator::Pump, wrong_pin) {
        Ok(_) => results.assert(false, "mismatched pin rejected"),
        Err(HardwareError::PinMismatch { role, expected, .. }) => {
            results.assert_eq(role, PinRole::Actuator(Actuator::Pump), "mismatch names the role");
            results.assert_eq(expected, GARDEN.pins.actuators.pump, "mismatch names the configured pin");
            esp_println::println!("    GPIO{} refused for the pump", actual);
        }
    }
}

/// Only loads that are harmless to pulse: the lights and the buzzer. The pump
/// and valves are left alone so a test run never waters anything.
async fn test_relays(
    results: &mut TestResults,
    light1: AnyPin<'static>,
    light2: AnyPin<'static>,
    buzzer: AnyPin<'static>,
) {
    esp_println::println!("\n[TEST] Relays");

    let relays = [
        (Actuator::Light1, light1),
        (Actuator::Light2, light2),
        (Actuator::Buzzer, buzzer),
    ];

    for (actuator, pin) in relays {
        let mut relay = match Relay::new(&GARDEN.pins, actuator, pin) {
            Ok(relay) => relay,
            Err(e) => {
                esp_println::println!("    {}", e);
                results.assert(false, "relay binds to configured pin");
                continue;
            }
        };

        results.assert(!relay.is_on(), "relay starts off");
        let _ = relay.set(true);
        results.assert(relay.is_on(), "relay switches on");
        Timer::after(Duration::from_millis(100)).await;
        let _ = relay.set(false);
        results.assert(!relay.is_on(), "relay switches off");
        esp_println::println!("    {} ok", actuator.name());
    }
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_println::println!("\n==========================================");
    esp_println::println!("=== Hardware Unit Test Runner ===");
    esp_println::println!("==========================================");

    let mut results = TestResults::new();

    // Run tests that don't need hardware
    test_config(&mut results);

    // Extract the pins we need before initializing RTOS timer
    let gpio23: AnyPin<'static> = peripherals.GPIO23.into();
    let light1: AnyPin<'static> = peripherals.GPIO25.into();
    let light2: AnyPin<'static> = peripherals.GPIO17.into();
    let buzzer: AnyPin<'static> = peripherals.GPIO19.into();

    // Initialize RTOS timer for embassy (this consumes TIMG0)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Run hardware tests
    test_pin_binding(&mut results, gpio23);
    test_relays(&mut results, light1, light2, buzzer).await;

    // Print summary
    results.print_summary();

    esp_println::println!("\nTest run complete. Looping...");
    loop {
        if results.failed == 0 {
            Timer::after(Duration::from_millis(200)).await;
        } else {
            Timer::after(Duration::from_millis(1000)).await;
        }
    }
}

#![no_std]
#![no_main]

use core::fmt::Display;

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use log::{error, info};

use garden_config::GARDEN;
use garden_config::endpoint::Host;
use garden_firmware::hardware::{self, ActuatorGpios, SensorGpios};
use garden_firmware::network;

const HEART_BEAT_INTERVAL_MS: u64 = 5_000;

esp_bootloader_esp_idf::esp_app_desc!();

#[embassy_executor::task]
async fn run_heartbeat() {
    loop {
        info!("[HEARTBEAT] System is alive");
        Timer::after(Duration::from_millis(HEART_BEAT_INTERVAL_MS)).await;
    }
}

/// Parks the firmware after logging why. Nothing is driven from here on.
async fn halt(reason: impl Display) -> ! {
    error!("[HALT] {}", reason);
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 98768);

    // Initialize RTOS timer for embassy
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("=== Smart Garden ===");

    let endpoint = match GARDEN.validate() {
        Ok(endpoint) => endpoint,
        Err(e) => halt(e).await,
    };
    GARDEN.log_summary();

    // GPIO numbers here must match garden_config::config; binding checks them.
    let actuator_gpios = ActuatorGpios {
        pump: peripherals.GPIO13.into(),
        upper_valve: peripherals.GPIO16.into(),
        lower_valve: peripherals.GPIO14.into(),
        fan1: peripherals.GPIO27.into(),
        fan2: peripherals.GPIO26.into(),
        light1: peripherals.GPIO25.into(),
        light2: peripherals.GPIO17.into(),
        buzzer: peripherals.GPIO19.into(),
    };
    let sensor_gpios = SensorGpios {
        dht1: peripherals.GPIO15.into(),
        dht2: peripherals.GPIO4.into(),
        soil_moisture1: peripherals.GPIO34.into(),
        soil_moisture2: peripherals.GPIO33.into(),
        rain: peripherals.GPIO32.into(),
        ultrasonic_trigger: peripherals.GPIO5.into(),
        ultrasonic_echo: peripherals.GPIO18.into(),
    };

    let actuators = match hardware::init_actuators(&GARDEN.pins, actuator_gpios) {
        Ok(bank) => bank,
        Err(e) => halt(e).await,
    };
    let _sensors = match hardware::init_sensors(&GARDEN.pins, sensor_gpios) {
        Ok(sensors) => sensors,
        Err(e) => halt(e).await,
    };
    for (actuator, on) in actuators.states().iter() {
        info!("[HW] {:<12} {}", actuator.name(), if on { "on" } else { "off" });
    }

    match run_heartbeat() {
        Ok(token) => spawner.spawn(token),
        Err(e) => error!("[ERROR] Failed to spawn heartbeat: {:?}", e),
    }

    let stack = match network::start(&spawner, peripherals.WIFI, GARDEN.wifi) {
        Ok(stack) => stack,
        Err(e) => halt(e).await,
    };
    network::wait_for_address(stack).await;

    match endpoint.host {
        Host::Ipv4(addr) => info!(
            "[NET] sensor controller at {}:{} (path {})",
            addr, endpoint.port, endpoint.path
        ),
        Host::Name(name) => info!(
            "[NET] sensor controller {} (hostname {}, no DNS lookup performed)",
            endpoint, name
        ),
    }

    // Dropping the drivers would release the pins; hold them for the life of the image.
    let _actuators = actuators;
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

//! Station-mode WiFi and the embassy-net stack.

use alloc::string::String;

use embassy_executor::{SpawnError, Spawner};
use embassy_net::{Config, Runner, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_radio::wifi::{
    ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent, WifiStaState,
};
use garden_config::WifiCredentials;
use log::{error, info, warn};
use static_cell::StaticCell;
use thiserror_no_std::Error;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
static RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("radio init failed: {0:?}")]
    Radio(esp_radio::InitializationError),
    #[error("WiFi driver init failed: {0:?}")]
    Wifi(esp_radio::wifi::WifiError),
    #[error("failed to spawn network task: {0:?}")]
    Spawn(SpawnError),
}

impl From<SpawnError> for NetworkError {
    fn from(e: SpawnError) -> Self {
        NetworkError::Spawn(e)
    }
}

/// Brings up the radio and spawns the connection and stack tasks. Call once.
pub fn start(
    spawner: &Spawner,
    wifi: WIFI<'static>,
    credentials: WifiCredentials,
) -> Result<Stack<'static>, NetworkError> {
    let radio = RADIO.init(esp_radio::init().map_err(NetworkError::Radio)?);
    let (controller, interfaces) =
        esp_radio::wifi::new(radio, wifi, Default::default()).map_err(NetworkError::Wifi)?;

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    );

    spawner.spawn(connection_task(controller, credentials)?);
    spawner.spawn(net_task(runner)?);

    Ok(stack)
}

/// Resolves once DHCP has handed out an address.
pub async fn wait_for_address(stack: Stack<'static>) {
    stack.wait_link_up().await;
    info!("[NET] link up, waiting for DHCP");
    stack.wait_config_up().await;
    if let Some(config) = stack.config_v4() {
        info!("[NET] address {}", config.address);
    }
}

#[embassy_executor::task]
async fn connection_task(mut controller: WifiController<'static>, credentials: WifiCredentials) {
    info!("[NET] joining \"{}\"", credentials.ssid);

    loop {
        if matches!(esp_radio::wifi::sta_state(), WifiStaState::Connected) {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("[NET] disconnected from \"{}\"", credentials.ssid);
            Timer::after(RECONNECT_DELAY).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let client = ClientConfig::default()
                .with_ssid(String::from(credentials.ssid))
                .with_password(String::from(credentials.password));
            if let Err(e) = controller.set_config(&ModeConfig::Client(client)) {
                error!("[NET] rejected client config: {:?}", e);
                Timer::after(RECONNECT_DELAY).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                error!("[NET] failed to start WiFi: {:?}", e);
                Timer::after(RECONNECT_DELAY).await;
                continue;
            }
        }

        match controller.connect_async().await {
            Ok(()) => info!("[NET] connected to \"{}\"", credentials.ssid),
            Err(e) => {
                warn!("[NET] connect failed: {:?}", e);
                Timer::after(RECONNECT_DELAY).await;
            }
        }
    }
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

//! Station-mode WiFi credentials and their validation.

use core::fmt;

use thiserror_no_std::Error;

pub const MAX_SSID_LEN: usize = 32;
pub const MIN_PASSPHRASE_LEN: usize = 8;
pub const MAX_PASSPHRASE_LEN: usize = 63;
/// A raw WPA2 PSK given as hex instead of a passphrase.
pub const RAW_PSK_HEX_LEN: usize = 64;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    #[error("WiFi SSID is empty")]
    EmptySsid,
    #[error("WiFi SSID is {0} bytes, the limit is 32")]
    SsidTooLong(usize),
    #[error("WiFi password is empty")]
    EmptyPassword,
    #[error("WiFi password is {0} bytes, expected 8..=63 or a 64-digit hex key")]
    BadPasswordLength(usize),
    #[error("64-character WiFi password must be a hex PSK")]
    BadRawPsk,
}

/// WPA2 station credentials. `Debug` never prints the password.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: &'static str,
    pub password: &'static str,
}

impl WifiCredentials {
    pub const fn new(ssid: &'static str, password: &'static str) -> Self {
        Self { ssid, password }
    }

    pub fn validate(&self) -> Result<(), WifiError> {
        match self.ssid.len() {
            0 => return Err(WifiError::EmptySsid),
            n if n > MAX_SSID_LEN => return Err(WifiError::SsidTooLong(n)),
            _ => {}
        }

        match self.password.len() {
            0 => Err(WifiError::EmptyPassword),
            MIN_PASSPHRASE_LEN..=MAX_PASSPHRASE_LEN => Ok(()),
            RAW_PSK_HEX_LEN => {
                if self.password.bytes().all(|b| b.is_ascii_hexdigit()) {
                    Ok(())
                } else {
                    Err(WifiError::BadRawPsk)
                }
            }
            n => Err(WifiError::BadPasswordLength(n)),
        }
    }
}

impl fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

//! ESP32 side of the smart-garden controller: binds the configured pins to
//! esp-hal drivers and brings up WiFi with the configured credentials.

#![no_std]

extern crate alloc;

pub mod hardware;
pub mod network;

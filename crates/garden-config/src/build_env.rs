//! Decisions made by the build script when forwarding `.env` entries.
//!
//! Shared with `build.rs` through `#[path]` so the rules are unit-tested here.

/// Variables forwarded from a `.env` file to `option_env!` in `config.rs`.
pub const FORWARDED: [&str; 3] = [
    "GARDEN_WIFI_SSID",
    "GARDEN_WIFI_PASS",
    "GARDEN_SENSOR_CONTROLLER_URL",
];

/// A variable set in the real environment wins over the file.
pub fn should_forward(key: &str, set_in_environment: bool) -> bool {
    !set_in_environment && FORWARDED.contains(&key)
}

/// File cargo should watch. A missing path would mark the crate dirty on
/// every build, so without a `.env` only the script itself is watched.
pub fn rerun_trigger(dotenv: &str, dotenv_exists: bool) -> &str {
    if dotenv_exists { dotenv } else { "build.rs" }
}

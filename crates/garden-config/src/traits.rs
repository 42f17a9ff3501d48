//! Hardware abstraction traits

/// Trait for on/off loads (relay channels, the buzzer)
pub trait Switch {
    type Error;

    /// Energise (`true`) or release (`false`) the load
    fn set(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Commanded state, not a measurement of the load
    fn is_on(&self) -> bool;
}

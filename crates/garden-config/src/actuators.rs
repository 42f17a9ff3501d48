//! One switch per actuator (hardware-independent)

use crate::roles::Actuator;
use crate::traits::Switch;

/// Commanded on/off state of every actuator, indexed by [`Actuator::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorStates([bool; Actuator::COUNT]);

impl ActuatorStates {
    pub fn get(&self, actuator: Actuator) -> bool {
        self.0[actuator.index()]
    }

    pub fn any_on(&self) -> bool {
        self.0.iter().any(|&on| on)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Actuator, bool)> + '_ {
        Actuator::ALL.iter().map(|&a| (a, self.get(a)))
    }
}

pub struct ActuatorBank<S> {
    pub pump: S,
    pub upper_valve: S,
    pub lower_valve: S,
    pub fan1: S,
    pub fan2: S,
    pub light1: S,
    pub light2: S,
    pub buzzer: S,
}

impl<S: Switch> ActuatorBank<S> {
    pub fn get(&self, actuator: Actuator) -> &S {
        match actuator {
            Actuator::Pump => &self.pump,
            Actuator::UpperValve => &self.upper_valve,
            Actuator::LowerValve => &self.lower_valve,
            Actuator::Fan1 => &self.fan1,
            Actuator::Fan2 => &self.fan2,
            Actuator::Light1 => &self.light1,
            Actuator::Light2 => &self.light2,
            Actuator::Buzzer => &self.buzzer,
        }
    }

    pub fn get_mut(&mut self, actuator: Actuator) -> &mut S {
        match actuator {
            Actuator::Pump => &mut self.pump,
            Actuator::UpperValve => &mut self.upper_valve,
            Actuator::LowerValve => &mut self.lower_valve,
            Actuator::Fan1 => &mut self.fan1,
            Actuator::Fan2 => &mut self.fan2,
            Actuator::Light1 => &mut self.light1,
            Actuator::Light2 => &mut self.light2,
            Actuator::Buzzer => &mut self.buzzer,
        }
    }

    pub fn set(&mut self, actuator: Actuator, on: bool) -> Result<(), S::Error> {
        log::debug!("{} -> {}", actuator.name(), if on { "on" } else { "off" });
        self.get_mut(actuator).set(on)
    }

    /// Releases every load. Keeps going past failures and returns the first one.
    pub fn all_off(&mut self) -> Result<(), S::Error> {
        let mut first_err = None;
        for actuator in Actuator::ALL {
            if let Err(e) = self.get_mut(actuator).set(false) {
                log::error!("failed to switch off {}", actuator.name());
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn states(&self) -> ActuatorStates {
        let mut states = [false; Actuator::COUNT];
        for actuator in Actuator::ALL {
            states[actuator.index()] = self.get(actuator).is_on();
        }
        ActuatorStates(states)
    }
}

use ec::{Delay, EcWriter, PortAccessor};

use crate::state::StateStore;

/// Both registers have to agree for the light to follow.
pub const LAMP_REGISTERS: [u8; 2] = [0x0C, 0xA0];

pub const LIGHTS_ON: u8 = 0x80;
pub const LIGHTS_OFF: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub value: u8,
    pub new_is_off: bool
}

impl Plan {
    /// Flips the lamp: off becomes on and vice versa.
    #[must_use]
    pub fn from_state(is_off: bool) -> Self {
        if is_off {
            Self { value: LIGHTS_ON, new_is_off: false }
        } else {
            Self { value: LIGHTS_OFF, new_is_off: true }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub was_off: bool,
    pub is_off: bool,
    pub registers_written: bool,
    pub state_persisted: bool
}

impl Report {
    pub const SUCCESS_EXIT_CODE: u8 = 0;
    pub const FAILURE_EXIT_CODE: u8 = 2;

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.registers_written && self.state_persisted
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            Self::SUCCESS_EXIT_CODE
        } else {
            Self::FAILURE_EXIT_CODE
        }
    }
}

///
/// One toggle per run:
///   load the flag -> write both lamp registers -> store the flipped flag.
///
/// Both registers are always attempted and the new flag is always stored,
/// even if the controller didn't respond, so the next run keeps alternating.
///
pub struct Toggler<'a, IoPorts: PortAccessor, Clock: Delay, Store: StateStore> {
    writer: EcWriter<'a, IoPorts, Clock>,
    store: &'a Store
}

impl<'a, IoPorts: PortAccessor, Clock: Delay, Store: StateStore> Toggler<'a, IoPorts, Clock, Store> {
    #[must_use]
    pub fn new(port_accessor: &'a IoPorts, clock: &'a Clock, store: &'a Store) -> Self {
        Self { writer: EcWriter::new(port_accessor, clock), store }
    }

    fn load_state(&self) -> bool {
        match self.store.load() {
            Ok(Some(is_off)) => is_off,
            Ok(None) => false, // First run, the lights are on
            Err(err) => {
                log::warn!("{err}, assuming the lights are on");
                false
            }
        }
    }

    #[must_use]
    pub fn run(&self) -> Report {
        let was_off = self.load_state();
        let plan = Plan::from_state(was_off);

        log::debug!("Turning the lights {}", if plan.new_is_off { "off" } else { "on" });

        let results = LAMP_REGISTERS.map(|address| self.writer.write_register(address, plan.value));
        let registers_written = results.iter().all(|written| *written);
        if !registers_written {
            log::error!("EC communication failed (timeout or error)");
        }

        let state_persisted = match self.store.save(plan.new_is_off) {
            Ok(()) => true,
            Err(err) => {
                log::error!("Cannot save LED state: {err}");
                false
            }
        };

        Report { was_off, is_off: plan.new_is_off, registers_written, state_persisted }
    }
}

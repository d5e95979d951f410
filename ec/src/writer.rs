use crate::{
    delay::Delay,
    gate::EcGate,
    port_accessor::PortAccessor,
    EC_DATA,
    EC_SC,
    EC_WRITE_CMD
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Command,
    Address,
    Value
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Command => write!(f, "command"),
            Step::Address => write!(f, "address"),
            Step::Value => write!(f, "value")
        }
    }
}

pub struct EcWriter<'a, IoPorts: PortAccessor, Clock: Delay> {
    port_accessor: &'a IoPorts,
    gate: EcGate<'a, IoPorts, Clock>
}

impl<'a, IoPorts: PortAccessor, Clock: Delay> EcWriter<'a, IoPorts, Clock> {
    #[must_use]
    pub fn new(port_accessor: &'a IoPorts, clock: &'a Clock) -> Self {
        Self { port_accessor, gate: EcGate::new(port_accessor, clock) }
    }

    #[must_use]
    pub fn gate(&self) -> &EcGate<'a, IoPorts, Clock> {
        &self.gate
    }

    fn send(&self, step: Step, port_number: u16, value: u8) -> Result<(), Step> {
        if !self.gate.wait_ready_default() {
            return Err(step);
        }

        if self.port_accessor.write_byte(port_number, value) {
            Ok(())
        } else {
            Err(step)
        }
    }

    ///
    /// Performs the "write register" transaction:
    ///   1. Command 0x81 to the command port;
    ///   2. Register address to the data port;
    ///   3. Register value to the data port.
    ///
    /// Every byte is gated by the readiness poll. There is no way to roll back
    /// a half-sent transaction, so a failure leaves the controller in whatever
    /// state the accepted bytes put it into.
    ///
    /// # Errors
    ///
    /// Returns the step that couldn't be completed.
    pub fn try_write_register(&self, address: u8, value: u8) -> Result<(), Step> {
        self.send(Step::Command, EC_SC, EC_WRITE_CMD)?;
        self.send(Step::Address, EC_DATA, address)?;
        self.send(Step::Value, EC_DATA, value)
    }

    #[must_use]
    pub fn write_register(&self, address: u8, value: u8) -> bool {
        match self.try_write_register(address, value) {
            Ok(()) => true,
            Err(step) => {
                log::warn!("Unable to write EC register 0x{address:02X} = 0x{value:02X}: {step} byte wasn't delivered");
                false
            }
        }
    }
}

use crate::{
    delay::Delay,
    port_accessor::PortAccessor,
    EC_SC,
    EC_STATUS_IBF
};

///
/// Waits until the embedded controller is able to accept the next byte.
///
/// Each attempt polls the status register once per millisecond for up to
/// `POLL_TIMEOUT_MSEC` polls. A timed out attempt is followed by a short
/// backoff before the next one, so the total wait is bounded by:
///   `max_attempts * (POLL_TIMEOUT_MSEC + BACKOFF_MSEC)`
///
/// With the default three attempts it's about 930 msec.
///
pub struct EcGate<'a, IoPorts: PortAccessor, Clock: Delay> {
    port_accessor: &'a IoPorts,
    clock: &'a Clock
}

impl<'a, IoPorts: PortAccessor, Clock: Delay> EcGate<'a, IoPorts, Clock> {
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    pub const POLL_TIMEOUT_MSEC: u32 = 300;
    pub const POLL_INTERVAL_MSEC: u32 = 1;
    pub const BACKOFF_MSEC: u32 = 10;

    #[must_use]
    pub fn new(port_accessor: &'a IoPorts, clock: &'a Clock) -> Self {
        Self { port_accessor, clock }
    }

    /// An unreadable status register counts as busy.
    fn is_busy(&self) -> bool {
        self.port_accessor
            .read_byte(EC_SC)
            .map_or(true, |status| (status & EC_STATUS_IBF) != 0)
    }

    #[must_use]
    pub fn wait_ready(&self, max_attempts: u32) -> bool {
        for attempt in 1..=max_attempts {
            let mut timeout = Self::POLL_TIMEOUT_MSEC;
            while self.is_busy() && timeout > 0 {
                self.clock.sleep_ms(Self::POLL_INTERVAL_MSEC);
                timeout -= 1;
            }

            if timeout > 0 {
                return true;
            }

            log::debug!("EC is still busy after {} msec, attempt {attempt}/{max_attempts}", Self::POLL_TIMEOUT_MSEC);
            self.clock.sleep_ms(Self::BACKOFF_MSEC);
        }

        log::warn!("EC didn't become ready after {max_attempts} attempts");
        false
    }

    #[must_use]
    pub fn wait_ready_default(&self) -> bool {
        self.wait_ready(Self::DEFAULT_ATTEMPTS)
    }
}

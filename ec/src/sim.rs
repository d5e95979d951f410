//!
//! A software embedded controller driven by a simulated millisecond clock.
//!
//! It answers status polls, decodes "write register" transactions
//! into a register file and counts time only when someone sleeps on it,
//! so the gate and the writer can be exercised without real hardware.
//!

use std::cell::{Cell, RefCell};

use crate::{
    delay::Delay,
    port_accessor::PortAccessor,
    EC_DATA,
    EC_SC,
    EC_STATUS_IBF,
    EC_WRITE_CMD
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Busy {
    Idle,
    Until(u64), // Simulated msec
    Forever
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Decoder {
    Command,
    Address,
    Value(u8 /* Address */)
}

pub struct SimulatedEc {
    now_ms: Cell<u64>,
    busy: Cell<Busy>,
    processing_ms: Cell<u64>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    status_reads: Cell<usize>,
    decoder: Cell<Decoder>,
    writes: RefCell<Vec<(u16, u8)>>,
    registers: RefCell<[Option<u8>; 256]>
}

impl Default for SimulatedEc {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedEc {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            busy: Cell::new(Busy::Idle),
            processing_ms: Cell::new(0),
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
            status_reads: Cell::new(0),
            decoder: Cell::new(Decoder::Command),
            writes: RefCell::new(Vec::new()),
            registers: RefCell::new([None; 256])
        }
    }

    /// Keeps the busy bit raised after every accepted byte for the given time.
    pub fn set_processing_ms(&self, msec: u64) {
        self.processing_ms.set(msec);
    }

    /// Raises the busy bit for the given time starting from now.
    pub fn set_busy_for(&self, msec: u64) {
        self.busy.set(Busy::Until(self.now_ms.get() + msec));
    }

    /// Wedges the controller: the busy bit never clears.
    pub fn set_busy_forever(&self) {
        self.busy.set(Busy::Forever);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    #[must_use]
    pub fn status_reads(&self) -> usize {
        self.status_reads.get()
    }

    /// Every byte the controller accepted, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.writes.borrow().clone()
    }

    /// Value of a register set by a completed "write register" transaction.
    #[must_use]
    pub fn register(&self, address: u8) -> Option<u8> {
        self.registers.borrow()[usize::from(address)]
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        match self.busy.get() {
            Busy::Idle => false,
            Busy::Until(deadline) => self.now_ms.get() < deadline,
            Busy::Forever => true
        }
    }

    fn accept(&self, port_number: u16, value: u8) {
        let next = match (self.decoder.get(), port_number) {
            (_, EC_SC) if value == EC_WRITE_CMD => Decoder::Address,
            (Decoder::Address, EC_DATA) => Decoder::Value(value),
            (Decoder::Value(address), EC_DATA) => {
                self.registers.borrow_mut()[usize::from(address)] = Some(value);
                Decoder::Command
            }
            _ => Decoder::Command // Unknown command or a stray data byte
        };

        self.decoder.set(next);

        let processing_ms = self.processing_ms.get();
        if processing_ms > 0 && self.busy.get() != Busy::Forever {
            self.busy.set(Busy::Until(self.now_ms.get() + processing_ms));
        }
    }
}

impl PortAccessor for SimulatedEc {
    fn read_byte(&self, port_number: u16) -> Option<u8> {
        if self.fail_reads.get() {
            return None;
        }

        if port_number == EC_SC {
            self.status_reads.set(self.status_reads.get() + 1);
            return Some(if self.is_busy() { EC_STATUS_IBF } else { 0 });
        }

        Some(0)
    }

    fn write_byte(&self, port_number: u16, value: u8) -> bool {
        if self.fail_writes.get() {
            return false;
        }

        self.writes.borrow_mut().push((port_number, value));
        self.accept(port_number, value);
        true
    }
}

impl Delay for SimulatedEc {
    fn sleep_ms(&self, msec: u32) {
        self.now_ms.set(self.now_ms.get() + u64::from(msec));
    }
}

use ec::{sim::SimulatedEc, EcGate, EcWriter, EC_DATA, EC_SC, EC_WRITE_CMD};

type Gate<'a> = EcGate<'a, SimulatedEc, SimulatedEc>;

const WORST_CASE_WAIT_MSEC: u64 = 930;

#[test]
fn slow_controller_accepts_both_lamp_registers() {
    let ec = SimulatedEc::new();
    ec.set_processing_ms(3);
    let writer = EcWriter::new(&ec, &ec);

    assert!(writer.write_register(0x0C, 0x80));
    assert!(writer.write_register(0xA0, 0x80));

    assert_eq!(ec.register(0x0C), Some(0x80));
    assert_eq!(ec.register(0xA0), Some(0x80));
    assert_eq!(ec.writes().len(), 6);
}

#[test]
fn wedged_controller_costs_one_gate_timeout_per_register() {
    let ec = SimulatedEc::new();
    ec.set_busy_forever();
    let writer = EcWriter::new(&ec, &ec);

    assert!(!writer.write_register(0x0C, 0x00));
    assert_eq!(ec.now_ms(), WORST_CASE_WAIT_MSEC);

    assert!(!writer.write_register(0xA0, 0x00));
    assert_eq!(ec.now_ms(), 2 * WORST_CASE_WAIT_MSEC);

    assert!(ec.writes().is_empty());
}

#[test]
fn controller_recovering_after_the_first_register_serves_the_second() {
    let ec = SimulatedEc::new();
    ec.set_busy_for(WORST_CASE_WAIT_MSEC);
    let writer = EcWriter::new(&ec, &ec);

    assert!(!writer.write_register(0x0C, 0x00));
    assert!(writer.write_register(0xA0, 0x00));

    assert_eq!(ec.register(0x0C), None);
    assert_eq!(ec.register(0xA0), Some(0x00));
    assert_eq!(ec.writes(), vec![(EC_SC, EC_WRITE_CMD), (EC_DATA, 0xA0), (EC_DATA, 0x00)]);
}

#[test]
fn busy_bit_clearing_on_the_last_poll_is_still_a_timeout() {
    let ec = SimulatedEc::new();
    ec.set_busy_for(u64::from(Gate::POLL_TIMEOUT_MSEC));
    let writer = EcWriter::new(&ec, &ec);

    // The first attempt runs out of polls exactly when the bit clears,
    // the second one sees a ready controller right away.
    assert!(writer.gate().wait_ready(2));
    assert_eq!(ec.now_ms(), u64::from(Gate::POLL_TIMEOUT_MSEC + Gate::BACKOFF_MSEC));
}

#[test]
fn gate_never_exceeds_its_bound() {
    for attempts in 0..=5_u32 {
        let ec = SimulatedEc::new();
        ec.set_busy_forever();
        let gate = Gate::new(&ec, &ec);

        assert!(!gate.wait_ready(attempts));
        assert!(ec.now_ms() <= u64::from(attempts * (Gate::POLL_TIMEOUT_MSEC + Gate::BACKOFF_MSEC)));
    }
}

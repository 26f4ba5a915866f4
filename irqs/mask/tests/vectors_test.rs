//! Vector table tests for irqs-mask
//! These run on the host against the simulated core from irqs-host

use irqs_host::SimArmv7m;
use irqs_mask::{Cpu, Interrupts, IrqNumber};

#[test]
fn test_empty_table() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    assert_eq!(irqs.handler(IrqNumber::new(0)), None);
    assert_eq!(irqs.handler(IrqNumber::SYS_TICK), None);
}

#[test]
fn test_set_and_get_line_handler() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    unsafe { irqs.set_handler(IrqNumber::new(3), 0x0800_1235) };
    assert_eq!(irqs.handler(IrqNumber::new(3)), Some(0x0800_1235));
    assert_eq!(irqs.handler(IrqNumber::new(4)), None);

    // Line 3 lives at slot 19
    let slot = unsafe { sim.vector_table().add(19).read() };
    assert_eq!(slot, 0x0800_1235);
}

#[test]
fn test_set_exception_handler() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    unsafe { irqs.set_handler(IrqNumber::SYS_TICK, 0x0800_2001) };
    assert_eq!(irqs.handler(IrqNumber::SYS_TICK), Some(0x0800_2001));
    let slot = unsafe { sim.vector_table().add(15).read() };
    assert_eq!(slot, 0x0800_2001);
}

#[test]
fn test_last_line_slot() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    unsafe { irqs.set_handler(IrqNumber::new(239), 0x0800_3001) };
    assert_eq!(irqs.handler(IrqNumber::new(239)), Some(0x0800_3001));
}

#[test]
fn test_invalid_identifiers() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    for raw in [-17, 240, i16::MAX] {
        let irq = IrqNumber::new(raw);
        unsafe { irqs.set_handler(irq, 0x0800_4001) };
        assert_eq!(irqs.handler(irq), None);
    }
    assert_eq!(irqs.handler(IrqNumber::new(0)), None);
}

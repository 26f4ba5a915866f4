//! Full-mask section tests for irqs-mask
//! These run on the host against the simulated core from irqs-host

use irqs_host::SimArmv7m;
use irqs_mask::{Cpu, Interrupts, IrqNumber};

fn line(n: i16) -> IrqNumber {
    IrqNumber::new(n)
}

#[test]
fn test_enter_sets_primask() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    let state = irqs.enter_full_mask();
    assert!(!state.was_masked());
    assert!(irqs.is_full_mask_active());

    irqs.exit_full_mask(state);
    assert!(!irqs.is_full_mask_active());
}

#[test]
fn test_nested_sections_keep_outer_mask() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    let outer = irqs.enter_full_mask();
    let inner = irqs.enter_full_mask();
    assert!(inner.was_masked());

    irqs.exit_full_mask(inner);
    assert!(irqs.is_full_mask_active());

    irqs.exit_full_mask(outer);
    assert!(!irqs.is_full_mask_active());
}

#[test]
fn test_pending_interrupt_runs_on_exit() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_line(line(4));

    let state = irqs.enter_full_mask();
    sim.pend(line(4));
    assert!(sim.serviced().is_empty());

    irqs.exit_full_mask(state);
    assert_eq!(sim.serviced(), vec![line(4)]);
}

#[test]
fn test_inner_exit_does_not_deliver() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_line(line(4));

    let outer = irqs.enter_full_mask();
    let inner = irqs.enter_full_mask();
    sim.pend(line(4));
    irqs.exit_full_mask(inner);
    assert!(sim.serviced().is_empty());

    irqs.exit_full_mask(outer);
    assert_eq!(sim.serviced(), vec![line(4)]);
}

#[test]
fn test_full_mask_ignores_basepri() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    let state = irqs.enter_full_mask();
    assert_eq!(sim.basepri(), 0);
    irqs.exit_full_mask(state);
}

#[test]
fn test_disable_and_enable_all() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    irqs.disable_all();
    assert!(irqs.is_full_mask_active());
    // A second disable is harmless
    irqs.disable_all();
    assert!(sim.primask_active());

    unsafe { irqs.enable_all() };
    assert!(!irqs.is_full_mask_active());
}

#[test]
fn test_state_raw_round_trip() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    irqs.disable_all();
    let raw = irqs.enter_full_mask().into_raw();
    assert!(raw);

    let state = unsafe { irqs_mask::FullMaskState::from_raw(raw) };
    irqs.exit_full_mask(state);
    assert!(irqs.is_full_mask_active());
}

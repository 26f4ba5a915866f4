//! Guard and closure helper tests for irqs-mask
//! These run on the host against the simulated core from irqs-host

use std::panic::{catch_unwind, AssertUnwindSafe};

use irqs_host::SimArmv7m;
use irqs_mask::{Cpu, Interrupts, IrqNumber, LineMask};

fn line(n: i16) -> IrqNumber {
    IrqNumber::new(n)
}

#[test]
fn test_full_mask_guard() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    {
        let outer = irqs.full_mask();
        assert!(!outer.was_masked());
        {
            let inner = irqs.full_mask();
            assert!(inner.was_masked());
        }
        assert!(irqs.is_full_mask_active());
    }
    assert!(!irqs.is_full_mask_active());
}

#[test]
fn test_threshold_guard() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    {
        let _guard = irqs.threshold_mask();
        assert_eq!(sim.basepri(), SimArmv7m::basepri_for(3));
    }
    assert_eq!(sim.basepri(), 0);
}

#[test]
fn test_with_helpers_return_value() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    let value = irqs.with_full_mask(|| irqs.with_threshold_mask(|| 42));
    assert_eq!(value, 42);
    assert!(!irqs.is_full_mask_active());
    assert!(!irqs.is_threshold_mask_active());
}

#[test]
fn test_lines_guard_restores_only_enabled() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_lines(&LineMask::from_lines([line(1), line(2)]));

    let target = LineMask::from_lines([line(2), line(3)]);
    {
        let guard = irqs.lines_disabled(&target);
        assert_eq!(guard.restores(), &LineMask::from_lines([line(2)]));
        assert_eq!(irqs.enabled_lines(), LineMask::from_lines([line(1)]));
    }
    assert_eq!(irqs.enabled_lines(), LineMask::from_lines([line(1), line(2)]));
}

#[test]
fn test_with_lines_disabled_holds_interrupt() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_line(line(6));

    irqs.with_lines_disabled(&LineMask::from_lines([line(6)]), || {
        sim.pend(line(6));
        assert!(sim.serviced().is_empty());
    });
    assert_eq!(sim.serviced(), vec![line(6)]);
}

#[test]
fn test_guards_exit_on_panic() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_line(line(8));

    let result = catch_unwind(AssertUnwindSafe(|| {
        irqs.with_full_mask(|| {
            irqs.with_threshold_mask(|| {
                irqs.with_lines_disabled(&LineMask::from_lines([line(8)]), || {
                    panic!("handler failed");
                })
            })
        })
    }));

    assert!(result.is_err());
    assert!(!irqs.is_full_mask_active());
    assert_eq!(sim.basepri(), 0);
    assert!(!irqs.is_line_disabled(line(8)));
}

//! Line control tests for irqs-mask
//! These run on the host against the simulated core from irqs-host

use irqs_host::SimArmv7m;
use irqs_mask::{Interrupts, IrqNumber, LineMask};

fn line(n: i16) -> IrqNumber {
    IrqNumber::new(n)
}

fn mask(lines: &[i16]) -> LineMask {
    LineMask::from_lines(lines.iter().copied().map(line))
}

#[test]
fn test_enable_lines_touches_only_mask() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    irqs.enable_lines(&mask(&[1, 33]));
    irqs.enable_lines(&mask(&[2]));
    assert_eq!(irqs.enabled_lines(), mask(&[1, 2, 33]));
}

#[test]
fn test_disable_lines_returns_previous_state() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_lines(&mask(&[1, 2, 3]));

    let previous = irqs.disable_lines(&mask(&[2, 40]));
    assert_eq!(previous, mask(&[1, 2, 3]));
    assert_eq!(irqs.enabled_lines(), mask(&[1, 3]));
}

#[test]
fn test_disable_then_enable_restores() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    let original = mask(&[0, 31, 32, 100, 239]);
    irqs.enable_lines(&original);

    let all = LineMask::from_words([u32::MAX; irqs_mask::MASK_WORDS]);
    let previous = irqs.disable_lines(&all);
    assert!(irqs.enabled_lines().is_empty());

    irqs.enable_lines(&previous);
    assert_eq!(irqs.enabled_lines(), original);
}

#[test]
fn test_all_lines_disabled() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_line(line(5));

    assert!(irqs.all_lines_disabled(&mask(&[4, 6, 200])));
    assert!(!irqs.all_lines_disabled(&mask(&[4, 5])));
    assert!(irqs.all_lines_disabled(&LineMask::EMPTY));
}

#[test]
fn test_is_line_disabled() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    assert!(irqs.is_line_disabled(line(70)));
    irqs.enable_line(line(70));
    assert!(!irqs.is_line_disabled(line(70)));
    irqs.disable_line(line(70));
    assert!(irqs.is_line_disabled(line(70)));
}

#[test]
fn test_exceptions_have_no_enable_bit() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);

    irqs.enable_line(IrqNumber::SYS_TICK);
    assert!(irqs.enabled_lines().is_empty());
    assert!(irqs.is_line_disabled(IrqNumber::SYS_TICK));
    assert!(irqs.is_line_disabled(IrqNumber::new(240)));
}

#[test]
fn test_retrigger_lines_runs_requested_only() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_line(line(7));
    sim.pend(line(5));
    sim.pend(line(6));

    unsafe { irqs.retrigger_lines(&mask(&[5, 7])) };

    assert_eq!(sim.serviced(), vec![line(5)]);
    assert!(sim.is_pending(line(6)));
    assert!(irqs.is_line_disabled(line(5)));
    assert!(irqs.is_line_disabled(line(6)));
    assert!(!irqs.is_line_disabled(line(7)));
    assert_eq!(sim.isb_count(), 1);
}

#[test]
fn test_retrigger_lines_without_held_lines_is_noop() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_line(line(3));

    unsafe { irqs.retrigger_lines(&mask(&[3, 4])) };
    assert!(sim.serviced().is_empty());
    assert_eq!(sim.isb_count(), 0);
    assert_eq!(irqs.enabled_lines(), mask(&[3]));
}

#[test]
fn test_retrigger_lines_respects_global_mask() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    sim.pend(line(5));

    irqs.with_full_mask(|| unsafe { irqs.retrigger_lines(&mask(&[5])) });

    assert!(sim.serviced().is_empty());
    assert!(sim.is_pending(line(5)));
    assert!(irqs.is_line_disabled(line(5)));
}

#[test]
fn test_disable_line_leaves_others_enabled() {
    let sim = SimArmv7m::new();
    let irqs = Interrupts::new(&sim);
    irqs.enable_lines(&mask(&[9, 10, 64]));

    irqs.disable_line(line(10));
    assert_eq!(irqs.enabled_lines(), mask(&[9, 64]));
    assert!(!irqs.is_full_mask_active());

    irqs.disable_line(IrqNumber::SYS_TICK);
    assert_eq!(irqs.enabled_lines(), mask(&[9, 64]));
}

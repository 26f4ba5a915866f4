//! Error and identifier tests for irqs-core

use irqs_core::{IrqError, IrqNumber, LineMask, MAX_INTERRUPTS};

#[test]
fn test_error_messages() {
    assert_eq!(IrqError::NotSupported.to_string(), "Threshold masking not supported");
    assert_eq!(IrqError::InvalidPriority.to_string(), "Invalid priority level");
    assert_eq!(IrqError::InvalidIrqNumber.to_string(), "Invalid interrupt number");
}

#[test]
fn test_line_constructor_rejects_out_of_range() {
    assert_eq!(IrqNumber::line(MAX_INTERRUPTS), Err(IrqError::InvalidIrqNumber));
    assert_eq!(IrqNumber::line(0).map(IrqNumber::raw), Ok(0));
}

#[test]
fn test_identifier_display() {
    assert_eq!(IrqNumber::SYS_TICK.to_string(), "IRQn(-1)");
}

#[test]
fn test_mask_collects_lines() {
    let mask = LineMask::from_lines([IrqNumber::new(1), IrqNumber::PEND_SV, IrqNumber::new(64)]);
    let lines: Vec<i16> = mask.iter().map(IrqNumber::raw).collect();
    assert_eq!(lines, vec![1, 64]);
    assert_eq!(mask.count(), 2);
}

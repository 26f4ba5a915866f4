//! Firmware-wide controller and free-function facade

use irqs_mask::{
    FullMaskState, Interrupts, IrqNumber, IrqResult, LineMask, Priority, ThresholdState,
};

use crate::CortexM;

/// The interrupt controller for this core
pub static INTERRUPTS: Interrupts<CortexM> = Interrupts::new(CortexM::new());

/// Configure the priority threshold used by threshold sections
///
/// Call during startup, before any threshold section is entered.
pub fn set_threshold(level: Priority) -> bool {
    INTERRUPTS.set_threshold(level)
}

/// Configure the priority threshold, reporting why it was refused
pub fn try_set_threshold(level: Priority) -> IrqResult<()> {
    INTERRUPTS.try_set_threshold(level)
}

/// Currently configured threshold
pub fn threshold() -> Option<Priority> {
    INTERRUPTS.threshold()
}

/// Enter a full-mask section
#[inline]
pub fn enter_full_mask() -> FullMaskState {
    INTERRUPTS.enter_full_mask()
}

/// Leave a full-mask section
#[inline]
pub fn exit_full_mask(state: FullMaskState) {
    INTERRUPTS.exit_full_mask(state)
}

/// Enter a threshold section
#[inline]
pub fn enter_threshold_mask() -> ThresholdState {
    INTERRUPTS.enter_threshold_mask()
}

/// Leave a threshold section
#[inline]
pub fn exit_threshold_mask(state: ThresholdState) {
    INTERRUPTS.exit_threshold_mask(state)
}

/// Execute closure `f` inside a full-mask section
#[inline]
pub fn with_full_mask<R>(f: impl FnOnce() -> R) -> R {
    INTERRUPTS.with_full_mask(f)
}

/// Execute closure `f` inside a threshold section
#[inline]
pub fn with_threshold_mask<R>(f: impl FnOnce() -> R) -> R {
    INTERRUPTS.with_threshold_mask(f)
}

/// Execute closure `f` with the lines in `mask` disabled
#[inline]
pub fn with_lines_disabled<R>(mask: &LineMask, f: impl FnOnce() -> R) -> R {
    INTERRUPTS.with_lines_disabled(mask, f)
}

/// Run interrupts held back by PRIMASK
///
/// # Safety
///
/// See [`Interrupts::retrigger_pending`].
pub unsafe fn retrigger_pending() {
    INTERRUPTS.retrigger_pending()
}

/// Run interrupts held back by BASEPRI
///
/// # Safety
///
/// See [`Interrupts::retrigger_pending_by_threshold`].
pub unsafe fn retrigger_pending_by_threshold() {
    INTERRUPTS.retrigger_pending_by_threshold()
}

/// Run the requested lines that are pending but disabled
///
/// # Safety
///
/// See [`Interrupts::retrigger_lines`].
pub unsafe fn retrigger_lines(requested: &LineMask) {
    INTERRUPTS.retrigger_lines(requested)
}

/// Current NVIC enable state
pub fn enabled_lines() -> LineMask {
    INTERRUPTS.enabled_lines()
}

/// Enable the lines in `mask`
pub fn enable_lines(mask: &LineMask) {
    INTERRUPTS.enable_lines(mask)
}

/// Disable the lines in `mask`, returning the previous enable state
pub fn disable_lines(mask: &LineMask) -> LineMask {
    INTERRUPTS.disable_lines(mask)
}

/// Whether none of the lines in `mask` is enabled
pub fn all_lines_disabled(mask: &LineMask) -> bool {
    INTERRUPTS.all_lines_disabled(mask)
}

/// Whether `irq`'s enable bit is clear
pub fn is_line_disabled(irq: IrqNumber) -> bool {
    INTERRUPTS.is_line_disabled(irq)
}

/// Whether an exception handler is executing
pub fn is_in_interrupt_context() -> bool {
    INTERRUPTS.is_in_interrupt_context()
}

/// Whether `irq` would be prevented from running right now
pub fn is_line_blocked(irq: IrqNumber) -> bool {
    INTERRUPTS.is_line_blocked(irq)
}

/// Whether every interrupt line is currently blocked
pub fn are_all_lines_disabled() -> bool {
    INTERRUPTS.are_all_lines_disabled()
}

/// Handler address installed for `irq`
pub fn handler(irq: IrqNumber) -> Option<usize> {
    INTERRUPTS.handler(irq)
}

/// Install `address` as the handler for `irq`
///
/// # Safety
///
/// See [`Interrupts::set_handler`].
pub unsafe fn set_handler(irq: IrqNumber, address: usize) {
    INTERRUPTS.set_handler(irq, address)
}

//! Interrupt context and blocking queries

use irqs_core::{Cpu, IrqNumber, Priority, MAX_INTERRUPTS};

use crate::Interrupts;

impl<C: Cpu> Interrupts<C> {
    /// Whether an exception handler is executing (ICSR.VECTACTIVE non-zero)
    pub fn is_in_interrupt_context(&self) -> bool {
        self.cpu.vect_active() != 0
    }

    /// The exception or interrupt currently being serviced
    pub fn active_exception(&self) -> Option<IrqNumber> {
        IrqNumber::from_vect_active(self.cpu.vect_active())
    }

    /// Whether `irq` would be prevented from running right now
    ///
    /// `irq` is blocked if any of these hold:
    ///
    /// 1. PRIMASK is set;
    /// 2. it is an interrupt line whose enable bit is clear;
    /// 3. BASEPRI is non-zero and `irq`'s priority is at or below it;
    /// 4. a handler is active whose priority is at least as urgent as
    ///    `irq`'s, so `irq` cannot preempt it.
    ///
    /// `irq` must be an interrupt line or a system exception with
    /// configurable priority (MemManage and above on ARMv7-M, SVCall and
    /// above on ARMv6-M). Anything else is a programming error: it panics in
    /// debug builds and gives an unspecified answer in release builds.
    pub fn is_line_blocked(&self, irq: IrqNumber) -> bool {
        debug_assert!(Self::is_queryable(irq), "block query on unsupported {}", irq);

        if self.cpu.primask_active() {
            return true;
        }

        if irq.is_interrupt() && self.is_line_disabled(irq) {
            return true;
        }

        let priority = self.cpu.priority(irq);
        if C::HAS_THRESHOLD {
            let basepri = self.cpu.basepri();
            if basepri != 0 && priority >= Priority::from_raw(basepri, C::PRIORITY_BITS) {
                return true;
            }
        }

        // Only a strictly more urgent exception can preempt the active one
        if let Some(active) = self.active_exception() {
            if !priority.preempts(self.cpu.priority(active)) {
                return true;
            }
        }

        false
    }

    /// Whether every interrupt line is currently blocked
    ///
    /// True when PRIMASK is set, or when BASEPRI is active at a level at
    /// least as restrictive as the configured threshold.
    pub fn are_all_lines_disabled(&self) -> bool {
        if self.cpu.primask_active() {
            return true;
        }
        if C::HAS_THRESHOLD {
            let basepri = self.cpu.basepri();
            return basepri != 0 && basepri <= self.threshold_raw();
        }
        false
    }

    fn is_queryable(irq: IrqNumber) -> bool {
        let first = if C::HAS_THRESHOLD {
            IrqNumber::MEMORY_MANAGEMENT
        } else {
            IrqNumber::SV_CALL
        };
        irq >= first && irq.raw() < MAX_INTERRUPTS as i16
    }
}

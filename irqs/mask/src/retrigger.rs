//! Synchronous servicing of interrupts held back by a mask
//!
//! While masked, an enabled and pending interrupt does not run. Clearing the
//! mask lets the hardware take it eventually; the retrigger calls instead
//! take it *now*, so that the caller can rely on the handler's side effects
//! once the call returns.
//!
//! Each call lifts the mask, issues an ISB and reapplies the mask. Exception
//! entry happens before the instruction after the barrier executes, and
//! exception return brings execution back only once every handler that
//! became eligible has completed, so the call blocks until they have all
//! run. The barrier also flushes the pipeline, so changes a handler makes to
//! system control registers are visible to the instructions fetched after
//! it.

use irqs_core::Cpu;

use crate::Interrupts;

impl<C: Cpu> Interrupts<C> {
    /// Run every pending interrupt held back by PRIMASK, then set PRIMASK again
    ///
    /// No-op when PRIMASK is clear.
    ///
    /// # Safety
    ///
    /// Handlers run inside the enclosing section. The caller must not hold
    /// anything that relies on PRIMASK for exclusion across this call, such
    /// as a `critical_section::CriticalSection` token or data shared with
    /// the handlers that may run.
    pub unsafe fn retrigger_pending(&self) {
        if !self.cpu.primask_active() {
            return;
        }
        trace!("retrigger: lifting PRIMASK");
        self.cpu.enable_irq();
        self.cpu.isb();
        self.cpu.disable_irq();
    }

    /// Run every pending interrupt held back by BASEPRI, then restore BASEPRI
    ///
    /// No-op when BASEPRI is zero. Falls back to
    /// [`retrigger_pending`](Self::retrigger_pending) on cores without BASEPRI.
    ///
    /// # Safety
    ///
    /// Handlers masked by BASEPRI run inside the enclosing section. The
    /// caller must not rely on BASEPRI (or PRIMASK, on cores without
    /// BASEPRI) for exclusion across this call.
    pub unsafe fn retrigger_pending_by_threshold(&self) {
        if !C::HAS_THRESHOLD {
            self.retrigger_pending();
            return;
        }
        let previous = self.cpu.basepri();
        if previous == 0 {
            return;
        }
        trace!("retrigger: lifting BASEPRI {=u8:#x}", previous);
        self.cpu.set_basepri(0);
        self.cpu.isb();
        self.cpu.set_basepri(previous);
    }
}

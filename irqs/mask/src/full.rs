//! Full-mask sections (PRIMASK)
//!
//! Setting PRIMASK blocks every exception with configurable priority. NMI
//! and HardFault are unaffected and stay serviceable inside the section.
//!
//! To carry out a task with everything masked:
//!
//! 1. save the state of PRIMASK and set it ([`Interrupts::enter_full_mask`]);
//! 2. execute the task;
//! 3. restore the saved state ([`Interrupts::exit_full_mask`]).

use irqs_core::Cpu;

use crate::{FullMaskState, Interrupts};

impl<C: Cpu> Interrupts<C> {
    /// Mask all configurable-priority exceptions
    ///
    /// Returns whether they were already masked so the matching
    /// [`exit_full_mask`](Self::exit_full_mask) can leave an outer section
    /// intact.
    #[inline]
    pub fn enter_full_mask(&self) -> FullMaskState {
        let was_masked = self.cpu.primask_active();
        self.cpu.disable_irq();
        FullMaskState::new(was_masked)
    }

    /// Leave a full-mask section
    ///
    /// Clears PRIMASK only if it was clear when `state` was captured; an
    /// inner section never undoes the mask of an outer one. Sections must be
    /// exited in reverse order of entry.
    #[inline]
    pub fn exit_full_mask(&self, state: FullMaskState) {
        if !state.was_masked() {
            // SAFETY: PRIMASK was clear when this section was entered, so no
            // enclosing section depends on it.
            unsafe { self.cpu.enable_irq() };
        }
    }

    /// Set PRIMASK without capturing the previous state
    #[inline]
    pub fn disable_all(&self) {
        self.cpu.disable_irq();
    }

    /// Clear PRIMASK unconditionally
    ///
    /// # Safety
    ///
    /// Must not be called inside a full-mask section or a critical section
    /// that relies on PRIMASK.
    #[inline]
    pub unsafe fn enable_all(&self) {
        self.cpu.enable_irq();
    }

    /// Whether PRIMASK is currently set
    #[inline]
    pub fn is_full_mask_active(&self) -> bool {
        self.cpu.primask_active()
    }
}

//! Enabling, disabling and querying specific interrupt lines (NVIC)
//!
//! Bulk operations run inside an implicit full-mask section so that a
//! snapshot and the write that follows it cannot be split by a handler
//! touching the same registers.

use irqs_core::{Cpu, IrqNumber, LineMask, WORD_BITS};

use crate::Interrupts;

impl<C: Cpu> Interrupts<C> {
    /// Current NVIC enable state
    pub fn enabled_lines(&self) -> LineMask {
        self.with_full_mask(|| self.cpu.enabled_lines())
    }

    /// Disable every line in `mask`, returning the enable state before the call
    ///
    /// Lines outside `mask` are not touched. Passing the returned mask to
    /// [`enable_lines`](Self::enable_lines) brings back the original set.
    pub fn disable_lines(&self, mask: &LineMask) -> LineMask {
        let previous = self.with_full_mask(|| {
            let previous = self.cpu.enabled_lines();
            self.cpu.disable_lines(mask);
            previous
        });
        trace!("disabled lines {}", mask);
        previous
    }

    /// Enable every line in `mask`; lines outside it are not touched
    pub fn enable_lines(&self, mask: &LineMask) {
        self.with_full_mask(|| self.cpu.enable_lines(mask));
        trace!("enabled lines {}", mask);
    }

    /// Run the requested lines that are pending but currently disabled
    ///
    /// Takes one snapshot of the enable state and one of the pending state,
    /// then selects the lines that are in `requested`, disabled and pending.
    /// Exactly those are enabled, an ISB lets them run to completion, and
    /// they are disabled again. The rest of the enable state is left as it
    /// was. Global masks still apply: a line blocked by PRIMASK or BASEPRI
    /// stays pending.
    ///
    /// # Safety
    ///
    /// The selected handlers run even though their lines were disabled. The
    /// caller must not rely on those lines staying disabled across this
    /// call, for example inside a [`lines_disabled`](Self::lines_disabled)
    /// section guarding data they share.
    pub unsafe fn retrigger_lines(&self, requested: &LineMask) {
        let (enabled, pending) =
            self.with_full_mask(|| (self.cpu.enabled_lines(), self.cpu.pending_lines()));
        let held = requested.and_not(&enabled).and(&pending);
        if held.is_empty() {
            return;
        }
        trace!("retrigger: lines {}", held);
        self.cpu.enable_lines(&held);
        self.cpu.isb();
        self.cpu.disable_lines(&held);
    }

    /// Whether none of the lines in `mask` is currently enabled
    pub fn all_lines_disabled(&self, mask: &LineMask) -> bool {
        !self.enabled_lines().intersects(mask)
    }

    /// Whether `irq`'s enable bit is clear
    ///
    /// Exceptions and invalid identifiers have no enable bit and report
    /// `true`.
    pub fn is_line_disabled(&self, irq: IrqNumber) -> bool {
        match irq.line_index() {
            Some(line) => {
                let word = self.cpu.enabled_word((line / WORD_BITS) as usize);
                word & (1 << (line % WORD_BITS)) == 0
            }
            None => true,
        }
    }

    /// Enable a single line; no-op for exceptions and invalid identifiers
    pub fn enable_line(&self, irq: IrqNumber) {
        self.enable_lines(&LineMask::EMPTY.with_line(irq));
    }

    /// Disable a single line; no-op for exceptions and invalid identifiers
    pub fn disable_line(&self, irq: IrqNumber) {
        let mask = LineMask::EMPTY.with_line(irq);
        self.with_full_mask(|| self.cpu.disable_lines(&mask));
    }
}

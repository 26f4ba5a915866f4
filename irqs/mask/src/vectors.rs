//! Vector table access
//!
//! The table lives at the address held by VTOR. Slot `n` holds the handler
//! for CMSIS number `n - 16`, so exceptions occupy the first sixteen slots
//! and interrupt line 0 is slot 16.

use irqs_core::{Cpu, IrqNumber};

use crate::Interrupts;

impl<C: Cpu> Interrupts<C> {
    /// Handler address installed for `irq`
    ///
    /// `None` for invalid identifiers and for empty slots.
    pub fn handler(&self, irq: IrqNumber) -> Option<usize> {
        let slot = irq.vector_slot()?;
        // SAFETY: the vector table provided by the CPU spans every valid
        // slot, and slots are plain word-aligned words.
        let address = unsafe { self.cpu.vector_table().add(slot).read_volatile() };
        (address != 0).then_some(address)
    }

    /// Install `address` as the handler for `irq`; no-op for invalid identifiers
    ///
    /// The slot is not checked against the number of lines the device
    /// actually implements.
    ///
    /// # Safety
    ///
    /// The vector table must be in writable memory, `irq` must be within the
    /// table the device implements, and `address` must be a valid handler
    /// (with the Thumb bit set on hardware) for as long as `irq` can fire.
    pub unsafe fn set_handler(&self, irq: IrqNumber, address: usize) {
        if let Some(slot) = irq.vector_slot() {
            self.cpu.vector_table().add(slot).write_volatile(address);
            self.cpu.dsb();
        }
    }
}

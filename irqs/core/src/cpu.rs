//! Processor capability used by the interrupt-control layer
//!
//! Every register the layer touches is reached through [`Cpu`]. The default
//! implementation for real hardware lives in `irqs-cortex-m`; a simulated
//! core for host tests lives in `irqs-host`. A platform that needs a
//! different primitive (an RTOS-aware PRIMASK, a vector table in a custom
//! section, ...) supplies its own implementor and the calling code stays
//! the same.

use crate::{IrqNumber, LineMask, Priority, MASK_WORDS};

/// Register-level access to one Cortex-M core
///
/// Each method is a single atomic register transaction. None of them
/// masks interrupts on its own; callers that need a read-modify-write to be
/// atomic wrap it in a full-mask section.
pub trait Cpu {
    /// Whether the core implements BASEPRI (ARMv7-M, ARMv8-M mainline)
    const HAS_THRESHOLD: bool;

    /// Number of implemented priority bits (`__NVIC_PRIO_BITS`)
    const PRIORITY_BITS: u8;

    /// `true` when PRIMASK is set, i.e. configurable-priority exceptions are masked
    fn primask_active(&self) -> bool;

    /// Set PRIMASK (`cpsid i`)
    fn disable_irq(&self);

    /// Clear PRIMASK (`cpsie i`)
    ///
    /// # Safety
    ///
    /// Must not be called inside a critical section that relies on PRIMASK
    /// for mutual exclusion.
    unsafe fn enable_irq(&self);

    /// Read the raw BASEPRI register; zero on cores without it
    fn basepri(&self) -> u8 {
        0
    }

    /// Write the raw BASEPRI register; ignored on cores without it
    ///
    /// # Safety
    ///
    /// Lowering BASEPRI must not unmask interrupts that an enclosing
    /// critical section relies on being masked.
    unsafe fn set_basepri(&self, _raw: u8) {}

    /// Instruction synchronization barrier
    fn isb(&self);

    /// Data synchronization barrier
    fn dsb(&self);

    /// Read NVIC ISER word `index`
    fn enabled_word(&self, index: usize) -> u32;

    /// Write-1-to-set NVIC ISER word `index`
    fn enable_word(&self, index: usize, bits: u32);

    /// Write-1-to-clear NVIC ICER word `index`
    fn disable_word(&self, index: usize, bits: u32);

    /// Read NVIC ISPR word `index`
    fn pending_word(&self, index: usize) -> u32;

    /// Configured priority of an interrupt or system exception
    ///
    /// Reset, NMI and HardFault have fixed priorities more urgent than any
    /// configurable level and report [`Priority::HIGHEST`].
    fn priority(&self, irq: IrqNumber) -> Priority;

    /// ICSR.VECTACTIVE: exception number being serviced, zero in thread mode
    fn vect_active(&self) -> u16;

    /// Base address of the active vector table (VTOR)
    fn vector_table(&self) -> *mut usize;

    /// Snapshot of every ISER word
    fn enabled_lines(&self) -> LineMask {
        let mut words = [0; MASK_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.enabled_word(i);
        }
        LineMask::from_words(words)
    }

    /// Snapshot of every ISPR word
    fn pending_lines(&self) -> LineMask {
        let mut words = [0; MASK_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.pending_word(i);
        }
        LineMask::from_words(words)
    }

    /// Write `mask` to ISER, enabling its lines
    fn enable_lines(&self, mask: &LineMask) {
        for (i, bits) in mask.words().iter().enumerate() {
            if *bits != 0 {
                self.enable_word(i, *bits);
            }
        }
    }

    /// Write `mask` to ICER, disabling its lines
    fn disable_lines(&self, mask: &LineMask) {
        for (i, bits) in mask.words().iter().enumerate() {
            if *bits != 0 {
                self.disable_word(i, *bits);
            }
        }
    }

    /// Least urgent priority this core can express
    fn lowest_priority(&self) -> Priority {
        Priority::lowest(Self::PRIORITY_BITS)
    }
}

impl<C: Cpu> Cpu for &C {
    const HAS_THRESHOLD: bool = C::HAS_THRESHOLD;
    const PRIORITY_BITS: u8 = C::PRIORITY_BITS;

    fn primask_active(&self) -> bool {
        (**self).primask_active()
    }

    fn disable_irq(&self) {
        (**self).disable_irq()
    }

    unsafe fn enable_irq(&self) {
        (**self).enable_irq()
    }

    fn basepri(&self) -> u8 {
        (**self).basepri()
    }

    unsafe fn set_basepri(&self, raw: u8) {
        (**self).set_basepri(raw)
    }

    fn isb(&self) {
        (**self).isb()
    }

    fn dsb(&self) {
        (**self).dsb()
    }

    fn enabled_word(&self, index: usize) -> u32 {
        (**self).enabled_word(index)
    }

    fn enable_word(&self, index: usize, bits: u32) {
        (**self).enable_word(index, bits)
    }

    fn disable_word(&self, index: usize, bits: u32) {
        (**self).disable_word(index, bits)
    }

    fn pending_word(&self, index: usize) -> u32 {
        (**self).pending_word(index)
    }

    fn priority(&self, irq: IrqNumber) -> Priority {
        (**self).priority(irq)
    }

    fn vect_active(&self) -> u16 {
        (**self).vect_active()
    }

    fn vector_table(&self) -> *mut usize {
        (**self).vector_table()
    }

    fn enabled_lines(&self) -> LineMask {
        (**self).enabled_lines()
    }

    fn pending_lines(&self) -> LineMask {
        (**self).pending_lines()
    }

    fn enable_lines(&self, mask: &LineMask) {
        (**self).enable_lines(mask)
    }

    fn disable_lines(&self, mask: &LineMask) {
        (**self).disable_lines(mask)
    }

    fn lowest_priority(&self) -> Priority {
        (**self).lowest_priority()
    }
}

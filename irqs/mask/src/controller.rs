//! The interrupt controller handle

use core::sync::atomic::{AtomicU8, Ordering};
use irqs_core::{Cpu, Priority};

/// Threshold cell value on cores without BASEPRI
pub(crate) const NO_THRESHOLD: u8 = u8::MAX;

/// Interrupt-control operations for one core
///
/// Owns the [`Cpu`] used for register access and the priority threshold
/// applied by threshold sections. The threshold is written only by
/// [`set_threshold`](Self::set_threshold) during setup and read by every
/// threshold section and block query. Tests build a fresh controller per
/// case; firmware keeps a single `static` instance.
#[derive(Debug)]
pub struct Interrupts<C> {
    pub(crate) cpu: C,
    pub(crate) threshold: AtomicU8,
}

impl<C: Cpu> Interrupts<C> {
    /// Threshold installed at construction on cores with BASEPRI
    pub const DEFAULT_THRESHOLD: Priority = Priority::new_unchecked(3);

    /// Create a controller with the default threshold
    pub const fn new(cpu: C) -> Self {
        Self {
            cpu,
            threshold: AtomicU8::new(Self::initial_threshold()),
        }
    }

    const fn initial_threshold() -> u8 {
        if !C::HAS_THRESHOLD {
            return NO_THRESHOLD;
        }
        let lowest = Priority::lowest(C::PRIORITY_BITS).level();
        if Self::DEFAULT_THRESHOLD.level() < lowest {
            Self::DEFAULT_THRESHOLD.level()
        } else {
            lowest
        }
    }

    /// The underlying CPU
    pub const fn cpu(&self) -> &C {
        &self.cpu
    }

    /// Configured threshold encoded for BASEPRI
    pub(crate) fn threshold_raw(&self) -> u8 {
        Priority::new_unchecked(self.threshold.load(Ordering::Relaxed)).to_raw(C::PRIORITY_BITS)
    }
}

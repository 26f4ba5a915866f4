//! RAII guards and closure helpers for masked sections
//!
//! A guard enters its section when created and exits it when dropped, on
//! every path out of the scope including unwinding. Guards must be dropped
//! in reverse order of creation, which ordinary scoping does on its own.
//! The closure helpers mirror `critical_section::with`.

use core::marker::PhantomData;
use irqs_core::{Cpu, LineMask};

use crate::{FullMaskState, Interrupts, ThresholdState};

/// Guard for a full-mask section
///
/// Automatically exits the section when dropped.
#[must_use = "the section ends as soon as the guard is dropped"]
pub struct FullMaskGuard<'a, C: Cpu> {
    irqs: &'a Interrupts<C>,
    state: Option<FullMaskState>,
    _not_send: PhantomData<*const ()>,
}

impl<C: Cpu> FullMaskGuard<'_, C> {
    /// Whether interrupts were already masked when the guard was created
    pub fn was_masked(&self) -> bool {
        self.state.as_ref().is_some_and(FullMaskState::was_masked)
    }
}

impl<C: Cpu> Drop for FullMaskGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.irqs.exit_full_mask(state);
        }
    }
}

/// Guard for a threshold section
///
/// Automatically exits the section when dropped.
#[must_use = "the section ends as soon as the guard is dropped"]
pub struct ThresholdGuard<'a, C: Cpu> {
    irqs: &'a Interrupts<C>,
    state: Option<ThresholdState>,
    _not_send: PhantomData<*const ()>,
}

impl<C: Cpu> Drop for ThresholdGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.irqs.exit_threshold_mask(state);
        }
    }
}

/// Guard for a section with specific lines disabled
///
/// On drop, re-enables the lines of the requested mask that were enabled
/// when the guard was created. Lines that were already disabled stay
/// disabled.
#[must_use = "the lines are re-enabled as soon as the guard is dropped"]
pub struct LinesGuard<'a, C: Cpu> {
    irqs: &'a Interrupts<C>,
    restore: LineMask,
    _not_send: PhantomData<*const ()>,
}

impl<C: Cpu> LinesGuard<'_, C> {
    /// Lines that will be re-enabled when the guard is dropped
    pub fn restores(&self) -> &LineMask {
        &self.restore
    }
}

impl<C: Cpu> Drop for LinesGuard<'_, C> {
    fn drop(&mut self) {
        if !self.restore.is_empty() {
            self.irqs.enable_lines(&self.restore);
        }
    }
}

impl<C: Cpu> Interrupts<C> {
    /// Enter a full-mask section that ends when the guard is dropped
    pub fn full_mask(&self) -> FullMaskGuard<'_, C> {
        FullMaskGuard {
            irqs: self,
            state: Some(self.enter_full_mask()),
            _not_send: PhantomData,
        }
    }

    /// Enter a threshold section that ends when the guard is dropped
    pub fn threshold_mask(&self) -> ThresholdGuard<'_, C> {
        ThresholdGuard {
            irqs: self,
            state: Some(self.enter_threshold_mask()),
            _not_send: PhantomData,
        }
    }

    /// Disable the lines in `mask` until the guard is dropped
    pub fn lines_disabled(&self, mask: &LineMask) -> LinesGuard<'_, C> {
        let previous = self.disable_lines(mask);
        LinesGuard {
            irqs: self,
            restore: previous.and(mask),
            _not_send: PhantomData,
        }
    }

    /// Execute closure `f` inside a full-mask section
    #[inline]
    pub fn with_full_mask<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.full_mask();
        f()
    }

    /// Execute closure `f` inside a threshold section
    #[inline]
    pub fn with_threshold_mask<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.threshold_mask();
        f()
    }

    /// Execute closure `f` with the lines in `mask` disabled
    #[inline]
    pub fn with_lines_disabled<R>(&self, mask: &LineMask, f: impl FnOnce() -> R) -> R {
        let _guard = self.lines_disabled(mask);
        f()
    }
}

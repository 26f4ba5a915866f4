//! Priority-threshold sections (BASEPRI)
//!
//! A non-zero BASEPRI blocks exceptions whose priority is numerically equal
//! to or greater than it, while more urgent ones are still accepted. This
//! lets a section exclude lower-priority work without adding latency to a
//! watchdog or safety handler.
//!
//! BASEPRI exists on ARMv7-M and ARMv8-M mainline only. On other cores the
//! threshold section is entered the same way as a full-mask section, and
//! the threshold cannot be configured.

use core::sync::atomic::Ordering;
use irqs_core::{Cpu, IrqError, IrqResult, Priority};

use crate::controller::NO_THRESHOLD;
use crate::state::Saved;
use crate::{Interrupts, ThresholdState};

impl<C: Cpu> Interrupts<C> {
    /// Install a new priority threshold
    ///
    /// Accepts levels in `(HIGHEST, lowest]`. A threshold at the highest
    /// priority would block every configurable exception, which is what the
    /// full mask is for, so it is rejected. On failure the current threshold
    /// is left unchanged.
    pub fn try_set_threshold(&self, level: Priority) -> IrqResult<()> {
        if !C::HAS_THRESHOLD {
            warn!("threshold masking not available on this core");
            return Err(IrqError::NotSupported);
        }
        if level == Priority::HIGHEST || level > self.cpu.lowest_priority() {
            warn!("rejected threshold {}", level.level());
            return Err(IrqError::InvalidPriority);
        }
        self.threshold.store(level.level(), Ordering::Relaxed);
        debug!("threshold set to {}", level.level());
        Ok(())
    }

    /// Install a new priority threshold, returning whether it was accepted
    pub fn set_threshold(&self, level: Priority) -> bool {
        self.try_set_threshold(level).is_ok()
    }

    /// Currently configured threshold, `None` on cores without BASEPRI
    pub fn threshold(&self) -> Option<Priority> {
        match self.threshold.load(Ordering::Relaxed) {
            NO_THRESHOLD => None,
            level => Some(Priority::new_unchecked(level)),
        }
    }

    /// Mask every interrupt at or below the configured threshold
    ///
    /// Returns the previous BASEPRI value. BASEPRI is only ever raised: when
    /// the section is entered with a more restrictive level already active,
    /// that level stays in force. Without BASEPRI this is
    /// [`enter_full_mask`](Self::enter_full_mask).
    pub fn enter_threshold_mask(&self) -> ThresholdState {
        if !C::HAS_THRESHOLD {
            return ThresholdState::full_mask(self.enter_full_mask());
        }
        let previous = self.cpu.basepri();
        self.raise_basepri(previous, self.threshold_raw());
        ThresholdState::basepri(previous)
    }

    /// Leave a threshold section, restoring exactly the level in force at entry
    ///
    /// Nested sections of different levels therefore compose without a
    /// counter, provided they are exited in reverse order of entry.
    pub fn exit_threshold_mask(&self, state: ThresholdState) {
        match state.saved {
            // SAFETY: `previous` was the level in force when this section
            // was entered; enclosing sections expect exactly that level.
            Saved::Basepri(previous) => unsafe { self.cpu.set_basepri(previous) },
            Saved::FullMask(state) => self.exit_full_mask(state),
        }
    }

    /// Raise BASEPRI to the configured threshold without capturing the
    /// previous level; sets PRIMASK on cores without BASEPRI
    pub fn disable_by_threshold(&self) {
        if C::HAS_THRESHOLD {
            self.raise_basepri(self.cpu.basepri(), self.threshold_raw());
        } else {
            self.disable_all();
        }
    }

    /// Clear BASEPRI unconditionally; clears PRIMASK on cores without BASEPRI
    ///
    /// # Safety
    ///
    /// Must not be called inside a threshold or full-mask section, or inside
    /// a critical section that relies on either register.
    pub unsafe fn enable_by_threshold(&self) {
        if C::HAS_THRESHOLD {
            self.cpu.set_basepri(0);
        } else {
            self.enable_all();
        }
    }

    /// Whether BASEPRI currently masks anything
    pub fn is_threshold_mask_active(&self) -> bool {
        C::HAS_THRESHOLD && self.cpu.basepri() != 0
    }

    fn raise_basepri(&self, current: u8, target: u8) {
        if current == 0 || target < current {
            // SAFETY: the write only ever makes masking more restrictive.
            unsafe { self.cpu.set_basepri(target) };
        }
    }
}

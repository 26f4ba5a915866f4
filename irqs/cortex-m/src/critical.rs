//! `critical-section` implementation backed by the full mask
//!
//! Sound on single-core chips only.

use critical_section::RawRestoreState;
use irqs_mask::FullMaskState;

use crate::INTERRUPTS;

struct FullMaskCriticalSection;
critical_section::set_impl!(FullMaskCriticalSection);

unsafe impl critical_section::Impl for FullMaskCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        INTERRUPTS.enter_full_mask().into_raw()
    }

    unsafe fn release(was_masked: RawRestoreState) {
        INTERRUPTS.exit_full_mask(FullMaskState::from_raw(was_masked));
    }
}

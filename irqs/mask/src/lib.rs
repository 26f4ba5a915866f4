#![no_std]

//! # IRQS Mask
//!
//! Interrupt masking for a single-core Cortex-M. All operations hang off an
//! [`Interrupts`] controller that owns a [`Cpu`] implementation and the
//! configured priority threshold.
//!
//! Two nestable sections are offered:
//!
//! - **full mask** (PRIMASK): blocks every configurable-priority exception;
//!   NMI and HardFault still run.
//! - **threshold mask** (BASEPRI): blocks only interrupts whose priority is
//!   at or below the configured threshold, so urgent handlers keep
//!   preempting. Cores without BASEPRI fall back to the full mask.
//!
//! Each enter call returns a snapshot that the matching exit call consumes.
//! Sections nest as long as exits happen in reverse order of entry. The
//! guard types in [`guard`] and the `with_*` helpers pair enter and exit
//! automatically.
//!
//! ```rust,ignore
//! use irqs_mask::Interrupts;
//!
//! let irqs = Interrupts::new(cpu);
//! irqs.with_threshold_mask(|| {
//!     // lower-priority handlers cannot run here
//! });
//! ```

#[macro_use]
mod fmt;

pub mod controller;
pub mod full;
pub mod guard;
pub mod lines;
pub mod query;
pub mod retrigger;
pub mod state;
pub mod threshold;
pub mod vectors;

pub use controller::Interrupts;
pub use guard::{FullMaskGuard, LinesGuard, ThresholdGuard};
pub use irqs_core::*;
pub use state::{FullMaskState, ThresholdState};

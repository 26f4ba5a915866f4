#![no_std]

//! # IRQS Cortex-M
//!
//! Register backend for real Cortex-M hardware and the firmware-wide
//! interrupt controller.
//!
//! [`CortexM`] implements [`Cpu`] with the `cortex-m` crate. A single
//! [`INTERRUPTS`] instance is shared by the whole firmware, and the free
//! functions in this crate forward to it, so application code can write
//! `irqs_cortex_m::with_threshold_mask(|| ...)` without threading a handle
//! around.
//!
//! Core capabilities are picked at build time:
//!
//! - `armv6m`: no BASEPRI; threshold sections fall back to the full mask.
//!   Must be enabled when building for `thumbv6m-none-eabi` or
//!   `thumbv8m.base-none-eabi`: the `cortex-m` crate leaves out BASEPRI and
//!   the configurable fault handlers on those targets, and the build fails
//!   without it.
//! - `prio-bits-4`: the device implements four priority bits (default three)
//! - `critical-section-impl`: back `critical_section::with` by the full mask

pub use irqs_mask::*;

#[cfg(target_arch = "arm")]
mod cpu;
#[cfg(target_arch = "arm")]
mod global;

#[cfg(all(target_arch = "arm", feature = "critical-section-impl"))]
mod critical;

#[cfg(target_arch = "arm")]
pub use cpu::CortexM;
#[cfg(target_arch = "arm")]
pub use global::*;

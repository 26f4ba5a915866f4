//! # IRQS Host
//!
//! A simulated Cortex-M core for exercising the interrupt-control layer on a
//! development machine.
//!
//! Unlike the real target, where handlers are entered by hardware, the
//! simulator delivers interrupts itself: whenever a register write could make
//! a pending interrupt eligible (clearing PRIMASK, lowering BASEPRI, enabling
//! a line, pending a line, an ISB) it services every eligible interrupt in
//! priority order before the write returns. This matches what the hardware
//! guarantees at the next context synchronization point, which is all the
//! layer relies on.

pub mod sim;

pub use sim::{SimArmv6m, SimArmv7m, SimCpu};

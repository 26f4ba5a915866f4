#![no_std]

//! # IRQS Core
//!
//! Core types and traits for the interrupt-control layer of a single-core
//! Cortex-M system: interrupt line identifiers, line bitmasks, priority
//! levels, and the [`Cpu`] capability through which every register access
//! is made.

use core::fmt;

pub mod cpu;
pub mod irqn;
pub mod mask;
pub mod priority;

pub use cpu::*;
pub use irqn::*;
pub use mask::*;
pub use priority::*;

/// IRQS version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the interrupt-control layer
pub type IrqResult<T> = Result<T, IrqError>;

/// Error types for interrupt-control operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqError {
    /// The processor lacks the hardware for this operation (no BASEPRI)
    NotSupported,
    /// Priority level outside the range accepted by the operation
    InvalidPriority,
    /// Identifier is neither an exception nor an interrupt line
    InvalidIrqNumber,
}

impl fmt::Display for IrqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrqError::NotSupported => write!(f, "Threshold masking not supported"),
            IrqError::InvalidPriority => write!(f, "Invalid priority level"),
            IrqError::InvalidIrqNumber => write!(f, "Invalid interrupt number"),
        }
    }
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for IrqError {}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IrqError::NotSupported => defmt::write!(fmt, "NotSupported"),
            IrqError::InvalidPriority => defmt::write!(fmt, "InvalidPriority"),
            IrqError::InvalidIrqNumber => defmt::write!(fmt, "InvalidIrqNumber"),
        }
    }
}

//! Exception and interrupt line identifiers

use core::fmt;
use crate::{IrqError, IrqResult};

/// Number of maskable interrupt lines addressable by the NVIC
pub const MAX_INTERRUPTS: u16 = 240;

/// Number of exception slots that precede the first interrupt in the vector table
pub const EXCEPTION_SLOTS: usize = 16;

/// Total number of vector table slots (exceptions followed by interrupts)
pub const VECTOR_SLOTS: usize = EXCEPTION_SLOTS + MAX_INTERRUPTS as usize;

/// Identifier of an exception or interrupt line
///
/// Follows the CMSIS `IRQn_Type` numbering: system exceptions are negative
/// (`-16..=-1`), device interrupts are non-negative (`0..MAX_INTERRUPTS`).
/// Anything outside those two ranges is invalid; operations handed an
/// invalid identifier do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqNumber(i16);

impl IrqNumber {
    /// Non-maskable interrupt
    pub const NON_MASKABLE_INT: IrqNumber = IrqNumber(-14);
    /// Hard fault
    pub const HARD_FAULT: IrqNumber = IrqNumber(-13);
    /// Memory management fault (ARMv7-M)
    pub const MEMORY_MANAGEMENT: IrqNumber = IrqNumber(-12);
    /// Bus fault (ARMv7-M)
    pub const BUS_FAULT: IrqNumber = IrqNumber(-11);
    /// Usage fault (ARMv7-M)
    pub const USAGE_FAULT: IrqNumber = IrqNumber(-10);
    /// Supervisor call
    pub const SV_CALL: IrqNumber = IrqNumber(-5);
    /// Debug monitor (ARMv7-M)
    pub const DEBUG_MONITOR: IrqNumber = IrqNumber(-4);
    /// Pendable service request
    pub const PEND_SV: IrqNumber = IrqNumber(-2);
    /// System tick timer
    pub const SYS_TICK: IrqNumber = IrqNumber(-1);

    /// Create an identifier from a raw CMSIS number
    ///
    /// No validation happens here; out-of-range values are carried through
    /// and rejected (as no-ops) by the operations that receive them.
    pub const fn new(raw: i16) -> Self {
        IrqNumber(raw)
    }

    /// Create an identifier for interrupt line `line`
    pub fn line(line: u16) -> IrqResult<Self> {
        if line < MAX_INTERRUPTS {
            Ok(IrqNumber(line as i16))
        } else {
            Err(IrqError::InvalidIrqNumber)
        }
    }

    /// Identifier of the exception currently being serviced, given the
    /// ICSR.VECTACTIVE field. Returns `None` in thread mode.
    pub const fn from_vect_active(vect_active: u16) -> Option<Self> {
        if vect_active == 0 {
            None
        } else {
            Some(IrqNumber(vect_active as i16 - EXCEPTION_SLOTS as i16))
        }
    }

    /// Get the raw CMSIS number
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Whether this identifies a system exception
    pub const fn is_exception(self) -> bool {
        self.0 >= -(EXCEPTION_SLOTS as i16) && self.0 < 0
    }

    /// Whether this identifies a maskable interrupt line
    pub const fn is_interrupt(self) -> bool {
        self.0 >= 0 && self.0 < MAX_INTERRUPTS as i16
    }

    /// Whether this identifies either an exception or an interrupt line
    pub const fn is_valid(self) -> bool {
        self.is_exception() || self.is_interrupt()
    }

    /// Interrupt line index, or `None` for exceptions and invalid identifiers
    pub const fn line_index(self) -> Option<u16> {
        if self.is_interrupt() {
            Some(self.0 as u16)
        } else {
            None
        }
    }

    /// Vector table slot holding this identifier's handler
    pub const fn vector_slot(self) -> Option<usize> {
        if self.is_valid() {
            Some((self.0 + EXCEPTION_SLOTS as i16) as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for IrqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IRQn({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqNumber {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "IRQn({})", self.0);
    }
}

//! Exception priority levels

use core::fmt;
use crate::{IrqError, IrqResult};

/// Logical (unshifted) exception priority level
///
/// Smaller values are more urgent. The hardware keeps priorities in the
/// upper `bits` of an 8-bit field; [`to_raw`](Self::to_raw) and
/// [`from_raw`](Self::from_raw) convert between the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    /// Most urgent configurable priority
    pub const HIGHEST: Priority = Priority(0);

    /// Create a priority, checking it fits in `bits` implemented bits
    pub fn new(level: u8, bits: u8) -> IrqResult<Self> {
        if level <= Self::lowest(bits).0 {
            Ok(Priority(level))
        } else {
            Err(IrqError::InvalidPriority)
        }
    }

    /// Create priority without validation (const fn)
    pub const fn new_unchecked(level: u8) -> Self {
        Priority(level)
    }

    /// Least urgent priority representable with `bits` implemented bits
    pub const fn lowest(bits: u8) -> Self {
        Priority(((1u16 << bits) - 1) as u8)
    }

    /// Get the raw level
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Encode for a priority register (IPR, SHPR, BASEPRI)
    pub const fn to_raw(self, bits: u8) -> u8 {
        ((self.0 as u16) << (8 - bits as u16)) as u8
    }

    /// Decode a priority register value, discarding unimplemented low bits
    pub const fn from_raw(raw: u8, bits: u8) -> Self {
        Priority(((raw as u16) >> (8 - bits as u16)) as u8)
    }

    /// Whether an exception at this priority preempts one at `other`
    pub const fn preempts(self, other: Priority) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Priority {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Priority({})", self.0);
    }
}

/// Macro to create compile-time priority constants
#[macro_export]
macro_rules! priority {
    ($value:literal) => {
        $crate::Priority::new_unchecked($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_creation() {
        assert!(Priority::new(7, 3).is_ok());
        assert_eq!(Priority::new(8, 3), Err(IrqError::InvalidPriority));
        assert!(Priority::new(15, 4).is_ok());
        assert!(Priority::new(4, 2).is_err());
    }

    #[test]
    fn test_lowest() {
        assert_eq!(Priority::lowest(2).level(), 3);
        assert_eq!(Priority::lowest(3).level(), 7);
        assert_eq!(Priority::lowest(8).level(), 255);
    }

    #[test]
    fn test_raw_encoding() {
        assert_eq!(Priority::new_unchecked(3).to_raw(3), 0x60);
        assert_eq!(Priority::new_unchecked(3).to_raw(4), 0x30);
        assert_eq!(Priority::from_raw(0x60, 3), Priority::new_unchecked(3));
        assert_eq!(Priority::from_raw(0x7F, 3), Priority::new_unchecked(3));
        assert_eq!(Priority::new_unchecked(200).to_raw(8), 200);
    }

    #[test]
    fn test_preemption_order() {
        assert!(priority!(1).preempts(priority!(2)));
        assert!(!priority!(2).preempts(priority!(2)));
        assert!(!priority!(5).preempts(priority!(2)));
    }
}

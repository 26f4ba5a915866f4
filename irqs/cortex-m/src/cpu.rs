//! `Cpu` implementation on top of the `cortex-m` crate

use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::{NVIC, SCB};
use cortex_m::{asm, interrupt, register};
use irqs_mask::{Cpu, IrqNumber, Priority};

/// ICSR.VECTACTIVE field
const VECTACTIVE_MASK: u32 = 0x1FF;

/// The Cortex-M core this code runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct CortexM {
    _private: (),
}

impl CortexM {
    /// Register access for the executing core
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

/// Interrupt line number as understood by the NVIC helpers
#[derive(Clone, Copy)]
struct Line(u16);

// SAFETY: lines are built from `IrqNumber::line_index`, which only yields
// numbers below the NVIC's 240-line limit.
unsafe impl InterruptNumber for Line {
    fn number(self) -> u16 {
        self.0
    }
}

fn system_handler(irq: IrqNumber) -> Option<SystemHandler> {
    Some(match irq {
        #[cfg(not(feature = "armv6m"))]
        IrqNumber::MEMORY_MANAGEMENT => SystemHandler::MemoryManagement,
        #[cfg(not(feature = "armv6m"))]
        IrqNumber::BUS_FAULT => SystemHandler::BusFault,
        #[cfg(not(feature = "armv6m"))]
        IrqNumber::USAGE_FAULT => SystemHandler::UsageFault,
        IrqNumber::SV_CALL => SystemHandler::SVCall,
        #[cfg(not(feature = "armv6m"))]
        IrqNumber::DEBUG_MONITOR => SystemHandler::DebugMonitor,
        IrqNumber::PEND_SV => SystemHandler::PendSV,
        IrqNumber::SYS_TICK => SystemHandler::SysTick,
        _ => return None,
    })
}

impl Cpu for CortexM {
    const HAS_THRESHOLD: bool = !cfg!(feature = "armv6m");

    const PRIORITY_BITS: u8 = if cfg!(feature = "armv6m") {
        2
    } else if cfg!(feature = "prio-bits-4") {
        4
    } else {
        3
    };

    #[inline]
    fn primask_active(&self) -> bool {
        // `Inactive` means configurable-priority exceptions are masked
        register::primask::read().is_inactive()
    }

    #[inline]
    fn disable_irq(&self) {
        interrupt::disable();
    }

    #[inline]
    unsafe fn enable_irq(&self) {
        interrupt::enable();
    }

    #[cfg(not(feature = "armv6m"))]
    #[inline]
    fn basepri(&self) -> u8 {
        register::basepri::read()
    }

    #[cfg(not(feature = "armv6m"))]
    #[inline]
    unsafe fn set_basepri(&self, raw: u8) {
        register::basepri::write(raw);
    }

    #[inline]
    fn isb(&self) {
        asm::isb();
    }

    #[inline]
    fn dsb(&self) {
        asm::dsb();
    }

    fn enabled_word(&self, index: usize) -> u32 {
        // SAFETY: reading ISER has no side effects.
        unsafe { (*NVIC::PTR).iser[index].read() }
    }

    fn enable_word(&self, index: usize, bits: u32) {
        // SAFETY: ISER is write-1-to-set; zero bits are left untouched.
        unsafe { (*NVIC::PTR).iser[index].write(bits) }
    }

    fn disable_word(&self, index: usize, bits: u32) {
        // SAFETY: ICER is write-1-to-clear; zero bits are left untouched.
        unsafe { (*NVIC::PTR).icer[index].write(bits) }
    }

    fn pending_word(&self, index: usize) -> u32 {
        // SAFETY: reading ISPR has no side effects.
        unsafe { (*NVIC::PTR).ispr[index].read() }
    }

    fn priority(&self, irq: IrqNumber) -> Priority {
        let raw = if let Some(line) = irq.line_index() {
            NVIC::get_priority(Line(line))
        } else if let Some(handler) = system_handler(irq) {
            SCB::get_priority(handler)
        } else {
            return Priority::HIGHEST;
        };
        Priority::from_raw(raw, Self::PRIORITY_BITS)
    }

    fn vect_active(&self) -> u16 {
        // SAFETY: reading ICSR has no side effects.
        let icsr = unsafe { (*SCB::PTR).icsr.read() };
        (icsr & VECTACTIVE_MASK) as u16
    }

    fn vector_table(&self) -> *mut usize {
        // SAFETY: reading VTOR has no side effects. Cores without VTOR keep
        // the table at address zero, which is what the register reads as.
        unsafe { (*SCB::PTR).vtor.read() as usize as *mut usize }
    }
}

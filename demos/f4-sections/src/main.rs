//! Sections Example - threshold and full-mask sections on an STM32F4
//!
//! SysTick runs below the threshold and PendSV above it. The main loop
//! updates shared state inside a threshold section: PendSV keeps
//! preempting, ticks are held and then serviced on the spot by a
//! retrigger before the section ends.

#![no_std]
#![no_main]

use core::cell::Cell;
use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SCB;
use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use irqs_cortex_m::{CortexM, Cpu, IrqNumber, Priority};
use panic_halt as _; // Panic handler for embedded

const PRIO_BITS: u8 = <CortexM as Cpu>::PRIORITY_BITS;

static TICKS: AtomicU32 = AtomicU32::new(0);
static URGENT: AtomicU32 = AtomicU32::new(0);
static SAMPLES: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().unwrap();

    unsafe {
        cp.SCB.set_priority(
            SystemHandler::SysTick,
            Priority::new_unchecked(5).to_raw(PRIO_BITS),
        );
        cp.SCB.set_priority(
            SystemHandler::PendSV,
            Priority::new_unchecked(1).to_raw(PRIO_BITS),
        );
    }

    // Handlers at level 3 and below wait while a threshold section runs
    let threshold = Priority::new(3, PRIO_BITS).unwrap();
    assert!(irqs_cortex_m::set_threshold(threshold));
    assert!(irqs_cortex_m::handler(IrqNumber::SYS_TICK).is_some());

    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(16_000 - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_counter();
    cp.SYST.enable_interrupt();

    loop {
        irqs_cortex_m::with_threshold_mask(|| {
            let ticks = TICKS.load(Ordering::Relaxed);

            SCB::set_pendsv();
            cortex_m::asm::isb();
            assert!(!irqs_cortex_m::is_line_blocked(IrqNumber::PEND_SV));
            assert!(irqs_cortex_m::is_line_blocked(IrqNumber::SYS_TICK));

            cortex_m::asm::delay(64_000);
            // SAFETY: the section only holds back SysTick, whose handler
            // touches nothing but its own counter.
            unsafe { irqs_cortex_m::retrigger_pending_by_threshold() };
            assert!(TICKS.load(Ordering::Relaxed) >= ticks);
        });

        // `critical_section::with` is backed by the full mask
        critical_section::with(|cs| {
            let samples = SAMPLES.borrow(cs);
            samples.set(samples.get() + URGENT.load(Ordering::Relaxed));
        });

        cortex_m::asm::wfi();
    }
}

#[exception]
fn SysTick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
}

#[exception]
fn PendSV() {
    URGENT.fetch_add(1, Ordering::Relaxed);
}

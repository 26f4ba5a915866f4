//! Simulated core state and exception delivery

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use irqs_core::{
    Cpu, IrqNumber, LineMask, Priority, EXCEPTION_SLOTS, MASK_WORDS, MAX_INTERRUPTS, VECTOR_SLOTS,
};

/// Callback run when the simulator services an interrupt
pub type Hook<const BASEPRI: bool> = Rc<dyn Fn(&SimCpu<BASEPRI>)>;

/// Simulated ARMv7-M core (BASEPRI, 3 priority bits)
pub type SimArmv7m = SimCpu<true>;

/// Simulated ARMv6-M core (no BASEPRI, 2 priority bits)
pub type SimArmv6m = SimCpu<false>;

/// Simulated single-core Cortex-M
///
/// Models PRIMASK, BASEPRI (when `BASEPRI` is true), the NVIC enable,
/// pending and priority registers, the system handler priorities, the
/// active exception stack behind ICSR.VECTACTIVE, and a RAM vector table.
/// Interior mutability lets hooks call back into the core while it is
/// servicing, the way nested handlers would.
pub struct SimCpu<const BASEPRI: bool = true> {
    primask: Cell<bool>,
    basepri: Cell<u8>,
    enabled: Cell<LineMask>,
    pending: Cell<LineMask>,
    priorities: RefCell<Vec<Priority>>,
    system_priorities: RefCell<[Priority; EXCEPTION_SLOTS]>,
    active: RefCell<Vec<IrqNumber>>,
    serviced: RefCell<Vec<IrqNumber>>,
    hooks: RefCell<HashMap<IrqNumber, Hook<BASEPRI>>>,
    vectors: Box<[Cell<usize>]>,
    isb_count: Cell<usize>,
}

impl<const BASEPRI: bool> SimCpu<BASEPRI> {
    /// Create a core out of reset: interrupts unmasked, every line disabled,
    /// not pending and at priority 0, empty vector table
    pub fn new() -> Self {
        Self {
            primask: Cell::new(false),
            basepri: Cell::new(0),
            enabled: Cell::new(LineMask::EMPTY),
            pending: Cell::new(LineMask::EMPTY),
            priorities: RefCell::new(vec![Priority::HIGHEST; MAX_INTERRUPTS as usize]),
            system_priorities: RefCell::new([Priority::HIGHEST; EXCEPTION_SLOTS]),
            active: RefCell::new(Vec::new()),
            serviced: RefCell::new(Vec::new()),
            hooks: RefCell::new(HashMap::new()),
            vectors: (0..VECTOR_SLOTS).map(|_| Cell::new(0)).collect(),
            isb_count: Cell::new(0),
        }
    }

    /// Configure the priority of an interrupt or system exception
    ///
    /// # Panics
    ///
    /// Panics if `level` does not fit in the implemented priority bits or if
    /// `irq` has a fixed priority.
    pub fn set_priority(&self, irq: IrqNumber, level: u8) {
        let priority = Priority::new(level, Self::PRIORITY_BITS)
            .unwrap_or_else(|e| panic!("priority {} for {}: {}", level, irq, e));
        if let Some(line) = irq.line_index() {
            self.priorities.borrow_mut()[line as usize] = priority;
        } else {
            assert!(Self::has_configurable_priority(irq), "{} has a fixed priority", irq);
            self.system_priorities.borrow_mut()[exception_index(irq)] = priority;
        }
    }

    /// Latch `irq` as pending, servicing it at once if it is eligible
    pub fn pend(&self, irq: IrqNumber) {
        if irq.is_interrupt() {
            self.pending.set(self.pending.get().with_line(irq));
            self.service();
        }
    }

    /// Whether `irq` is latched and waiting for service
    pub fn is_pending(&self, irq: IrqNumber) -> bool {
        self.pending.get().contains(irq)
    }

    /// Register a callback run each time `irq` is serviced
    pub fn on_service(&self, irq: IrqNumber, hook: impl Fn(&Self) + 'static) {
        self.hooks.borrow_mut().insert(irq, Rc::new(hook));
    }

    /// Run `f` as if inside the handler for `irq`
    ///
    /// While `f` runs, VECTACTIVE reports `irq` and only more urgent
    /// interrupts can preempt. Anything that became eligible is serviced
    /// after the simulated exception return.
    pub fn run_in_handler<R>(&self, irq: IrqNumber, f: impl FnOnce() -> R) -> R {
        self.active.borrow_mut().push(irq);
        let result = f();
        self.active.borrow_mut().pop();
        self.service();
        result
    }

    /// Every interrupt serviced so far, in order
    pub fn serviced(&self) -> Vec<IrqNumber> {
        self.serviced.borrow().clone()
    }

    /// Forget the service history
    pub fn clear_serviced(&self) {
        self.serviced.borrow_mut().clear();
    }

    /// Number of ISBs executed so far
    pub fn isb_count(&self) -> usize {
        self.isb_count.get()
    }

    /// Raw BASEPRI value encoding `level`
    pub fn basepri_for(level: u8) -> u8 {
        Priority::new_unchecked(level).to_raw(Self::PRIORITY_BITS)
    }

    fn has_configurable_priority(irq: IrqNumber) -> bool {
        irq.is_exception() && irq > IrqNumber::HARD_FAULT
    }

    fn current_priority(&self) -> Option<Priority> {
        let active = *self.active.borrow().last()?;
        Some(self.priority(active))
    }

    fn next_eligible(&self) -> Option<IrqNumber> {
        if self.primask.get() {
            return None;
        }
        let mask_level = match self.basepri.get() {
            0 => None,
            raw => Some(Priority::from_raw(raw, Self::PRIORITY_BITS)),
        };
        let running = self.current_priority();
        self.enabled
            .get()
            .and(&self.pending.get())
            .iter()
            .filter(|irq| {
                let priority = self.priority(*irq);
                mask_level.map_or(true, |level| priority < level)
                    && running.map_or(true, |current| priority.preempts(current))
            })
            .min_by_key(|irq| (self.priority(*irq), *irq))
    }

    fn service(&self) {
        while let Some(irq) = self.next_eligible() {
            let mut pending = self.pending.get();
            pending.clear_line(irq);
            self.pending.set(pending);

            self.active.borrow_mut().push(irq);
            self.serviced.borrow_mut().push(irq);
            let hook = self.hooks.borrow().get(&irq).cloned();
            if let Some(hook) = hook {
                hook(self);
            }
            self.active.borrow_mut().pop();
        }
    }

    fn update_word(mask: &Cell<LineMask>, index: usize, op: impl Fn(u32) -> u32) {
        if index >= MASK_WORDS {
            return;
        }
        let mut words = *mask.get().words();
        words[index] = op(words[index]);
        mask.set(LineMask::from_words(words));
    }
}

impl<const BASEPRI: bool> Default for SimCpu<BASEPRI> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BASEPRI: bool> Cpu for SimCpu<BASEPRI> {
    const HAS_THRESHOLD: bool = BASEPRI;
    const PRIORITY_BITS: u8 = if BASEPRI { 3 } else { 2 };

    fn primask_active(&self) -> bool {
        self.primask.get()
    }

    fn disable_irq(&self) {
        self.primask.set(true);
    }

    unsafe fn enable_irq(&self) {
        self.primask.set(false);
        self.service();
    }

    fn basepri(&self) -> u8 {
        if BASEPRI {
            self.basepri.get()
        } else {
            0
        }
    }

    unsafe fn set_basepri(&self, raw: u8) {
        if BASEPRI {
            // Unimplemented low bits read as zero
            let bits = Self::PRIORITY_BITS;
            self.basepri.set(Priority::from_raw(raw, bits).to_raw(bits));
            self.service();
        }
    }

    fn isb(&self) {
        self.isb_count.set(self.isb_count.get() + 1);
        self.service();
    }

    fn dsb(&self) {}

    fn enabled_word(&self, index: usize) -> u32 {
        self.enabled.get().words().get(index).copied().unwrap_or(0)
    }

    fn enable_word(&self, index: usize, bits: u32) {
        Self::update_word(&self.enabled, index, |word| word | bits);
        self.service();
    }

    fn disable_word(&self, index: usize, bits: u32) {
        Self::update_word(&self.enabled, index, |word| word & !bits);
    }

    fn pending_word(&self, index: usize) -> u32 {
        self.pending.get().words().get(index).copied().unwrap_or(0)
    }

    fn priority(&self, irq: IrqNumber) -> Priority {
        if let Some(line) = irq.line_index() {
            self.priorities.borrow()[line as usize]
        } else if Self::has_configurable_priority(irq) {
            self.system_priorities.borrow()[exception_index(irq)]
        } else {
            Priority::HIGHEST
        }
    }

    fn vect_active(&self) -> u16 {
        self.active
            .borrow()
            .last()
            .and_then(|irq| irq.vector_slot())
            .map_or(0, |slot| slot as u16)
    }

    fn vector_table(&self) -> *mut usize {
        // `Cell<usize>` has the same in-memory representation as `usize`
        self.vectors.as_ptr() as *mut usize
    }
}

fn exception_index(irq: IrqNumber) -> usize {
    (irq.raw() + EXCEPTION_SLOTS as i16) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: i16) -> IrqNumber {
        IrqNumber::new(n)
    }

    #[test]
    fn test_pend_services_enabled_line() {
        let sim = SimArmv7m::new();
        sim.enable_word(0, 1 << 4);
        sim.pend(line(4));
        assert_eq!(sim.serviced(), vec![line(4)]);
        assert!(!sim.is_pending(line(4)));
    }

    #[test]
    fn test_disabled_line_stays_pending() {
        let sim = SimArmv7m::new();
        sim.pend(line(4));
        assert!(sim.serviced().is_empty());
        assert!(sim.is_pending(line(4)));

        sim.enable_word(0, 1 << 4);
        assert_eq!(sim.serviced(), vec![line(4)]);
    }

    #[test]
    fn test_primask_holds_delivery() {
        let sim = SimArmv7m::new();
        sim.enable_word(0, 1 << 2);
        sim.disable_irq();
        sim.pend(line(2));
        assert!(sim.serviced().is_empty());

        unsafe { sim.enable_irq() };
        assert_eq!(sim.serviced(), vec![line(2)]);
    }

    #[test]
    fn test_basepri_holds_lower_priorities() {
        let sim = SimArmv7m::new();
        sim.set_priority(line(1), 2);
        sim.set_priority(line(2), 5);
        sim.enable_word(0, 0b110);
        unsafe { sim.set_basepri(SimArmv7m::basepri_for(4)) };

        sim.pend(line(1));
        sim.pend(line(2));
        assert_eq!(sim.serviced(), vec![line(1)]);

        unsafe { sim.set_basepri(0) };
        assert_eq!(sim.serviced(), vec![line(1), line(2)]);
    }

    #[test]
    fn test_priority_order_and_nesting() {
        let sim = SimArmv7m::new();
        sim.set_priority(line(3), 6);
        sim.set_priority(line(9), 1);
        sim.enable_word(0, (1 << 3) | (1 << 9));
        sim.disable_irq();
        sim.pend(line(3));
        sim.pend(line(9));
        unsafe { sim.enable_irq() };
        assert_eq!(sim.serviced(), vec![line(9), line(3)]);
    }

    #[test]
    fn test_active_handler_blocks_equal_priority() {
        let sim = SimArmv7m::new();
        sim.set_priority(line(5), 3);
        sim.set_priority(line(6), 3);
        sim.enable_word(0, (1 << 5) | (1 << 6));
        sim.on_service(line(5), |sim| {
            sim.pend(line(6));
            assert!(sim.is_pending(line(6)));
        });
        sim.pend(line(5));
        assert_eq!(sim.serviced(), vec![line(5), line(6)]);
    }

    #[test]
    fn test_vect_active() {
        let sim = SimArmv7m::new();
        assert_eq!(sim.vect_active(), 0);
        sim.run_in_handler(IrqNumber::SYS_TICK, || {
            assert_eq!(sim.vect_active(), 15);
        });
        sim.run_in_handler(line(7), || {
            assert_eq!(sim.vect_active(), 23);
        });
    }

    #[test]
    fn test_armv6m_has_no_basepri() {
        let sim = SimArmv6m::new();
        unsafe { sim.set_basepri(0x40) };
        assert_eq!(sim.basepri(), 0);
        assert_eq!(SimArmv6m::PRIORITY_BITS, 2);
    }

    #[test]
    fn test_fixed_priorities() {
        let sim = SimArmv7m::new();
        sim.set_priority(IrqNumber::SYS_TICK, 7);
        assert_eq!(sim.priority(IrqNumber::SYS_TICK).level(), 7);
        assert_eq!(sim.priority(IrqNumber::NON_MASKABLE_INT), Priority::HIGHEST);
    }
}

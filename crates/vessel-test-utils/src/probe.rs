//! Instrumented element type with fault injection.

use std::cell::{Cell, RefCell};

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static DROPS: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
    static CLONE_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    static DEFAULT_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

/// An `i32` wrapper that records its construction and destruction.
///
/// Every constructor (`new`, `clone`, `default`) increments the live count;
/// `drop` decrements it and appends the value to the drop log. `clone` and
/// `default` panic when the matching fault has been armed and its budget of
/// successful calls is spent.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
pub struct Probe {
    value: i32,
}

impl Probe {
    pub fn new(value: i32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Self { value }
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        spend(&CLONE_BUDGET, "injected clone fault");
        Self::new(self.value)
    }
}

impl Default for Probe {
    fn default() -> Self {
        spend(&DEFAULT_BUDGET, "injected default fault");
        Self::new(0)
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
        DROPS.with(|drops| drops.borrow_mut().push(self.value));
    }
}

impl std::fmt::Debug for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Probe({})", self.value)
    }
}

fn spend(budget: &'static std::thread::LocalKey<Cell<Option<usize>>>, message: &str) {
    let exhausted = budget.with(|b| match b.get() {
        Some(0) => true,
        Some(n) => {
            b.set(Some(n - 1));
            false
        }
        None => false,
    });
    if exhausted {
        panic!("{message}");
    }
}

/// Probes alive on this thread.
pub fn live_probes() -> isize {
    LIVE.with(Cell::get)
}

/// Values of probes destroyed on this thread since the last reset, in
/// destruction order.
pub fn drop_log() -> Vec<i32> {
    DROPS.with(|drops| drops.borrow().clone())
}

/// Zero the live count, clear the drop log and disarm all faults.
pub fn reset_probes() {
    LIVE.with(|live| live.set(0));
    DROPS.with(|drops| drops.borrow_mut().clear());
    CLONE_BUDGET.with(|b| b.set(None));
    DEFAULT_BUDGET.with(|b| b.set(None));
}

/// Disarms its fault when dropped.
#[must_use = "the fault is disarmed as soon as the guard is dropped"]
pub struct FaultGuard {
    budget: &'static std::thread::LocalKey<Cell<Option<usize>>>,
}

impl Drop for FaultGuard {
    fn drop(&mut self) {
        self.budget.with(|b| b.set(None));
    }
}

/// Allow `successes` more clones on this thread, then panic on the next.
pub fn fail_clone_after(successes: usize) -> FaultGuard {
    CLONE_BUDGET.with(|b| b.set(Some(successes)));
    FaultGuard {
        budget: &CLONE_BUDGET,
    }
}

/// Allow `successes` more default constructions on this thread, then
/// panic on the next.
pub fn fail_default_after(successes: usize) -> FaultGuard {
    DEFAULT_BUDGET.with(|b| b.set(Some(successes)));
    FaultGuard {
        budget: &DEFAULT_BUDGET,
    }
}

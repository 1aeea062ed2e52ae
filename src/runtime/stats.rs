use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-wide counters for cell lifetimes and dispatch outcomes.
///
/// Counters only ever grow; compare two snapshots to measure a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    pub cells_created: usize,
    pub cells_cloned: usize,
    pub cells_released: usize,
    pub dispatch_hits: usize,
    pub dispatch_misses: usize,
}

static CELLS_CREATED: AtomicUsize = AtomicUsize::new(0);
static CELLS_CLONED: AtomicUsize = AtomicUsize::new(0);
static CELLS_RELEASED: AtomicUsize = AtomicUsize::new(0);
static DISPATCH_HITS: AtomicUsize = AtomicUsize::new(0);
static DISPATCH_MISSES: AtomicUsize = AtomicUsize::new(0);

pub fn record_cell_created() {
    CELLS_CREATED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cell_cloned() {
    CELLS_CLONED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cell_released() {
    CELLS_RELEASED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_dispatch_hit() {
    DISPATCH_HITS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_dispatch_miss() {
    DISPATCH_MISSES.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> RuntimeStats {
    RuntimeStats {
        cells_created: CELLS_CREATED.load(Ordering::Relaxed),
        cells_cloned: CELLS_CLONED.load(Ordering::Relaxed),
        cells_released: CELLS_RELEASED.load(Ordering::Relaxed),
        dispatch_hits: DISPATCH_HITS.load(Ordering::Relaxed),
        dispatch_misses: DISPATCH_MISSES.load(Ordering::Relaxed),
    }
}

impl RuntimeStats {
    /// Cells created or cloned that have not been released yet.
    pub fn live_cells(&self) -> usize {
        (self.cells_created + self.cells_cloned).saturating_sub(self.cells_released)
    }
}

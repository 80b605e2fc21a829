// COMPUTE LOG.
// RECORDS ONE SNAPSHOT PER Bands::compute() INVOCATION, FOR OFFLINE
// DIAGNOSTICS. PRE-ALLOCATED RING BUFFER, NO HEAP ALLOCATION DURING
// MONITORING. WRAPS AROUND AT CAPACITY -- OLDEST ENTRIES OVERWRITTEN.

use std::time::Instant;

const MAX_SNAPSHOTS: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct ComputeSnapshot {
    pub elapsed_ns: u64,
    pub levels_reached: usize,
    pub ranges_len: usize,
    pub recovery_time: f64,
    pub recovery_triggered: bool,
}

pub struct ComputeLog {
    start: Instant,
    snapshots: Vec<ComputeSnapshot>,
    head: usize,
    len: usize,
}

impl ComputeLog {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            snapshots: vec![
                ComputeSnapshot {
                    elapsed_ns: 0,
                    levels_reached: 0,
                    ranges_len: 0,
                    recovery_time: f64::NAN,
                    recovery_triggered: false,
                };
                MAX_SNAPSHOTS
            ],
            head: 0,
            len: 0,
        }
    }

    // RECORD ONE SNAPSHOT. CALLED ONCE PER `compute()`.
    // OVERWRITES OLDEST ENTRY WHEN FULL.
    pub fn snapshot(&mut self, levels_reached: usize, ranges_len: usize, recovery_time: f64, recovery_triggered: bool) {
        self.snapshots[self.head] = ComputeSnapshot {
            elapsed_ns: self.start.elapsed().as_nanos() as u64,
            levels_reached,
            ranges_len,
            recovery_time,
            recovery_triggered,
        };
        self.head = (self.head + 1) % MAX_SNAPSHOTS;
        if self.len < MAX_SNAPSHOTS {
            self.len += 1;
        }
    }

    // ITERATE SNAPSHOTS IN CHRONOLOGICAL ORDER
    pub fn iter_chronological(&self) -> impl Iterator<Item = &ComputeSnapshot> {
        let start = if self.len < MAX_SNAPSHOTS { 0 } else { self.head };
        (0..self.len).map(move |i| &self.snapshots[(start + i) % MAX_SNAPSHOTS])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // DUMP THE TIME SERIES AFTER EXECUTION
    pub fn dump(&self) {
        if self.len == 0 {
            return;
        }

        println!(
            "\n{:<14} {:<8} {:<6} {:<14} {:<10}",
            "ELAPSED_NS", "LEVELS", "BANDS", "RECOVERY_TIME", "TRIGGERED"
        );
        println!("{}", "-".repeat(56));

        for s in self.iter_chronological() {
            println!(
                "{:<14} {:<8} {:<6} {:<14.3} {:<10}",
                s.elapsed_ns, s.levels_reached, s.ranges_len, s.recovery_time, s.recovery_triggered
            );
        }

        if self.len == MAX_SNAPSHOTS {
            println!("\n(RING BUFFER WRAPPED -- SHOWING MOST RECENT {} SNAPSHOTS)", MAX_SNAPSHOTS);
        }
        println!("TOTAL COMPUTES: {}", self.len);
    }
}

impl Default for ComputeLog {
    fn default() -> Self {
        Self::new()
    }
}

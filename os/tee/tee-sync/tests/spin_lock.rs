use std::sync::Arc;
use std::thread;
use tee_sync::{IrqGuard, SpinLock};

/// Stand-in for a table of MMU entries: every update writes a whole run of
/// consecutive slots, so a reader never sees a mix of two writers.
struct Table {
    slots: [u32; 16],
}

impl Table {
    fn fill(&mut self, value: u32) {
        for slot in &mut self.slots {
            *slot = value;
        }
    }

    fn is_uniform(&self) -> bool {
        self.slots.iter().all(|s| *s == self.slots[0])
    }
}

#[test]
fn guard_release_unlocks() {
    let table = SpinLock::new(Table { slots: [0; 16] });
    table.lock().fill(3);
    assert!(!table.is_locked());
    assert_eq!(table.lock().slots[15], 3);
}

#[test]
fn try_lock_refuses_while_held() {
    let table = SpinLock::new(Table { slots: [0; 16] });
    let held = table.lock();
    assert!(table.is_locked());
    assert!(table.try_lock().is_none());
    drop(held);
    assert!(table.try_lock().is_some());
}

#[test]
fn lock_irq_masks_interrupts_until_released() {
    let table = SpinLock::new(Table { slots: [0; 16] });
    {
        let mut guard = table.lock_irq();
        guard.fill(9);
        let irq = IrqGuard::new();
        assert!(!irq.were_enabled());
    }
    let irq = IrqGuard::new();
    assert!(irq.were_enabled());
    drop(irq);
    assert!(table.lock().is_uniform());
}

#[test]
fn concurrent_writers_never_tear_the_table() {
    let table = Arc::new(SpinLock::new(Table { slots: [0; 16] }));

    let writers: Vec<_> = (1..=4u32)
        .map(|id| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let mut guard = table.lock();
                    assert!(guard.is_uniform(), "torn table observed");
                    guard.fill(id);
                }
            })
        })
        .collect();

    for w in writers {
        w.join().unwrap();
    }

    let table = table.lock();
    assert!(table.is_uniform());
    assert!((1..=4).contains(&table.slots[0]));
}

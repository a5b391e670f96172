//! Per-path serialization of cache population.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use remotefs_core::Path;

/// Table of per-path locks.
///
/// While one caller fetches a path, other callers for the same path wait and
/// then find the freshly written cache entry. Entries are removed when the
/// last interested caller leaves.
#[derive(Debug, Default)]
pub(crate) struct SingleFlight {
    slots: Mutex<HashMap<Path, Arc<Mutex<()>>>>,
}

impl SingleFlight {
    /// Run `f` while holding the lock for `path`.
    pub(crate) fn run<T>(&self, path: &Path, f: impl FnOnce() -> T) -> T {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.entry(path.clone()).or_default().clone()
        };

        let result = {
            let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the table, one here: nobody else is waiting.
        if Arc::strong_count(&slot) == 2 {
            slots.remove(path);
        }

        result
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn runs_closure_and_cleans_up() {
        let flights = SingleFlight::default();
        let p = Path::parse("a.txt").unwrap();
        assert_eq!(flights.run(&p, || 42), 42);
        assert_eq!(flights.len(), 0);
    }

    #[test]
    fn same_path_is_serialized() {
        let flights = SingleFlight::default();
        let p = Path::parse("a.txt").unwrap();
        let active = AtomicUsize::new(0);
        let max_active = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    flights.run(&p, || {
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        max_active.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        active.fetch_sub(1, Ordering::SeqCst);
                    })
                });
            }
        });

        assert_eq!(max_active.load(Ordering::SeqCst), 1);
        assert_eq!(flights.len(), 0);
    }

    #[test]
    fn different_paths_do_not_block_each_other() {
        let flights = SingleFlight::default();
        let a = Path::parse("a").unwrap();
        let b = Path::parse("b").unwrap();

        let nested = flights.run(&a, || flights.run(&b, || "inner"));
        assert_eq!(nested, "inner");
        assert_eq!(flights.len(), 0);
    }
}

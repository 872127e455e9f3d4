use super::utility_list::UtilityList;
use crate::error::{PhmError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Accounts for live utility-list storage and remembers the peak. Shared by
/// all branches of a parallel search.
#[derive(Debug)]
pub struct MemoryTracker {
    max_bytes: usize,
    current_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
}

impl MemoryTracker {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            max_bytes: limit.unwrap_or(usize::MAX),
            current_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Accounts for `bytes` until the returned guard is dropped.
    pub fn reserve(&self, bytes: usize) -> Result<MemoryGuard<'_>> {
        self.allocate(bytes)?;
        Ok(MemoryGuard {
            tracker: self,
            bytes,
        })
    }

    fn allocate(&self, bytes: usize) -> Result<()> {
        let current = self.current_bytes.fetch_add(bytes, Ordering::SeqCst);
        let total = current.saturating_add(bytes);
        if total > self.max_bytes {
            self.current_bytes.fetch_sub(bytes, Ordering::SeqCst);
            return Err(PhmError::MemoryExceeded {
                requested: bytes,
                available: self.max_bytes.saturating_sub(current),
            });
        }
        self.peak_bytes.fetch_max(total, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self, bytes: usize) {
        self.current_bytes.fetch_sub(bytes, Ordering::SeqCst);
    }

    pub fn current_usage(&self) -> usize {
        self.current_bytes.load(Ordering::SeqCst)
    }

    pub fn peak_usage(&self) -> usize {
        self.peak_bytes.load(Ordering::SeqCst)
    }

    pub fn available(&self) -> usize {
        self.max_bytes.saturating_sub(self.current_usage())
    }
}

pub struct MemoryGuard<'a> {
    tracker: &'a MemoryTracker,
    bytes: usize,
}

impl MemoryGuard<'_> {
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Drop for MemoryGuard<'_> {
    fn drop(&mut self) {
        self.tracker.release(self.bytes);
    }
}

pub fn estimate_utility_list_size(lists: &[UtilityList]) -> usize {
    lists.iter().map(UtilityList::heap_size).sum()
}

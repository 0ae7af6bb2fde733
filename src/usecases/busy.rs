//! Re-entrancy guard for submit/save batches triggered by duplicate UI events.

use crate::domain::DomainError;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct BusyFlag {
    busy: AtomicBool,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the flag. Fails with `DomainError::Busy` if already held.
    /// Released when the returned guard drops, including on early return.
    pub fn acquire(&self) -> Result<BusyGuard<'_>, DomainError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DomainError::Busy)?;
        Ok(BusyGuard { flag: self })
    }
}

pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::Release);
    }
}

//! Per-booking in-flight guard.
//!
//! At most one operation per booking id runs inside a process at a time. A
//! second caller does not wait: it gets `None` and the service reports a
//! conflict. Cross-process races are caught by the repository's version check.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use skillmart_types::ids::BookingId;

#[derive(Debug, Default)]
pub struct InFlightGuard {
    active: DashMap<BookingId, ()>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`. The claim is released when the returned ticket drops.
    pub fn try_acquire(&self, id: &BookingId) -> Option<InFlightTicket<'_>> {
        match self.active.entry(id.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlightTicket {
                    guard: self,
                    id: id.clone(),
                })
            }
        }
    }

    pub fn is_active(&self, id: &BookingId) -> bool {
        self.active.contains_key(id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// Proof of an exclusive claim on one booking id.
#[derive(Debug)]
pub struct InFlightTicket<'a> {
    guard: &'a InFlightGuard,
    id: BookingId,
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.guard.active.remove(&self.id);
    }
}

// src/application/commands/articles/in_flight.rs
use crate::domain::user::UserId;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

/// Callers with a publication currently running.
#[derive(Debug, Default, Clone)]
pub struct InFlightPublications {
    callers: Arc<Mutex<HashSet<UserId>>>,
}

impl InFlightPublications {
    /// Claim the slot for `caller`. `None` when a run is already pending.
    pub fn try_begin(&self, caller: UserId) -> Option<InFlightGuard> {
        let mut callers = self.callers.lock().unwrap_or_else(PoisonError::into_inner);
        if !callers.insert(caller) {
            return None;
        }
        Some(InFlightGuard {
            callers: Arc::clone(&self.callers),
            caller,
        })
    }

    pub fn contains(&self, caller: UserId) -> bool {
        self.callers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&caller)
    }
}

/// Releases the caller's slot on drop, whatever the run's outcome.
#[derive(Debug)]
pub struct InFlightGuard {
    callers: Arc<Mutex<HashSet<UserId>>>,
    caller: UserId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.callers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.caller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_until_guard_drops() {
        let in_flight = InFlightPublications::default();
        let caller = UserId::new(1).unwrap();

        let guard = in_flight.try_begin(caller).expect("first claim");
        assert!(in_flight.try_begin(caller).is_none());
        assert!(in_flight.contains(caller));

        drop(guard);
        assert!(!in_flight.contains(caller));
        assert!(in_flight.try_begin(caller).is_some());
    }

    #[test]
    fn callers_do_not_block_each_other() {
        let in_flight = InFlightPublications::default();
        let _a = in_flight.try_begin(UserId::new(1).unwrap()).unwrap();
        assert!(in_flight.try_begin(UserId::new(2).unwrap()).is_some());
    }
}

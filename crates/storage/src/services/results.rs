use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::allocation::AllocationOutcome;

/// Complete, immutable output of one allocation run.
#[derive(Debug, Clone, Default)]
pub struct ResultSnapshot {
    /// `None` only for the empty snapshot held before any run completes
    pub run_id: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<AllocationOutcome>,
}

impl ResultSnapshot {
    pub fn new(outcomes: Vec<AllocationOutcome>) -> Self {
        Self {
            run_id: Some(Uuid::new_v4()),
            completed_at: Some(Utc::now()),
            outcomes,
        }
    }

    pub fn outcomes(&self) -> &[AllocationOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Single slot holding the latest published snapshot.
///
/// Publishing swaps the `Arc` under a write lock held only for the swap;
/// readers clone the `Arc` and keep the snapshot they got even if a newer one
/// is published afterwards. Concurrent publishers race and the last one wins.
#[derive(Debug, Default)]
pub struct ResultCache {
    slot: RwLock<Arc<ResultSnapshot>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: ResultSnapshot) -> Arc<ResultSnapshot> {
        let snapshot = Arc::new(snapshot);
        let previous = {
            let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *slot, Arc::clone(&snapshot))
        };
        // free the old snapshot outside the lock
        drop(previous);
        snapshot
    }

    pub fn read(&self) -> Arc<ResultSnapshot> {
        Arc::clone(&self.slot.read().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::allocation::AllocationStatus;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::thread;

    fn outcome(application_id: i64, marker: i64) -> AllocationOutcome {
        AllocationOutcome {
            application_id,
            candidate_id: marker,
            candidate_first_name: String::new(),
            candidate_last_name: String::new(),
            grade: Decimal::new(800, 2),
            submitted_at: Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
            priority: None,
            status: AllocationStatus::Rejected,
            program_id: None,
            program_name: None,
            faculty_name: None,
        }
    }

    fn snapshot(len: i64, marker: i64) -> ResultSnapshot {
        ResultSnapshot::new((0..len).map(|id| outcome(id, marker)).collect())
    }

    #[test]
    fn test_cache_starts_empty() {
        let cache = ResultCache::new();
        let snapshot = cache.read();

        assert!(snapshot.is_empty());
        assert!(snapshot.run_id.is_none());
    }

    #[test]
    fn test_publish_replaces_wholesale() {
        let cache = ResultCache::new();
        cache.publish(snapshot(3, 1));
        let held = cache.read();

        cache.publish(snapshot(0, 2));

        assert!(cache.read().is_empty());
        assert_eq!(held.len(), 3, "earlier readers keep their snapshot");
    }

    #[test]
    fn test_last_publish_wins() {
        let cache = ResultCache::new();
        let first = cache.publish(snapshot(1, 1));
        let second = cache.publish(snapshot(2, 2));

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(cache.read().run_id, second.run_id);
    }

    #[test]
    fn test_concurrent_readers_never_see_partial_snapshots() {
        let cache = Arc::new(ResultCache::new());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for _ in 0..2_000 {
                        let snapshot = cache.read();
                        let len = snapshot.len();
                        assert!(len == 0 || len == 50 || len == 80, "unexpected length {len}");

                        if let Some(first) = snapshot.outcomes().first() {
                            let marker = first.candidate_id;
                            assert!(snapshot.outcomes().iter().all(|o| o.candidate_id == marker));
                        }
                    }
                })
            })
            .collect();

        for round in 0..200 {
            let (len, marker) = if round % 2 == 0 { (50, 1) } else { (80, 2) };
            cache.publish(snapshot(len, marker));
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}

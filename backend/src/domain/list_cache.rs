//! Short-lived snapshot of the course listing.
//!
//! The cache holds at most one snapshot stamped with the instant it was
//! filled. Reads inside the freshness window return the snapshot; any write
//! through the catalogue service clears it.
//!
//! Every invalidation bumps a generation counter. A miss hands out a
//! [`FillToken`] carrying the generation seen before the repository read, and
//! [`CourseListCache::put`] drops the listing if a write invalidated the cache
//! in between. A slow read therefore never replaces a completed write.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use super::Course;

#[derive(Debug)]
struct Snapshot {
    courses: Vec<Course>,
    filled_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    snapshot: Option<Snapshot>,
}

/// Permission to fill the cache, valid until the next invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FillToken {
    generation: u64,
    requested_at: DateTime<Utc>,
}

/// Outcome of a cache read.
#[derive(Debug)]
pub enum CacheLookup {
    Hit(Vec<Course>),
    Miss(FillToken),
}

/// Freshness-window cache for the course list.
#[derive(Debug)]
pub struct CourseListCache {
    ttl: TimeDelta,
    slot: Mutex<Slot>,
}

impl CourseListCache {
    /// Create a cache with the given freshness window. A zero window disables
    /// caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            slot: Mutex::new(Slot::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A poisoned slot only holds a stale snapshot; recover the guard.
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Return the snapshot if it was filled less than `ttl` before `now`,
    /// otherwise a token for refilling it.
    pub fn get(&self, now: DateTime<Utc>) -> CacheLookup {
        let slot = self.lock();
        let fresh = slot.snapshot.as_ref().filter(|snapshot| {
            let age = now.signed_duration_since(snapshot.filled_at);
            age >= TimeDelta::zero() && age < self.ttl
        });
        match fresh {
            Some(snapshot) => CacheLookup::Hit(snapshot.courses.clone()),
            None => CacheLookup::Miss(FillToken {
                generation: slot.generation,
                requested_at: now,
            }),
        }
    }

    /// Store a listing read after `token` was issued.
    ///
    /// Returns `false` when the listing was discarded, either because caching
    /// is disabled or because a write invalidated the cache since the token
    /// was handed out.
    pub fn put(&self, token: FillToken, courses: Vec<Course>) -> bool {
        if self.ttl <= TimeDelta::zero() {
            return false;
        }
        let mut slot = self.lock();
        if slot.generation != token.generation {
            return false;
        }
        slot.snapshot = Some(Snapshot {
            courses,
            filled_at: token.requested_at,
        });
        true
    }

    /// Drop the snapshot and revoke outstanding fill tokens.
    pub fn invalidate(&self) {
        let mut slot = self.lock();
        slot.generation = slot.generation.wrapping_add(1);
        slot.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use crate::domain::{CourseDraft, CourseId};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn fill(cache: &CourseListCache, courses: Vec<Course>, now: DateTime<Utc>) {
        match cache.get(now) {
            CacheLookup::Miss(token) => assert!(cache.put(token, courses)),
            CacheLookup::Hit(_) => panic!("expected an empty cache"),
        }
    }

    fn sample(now: DateTime<Utc>) -> Vec<Course> {
        let course = CourseDraft::try_new("Net101", "Networking basics")
            .expect("valid draft")
            .into_course(CourseId::random(), now);
        vec![course]
    }

    #[rstest]
    #[case(0, true)]
    #[case(9, true)]
    #[case(10, false)]
    #[case(-1, false)]
    fn serves_snapshot_inside_window(
        now: DateTime<Utc>,
        #[case] offset_secs: i64,
        #[case] hit: bool,
    ) {
        let cache = CourseListCache::new(Duration::from_secs(10));
        fill(&cache, sample(now), now);
        let read_at = now + TimeDelta::seconds(offset_secs);
        assert_eq!(matches!(cache.get(read_at), CacheLookup::Hit(_)), hit);
    }

    #[rstest]
    fn invalidate_clears_snapshot(now: DateTime<Utc>) {
        let cache = CourseListCache::new(Duration::from_secs(10));
        fill(&cache, sample(now), now);
        cache.invalidate();
        assert!(matches!(cache.get(now), CacheLookup::Miss(_)));
    }

    #[rstest]
    fn fill_started_before_invalidation_is_discarded(now: DateTime<Utc>) {
        let cache = CourseListCache::new(Duration::from_secs(10));
        let CacheLookup::Miss(stale_token) = cache.get(now) else {
            panic!("expected an empty cache");
        };
        cache.invalidate();

        assert!(!cache.put(stale_token, sample(now)));
        assert!(matches!(cache.get(now), CacheLookup::Miss(_)));
    }

    #[rstest]
    fn zero_window_never_stores(now: DateTime<Utc>) {
        let cache = CourseListCache::new(Duration::ZERO);
        let CacheLookup::Miss(token) = cache.get(now) else {
            panic!("expected an empty cache");
        };
        assert!(!cache.put(token, sample(now)));
        assert!(matches!(cache.get(now), CacheLookup::Miss(_)));
    }
}

//! In-memory registry of the QR token currently shown for each course.
//!
//! A course is present in the registry from the moment a teacher starts its QR
//! until the QR is stopped. The rotation task walks the registry and replaces
//! every entry's token; handlers read it to show the current code.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The QR currently displayed for one course.
#[derive(Debug, Clone, PartialEq)]
pub struct QrEntry {
    pub course_id: i64,
    pub token: String,
    /// When the QR was first started for this class. Fixed across rotations.
    pub started_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// User who started the QR.
    pub started_by: i64,
}

#[derive(Clone, Default)]
pub struct QrRegistry {
    inner: Arc<RwLock<HashMap<i64, QrEntry>>>,
}

impl QrRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entry for `course_id`, if its QR is running.
    pub async fn get(&self, course_id: i64) -> Option<QrEntry> {
        self.inner.read().await.get(&course_id).cloned()
    }

    /// Inserts or replaces the entry for `entry.course_id`.
    pub async fn put(&self, entry: QrEntry) {
        self.inner.write().await.insert(entry.course_id, entry);
    }

    /// Stops the QR for `course_id`, returning the last entry.
    pub async fn remove(&self, course_id: i64) -> Option<QrEntry> {
        self.inner.write().await.remove(&course_id)
    }

    /// Snapshot of all running entries, ordered by course id.
    pub async fn entries(&self) -> Vec<QrEntry> {
        let mut all: Vec<QrEntry> = self.inner.read().await.values().cloned().collect();
        all.sort_by_key(|e| e.course_id);
        all
    }

    /// Replaces the entry of `course_id` with `reissue(current)` while holding
    /// the write lock. Does nothing and returns `Ok(None)` when the course was
    /// stopped in the meantime.
    pub async fn refresh_if_running<F, E>(
        &self,
        course_id: i64,
        reissue: F,
    ) -> Result<Option<QrEntry>, E>
    where
        F: FnOnce(&QrEntry) -> Result<QrEntry, E>,
    {
        let mut map = self.inner.write().await;
        let Some(current) = map.get(&course_id) else {
            return Ok(None);
        };
        let next = reissue(current)?;
        map.insert(course_id, next.clone());
        Ok(Some(next))
    }

    pub async fn is_running(&self, course_id: i64) -> bool {
        self.inner.read().await.contains_key(&course_id)
    }
}

//! In-memory submission cache shared by the dashboard routes.
//!
//! The console works off one flat, normalized list: every view filters and
//! aggregates this snapshot instead of issuing per-page queries. The store
//! refreshes wholesale when the change bus marks it dirty, and reconciliation
//! is last-writer-wins by `updated_at` so a stale re-fetch can never revert a
//! record that was just approved locally.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;

use crate::domain::submission::Submission;
use crate::domain::types::{FormType, SubmissionId, SubmissionStatus};
use crate::repository::SubmissionReader;

use super::{ServiceError, ServiceResult};

/// Shared cache of all normalized submissions.
pub struct SubmissionStore {
    submissions: RwLock<Vec<Submission>>,
    dirty: AtomicBool,
}

impl Default for SubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionStore {
    /// An empty store; the first access always fetches.
    pub fn new() -> Self {
        Self {
            submissions: RwLock::new(Vec::new()),
            dirty: AtomicBool::new(true),
        }
    }

    /// Flag the cache stale; the next read re-fetches everything.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Re-read all four tables and replace the snapshot.
    ///
    /// A repository failure aborts the whole refresh: the previous snapshot
    /// stays in place, the dirty flag stays set, and the caller surfaces a
    /// page-level error with a manual retry link.
    pub fn fetch_all<R>(&self, repo: &R) -> ServiceResult<()>
    where
        R: SubmissionReader,
    {
        let fetched = match repo.list_submissions(None) {
            Ok(fetched) => fetched,
            Err(e) => {
                log::error!("Failed to fetch submissions: {e}");
                return Err(ServiceError::Internal);
            }
        };

        let mut guard = self.write_guard();
        let mut merged = reconcile(&guard, fetched);
        sort_newest_first(&mut merged);
        *guard = merged;
        drop(guard);

        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Current snapshot, refreshing first if the cache is stale.
    pub fn snapshot<R>(&self, repo: &R) -> ServiceResult<Vec<Submission>>
    where
        R: SubmissionReader,
    {
        if self.is_dirty() {
            self.fetch_all(repo)?;
        }
        Ok(self.read_guard().clone())
    }

    /// Apply a successful approval to the cached record without re-fetching.
    pub fn patch_approved(
        &self,
        form_type: FormType,
        id: SubmissionId,
        updated_at: NaiveDateTime,
    ) {
        let mut guard = self.write_guard();
        for submission in guard
            .iter_mut()
            .filter(|s| s.form_type() == form_type && s.id == id)
        {
            submission.status = SubmissionStatus::Approved;
            submission.updated_at = Some(updated_at);
        }
        sort_newest_first(&mut guard);
    }

    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, Vec<Submission>> {
        self.submissions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Submission>> {
        self.submissions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Merge a fresh fetch with the local snapshot, keeping whichever copy of a
/// record carries the newer `updated_at`.
fn reconcile(local: &[Submission], mut fetched: Vec<Submission>) -> Vec<Submission> {
    let local_by_key: HashMap<(FormType, SubmissionId), &Submission> = local
        .iter()
        .map(|s| ((s.form_type(), s.id), s))
        .collect();

    for row in fetched.iter_mut() {
        if let Some(existing) = local_by_key.get(&(row.form_type(), row.id))
            && existing.updated_at > row.updated_at
        {
            *row = (*existing).clone();
        }
    }
    fetched
}

/// Sort descending by last-updated-or-created; missing timestamps sort oldest.
fn sort_newest_first(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::{FormDetails, PassportDetails};
    use crate::repository::test::TestRepository;
    use crate::repository::{RepositoryError, RepositoryResult};
    use chrono::NaiveDate;

    fn passport(id: i32, day: u32, status: SubmissionStatus) -> Submission {
        Submission {
            id: SubmissionId::new(id).unwrap(),
            status,
            created_at: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(12, 0, 0),
            updated_at: None,
            details: FormDetails::Passport(PassportDetails {
                first_name: "Ama".to_string(),
                surname: "Mensah".to_string(),
                ..Default::default()
            }),
        }
    }

    struct FailingReader;

    impl SubmissionReader for FailingReader {
        fn list_submissions(
            &self,
            _form_type: Option<FormType>,
        ) -> RepositoryResult<Vec<Submission>> {
            Err(RepositoryError::NotFound)
        }

        fn get_submission(
            &self,
            _form_type: FormType,
            _id: SubmissionId,
        ) -> RepositoryResult<Option<Submission>> {
            Err(RepositoryError::NotFound)
        }
    }

    #[test]
    fn snapshot_fetches_and_sorts_newest_first() {
        let repo = TestRepository::with_submissions(vec![
            passport(1, 1, SubmissionStatus::Pending),
            passport(2, 3, SubmissionStatus::Pending),
            passport(3, 2, SubmissionStatus::Pending),
        ]);
        let store = SubmissionStore::new();

        let snapshot = store.snapshot(&repo).unwrap();
        let ids: Vec<i32> = snapshot.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(!store.is_dirty());
    }

    #[test]
    fn failed_fetch_keeps_previous_snapshot_and_dirty_flag() {
        let repo = TestRepository::with_submissions(vec![passport(1, 1, SubmissionStatus::Pending)]);
        let store = SubmissionStore::new();
        store.snapshot(&repo).unwrap();

        store.mark_dirty();
        assert_eq!(
            store.fetch_all(&FailingReader).unwrap_err(),
            ServiceError::Internal
        );
        assert!(store.is_dirty());
        assert_eq!(store.read_guard().len(), 1);
    }

    #[test]
    fn stale_refetch_cannot_revert_local_approval() {
        let repo = TestRepository::with_submissions(vec![passport(1, 1, SubmissionStatus::Pending)]);
        let store = SubmissionStore::new();
        store.snapshot(&repo).unwrap();

        let approved_at = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        store.patch_approved(FormType::Passport, SubmissionId::new(1).unwrap(), approved_at);

        // The repository still holds the pending row with no updated_at.
        store.mark_dirty();
        let snapshot = store.snapshot(&repo).unwrap();
        assert_eq!(snapshot[0].status, SubmissionStatus::Approved);
        assert_eq!(snapshot[0].updated_at, Some(approved_at));
    }

    #[test]
    fn newer_remote_row_replaces_local_copy() {
        let mut remote = passport(1, 1, SubmissionStatus::Approved);
        remote.updated_at = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(9, 0, 0);
        let repo = TestRepository::with_submissions(vec![remote]);

        let store = SubmissionStore::new();
        {
            let mut guard = store.write_guard();
            guard.push(passport(1, 1, SubmissionStatus::Pending));
        }
        store.fetch_all(&repo).unwrap();

        let snapshot = store.read_guard().clone();
        assert_eq!(snapshot[0].status, SubmissionStatus::Approved);
    }
}

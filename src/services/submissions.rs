//! Submission review operations: fetching a single record and approving it.

use chrono::Utc;

use crate::domain::submission::Submission;
use crate::domain::types::{FormType, SubmissionId};
use crate::notify::{ChangeBus, ChangeEvent, ChangeKind};
use crate::repository::{SubmissionReader, SubmissionWriter};

use super::store::SubmissionStore;
use super::{ServiceError, ServiceResult};

/// What happened when a clerk pressed "approve".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproveOutcome {
    Approved,
    AlreadyApproved,
}

/// Load one submission for the detail page.
pub fn get_submission<R>(
    form_type: FormType,
    id: SubmissionId,
    repo: &R,
) -> ServiceResult<Submission>
where
    R: SubmissionReader,
{
    match repo.get_submission(form_type, id) {
        Ok(Some(submission)) => Ok(submission),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load submission: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Approve a pending submission.
///
/// Approving twice is a no-op: the second call reports `AlreadyApproved`
/// without touching the database, the cache, or the change bus. On success
/// the cached copy is patched in place so the dashboard reflects the new
/// status without a full re-fetch.
pub fn approve<R>(
    form_type: FormType,
    id: SubmissionId,
    repo: &R,
    store: &SubmissionStore,
    bus: &ChangeBus,
) -> ServiceResult<ApproveOutcome>
where
    R: SubmissionReader + SubmissionWriter,
{
    let submission = get_submission(form_type, id, repo)?;
    if submission.is_approved() {
        return Ok(ApproveOutcome::AlreadyApproved);
    }

    let approved_at = Utc::now().naive_utc();
    match repo.approve_submission(form_type, id, approved_at) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to approve submission: {e}");
            return Err(ServiceError::Internal);
        }
    }

    store.patch_approved(form_type, id, approved_at);
    bus.emit(ChangeEvent {
        table: form_type.as_str(),
        kind: ChangeKind::Update,
    });
    Ok(ApproveOutcome::Approved)
}

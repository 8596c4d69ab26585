//! Category listing and creation for the blog console.

use chrono::Utc;

use crate::domain::category::{Category, NewCategory};
use crate::forms::categories::AddCategoryFormPayload;
use crate::notify::{ChangeBus, ChangeEvent, ChangeKind};
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// All categories ordered by name.
pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })
}

/// Persist a new category. Name validation already happened when the form
/// payload was built, so an empty name can never reach the repository.
pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    repo: &R,
    bus: &ChangeBus,
) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    let new_category = NewCategory {
        name: payload.name,
        created_at: Utc::now().naive_utc(),
    };
    repo.create_category(&new_category).map_err(|e| {
        log::error!("Failed to create category: {e}");
        ServiceError::Internal
    })?;

    bus.emit(ChangeEvent {
        table: "categories",
        kind: ChangeKind::Insert,
    });
    Ok(())
}

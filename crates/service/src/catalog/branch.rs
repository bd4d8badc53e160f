use models::audit::{self, Actor, Write};
use models::branch;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;
use uuid::Uuid;

use super::require;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default)]
pub struct NewBranch {
    pub branch_name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct BranchUpdate {
    pub branch_name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
}

pub async fn create_branch(db: &DatabaseConnection, actor: &Actor, input: NewBranch) -> Result<branch::Model, ServiceError> {
    let model = branch::Model::new(&input.branch_name, input.description, input.logo_url, input.website_url, actor)?;
    let created = model.into_active_set().insert(db).await?;
    info!(branch_id = %created.id, "branch_created");
    Ok(created)
}

pub async fn get_branch(db: &DatabaseConnection, id: Uuid) -> Result<branch::Model, ServiceError> {
    require::<branch::Entity, _>(db, "Branch", id).await
}

pub async fn update_branch(db: &DatabaseConnection, actor: &Actor, id: Uuid, input: BranchUpdate) -> Result<branch::Model, ServiceError> {
    let mut current = get_branch(db, id).await?;
    if let Some(name) = input.branch_name {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("branch name must not be blank".into()));
        }
        current.branch_name = name.to_string();
    }
    if input.description.is_some() { current.description = input.description; }
    if input.logo_url.is_some() { current.logo_url = input.logo_url; }
    if input.website_url.is_some() { current.website_url = input.website_url; }
    let stamped = audit::stamp(current, Write::Update, actor, audit::now());
    Ok(stamped.into_active_set().update(db).await?)
}

/// Soft delete (`false`) or restore (`true`).
pub async fn set_branch_active(db: &DatabaseConnection, actor: &Actor, id: Uuid, active: bool) -> Result<branch::Model, ServiceError> {
    let mut current = get_branch(db, id).await?;
    audit::set_active(&mut current, active);
    let stamped = audit::stamp(current, Write::Update, actor, audit::now());
    Ok(stamped.into_active_set().update(db).await?)
}

pub async fn list_active_branches(db: &DatabaseConnection) -> Result<Vec<branch::Model>, ServiceError> {
    Ok(branch::Entity::find()
        .filter(branch::Column::IsActive.eq(true))
        .order_by_asc(branch::Column::BranchName)
        .all(db)
        .await?)
}

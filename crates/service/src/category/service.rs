use std::collections::HashMap;
use std::sync::Arc;

use models::audit::{self, Actor, Write};
use models::category;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{CategoryView, CreateCategory, UpdateCategory};
use super::repository::CategoryRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination, Sort};

/// Category business service independent of web framework
pub struct CategoryService<R: CategoryRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CategoryRepository + ?Sized> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create an active category.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::audit::Actor;
    /// use service::category::{CategoryService, CreateCategory, repository::mock::InMemoryCategoryRepository};
    /// let svc = CategoryService::new(Arc::new(InMemoryCategoryRepository::default()));
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// let input = CreateCategory { name: "Rau xanh".into(), ..Default::default() };
    /// let view = rt.block_on(svc.create(&Actor::system(), input)).unwrap();
    /// assert!(view.is_active);
    /// assert_eq!(view.created_by.as_deref(), Some("SYSTEM"));
    /// ```
    #[instrument(skip(self, input), fields(actor = %actor, name = %input.name))]
    pub async fn create(&self, actor: &Actor, input: CreateCategory) -> Result<CategoryView, ServiceError> {
        let name = category::validate_name(&input.name)?;
        if self.repo.find_active_by_name(&name).await?.is_some() {
            warn!("duplicate category name");
            return Err(ServiceError::conflict(format!("Category with name '{}' already exists", name)));
        }
        let parent = match input.parent_id {
            Some(pid) => Some(self.require_parent(pid).await?),
            None => None,
        };
        let model = category::Model::new(&name, input.description, input.parent_id, input.display_order, actor)?;
        let saved = self.repo.save(model).await?;
        info!(category_id = %saved.id, "category_created");
        Ok(CategoryView::from_model(saved, parent.map(|p| p.name)))
    }

    /// Fetch by id, including inactive rows.
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryView, ServiceError> {
        let found = self.require(id).await?;
        self.to_view(found).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, pagination: Pagination, sort: Sort) -> Result<Page<CategoryView>, ServiceError> {
        let pagination = pagination.clamped();
        let (items, total) = self.repo.find_page(pagination, sort).await?;
        let items = self.to_views(items).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn list_active(&self) -> Result<Vec<CategoryView>, ServiceError> {
        let rows = self.repo.find_active().await?;
        self.to_views(rows).await
    }

    /// Exact, case-insensitive match among active categories.
    pub async fn get_by_name(&self, name: &str) -> Result<CategoryView, ServiceError> {
        let found = self
            .repo
            .find_active_by_name(name.trim())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category not found with name: {}", name)))?;
        self.to_view(found).await
    }

    /// Case-insensitive substring search among active categories. Order is unspecified.
    pub async fn search(&self, fragment: &str) -> Result<Vec<CategoryView>, ServiceError> {
        let rows = self.repo.search_active_by_name(fragment).await?;
        self.to_views(rows).await
    }

    /// Apply the present fields of `input`. A blank name is ignored.
    #[instrument(skip(self, input), fields(actor = %actor, category_id = %id))]
    pub async fn update(&self, actor: &Actor, id: Uuid, input: UpdateCategory) -> Result<CategoryView, ServiceError> {
        let mut current = self.require(id).await?;

        if let Some(raw) = input.name.as_deref().filter(|n| !n.trim().is_empty()) {
            let name = category::validate_name(raw)?;
            if name.to_lowercase() != current.name.to_lowercase() {
                if let Some(other) = self.repo.find_active_by_name(&name).await? {
                    if other.id != id {
                        warn!("duplicate category name");
                        return Err(ServiceError::conflict(format!("Category with name '{}' already exists", name)));
                    }
                }
            }
            current.name = name;
        }
        if let Some(description) = input.description {
            category::validate_description(&description)?;
            current.description = Some(description);
        }
        if let Some(pid) = input.parent_id {
            if pid == id {
                return Err(ServiceError::Validation("A category cannot be its own parent".into()));
            }
            self.require_parent(pid).await?;
            current.parent_id = Some(pid);
        }
        if let Some(order) = input.display_order {
            current.display_order = order;
        }

        let stamped = audit::stamp(current, Write::Update, actor, audit::now());
        let saved = self.repo.save(stamped).await?;
        info!("category_updated");
        self.to_view(saved).await
    }

    /// Soft delete.
    #[instrument(skip(self), fields(actor = %actor))]
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), ServiceError> {
        self.set_active(actor, id, false).await?;
        info!(category_id = %id, "category_deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(actor = %actor))]
    pub async fn activate(&self, actor: &Actor, id: Uuid) -> Result<CategoryView, ServiceError> {
        let saved = self.set_active(actor, id, true).await?;
        self.to_view(saved).await
    }

    #[instrument(skip(self), fields(actor = %actor))]
    pub async fn deactivate(&self, actor: &Actor, id: Uuid) -> Result<CategoryView, ServiceError> {
        let saved = self.set_active(actor, id, false).await?;
        self.to_view(saved).await
    }

    pub async fn exists_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.repo.exists_by_id(id).await
    }

    /// Only active categories count.
    pub async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(self.repo.find_active_by_name(name.trim()).await?.is_some())
    }

    pub async fn count_active(&self) -> Result<u64, ServiceError> {
        self.repo.count_active().await
    }

    async fn set_active(&self, actor: &Actor, id: Uuid, active: bool) -> Result<category::Model, ServiceError> {
        let mut current = self.require(id).await?;
        if !audit::set_active(&mut current, active) {
            info!(category_id = %id, active, "is_active unchanged");
        }
        let stamped = audit::stamp(current, Write::Update, actor, audit::now());
        self.repo.save(stamped).await
    }

    async fn require(&self, id: Uuid) -> Result<category::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Category", id))
    }

    async fn require_parent(&self, id: Uuid) -> Result<category::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Parent category not found with id: {}", id)))
    }

    async fn to_view(&self, model: category::Model) -> Result<CategoryView, ServiceError> {
        let parent_name = match model.parent_id {
            Some(pid) => self.repo.find_by_id(pid).await?.map(|p| p.name),
            None => None,
        };
        Ok(CategoryView::from_model(model, parent_name))
    }

    async fn to_views(&self, models: Vec<category::Model>) -> Result<Vec<CategoryView>, ServiceError> {
        let mut parent_ids: Vec<Uuid> = models.iter().filter_map(|m| m.parent_id).collect();
        parent_ids.sort_unstable();
        parent_ids.dedup();
        let parents: HashMap<Uuid, String> = self
            .repo
            .find_by_ids(&parent_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        Ok(models
            .into_iter()
            .map(|m| {
                let parent_name = m.parent_id.and_then(|pid| parents.get(&pid).cloned());
                CategoryView::from_model(m, parent_name)
            })
            .collect())
    }
}

use async_trait::async_trait;
use models::category;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{Pagination, Sort};

/// Storage abstraction for categories.
///
/// Name lookups are case-insensitive and only consider active rows.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<category::Model>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<category::Model>, ServiceError>;
    /// One page in the requested order, plus the total row count.
    async fn find_page(&self, pagination: Pagination, sort: Sort) -> Result<(Vec<category::Model>, u64), ServiceError>;
    /// Insert or update by id. Creation audit columns of an existing row are preserved.
    async fn save(&self, category: category::Model) -> Result<category::Model, ServiceError>;
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn find_active_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError>;
    async fn search_active_by_name(&self, fragment: &str) -> Result<Vec<category::Model>, ServiceError>;
    async fn find_active(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn count_active(&self) -> Result<u64, ServiceError>;
}

/// In-memory repository for tests and local runs without PostgreSQL
pub mod mock {
    use super::*;
    use std::cmp::Ordering;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    use crate::pagination::{Direction, SortField};

    #[derive(Default)]
    pub struct InMemoryCategoryRepository {
        rows: RwLock<HashMap<Uuid, category::Model>>,
    }

    fn compare(a: &category::Model, b: &category::Model, sort: Sort) -> Ordering {
        let ord = match sort.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::DisplayOrder => a.display_order.cmp(&b.display_order),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let ord = match sort.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        ord.then_with(|| a.id.cmp(&b.id))
    }

    #[async_trait]
    impl CategoryRepository for InMemoryCategoryRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<category::Model>, ServiceError> {
            let rows = self.rows.read().await;
            Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
        }

        async fn find_all(&self) -> Result<Vec<category::Model>, ServiceError> {
            Ok(self.rows.read().await.values().cloned().collect())
        }

        async fn find_page(&self, pagination: Pagination, sort: Sort) -> Result<(Vec<category::Model>, u64), ServiceError> {
            let (idx, per) = pagination.normalize();
            let mut all: Vec<_> = self.rows.read().await.values().cloned().collect();
            all.sort_by(|a, b| compare(a, b, sort));
            let total = all.len() as u64;
            let items = all.into_iter().skip((idx * per) as usize).take(per as usize).collect();
            Ok((items, total))
        }

        async fn save(&self, mut category: category::Model) -> Result<category::Model, ServiceError> {
            let mut rows = self.rows.write().await;
            if let Some(existing) = rows.get(&category.id) {
                category.created_at = existing.created_at;
                category.created_by = existing.created_by.clone();
            }
            rows.insert(category.id, category.clone());
            Ok(category)
        }

        async fn exists_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
            Ok(self.rows.read().await.contains_key(&id))
        }

        async fn find_active_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
            let needle = name.to_lowercase();
            let rows = self.rows.read().await;
            let mut hits: Vec<_> = rows.values().filter(|c| c.is_active && c.name.to_lowercase() == needle).collect();
            hits.sort_by_key(|c| c.created_at);
            Ok(hits.first().map(|c| (*c).clone()))
        }

        async fn search_active_by_name(&self, fragment: &str) -> Result<Vec<category::Model>, ServiceError> {
            let needle = fragment.to_lowercase();
            let rows = self.rows.read().await;
            Ok(rows.values().filter(|c| c.is_active && c.name.to_lowercase().contains(&needle)).cloned().collect())
        }

        async fn find_active(&self) -> Result<Vec<category::Model>, ServiceError> {
            Ok(self.rows.read().await.values().filter(|c| c.is_active).cloned().collect())
        }

        async fn count_active(&self) -> Result<u64, ServiceError> {
            Ok(self.rows.read().await.values().filter(|c| c.is_active).count() as u64)
        }
    }
}

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auditor::{AuditorResolver, SystemAuditor};
use service::category::repo::seaorm::SeaOrmCategoryRepository;
use service::category::repository::{mock::InMemoryCategoryRepository, CategoryRepository};
use service::category::CategoryService;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub categories: Arc<CategoryService<dyn CategoryRepository>>,
    pub auditor: Arc<dyn AuditorResolver>,
    pub default_page_size: u32,
    /// Present when backed by PostgreSQL; probed by `/health`.
    pub db: Option<DatabaseConnection>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CategoryRepository>, auditor: Arc<dyn AuditorResolver>, default_page_size: u32) -> Self {
        Self { categories: Arc::new(CategoryService::new(repo)), auditor, default_page_size, db: None }
    }

    pub fn from_database(db: DatabaseConnection, cfg: &configs::AppConfig) -> Self {
        let repo: Arc<dyn CategoryRepository> = Arc::new(SeaOrmCategoryRepository::new(db.clone()));
        let auditor: Arc<dyn AuditorResolver> = Arc::new(SystemAuditor::new(cfg.audit.system_actor.clone()));
        Self { db: Some(db), ..Self::new(repo, auditor, cfg.catalog.default_page_size) }
    }

    /// Non-persistent state over the in-memory repository.
    pub fn in_memory() -> Self {
        let cfg = configs::AppConfig::default();
        Self::new(
            Arc::new(InMemoryCategoryRepository::default()),
            Arc::new(SystemAuditor::new(cfg.audit.system_actor)),
            cfg.catalog.default_page_size,
        )
    }
}

use models::category::{self, Column, Entity};
use sea_orm::sea_query::{BinOper, Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::category::repository::CategoryRepository;
use crate::errors::ServiceError;
use crate::pagination::{Direction, Pagination, Sort, SortField};

/// PostgreSQL-backed category store.
///
/// Name predicates compare `lower(name)` against `lower($1)` so both sides fold
/// under the same database collation and hit the `idx_category_name_lower` and
/// `idx_category_name_trgm` indexes. Case-insensitive matching of non-ASCII
/// names needs a UTF-8 `LC_CTYPE`.
pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn lower_name() -> Expr {
    Expr::expr(Func::lower(Expr::col(Column::Name)))
}

fn lower_value(value: String) -> SimpleExpr {
    Func::lower(Expr::val(value)).into()
}

/// Escape LIKE metacharacters so user input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn sort_column(field: SortField) -> Column {
    match field {
        SortField::Name => Column::Name,
        SortField::DisplayOrder => Column::DisplayOrder,
        SortField::CreatedAt => Column::CreatedAt,
        SortField::UpdatedAt => Column::UpdatedAt,
    }
}

#[async_trait::async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<category::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Entity::find().filter(Column::Id.is_in(ids.iter().copied())).all(&self.db).await?)
    }

    async fn find_all(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(Entity::find().all(&self.db).await?)
    }

    async fn find_page(&self, pagination: Pagination, sort: Sort) -> Result<(Vec<category::Model>, u64), ServiceError> {
        let (idx, per) = pagination.normalize();
        let order = match sort.direction {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        };
        let paginator = Entity::find()
            .order_by(sort_column(sort.field), order)
            .order_by(Column::Id, Order::Asc)
            .paginate(&self.db, per);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(idx).await?;
        Ok((items, total))
    }

    async fn save(&self, category: category::Model) -> Result<category::Model, ServiceError> {
        let saved = Entity::insert(category.into_active_set())
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::Name,
                        Column::Description,
                        Column::ParentId,
                        Column::DisplayOrder,
                        Column::UpdatedAt,
                        Column::UpdatedBy,
                        Column::IsActive,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;
        Ok(saved)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let n = Entity::find().filter(Column::Id.eq(id)).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
        let found = Entity::find()
            .filter(Column::IsActive.eq(true))
            .filter(lower_name().eq(lower_value(name.to_string())))
            .order_by_asc(Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn search_active_by_name(&self, fragment: &str) -> Result<Vec<category::Model>, ServiceError> {
        let pattern = format!("%{}%", escape_like(fragment));
        let found = Entity::find()
            .filter(Column::IsActive.eq(true))
            .filter(lower_name().binary(BinOper::Like, lower_value(pattern)))
            .all(&self.db)
            .await?;
        Ok(found)
    }

    async fn find_active(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(Entity::find().filter(Column::IsActive.eq(true)).all(&self.db).await?)
    }

    async fn count_active(&self) -> Result<u64, ServiceError> {
        Ok(Entity::find().filter(Column::IsActive.eq(true)).count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::audit::{self, Actor, Write};

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("rau"), "rau");
    }

    #[tokio::test]
    async fn upsert_preserves_creation_columns() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmCategoryRepository::new(db);

        let name = format!("Upsert {}", Uuid::new_v4());
        let created = repo.save(category::Model::new(&name, None, None, None, &Actor::new("seed"))?).await?;

        let mut changed = created.clone();
        changed.display_order = 9;
        changed.created_by = Some("intruder".into());
        let changed = audit::stamp(changed, Write::Update, &Actor::system(), audit::now());
        let saved = repo.save(changed).await?;

        assert_eq!(saved.display_order, 9);
        assert_eq!(saved.created_by.as_deref(), Some("seed"));
        assert_eq!(saved.created_at, created.created_at);
        assert!(saved.updated_at > created.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn name_queries_are_case_insensitive_and_literal() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmCategoryRepository::new(db);
        let tag = Uuid::new_v4().simple().to_string();

        let a = repo.save(category::Model::new(&format!("Rau {tag} 100%"), None, None, None, &Actor::system())?).await?;
        let _b = repo.save(category::Model::new(&format!("Rau {tag} 1000"), None, None, None, &Actor::system())?).await?;

        let exact = repo.find_active_by_name(&format!("RAU {} 100%", tag.to_uppercase())).await?;
        assert_eq!(exact.map(|c| c.id), Some(a.id));

        let hits = repo.search_active_by_name(&format!("{tag} 100%")).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, a.id);

        let page = repo.find_page(Pagination::new(0, 5), Sort::default()).await?;
        assert!(page.1 >= 2);
        assert!(page.0.len() <= 5);
        Ok(())
    }

    #[tokio::test]
    async fn vietnamese_names_match_as_written() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmCategoryRepository::new(db);
        let tag = Uuid::new_v4().simple().to_string();
        let name = format!("Đồ uống {tag}");

        let saved = repo.save(category::Model::new(&name, None, None, None, &Actor::system())?).await?;

        let exact = repo.find_active_by_name(&name).await?;
        assert_eq!(exact.map(|c| c.id), Some(saved.id));

        let hits = repo.search_active_by_name(&format!("uống {tag}")).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, saved.id);
        Ok(())
    }
}

use companyflow_core::models::{
    CreateLevelRequest, Level, ListLevelsRequest, Paginated, UpdateLevelRequest,
};
use companyflow_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::entity::{DeleteMode, Entity, EntityStore, StoreOptions};
use crate::db::query::{ChangeSet, FilterBuilder, InsertSet};

impl Entity for Level {
    const TABLE: &'static str = "levels";
    const LABEL: &'static str = "level";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company_id",
        "name",
        "hierarchy_level",
        "min_salary",
        "max_salary",
        "description",
        "status",
        "created_at",
        "updated_at",
    ];
    const SEARCH_COLUMNS: &'static [&'static str] = &["name"];
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["company_id", "name", "hierarchy_level", "status"];
}

#[derive(Clone)]
pub struct LevelRepository {
    store: EntityStore<Level>,
}

impl LevelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_options(pool, StoreOptions::default())
    }

    pub fn with_options(pool: PgPool, options: StoreOptions) -> Self {
        Self {
            store: EntityStore::with_options(pool, options),
        }
    }

    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_level(
        &self,
        company_id: Uuid,
        request: CreateLevelRequest,
    ) -> Result<Level, AppError> {
        let values = InsertSet::tenant(company_id)
            .push("name", &request.name)
            .push("hierarchy_level", &request.hierarchy_level)
            .push_opt("min_salary", request.min_salary.as_ref())
            .push_opt("max_salary", request.max_salary.as_ref())
            .push("description", &request.description)
            .push("status", &request.status);

        let level = self.store.insert(values).await?;
        tracing::info!(level_id = %level.id, "level created");
        Ok(level)
    }

    pub async fn get_level(&self, company_id: Uuid, id: Uuid) -> Result<Level, AppError> {
        self.store.find_by_id(company_id, id).await
    }

    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn list_levels(
        &self,
        company_id: Uuid,
        request: &ListLevelsRequest,
    ) -> Result<Paginated<Level>, AppError> {
        let filter = FilterBuilder::tenant("company_id", company_id)
            .eq("status", request.status.as_ref())
            .search(Level::SEARCH_COLUMNS, request.search.as_deref())
            .build();

        self.store.list(filter, request.page).await
    }

    /// Salaries are nullable: `null` clears a bound.
    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn update_level(
        &self,
        company_id: Uuid,
        id: Uuid,
        request: &UpdateLevelRequest,
    ) -> Result<Level, AppError> {
        let changes = ChangeSet::new()
            .text("name", &request.name)
            .value("hierarchy_level", &request.hierarchy_level)
            .nullable("min_salary", &request.min_salary)
            .nullable("max_salary", &request.max_salary)
            .text("description", &request.description)
            .value("status", &request.status);

        self.store.update(company_id, id, changes).await
    }

    pub async fn delete_level(
        &self,
        company_id: Uuid,
        id: Uuid,
        mode: DeleteMode,
    ) -> Result<(), AppError> {
        self.store.delete(company_id, id, mode).await?;
        tracing::info!(level_id = %id, ?mode, "level deleted");
        Ok(())
    }
}

use companyflow_core::models::{
    CreateDesignationRequest, Designation, ListDesignationsRequest, Paginated,
    UpdateDesignationRequest,
};
use companyflow_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::entity::{DeleteMode, Entity, EntityStore, StoreOptions};
use crate::db::query::{ChangeSet, FilterBuilder, InsertSet};

impl Entity for Designation {
    const TABLE: &'static str = "designations";
    const LABEL: &'static str = "designation";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company_id",
        "name",
        "description",
        "level_id",
        "department_id",
        "status",
        "created_at",
        "updated_at",
    ];
    const SEARCH_COLUMNS: &'static [&'static str] = &["name"];
    const REQUIRED_COLUMNS: &'static [&'static str] = &["company_id", "name", "status"];
}

#[derive(Clone)]
pub struct DesignationRepository {
    store: EntityStore<Designation>,
}

impl DesignationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_options(pool, StoreOptions::default())
    }

    pub fn with_options(pool: PgPool, options: StoreOptions) -> Self {
        Self {
            store: EntityStore::with_options(pool, options),
        }
    }

    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_designation(
        &self,
        company_id: Uuid,
        request: CreateDesignationRequest,
    ) -> Result<Designation, AppError> {
        let values = InsertSet::tenant(company_id)
            .push("name", &request.name)
            .push("description", &request.description)
            .push_opt("level_id", request.level_id.as_ref())
            .push_opt("department_id", request.department_id.as_ref())
            .push("status", &request.status);

        let designation = self.store.insert(values).await?;
        tracing::info!(designation_id = %designation.id, "designation created");
        Ok(designation)
    }

    pub async fn get_designation(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Designation, AppError> {
        self.store.find_by_id(company_id, id).await
    }

    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn list_designations(
        &self,
        company_id: Uuid,
        request: &ListDesignationsRequest,
    ) -> Result<Paginated<Designation>, AppError> {
        let filter = FilterBuilder::tenant("company_id", company_id)
            .eq("status", request.status.as_ref())
            .eq("department_id", request.department_id.as_ref())
            .eq("level_id", request.level_id.as_ref())
            .search(Designation::SEARCH_COLUMNS, request.search.as_deref())
            .build();

        self.store.list(filter, request.page).await
    }

    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn update_designation(
        &self,
        company_id: Uuid,
        id: Uuid,
        request: &UpdateDesignationRequest,
    ) -> Result<Designation, AppError> {
        let changes = ChangeSet::new()
            .text("name", &request.name)
            .text("description", &request.description)
            .nullable("level_id", &request.level_id)
            .nullable("department_id", &request.department_id)
            .value("status", &request.status);

        self.store.update(company_id, id, changes).await
    }

    pub async fn delete_designation(
        &self,
        company_id: Uuid,
        id: Uuid,
        mode: DeleteMode,
    ) -> Result<(), AppError> {
        self.store.delete(company_id, id, mode).await?;
        tracing::info!(designation_id = %id, ?mode, "designation deleted");
        Ok(())
    }
}

use companyflow_core::models::{
    CreateDepartmentRequest, Department, ListDepartmentsRequest, Paginated,
    UpdateDepartmentRequest,
};
use companyflow_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::entity::{DeleteMode, Entity, EntityStore, StoreOptions};
use crate::db::query::{ChangeSet, FilterBuilder, InsertSet};

impl Entity for Department {
    const TABLE: &'static str = "departments";
    const LABEL: &'static str = "department";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company_id",
        "name",
        "code",
        "description",
        "parent_department_id",
        "cost_center",
        "status",
        "created_at",
        "updated_at",
    ];
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "code"];
    const REQUIRED_COLUMNS: &'static [&'static str] = &["company_id", "name", "status"];
}

/// Repository for managing departments
#[derive(Clone)]
pub struct DepartmentRepository {
    store: EntityStore<Department>,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_options(pool, StoreOptions::default())
    }

    pub fn with_options(pool: PgPool, options: StoreOptions) -> Self {
        Self {
            store: EntityStore::with_options(pool, options),
        }
    }

    /// Create a department. A missing parent fails with `InvalidReference`.
    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn create_department(
        &self,
        company_id: Uuid,
        request: CreateDepartmentRequest,
    ) -> Result<Department, AppError> {
        let values = InsertSet::tenant(company_id)
            .push("name", &request.name)
            .push("code", &request.code)
            .push("description", &request.description)
            .push_opt("parent_department_id", request.parent_department_id.as_ref())
            .push("cost_center", &request.cost_center)
            .push("status", &request.status);

        let department = self.store.insert(values).await?;
        tracing::info!(department_id = %department.id, "department created");
        Ok(department)
    }

    pub async fn get_department(&self, company_id: Uuid, id: Uuid) -> Result<Department, AppError> {
        self.store.find_by_id(company_id, id).await
    }

    /// List departments; `search` matches name or code
    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn list_departments(
        &self,
        company_id: Uuid,
        request: &ListDepartmentsRequest,
    ) -> Result<Paginated<Department>, AppError> {
        let filter = FilterBuilder::tenant("company_id", company_id)
            .eq("status", request.status.as_ref())
            .search(Department::SEARCH_COLUMNS, request.search.as_deref())
            .build();

        self.store.list(filter, request.page).await
    }

    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn update_department(
        &self,
        company_id: Uuid,
        id: Uuid,
        request: &UpdateDepartmentRequest,
    ) -> Result<Department, AppError> {
        let changes = ChangeSet::new()
            .text("name", &request.name)
            .text("code", &request.code)
            .text("description", &request.description)
            .nullable("parent_department_id", &request.parent_department_id)
            .text("cost_center", &request.cost_center)
            .value("status", &request.status);

        self.store.update(company_id, id, changes).await
    }

    pub async fn delete_department(
        &self,
        company_id: Uuid,
        id: Uuid,
        mode: DeleteMode,
    ) -> Result<(), AppError> {
        self.store.delete(company_id, id, mode).await?;
        tracing::info!(department_id = %id, ?mode, "department deleted");
        Ok(())
    }
}

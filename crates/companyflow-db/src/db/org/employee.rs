use companyflow_core::models::{
    CreateEmployeeRequest, Employee, ListEmployeesRequest, Paginated, UpdateEmployeeRequest,
};
use companyflow_core::{AppError, PasswordHasher};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::entity::{DeleteMode, Entity, EntityStore, StoreOptions};
use crate::db::query::{ChangeSet, FilterBuilder, InsertSet, ToParam};

const INVALID_CREDENTIALS: &str = "invalid email or password";

impl Entity for Employee {
    const TABLE: &'static str = "employees";
    const LABEL: &'static str = "employee";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company_id",
        "email",
        "password_hash",
        "phone",
        "first_name",
        "last_name",
        "employee_code",
        "department_id",
        "designation_id",
        "level_id",
        "manager_id",
        "role_id",
        "status",
        "employment_type",
        "hire_date",
        "termination_date",
        "date_of_birth",
        "gender",
        "address",
        "emergency_contact_name",
        "emergency_contact_phone",
        "profile_image_url",
        "last_login_at",
        "created_at",
        "updated_at",
    ];
    const SEARCH_COLUMNS: &'static [&'static str] = &["first_name", "last_name", "email"];
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "company_id",
        "email",
        "password_hash",
        "phone",
        "first_name",
        "last_name",
        "employee_code",
        "role_id",
        "status",
        "employment_type",
        "hire_date",
    ];
}

/// Repository for managing employees
#[derive(Clone)]
pub struct EmployeeRepository {
    store: EntityStore<Employee>,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_options(pool, StoreOptions::default())
    }

    pub fn with_options(pool: PgPool, options: StoreOptions) -> Self {
        Self {
            store: EntityStore::with_options(pool, options),
        }
    }

    /// Create an employee, hashing `request.password` first. Duplicate email
    /// or employee code within the company fails with `Conflict`.
    #[tracing::instrument(skip(self, request, hasher), fields(company_id = %company_id))]
    pub async fn create_employee(
        &self,
        company_id: Uuid,
        request: CreateEmployeeRequest,
        hasher: &dyn PasswordHasher,
    ) -> Result<Employee, AppError> {
        let password_hash = hasher.hash(&request.password)?;

        let values = InsertSet::tenant(company_id)
            .push("email", &request.email)
            .push("password_hash", &password_hash)
            .push("phone", &request.phone)
            .push("first_name", &request.first_name)
            .push("last_name", &request.last_name)
            .push("employee_code", &request.employee_code)
            .push_opt("department_id", request.department_id.as_ref())
            .push_opt("designation_id", request.designation_id.as_ref())
            .push_opt("level_id", request.level_id.as_ref())
            .push_opt("manager_id", request.manager_id.as_ref())
            .push("role_id", &request.role_id)
            .push("status", &request.status)
            .push("employment_type", &request.employment_type)
            .push("hire_date", &request.hire_date)
            .push_opt("date_of_birth", request.date_of_birth.as_ref())
            .push("gender", &request.gender)
            .push("address", &request.address)
            .push("emergency_contact_name", &request.emergency_contact_name)
            .push("emergency_contact_phone", &request.emergency_contact_phone)
            .push("profile_image_url", &request.profile_image_url);

        let employee = self.store.insert(values).await?;
        tracing::info!(employee_id = %employee.id, "employee created");
        Ok(employee)
    }

    pub async fn get_employee(&self, company_id: Uuid, id: Uuid) -> Result<Employee, AppError> {
        self.store.find_by_id(company_id, id).await
    }

    /// Look up an employee by email within one company
    pub async fn get_employee_by_email(
        &self,
        company_id: Uuid,
        email: &str,
    ) -> Result<Employee, AppError> {
        self.store
            .find_one_by(company_id, "email", email.to_string().to_param())
            .await?
            .ok_or_else(|| AppError::not_found(Employee::LABEL))
    }

    /// Verify credentials and stamp `last_login_at`.
    ///
    /// An unknown email and a wrong password fail with the same
    /// `Unauthorized` error.
    #[tracing::instrument(skip(self, password, hasher), fields(company_id = %company_id))]
    pub async fn authenticate_employee(
        &self,
        company_id: Uuid,
        email: &str,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<Employee, AppError> {
        let employee = match self
            .store
            .find_one_by(company_id, "email", email.to_string().to_param())
            .await?
        {
            Some(employee) => employee,
            None => {
                tracing::debug!("login rejected: unknown email");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !hasher.verify(&employee.password_hash, password)? {
            tracing::debug!(employee_id = %employee.id, "login rejected: wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        self.store
            .touch_column_now(company_id, employee.id, "last_login_at")
            .await
    }

    /// List employees; `search` matches first name, last name or email
    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn list_employees(
        &self,
        company_id: Uuid,
        request: &ListEmployeesRequest,
    ) -> Result<Paginated<Employee>, AppError> {
        let filter = FilterBuilder::tenant("company_id", company_id)
            .eq("status", request.status.as_ref())
            .eq("department_id", request.department_id.as_ref())
            .eq("manager_id", request.manager_id.as_ref())
            .eq("employment_type", request.employment_type.as_ref())
            .search(Employee::SEARCH_COLUMNS, request.search.as_deref())
            .build();

        self.store.list(filter, request.page).await
    }

    #[tracing::instrument(skip(self, request), fields(company_id = %company_id))]
    pub async fn update_employee(
        &self,
        company_id: Uuid,
        id: Uuid,
        request: &UpdateEmployeeRequest,
    ) -> Result<Employee, AppError> {
        let changes = ChangeSet::new()
            .text("phone", &request.phone)
            .text("first_name", &request.first_name)
            .text("last_name", &request.last_name)
            .nullable("date_of_birth", &request.date_of_birth)
            .nullable("department_id", &request.department_id)
            .nullable("designation_id", &request.designation_id)
            .nullable("level_id", &request.level_id)
            .nullable("manager_id", &request.manager_id)
            .value("status", &request.status)
            .value("employment_type", &request.employment_type)
            .text("gender", &request.gender)
            .text("address", &request.address)
            .text("emergency_contact_name", &request.emergency_contact_name)
            .text("emergency_contact_phone", &request.emergency_contact_phone)
            .text("profile_image_url", &request.profile_image_url)
            .nullable("termination_date", &request.termination_date);

        self.store.update(company_id, id, changes).await
    }

    pub async fn delete_employee(
        &self,
        company_id: Uuid,
        id: Uuid,
        mode: DeleteMode,
    ) -> Result<(), AppError> {
        self.store.delete(company_id, id, mode).await?;
        tracing::info!(employee_id = %id, ?mode, "employee deleted");
        Ok(())
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{EmployeeStatus, EmploymentType, PageRequest, Patch};

/// Employee row.
///
/// `email` and `employee_code` are unique per company. `manager_id` points at
/// another employee and is not checked for cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub employee_code: String,
    pub department_id: Option<Uuid>,
    pub designation_id: Option<Uuid>,
    pub level_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub role_id: Uuid,
    pub status: EmployeeStatus,
    pub employment_type: EmploymentType,
    pub hire_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub profile_image_url: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employee view without credentials
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub employee_code: String,
    pub department_id: Option<Uuid>,
    pub designation_id: Option<Uuid>,
    pub level_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub role_id: Uuid,
    pub status: EmployeeStatus,
    pub employment_type: EmploymentType,
    pub hire_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub profile_image_url: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        EmployeeResponse {
            id: employee.id,
            company_id: employee.company_id,
            email: employee.email,
            phone: employee.phone,
            first_name: employee.first_name,
            last_name: employee.last_name,
            employee_code: employee.employee_code,
            department_id: employee.department_id,
            designation_id: employee.designation_id,
            level_id: employee.level_id,
            manager_id: employee.manager_id,
            role_id: employee.role_id,
            status: employee.status,
            employment_type: employee.employment_type,
            hire_date: employee.hire_date,
            termination_date: employee.termination_date,
            date_of_birth: employee.date_of_birth,
            gender: employee.gender,
            address: employee.address,
            emergency_contact_name: employee.emergency_contact_name,
            emergency_contact_phone: employee.emergency_contact_phone,
            profile_image_url: employee.profile_image_url,
            last_login_at: employee.last_login_at,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// Request DTO for creating an employee. `password` is plaintext and is
/// hashed before insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 50, message = "Employee code is required"))]
    pub employee_code: String,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    #[serde(default)]
    pub designation_id: Option<Uuid>,
    #[serde(default)]
    pub level_id: Option<Uuid>,
    #[serde(default)]
    pub manager_id: Option<Uuid>,
    pub role_id: Uuid,
    pub status: EmployeeStatus,
    pub employment_type: EmploymentType,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact_name: String,
    #[serde(default)]
    pub emergency_contact_phone: String,
    #[serde(default)]
    pub profile_image_url: String,
}

/// Request DTO for updating an employee.
///
/// Identity fields (`email`, `employee_code`, `role_id`, `hire_date`) are
/// fixed after creation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub first_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub last_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub date_of_birth: Patch<NaiveDate>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub department_id: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub designation_id: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub level_id: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub manager_id: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub status: Patch<EmployeeStatus>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub employment_type: Patch<EmploymentType>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub gender: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub address: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub emergency_contact_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub emergency_contact_phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub profile_image_url: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub termination_date: Patch<NaiveDate>,
}

/// List filters; `search` matches first name, last name or email
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListEmployeesRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageRequest,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    #[serde(default)]
    pub manager_id: Option<Uuid>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub search: Option<String>,
}

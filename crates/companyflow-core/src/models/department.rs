use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{ActiveStatus, PageRequest, Patch};
use crate::validation::{patch_code, patch_cost_center, patch_name};

/// Department row. Departments form a tree through `parent_department_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Department {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub code: String,
    pub description: String,
    pub parent_department_id: Option<Uuid>,
    pub cost_center: String,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub code: String,
    pub description: String,
    pub parent_department_id: Option<Uuid>,
    pub cost_center: String,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        DepartmentResponse {
            id: department.id,
            company_id: department.company_id,
            name: department.name,
            code: department.code,
            description: department.description,
            parent_department_id: department.parent_department_id,
            cost_center: department.cost_center,
            status: department.status,
            created_at: department.created_at,
            updated_at: department.updated_at,
        }
    }
}

/// Request DTO for creating a department
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Department name must be between 2 and 255 characters"
    ))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Code must be at most 50 characters"))]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_department_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(max = 100, message = "Cost center must be at most 100 characters"))]
    pub cost_center: String,
    pub status: ActiveStatus,
}

/// Request DTO for updating a department
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_name"))]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_code"))]
    pub code: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub parent_department_id: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_cost_center"))]
    pub cost_center: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub status: Patch<ActiveStatus>,
}

/// List filters; `search` matches name or code
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListDepartmentsRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageRequest,
    #[serde(default)]
    pub status: Option<ActiveStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{ActiveStatus, PageRequest, Patch};
use crate::validation::patch_name;

/// Designation (job title), optionally attached to a level and a department
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Designation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: String,
    pub level_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignationResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: String,
    pub level_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Designation> for DesignationResponse {
    fn from(designation: Designation) -> Self {
        DesignationResponse {
            id: designation.id,
            company_id: designation.company_id,
            name: designation.name,
            description: designation.description,
            level_id: designation.level_id,
            department_id: designation.department_id,
            status: designation.status,
            created_at: designation.created_at,
            updated_at: designation.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDesignationRequest {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Designation name must be between 2 and 255 characters"
    ))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level_id: Option<Uuid>,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    pub status: ActiveStatus,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateDesignationRequest {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_name"))]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub level_id: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub department_id: Patch<Uuid>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub status: Patch<ActiveStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListDesignationsRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageRequest,
    #[serde(default)]
    pub status: Option<ActiveStatus>,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    #[serde(default)]
    pub level_id: Option<Uuid>,
    #[serde(default)]
    pub search: Option<String>,
}

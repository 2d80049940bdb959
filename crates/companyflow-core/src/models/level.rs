use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{ActiveStatus, PageRequest, Patch};
use crate::validation::{patch_hierarchy_level, patch_name, patch_salary};

/// Job level. Lower `hierarchy_level` values are more junior.
///
/// `min_salary <= max_salary` is not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Level {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub hierarchy_level: i32,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub description: String,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub hierarchy_level: i32,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub description: String,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Level> for LevelResponse {
    fn from(level: Level) -> Self {
        LevelResponse {
            id: level.id,
            company_id: level.company_id,
            name: level.name,
            hierarchy_level: level.hierarchy_level,
            min_salary: level.min_salary,
            max_salary: level.max_salary,
            description: level.description,
            status: level.status,
            created_at: level.created_at,
            updated_at: level.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLevelRequest {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Level name must be between 2 and 255 characters"
    ))]
    pub name: String,
    #[validate(range(min = 1, message = "Hierarchy level must be at least 1"))]
    pub hierarchy_level: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Salary must be non-negative"))]
    pub min_salary: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Salary must be non-negative"))]
    pub max_salary: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ActiveStatus,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateLevelRequest {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_name"))]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_hierarchy_level"))]
    pub hierarchy_level: Patch<i32>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_salary"))]
    pub min_salary: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[validate(custom(function = "patch_salary"))]
    pub max_salary: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub status: Patch<ActiveStatus>,
}

/// List filters; `search` matches name
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListLevelsRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageRequest,
    #[serde(default)]
    pub status: Option<ActiveStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_level_validation() {
        let request: CreateLevelRequest = serde_json::from_str(
            r#"{"name": "Senior", "hierarchy_level": 3, "min_salary": 90000.0}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.status, ActiveStatus::Active);
        assert!(request.max_salary.is_none());

        let request: CreateLevelRequest =
            serde_json::from_str(r#"{"name": "Senior", "hierarchy_level": 0}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_level_clears_salary_with_null() {
        let request: UpdateLevelRequest =
            serde_json::from_str(r#"{"max_salary": null, "min_salary": 1000.5}"#).unwrap();
        assert!(request.max_salary.is_null());
        assert_eq!(request.min_salary, Patch::Value(1000.5));
        assert!(request.hierarchy_level.is_unset());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_level_rejects_negative_salary() {
        let request: UpdateLevelRequest =
            serde_json::from_str(r#"{"min_salary": -5.0}"#).unwrap();
        assert!(request.validate().is_err());
    }
}

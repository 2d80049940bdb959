//! Level and designation repository integration tests.
//!
//! Run with: `cargo test -p companyflow-db --test level_designation_test -- --ignored`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use companyflow_core::models::{
    ActiveStatus, CreateDesignationRequest, ListDesignationsRequest, ListLevelsRequest, Patch,
    UpdateDesignationRequest, UpdateLevelRequest,
};
use companyflow_core::AppError;
use companyflow_db::{DeleteMode, DepartmentRepository, DesignationRepository, LevelRepository};
use helpers::{department_request, level_request, seed_tenant, setup_test_db};
use uuid::Uuid;

fn designation_request(
    name: &str,
    level_id: Option<Uuid>,
    department_id: Option<Uuid>,
) -> CreateDesignationRequest {
    CreateDesignationRequest {
        name: name.to_string(),
        description: String::new(),
        level_id,
        department_id,
        status: ActiveStatus::Active,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_level_salary_band_can_be_cleared() {
    let db = setup_test_db().await;
    let tenant = seed_tenant(&db.pool, "Acme").await;
    let repo = LevelRepository::new(db.pool());

    let mut request = level_request("Senior", 3);
    request.min_salary = Some(90_000.0);
    request.max_salary = Some(140_000.0);
    let created = repo.create_level(tenant.company_id, request).await.unwrap();
    assert_eq!(created.min_salary, Some(90_000.0));
    assert_eq!(created.hierarchy_level, 3);

    let updated = repo
        .update_level(
            tenant.company_id,
            created.id,
            &UpdateLevelRequest {
                max_salary: Patch::Null,
                hierarchy_level: Patch::Value(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.max_salary, None);
    assert_eq!(updated.min_salary, Some(90_000.0));
    assert_eq!(updated.hierarchy_level, 4);
    assert_eq!(updated.name, "Senior");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_level_check_violation_is_invalid_input() {
    let db = setup_test_db().await;
    let tenant = seed_tenant(&db.pool, "Acme").await;
    let repo = LevelRepository::new(db.pool());

    let err = repo
        .create_level(tenant.company_id, level_request("Zero", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)), "got {:?}", err);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_levels_search_and_soft_delete() {
    let db = setup_test_db().await;
    let tenant = seed_tenant(&db.pool, "Acme").await;
    let repo = LevelRepository::new(db.pool());

    let junior = repo
        .create_level(tenant.company_id, level_request("Junior", 1))
        .await
        .unwrap();
    repo.create_level(tenant.company_id, level_request("Principal", 5))
        .await
        .unwrap();

    let found = repo
        .list_levels(
            tenant.company_id,
            &ListLevelsRequest {
                search: Some("  jun  ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.data[0].id, junior.id);

    repo.delete_level(tenant.company_id, junior.id, DeleteMode::Soft)
        .await
        .unwrap();

    let active = repo
        .list_levels(
            tenant.company_id,
            &ListLevelsRequest {
                status: Some(ActiveStatus::Active),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(active.total, 1);
    assert_eq!(active.data[0].name, "Principal");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_designation_filters_by_department_and_level() {
    let db = setup_test_db().await;
    let tenant = seed_tenant(&db.pool, "Acme").await;
    let departments = DepartmentRepository::new(db.pool());
    let levels = LevelRepository::new(db.pool());
    let repo = DesignationRepository::new(db.pool());

    let engineering = departments
        .create_department(tenant.company_id, department_request("Engineering", "ENG"))
        .await
        .unwrap();
    let senior = levels
        .create_level(tenant.company_id, level_request("Senior", 3))
        .await
        .unwrap();

    repo.create_designation(
        tenant.company_id,
        designation_request("Staff Engineer", Some(senior.id), Some(engineering.id)),
    )
    .await
    .unwrap();
    repo.create_designation(
        tenant.company_id,
        designation_request("Engineer", None, Some(engineering.id)),
    )
    .await
    .unwrap();
    repo.create_designation(tenant.company_id, designation_request("Recruiter", None, None))
        .await
        .unwrap();

    let in_engineering = repo
        .list_designations(
            tenant.company_id,
            &ListDesignationsRequest {
                department_id: Some(engineering.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(in_engineering.total, 2);

    let senior_in_engineering = repo
        .list_designations(
            tenant.company_id,
            &ListDesignationsRequest {
                department_id: Some(engineering.id),
                level_id: Some(senior.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(senior_in_engineering.total, 1);
    assert_eq!(senior_in_engineering.data[0].name, "Staff Engineer");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_designation_references_are_tri_state() {
    let db = setup_test_db().await;
    let tenant = seed_tenant(&db.pool, "Acme").await;
    let levels = LevelRepository::new(db.pool());
    let repo = DesignationRepository::new(db.pool());

    let level = levels
        .create_level(tenant.company_id, level_request("Mid", 2))
        .await
        .unwrap();
    let created = repo
        .create_designation(tenant.company_id, designation_request("Analyst", Some(level.id), None))
        .await
        .unwrap();

    let renamed = repo
        .update_designation(
            tenant.company_id,
            created.id,
            &UpdateDesignationRequest {
                name: Patch::Value("Senior Analyst".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.level_id, Some(level.id));

    let cleared = repo
        .update_designation(
            tenant.company_id,
            created.id,
            &UpdateDesignationRequest {
                level_id: Patch::Null,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.level_id, None);
    assert_eq!(cleared.name, "Senior Analyst");

    let err = repo
        .update_designation(
            tenant.company_id,
            created.id,
            &UpdateDesignationRequest {
                department_id: Patch::Value(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReference(_)), "got {:?}", err);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_designation_is_not_found() {
    let db = setup_test_db().await;
    let tenant = seed_tenant(&db.pool, "Acme").await;
    let repo = DesignationRepository::new(db.pool());

    let err = repo
        .update_designation(
            tenant.company_id,
            Uuid::new_v4(),
            &UpdateDesignationRequest {
                status: Patch::Value(ActiveStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
}

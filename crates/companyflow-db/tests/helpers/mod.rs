//! Test helpers: isolated Postgres per test with migrations applied.
//!
//! Run from workspace root: `cargo test -p companyflow-db -- --ignored`.
//! Requires Docker for testcontainers (Postgres).

#![allow(dead_code)]

use chrono::NaiveDate;
use companyflow_core::models::{
    ActiveStatus, CreateDepartmentRequest, CreateEmployeeRequest, CreateLevelRequest,
    EmployeeStatus, EmploymentType,
};
use companyflow_db::setup::run_migrations;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;

/// Database under test plus the container keeping it alive.
pub struct TestDb {
    pub pool: PgPool,
    pub _container: ContainerAsync<Postgres>,
}

impl TestDb {
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

/// A seeded tenant: one company and one role employees can reference.
#[derive(Debug, Clone, Copy)]
pub struct Tenant {
    pub company_id: Uuid,
    pub role_id: Uuid,
}

pub async fn setup_test_db() -> TestDb {
    let container = Postgres::default()
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start Postgres container");

    let host = container.get_host().await.expect("Failed to resolve host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to resolve Postgres port");
    let connection_string = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&connection_string)
        .await
        .expect("Failed to connect to test database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    TestDb {
        pool,
        _container: container,
    }
}

/// Insert a company and a role for it
pub async fn seed_tenant(pool: &PgPool, name: &str) -> Tenant {
    let company_id: Uuid =
        sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .expect("Failed to insert company");

    let role_id: Uuid = sqlx::query_scalar(
        "INSERT INTO roles (company_id, name) VALUES ($1, 'member') RETURNING id",
    )
    .bind(company_id)
    .fetch_one(pool)
    .await
    .expect("Failed to insert role");

    Tenant {
        company_id,
        role_id,
    }
}

pub fn department_request(name: &str, code: &str) -> CreateDepartmentRequest {
    CreateDepartmentRequest {
        name: name.to_string(),
        code: code.to_string(),
        description: String::new(),
        parent_department_id: None,
        cost_center: String::new(),
        status: ActiveStatus::Active,
    }
}

pub fn level_request(name: &str, hierarchy_level: i32) -> CreateLevelRequest {
    CreateLevelRequest {
        name: name.to_string(),
        hierarchy_level,
        min_salary: None,
        max_salary: None,
        description: String::new(),
        status: ActiveStatus::Active,
    }
}

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn employee_request(tenant: Tenant, email: &str, code: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        phone: "+1 555 0100".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        employee_code: code.to_string(),
        department_id: None,
        designation_id: None,
        level_id: None,
        manager_id: None,
        role_id: tenant.role_id,
        status: EmployeeStatus::Active,
        employment_type: EmploymentType::FullTime,
        hire_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        date_of_birth: None,
        gender: String::new(),
        address: String::new(),
        emergency_contact_name: String::new(),
        emergency_contact_phone: String::new(),
        profile_image_url: String::new(),
    }
}

//! Descriptor-driven CRUD shared by the organisation repositories.
//!
//! An [`Entity`] names its table and columns; [`EntityStore`] turns that into
//! insert, point lookup, filtered pagination, partial update and soft/hard
//! delete. Every statement is single-table and runs under the store's
//! [`QueryGuard`].

use std::marker::PhantomData;
use std::time::Duration;

use companyflow_core::models::{PageRequest, Paginated};
use companyflow_core::{AppError, Config, LookupPolicy};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::guard::QueryGuard;
use super::query::{BindParam, ChangeSet, Filter, InsertSet, SqlParam};

pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Human label used in not-found messages
    const LABEL: &'static str;
    const COLUMNS: &'static [&'static str];
    const SEARCH_COLUMNS: &'static [&'static str];
    const REQUIRED_COLUMNS: &'static [&'static str];
    const INACTIVE_STATUS: &'static str = "inactive";

    fn select_list() -> String {
        Self::COLUMNS.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Flip `status` to the entity's inactive value
    #[default]
    Soft,
    /// Remove the row. Referencing rows are not touched.
    Hard,
}

impl DeleteMode {
    pub fn from_hard_flag(hard: bool) -> Self {
        if hard {
            DeleteMode::Hard
        } else {
            DeleteMode::Soft
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub guard: QueryGuard,
    pub lookup_policy: LookupPolicy,
}

impl StoreOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            guard: QueryGuard::new(config.query_timeout()),
            lookup_policy: config.lookup_policy,
        }
    }

    pub fn with_lookup_policy(mut self, lookup_policy: LookupPolicy) -> Self {
        self.lookup_policy = lookup_policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.guard = QueryGuard::new(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.guard = self.guard.with_cancellation(token);
        self
    }
}

/// Predicate targeting one row under the lookup policy, numbered from
/// `first_index`
fn row_predicate(
    policy: LookupPolicy,
    first_index: usize,
    company_id: Uuid,
    id: Uuid,
) -> (String, Vec<SqlParam>) {
    match policy {
        LookupPolicy::Global => (
            format!("id = ${}", first_index),
            vec![SqlParam::Uuid(Some(id))],
        ),
        LookupPolicy::TenantScoped => (
            format!("id = ${} AND company_id = ${}", first_index, first_index + 1),
            vec![SqlParam::Uuid(Some(id)), SqlParam::Uuid(Some(company_id))],
        ),
    }
}

pub struct EntityStore<E> {
    pool: PgPool,
    options: StoreOptions,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityStore<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            options: self.options.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new(pool: PgPool) -> Self {
        Self::with_options(pool, StoreOptions::default())
    }

    pub fn with_options(pool: PgPool, options: StoreOptions) -> Self {
        Self {
            pool,
            options,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    #[tracing::instrument(skip(self, values), fields(db.table = E::TABLE, db.operation = "insert", db.company_id = ?values.company_id()))]
    pub async fn insert(&self, values: InsertSet) -> Result<E, AppError> {
        values.ensure_required(E::REQUIRED_COLUMNS)?;

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            E::TABLE,
            values.columns_sql(),
            values.placeholders_sql(),
            E::select_list()
        );
        let params = values.into_params();

        self.options
            .guard
            .run("insert", async {
                sqlx::query_as::<Postgres, E>(&sql)
                    .bind_all(params)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(AppError::from)
            })
            .await
    }

    #[tracing::instrument(skip(self), fields(db.table = E::TABLE, db.operation = "select", db.record_id = %id))]
    pub async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<E, AppError> {
        let (predicate, params) = row_predicate(self.options.lookup_policy, 1, company_id, id);
        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            E::select_list(),
            E::TABLE,
            predicate
        );

        let row = self
            .options
            .guard
            .run("select", async {
                sqlx::query_as::<Postgres, E>(&sql)
                    .bind_all(params)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        row.ok_or_else(|| AppError::not_found(E::LABEL))
    }

    /// Tenant-scoped lookup by an arbitrary column, first match only
    #[tracing::instrument(skip(self, value), fields(db.table = E::TABLE, db.operation = "select", db.column = column))]
    pub async fn find_one_by(
        &self,
        company_id: Uuid,
        column: &'static str,
        value: SqlParam,
    ) -> Result<Option<E>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE company_id = $1 AND {} = $2 LIMIT 1",
            E::select_list(),
            E::TABLE,
            column
        );

        self.options
            .guard
            .run("select", async {
                sqlx::query_as::<Postgres, E>(&sql)
                    .bind(company_id)
                    .bind_param(value)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(AppError::from)
            })
            .await
    }

    /// Count matching rows, then fetch one page of them newest first
    #[tracing::instrument(skip(self, filter), fields(db.table = E::TABLE, db.operation = "select", db.page = page.page, db.page_size = page.page_size))]
    pub async fn list(&self, filter: Filter, page: PageRequest) -> Result<Paginated<E>, AppError> {
        page.ensure_valid()?;

        let where_sql = filter.where_sql();
        let count_sql = format!("SELECT COUNT(*) FROM {} {}", E::TABLE, where_sql);
        let limit_index = filter.next_placeholder();
        let rows_sql = format!(
            "SELECT {} FROM {} {} ORDER BY created_at DESC, id DESC LIMIT ${} OFFSET ${}",
            E::select_list(),
            E::TABLE,
            where_sql,
            limit_index,
            limit_index + 1
        );

        let (total, rows) = self
            .options
            .guard
            .run("list", async {
                let total: i64 = filter
                    .bind(sqlx::query_scalar::<Postgres, i64>(&count_sql))
                    .fetch_one(&self.pool)
                    .await?;

                let rows: Vec<E> = filter
                    .bind(sqlx::query_as::<Postgres, E>(&rows_sql))
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(&self.pool)
                    .await?;

                Ok::<_, AppError>((total, rows))
            })
            .await?;

        tracing::debug!(total, returned = rows.len(), "listed rows");
        Ok(Paginated::new(rows, total, page))
    }

    /// Apply a partial update in one `UPDATE ... RETURNING` statement.
    /// `updated_at` advances even when `changes` is empty.
    #[tracing::instrument(skip(self, changes), fields(db.table = E::TABLE, db.operation = "update", db.record_id = %id, db.columns = ?changes.columns()))]
    pub async fn update(
        &self,
        company_id: Uuid,
        id: Uuid,
        changes: ChangeSet,
    ) -> Result<E, AppError> {
        let set_clause = changes.set_clause(1);
        let (predicate, scope_params) = row_predicate(
            self.options.lookup_policy,
            changes.len() + 1,
            company_id,
            id,
        );
        let sql = format!(
            "UPDATE {} SET {} WHERE {} RETURNING {}",
            E::TABLE,
            set_clause,
            predicate,
            E::select_list()
        );
        let params: Vec<SqlParam> = changes.into_params().into_iter().chain(scope_params).collect();

        let row = self
            .options
            .guard
            .run("update", async {
                sqlx::query_as::<Postgres, E>(&sql)
                    .bind_all(params)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        row.ok_or_else(|| AppError::not_found(E::LABEL))
    }

    #[tracing::instrument(skip(self), fields(db.table = E::TABLE, db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, company_id: Uuid, id: Uuid, mode: DeleteMode) -> Result<(), AppError> {
        let policy = self.options.lookup_policy;
        let (sql, params) = match mode {
            DeleteMode::Soft => {
                let (predicate, scope_params) = row_predicate(policy, 2, company_id, id);
                let mut params = vec![SqlParam::Text(Some(E::INACTIVE_STATUS.to_string()))];
                params.extend(scope_params);
                (
                    format!(
                        "UPDATE {} SET status = $1, updated_at = NOW() WHERE {}",
                        E::TABLE,
                        predicate
                    ),
                    params,
                )
            }
            DeleteMode::Hard => {
                let (predicate, scope_params) = row_predicate(policy, 1, company_id, id);
                (
                    format!("DELETE FROM {} WHERE {}", E::TABLE, predicate),
                    scope_params,
                )
            }
        };

        let rows_affected = self
            .options
            .guard
            .run("delete", async {
                sqlx::query::<Postgres>(&sql)
                    .bind_all(params)
                    .execute(&self.pool)
                    .await
                    .map(|result| result.rows_affected())
                    .map_err(AppError::from)
            })
            .await?;

        if rows_affected == 0 {
            return Err(AppError::not_found(E::LABEL));
        }

        Ok(())
    }

    /// Set a timestamp column to `NOW()` without touching `updated_at`
    #[tracing::instrument(skip(self), fields(db.table = E::TABLE, db.operation = "update", db.record_id = %id))]
    pub async fn touch_column_now(
        &self,
        company_id: Uuid,
        id: Uuid,
        column: &'static str,
    ) -> Result<E, AppError> {
        let (predicate, params) = row_predicate(self.options.lookup_policy, 1, company_id, id);
        let sql = format!(
            "UPDATE {} SET {} = NOW() WHERE {} RETURNING {}",
            E::TABLE,
            column,
            predicate,
            E::select_list()
        );

        let row = self
            .options
            .guard
            .run("update", async {
                sqlx::query_as::<Postgres, E>(&sql)
                    .bind_all(params)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(AppError::from)
            })
            .await?;

        row.ok_or_else(|| AppError::not_found(E::LABEL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_predicate_ignores_company() {
        let id = Uuid::new_v4();
        let (predicate, params) = row_predicate(LookupPolicy::Global, 1, Uuid::new_v4(), id);
        assert_eq!(predicate, "id = $1");
        assert_eq!(params, vec![SqlParam::Uuid(Some(id))]);
    }

    #[test]
    fn test_tenant_predicate_numbers_after_changes() {
        let id = Uuid::new_v4();
        let company = Uuid::new_v4();
        let (predicate, params) = row_predicate(LookupPolicy::TenantScoped, 4, company, id);
        assert_eq!(predicate, "id = $4 AND company_id = $5");
        assert_eq!(
            params,
            vec![SqlParam::Uuid(Some(id)), SqlParam::Uuid(Some(company))]
        );
    }

    #[test]
    fn test_delete_mode_from_flag() {
        assert_eq!(DeleteMode::from_hard_flag(true), DeleteMode::Hard);
        assert_eq!(DeleteMode::from_hard_flag(false), DeleteMode::Soft);
        assert_eq!(DeleteMode::default(), DeleteMode::Soft);
        let mode: DeleteMode = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(mode, DeleteMode::Hard);
    }

    #[test]
    fn test_options_from_config() {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/companyflow".to_string()),
            "DB_LOOKUP_SCOPE" => Some("tenant".to_string()),
            "DB_QUERY_TIMEOUT_SECONDS" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();
        let options = StoreOptions::from_config(&config);
        assert_eq!(options.lookup_policy, LookupPolicy::TenantScoped);
        assert_eq!(options.guard.timeout(), Duration::from_secs(3));
    }
}

//! WHERE clause assembly for list queries.
//!
//! Column names are compile-time constants; every caller-supplied value is a
//! bound parameter. The tenant predicate is always `$1`.

use uuid::Uuid;

use super::params::{BindParam, SqlParam, ToParam};

/// Escape LIKE metacharacters so the term matches as a literal substring
pub fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Debug, Clone)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    params: Vec<SqlParam>,
}

impl FilterBuilder {
    /// Start a filter scoped to one tenant
    pub fn tenant(column: &'static str, company_id: Uuid) -> Self {
        Self {
            conditions: vec![format!("{} = $1", column)],
            params: vec![SqlParam::Uuid(Some(company_id))],
        }
    }

    fn push_param(&mut self, param: SqlParam) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Exact match; `None` adds nothing
    pub fn eq<T: ToParam>(mut self, column: &'static str, value: Option<&T>) -> Self {
        if let Some(value) = value {
            let index = self.push_param(value.to_param());
            self.conditions.push(format!("{} = ${}", column, index));
        }
        self
    }

    /// Case-insensitive substring match over several columns, ORed together.
    /// All columns share a single bound `%term%` parameter.
    pub fn search(mut self, columns: &[&'static str], term: Option<&str>) -> Self {
        let term = match term.map(str::trim) {
            Some(term) if !term.is_empty() => term,
            _ => return self,
        };
        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(term));
        let index = self.push_param(SqlParam::Text(Some(pattern)));
        let branches: Vec<String> = columns
            .iter()
            .map(|column| format!("{} ILIKE ${}", column, index))
            .collect();
        self.conditions.push(format!("({})", branches.join(" OR ")));
        self
    }

    pub fn build(self) -> Filter {
        Filter {
            clause: self.conditions.join(" AND "),
            params: self.params,
        }
    }
}

/// A finished predicate and its ordered parameters
#[derive(Debug, Clone)]
pub struct Filter {
    clause: String,
    params: Vec<SqlParam>,
}

impl Filter {
    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn where_sql(&self) -> String {
        format!("WHERE {}", self.clause)
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Index of the first placeholder free for trailing parameters
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    pub fn bind<Q: BindParam>(&self, query: Q) -> Q {
        query.bind_all(self.params.iter().cloned())
    }
}

//! Column assignment sets for INSERT and partial UPDATE statements.

use companyflow_core::models::Patch;
use companyflow_core::AppError;
use uuid::Uuid;

use super::params::{SqlParam, ToParam};

/// The effective changes of a partial update.
///
/// Only changed columns are assigned, so the store keeps every other column
/// as it is within the same statement.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    assignments: Vec<(&'static str, SqlParam)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text merge: an empty string keeps the stored value, same as
    /// `Unset` and `Null`. A text column cannot be cleared through an update.
    pub fn text(mut self, column: &'static str, patch: &Patch<String>) -> Self {
        if let Patch::Value(value) = patch {
            if !value.is_empty() {
                self.assignments.push((column, value.to_param()));
            }
        }
        self
    }

    /// Non-nullable column: `Null` is treated like `Unset`
    pub fn value<T: ToParam>(mut self, column: &'static str, patch: &Patch<T>) -> Self {
        if let Patch::Value(value) = patch {
            self.assignments.push((column, value.to_param()));
        }
        self
    }

    /// Nullable column: `Null` clears, `Value` replaces, `Unset` keeps
    pub fn nullable<T: ToParam>(mut self, column: &'static str, patch: &Patch<T>) -> Self {
        match patch {
            Patch::Unset => {}
            Patch::Null => self.assignments.push((column, T::null_param())),
            Patch::Value(value) => self.assignments.push((column, value.to_param())),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    /// `updated_at = NOW()` followed by one `column = $n` per change,
    /// numbered from `first_index`
    pub fn set_clause(&self, first_index: usize) -> String {
        let mut clause = String::from("updated_at = NOW()");
        for (offset, (column, _)) in self.assignments.iter().enumerate() {
            clause.push_str(&format!(", {} = ${}", column, first_index + offset));
        }
        clause
    }

    pub fn into_params(self) -> Vec<SqlParam> {
        self.assignments.into_iter().map(|(_, param)| param).collect()
    }
}

/// Ordered column values for a create
#[derive(Debug, Clone)]
pub struct InsertSet {
    values: Vec<(&'static str, SqlParam)>,
}

impl InsertSet {
    /// Start with the owning tenant
    pub fn tenant(company_id: Uuid) -> Self {
        Self {
            values: vec![("company_id", company_id.to_param())],
        }
    }

    pub fn push<T: ToParam>(mut self, column: &'static str, value: &T) -> Self {
        self.values.push((column, value.to_param()));
        self
    }

    /// A nullable column; `None` binds NULL
    pub fn push_opt<T: ToParam>(mut self, column: &'static str, value: Option<&T>) -> Self {
        let param = match value {
            Some(value) => value.to_param(),
            None => T::null_param(),
        };
        self.values.push((column, param));
        self
    }

    pub fn company_id(&self) -> Option<Uuid> {
        self.values.iter().find_map(|(column, param)| match param {
            SqlParam::Uuid(id) if *column == "company_id" => *id,
            _ => None,
        })
    }

    /// Every required column must be present with a non-NULL value
    pub fn ensure_required(&self, required: &[&'static str]) -> Result<(), AppError> {
        for column in required {
            let present = self
                .values
                .iter()
                .any(|(name, param)| name == column && !param.is_null());
            if !present {
                return Err(AppError::InvalidInput(format!(
                    "missing required column {}",
                    column
                )));
            }
        }
        Ok(())
    }

    pub fn columns_sql(&self) -> String {
        self.values
            .iter()
            .map(|(column, _)| *column)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn placeholders_sql(&self) -> String {
        (1..=self.values.len())
            .map(|index| format!("${}", index))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn into_params(self) -> Vec<SqlParam> {
        self.values.into_iter().map(|(_, param)| param).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companyflow_core::models::ActiveStatus;

    #[test]
    fn test_status_only_update() {
        let changes = ChangeSet::new()
            .text("name", &Patch::Unset)
            .text("code", &Patch::Unset)
            .value("status", &Patch::Value(ActiveStatus::Inactive));

        assert_eq!(changes.columns(), vec!["status"]);
        assert_eq!(changes.set_clause(1), "updated_at = NOW(), status = $1");
        assert_eq!(
            changes.into_params(),
            vec![SqlParam::Text(Some("inactive".to_string()))]
        );
    }

    #[test]
    fn test_empty_update_still_touches_updated_at() {
        let changes = ChangeSet::new()
            .text("name", &Patch::Unset)
            .nullable::<Uuid>("parent_department_id", &Patch::Unset);
        assert!(changes.is_empty());
        assert_eq!(changes.set_clause(1), "updated_at = NOW()");
    }

    #[test]
    fn test_legacy_text_policy() {
        let changes = ChangeSet::new()
            .text("name", &Patch::Value(String::new()))
            .text("code", &Patch::Null)
            .text("description", &Patch::Value("Platform team".to_string()));
        assert_eq!(changes.columns(), vec!["description"]);
    }

    #[test]
    fn test_value_policy_ignores_null() {
        let changes = ChangeSet::new()
            .value::<i32>("hierarchy_level", &Patch::Null)
            .value("hierarchy_level", &Patch::Value(4));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.into_params(), vec![SqlParam::Int(Some(4))]);
    }

    #[test]
    fn test_nullable_reference_tri_state() {
        let parent = Uuid::new_v4();

        let keep = ChangeSet::new().nullable::<Uuid>("parent_department_id", &Patch::Unset);
        assert!(keep.is_empty());

        let clear = ChangeSet::new().nullable::<Uuid>("parent_department_id", &Patch::Null);
        assert_eq!(clear.clone().into_params(), vec![SqlParam::Uuid(None)]);
        assert_eq!(
            clear.set_clause(1),
            "updated_at = NOW(), parent_department_id = $1"
        );

        let set = ChangeSet::new().nullable("parent_department_id", &Patch::Value(parent));
        assert_eq!(set.into_params(), vec![SqlParam::Uuid(Some(parent))]);
    }

    #[test]
    fn test_set_clause_numbering_offset() {
        let changes = ChangeSet::new()
            .text("name", &Patch::Value("Ops".to_string()))
            .nullable("min_salary", &Patch::Value(10.0))
            .nullable::<f64>("max_salary", &Patch::Null);
        assert_eq!(
            changes.set_clause(3),
            "updated_at = NOW(), name = $3, min_salary = $4, max_salary = $5"
        );
    }

    #[test]
    fn test_insert_set_sql() {
        let company = Uuid::new_v4();
        let insert = InsertSet::tenant(company)
            .push("name", &"Engineering".to_string())
            .push_opt::<Uuid>("parent_department_id", None);
        assert_eq!(insert.columns_sql(), "company_id, name, parent_department_id");
        assert_eq!(insert.placeholders_sql(), "$1, $2, $3");
        assert_eq!(insert.company_id(), Some(company));
        assert!(insert.ensure_required(&["company_id", "name"]).is_ok());
    }

    #[test]
    fn test_insert_set_missing_required() {
        let insert = InsertSet::tenant(Uuid::new_v4()).push_opt::<String>("name", None);
        assert!(matches!(
            insert.ensure_required(&["company_id", "name"]),
            Err(AppError::InvalidInput(_))
        ));
        assert!(insert.ensure_required(&["status"]).is_err());
    }
}

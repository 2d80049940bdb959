//! Typed bind values for dynamically assembled statements.

use chrono::{DateTime, NaiveDate, Utc};
use companyflow_core::models::{ActiveStatus, EmployeeStatus, EmploymentType};
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::Postgres;
use uuid::Uuid;

/// One positional parameter. `None` binds SQL NULL with the variant's type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Uuid(Option<Uuid>),
    Text(Option<String>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Float(Option<f64>),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlParam {
    pub fn is_null(&self) -> bool {
        match self {
            SqlParam::Uuid(v) => v.is_none(),
            SqlParam::Text(v) => v.is_none(),
            SqlParam::Int(v) => v.is_none(),
            SqlParam::BigInt(v) => v.is_none(),
            SqlParam::Float(v) => v.is_none(),
            SqlParam::Date(v) => v.is_none(),
            SqlParam::Timestamp(v) => v.is_none(),
        }
    }
}

/// Values that can travel as a [`SqlParam`]
pub trait ToParam {
    fn to_param(&self) -> SqlParam;

    /// A typed NULL for this column type
    fn null_param() -> SqlParam;
}

impl ToParam for Uuid {
    fn to_param(&self) -> SqlParam {
        SqlParam::Uuid(Some(*self))
    }

    fn null_param() -> SqlParam {
        SqlParam::Uuid(None)
    }
}

impl ToParam for String {
    fn to_param(&self) -> SqlParam {
        SqlParam::Text(Some(self.clone()))
    }

    fn null_param() -> SqlParam {
        SqlParam::Text(None)
    }
}

impl ToParam for i32 {
    fn to_param(&self) -> SqlParam {
        SqlParam::Int(Some(*self))
    }

    fn null_param() -> SqlParam {
        SqlParam::Int(None)
    }
}

impl ToParam for i64 {
    fn to_param(&self) -> SqlParam {
        SqlParam::BigInt(Some(*self))
    }

    fn null_param() -> SqlParam {
        SqlParam::BigInt(None)
    }
}

impl ToParam for f64 {
    fn to_param(&self) -> SqlParam {
        SqlParam::Float(Some(*self))
    }

    fn null_param() -> SqlParam {
        SqlParam::Float(None)
    }
}

impl ToParam for NaiveDate {
    fn to_param(&self) -> SqlParam {
        SqlParam::Date(Some(*self))
    }

    fn null_param() -> SqlParam {
        SqlParam::Date(None)
    }
}

impl ToParam for DateTime<Utc> {
    fn to_param(&self) -> SqlParam {
        SqlParam::Timestamp(Some(*self))
    }

    fn null_param() -> SqlParam {
        SqlParam::Timestamp(None)
    }
}

macro_rules! text_enum_param {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ToParam for $ty {
                fn to_param(&self) -> SqlParam {
                    SqlParam::Text(Some(self.as_str().to_string()))
                }

                fn null_param() -> SqlParam {
                    SqlParam::Text(None)
                }
            }
        )+
    };
}

text_enum_param!(ActiveStatus, EmployeeStatus, EmploymentType);

/// Attach a [`SqlParam`] to a query builder as its next positional bind
pub trait BindParam: Sized {
    fn bind_param(self, param: SqlParam) -> Self;

    fn bind_all<I>(self, params: I) -> Self
    where
        I: IntoIterator<Item = SqlParam>,
    {
        params
            .into_iter()
            .fold(self, |query, param| query.bind_param(param))
    }
}

macro_rules! bind_param_impl {
    () => {
        fn bind_param(self, param: SqlParam) -> Self {
            match param {
                SqlParam::Uuid(v) => self.bind(v),
                SqlParam::Text(v) => self.bind(v),
                SqlParam::Int(v) => self.bind(v),
                SqlParam::BigInt(v) => self.bind(v),
                SqlParam::Float(v) => self.bind(v),
                SqlParam::Date(v) => self.bind(v),
                SqlParam::Timestamp(v) => self.bind(v),
            }
        }
    };
}

impl<'q> BindParam for Query<'q, Postgres, PgArguments> {
    bind_param_impl!();
}

impl<'q, O> BindParam for QueryAs<'q, Postgres, O, PgArguments> {
    bind_param_impl!();
}

impl<'q, O> BindParam for QueryScalar<'q, Postgres, O, PgArguments> {
    bind_param_impl!();
}
